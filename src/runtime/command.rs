use crate::terminal::KeyEvent;
use crate::widgets::traits::TextAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    Submit,
    Back,
    NextFocus,
    PrevFocus,
    InputKey(KeyEvent),
    TextAction(TextAction),
    AddEntry,
    RemoveEntry,
    NextEntry,
    PrevEntry,
    AddItem,
    RemoveItem,
    /// Stepper shortcut; zero-based step index.
    JumpTo(usize),
    Tick,
    Noop,
}
