pub mod checkbox;
pub mod select;
pub mod text;
pub mod textarea;

pub use checkbox::Checkbox;
pub use select::{SelectInput, SelectOption};
pub use text::TextInput;
pub use textarea::TextArea;

use crate::terminal::{KeyCode, KeyEvent};
use crate::widgets::text_edit::TextBuffer;
use crate::widgets::traits::InteractionResult;

/// Line-editing keys shared by the text widgets.
pub(crate) fn edit_buffer(
    buffer: &mut TextBuffer,
    key: KeyEvent,
    max_chars: Option<usize>,
) -> InteractionResult {
    if let Some(ch) = key.typed_char() {
        if max_chars.is_some_and(|max| buffer.len() >= max) {
            return InteractionResult::consumed();
        }
        buffer.insert(ch);
        return InteractionResult::changed();
    }
    match key.code {
        KeyCode::Backspace => InteractionResult::from_edit(buffer.backspace()),
        KeyCode::Delete => InteractionResult::from_edit(buffer.delete()),
        KeyCode::Left => {
            buffer.move_left();
            InteractionResult::consumed()
        }
        KeyCode::Right => {
            buffer.move_right();
            InteractionResult::consumed()
        }
        KeyCode::Home => {
            buffer.move_home();
            InteractionResult::consumed()
        }
        KeyCode::End => {
            buffer.move_end();
            InteractionResult::consumed()
        }
        _ => InteractionResult::ignored(),
    }
}
