pub mod event;
pub mod terminal;

pub use event::{CursorPos, KeyCode, KeyEvent, KeyModifiers, TerminalEvent, TerminalSize};
pub use terminal::Terminal;
