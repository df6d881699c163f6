use super::edit_buffer;
use crate::core::value::Value;
use crate::terminal::{CursorPos, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::FieldBase;
use crate::widgets::text_edit::TextBuffer;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive};
use unicode_width::UnicodeWidthStr;

pub struct TextInput {
    base: FieldBase,
    buffer: TextBuffer,
    placeholder: Option<String>,
}

impl TextInput {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            base: FieldBase::new(key, label),
            buffer: TextBuffer::default(),
            placeholder: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.base.set_required(true);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }
}

impl Drawable for TextInput {
    fn key(&self) -> &str {
        self.base.key()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, focused: bool) -> DrawOutput {
        let span = match (&self.placeholder, self.buffer.is_empty()) {
            (Some(placeholder), true) => {
                Span::styled(placeholder.clone(), Style::new().color(Color::DarkGrey))
            }
            _ if self.base.is_disabled() => Span::styled(
                self.buffer.as_str(),
                Style::new().color(Color::DarkGrey).dim(),
            ),
            _ => Span::new(self.buffer.as_str()),
        };
        let cursor = (focused && !self.base.is_disabled()).then(|| CursorPos {
            col: UnicodeWidthStr::width(self.buffer.before_cursor()) as u16,
            row: 0,
        });
        DrawOutput {
            lines: vec![vec![span]],
            cursor,
        }
    }
}

impl Interactive for TextInput {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if self.base.is_disabled() {
            return InteractionResult::ignored();
        }
        edit_buffer(&mut self.buffer, key, None)
    }

    fn text_buffer(&mut self) -> Option<&mut TextBuffer> {
        if self.base.is_disabled() {
            return None;
        }
        Some(&mut self.buffer)
    }

    fn value(&self) -> Value {
        Value::Text(self.buffer.as_str().to_string())
    }

    fn set_value(&mut self, value: Value) {
        if let Some(text) = value.to_text_scalar() {
            self.buffer.set(text);
        }
    }

    fn is_required(&self) -> bool {
        self.base.is_required()
    }

    fn is_disabled(&self) -> bool {
        self.base.is_disabled()
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.base.set_disabled(disabled);
    }
}

#[cfg(test)]
mod tests {
    use super::TextInput;
    use crate::core::value::Value;
    use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
    use crate::widgets::traits::{Drawable, Interactive};

    fn typed(input: &mut TextInput, text: &str) {
        for ch in text.chars() {
            input.on_key(KeyEvent::plain(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn typing_reports_change_and_moves_cursor() {
        let mut input = TextInput::new("fullName", "Full Name");
        typed(&mut input, "Jane");
        assert_eq!(input.value(), Value::from("Jane"));
        let out = input.draw(true);
        assert_eq!(out.cursor.map(|c| c.col), Some(4));
    }

    #[test]
    fn ctrl_chars_are_not_inserted() {
        let mut input = TextInput::new("email", "Email");
        let result = input.on_key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL));
        assert!(!result.handled);
        assert_eq!(input.text(), "");
    }

    #[test]
    fn disabled_input_ignores_edits() {
        let mut input = TextInput::new("endDate", "End Date");
        input.set_value(Value::from("Present"));
        input.set_disabled(true);
        typed(&mut input, "x");
        assert_eq!(input.text(), "Present");
        assert!(input.draw(true).cursor.is_none());
    }
}
