use super::edit_buffer;
use crate::core::value::Value;
use crate::terminal::{CursorPos, KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::FieldBase;
use crate::widgets::text_edit::TextBuffer;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive};
use unicode_width::UnicodeWidthStr;

/// Multi-line text field. Alt+Enter inserts a line break; plain Enter is left
/// to the step so it still submits.
pub struct TextArea {
    base: FieldBase,
    buffer: TextBuffer,
    max_chars: Option<usize>,
    placeholder: Option<String>,
}

impl TextArea {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            base: FieldBase::new(key, label),
            buffer: TextBuffer::default(),
            max_chars: None,
            placeholder: None,
        }
    }

    pub fn with_max_chars(mut self, max: usize) -> Self {
        self.max_chars = Some(max);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn remaining(&self) -> Option<usize> {
        self.max_chars
            .map(|max| max.saturating_sub(self.buffer.len()))
    }
}

impl Drawable for TextArea {
    fn key(&self) -> &str {
        self.base.key()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, focused: bool) -> DrawOutput {
        if self.buffer.is_empty() {
            let line = match &self.placeholder {
                Some(placeholder) => vec![Span::styled(
                    placeholder.clone(),
                    Style::new().color(Color::DarkGrey),
                )],
                None => Vec::new(),
            };
            return DrawOutput {
                lines: vec![line],
                cursor: focused.then_some(CursorPos { col: 0, row: 0 }),
            };
        }

        let lines = self
            .buffer
            .as_str()
            .split('\n')
            .map(|line| vec![Span::new(line)])
            .collect();
        let cursor = focused.then(|| {
            let before = self.buffer.before_cursor();
            let row = before.matches('\n').count() as u16;
            let last = before.rsplit('\n').next().unwrap_or("");
            CursorPos {
                col: UnicodeWidthStr::width(last) as u16,
                row,
            }
        });
        DrawOutput { lines, cursor }
    }

    fn hint(&self) -> Option<String> {
        self.remaining()
            .map(|remaining| format!("{remaining} characters remaining"))
    }
}

impl Interactive for TextArea {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if key.code == KeyCode::Enter && key.modifiers.contains(KeyModifiers::ALT) {
            if self.max_chars.is_some_and(|max| self.buffer.len() >= max) {
                return InteractionResult::consumed();
            }
            self.buffer.insert('\n');
            return InteractionResult::changed();
        }
        edit_buffer(&mut self.buffer, key, self.max_chars)
    }

    fn text_buffer(&mut self) -> Option<&mut TextBuffer> {
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
}
