use crate::core::value::Value;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::FieldBase;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive};

pub struct Checkbox {
    base: FieldBase,
    checked: bool,
}

impl Checkbox {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            base: FieldBase::new(key, label),
            checked: false,
        }
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }
}

impl Drawable for Checkbox {
    fn key(&self) -> &str {
        self.base.key()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, focused: bool) -> DrawOutput {
        let (symbol, style) = match (self.checked, focused) {
            (true, _) => ("[✓]", Style::new().color(Color::Green)),
            (false, true) => ("[ ]", Style::new().color(Color::White)),
            (false, false) => ("[ ]", Style::new().color(Color::DarkGrey)),
        };
        DrawOutput {
            lines: vec![vec![Span::styled(symbol, style)]],
            cursor: None,
        }
    }
}

impl Interactive for Checkbox {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Char(' ') if key.modifiers.is_empty() => {
                self.checked = !self.checked;
                InteractionResult::changed()
            }
            _ => InteractionResult::ignored(),
        }
    }

    fn value(&self) -> Value {
        Value::Bool(self.checked)
    }

    fn set_value(&mut self, value: Value) {
        self.checked = match value {
            Value::Bool(flag) => flag,
            Value::Text(text) => matches!(text.to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
            _ => false,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::Checkbox;
    use crate::core::value::Value;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::traits::Interactive;

    #[test]
    fn space_toggles() {
        let mut checkbox = Checkbox::new("current", "I currently study here");
        assert!(checkbox.on_key(KeyEvent::plain(KeyCode::Char(' '))).changed);
        assert_eq!(checkbox.value(), Value::Bool(true));
        checkbox.on_key(KeyEvent::plain(KeyCode::Char(' ')));
        assert!(!checkbox.is_checked());
    }
}
