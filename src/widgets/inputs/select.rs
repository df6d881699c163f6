use crate::core::value::Value;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::FieldBase;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    pub fn same(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Inline select cycled with Left/Right. Nothing is selected until the user
/// picks, so required selects can still fail validation.
pub struct SelectInput {
    base: FieldBase,
    options: Vec<SelectOption>,
    selected: Option<usize>,
    placeholder: String,
}

impl SelectInput {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self {
            base: FieldBase::new(key, label),
            options,
            selected: None,
            placeholder: "Select an option".to_string(),
        }
    }

    pub fn required(mut self) -> Self {
        self.base.set_required(true);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn selected_value(&self) -> Option<&str> {
        self.selected
            .and_then(|idx| self.options.get(idx))
            .map(|option| option.value.as_str())
    }

    fn cycle(&mut self, forward: bool) -> bool {
        let len = self.options.len();
        if len == 0 {
            return false;
        }
        self.selected = Some(match (self.selected, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(idx), true) => (idx + 1) % len,
            (Some(idx), false) => (idx + len - 1) % len,
        });
        true
    }
}

impl Drawable for SelectInput {
    fn key(&self) -> &str {
        self.base.key()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, focused: bool) -> DrawOutput {
        let current = self
            .selected
            .and_then(|idx| self.options.get(idx))
            .map(|option| Span::new(option.label.clone()))
            .unwrap_or_else(|| {
                Span::styled(
                    self.placeholder.clone(),
                    Style::new().color(Color::DarkGrey),
                )
            });
        let line = if focused {
            let arrow = Style::new().color(Color::Cyan);
            vec![
                Span::styled("‹ ", arrow),
                current,
                Span::styled(" ›", arrow),
            ]
        } else {
            vec![current]
        };
        DrawOutput {
            lines: vec![line],
            cursor: None,
        }
    }
}

impl Interactive for SelectInput {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if !key.modifiers.is_empty() {
            return InteractionResult::ignored();
        }
        let moved = match key.code {
            KeyCode::Right | KeyCode::Char(' ') => self.cycle(true),
            KeyCode::Left => self.cycle(false),
            _ => return InteractionResult::ignored(),
        };
        InteractionResult::from_edit(moved)
    }

    fn value(&self) -> Value {
        Value::Text(self.selected_value().unwrap_or_default().to_string())
    }

    /// Unknown values are appended as an extra option so seeded data survives.
    fn set_value(&mut self, value: Value) {
        let Some(text) = value.to_text_scalar() else {
            return;
        };
        if text.is_empty() {
            self.selected = None;
            return;
        }
        match self.options.iter().position(|option| option.value == text) {
            Some(idx) => self.selected = Some(idx),
            None => {
                self.options.push(SelectOption::same(text));
                self.selected = Some(self.options.len() - 1);
            }
        }
    }

    /// Keeps the selection when its value survives the new list.
    fn set_options(&mut self, options: Vec<SelectOption>) -> bool {
        let current = self.value();
        self.options = options;
        self.selected = None;
        self.set_value(current);
        true
    }

    fn is_required(&self) -> bool {
        self.base.is_required()
    }
}

#[cfg(test)]
mod tests {
    use super::{SelectInput, SelectOption};
    use crate::core::value::Value;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::traits::Interactive;

    fn levels() -> SelectInput {
        SelectInput::new(
            "level",
            "Level",
            vec![
                SelectOption::same("Beginner"),
                SelectOption::same("Expert"),
            ],
        )
    }

    #[test]
    fn starts_empty_and_cycles_both_ways() {
        let mut select = levels();
        assert_eq!(select.value(), Value::from(""));
        select.on_key(KeyEvent::plain(KeyCode::Left));
        assert_eq!(select.selected_value(), Some("Expert"));
        select.on_key(KeyEvent::plain(KeyCode::Right));
        assert_eq!(select.selected_value(), Some("Beginner"));
    }

    #[test]
    fn unknown_seeded_value_is_kept() {
        let mut select = levels();
        select.set_value(Value::from("Guru"));
        assert_eq!(select.selected_value(), Some("Guru"));
        assert_eq!(select.options().len(), 3);
    }

    #[test]
    fn set_options_keeps_surviving_selection() {
        let mut select = levels();
        select.set_value(Value::from("Expert"));
        assert!(select.set_options(vec![
            SelectOption::same("Expert"),
            SelectOption::same("Novice"),
        ]));
        assert_eq!(select.selected_value(), Some("Expert"));
    }
}
