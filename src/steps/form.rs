use crate::core::{FormRecord, Value};
use crate::state::FieldErrors;
use crate::terminal::{CursorPos, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::inputs::SelectOption;
use crate::widgets::traits::{DrawOutput, FieldWidget, InteractionResult, TextAction};
use unicode_width::UnicodeWidthStr;

/// A field edit the owning step should apply to its draft.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub key: String,
    pub value: Value,
}

/// Ordered field widgets with one focused field.
///
/// Disabled fields are skipped by focus cycling.
#[derive(Default)]
pub struct FormFields {
    fields: Vec<Box<dyn FieldWidget>>,
    focus: usize,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl FieldWidget + 'static) -> Self {
        self.push(field);
        self
    }

    pub fn push(&mut self, field: impl FieldWidget + 'static) {
        self.fields.push(Box::new(field));
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.key())
    }

    /// Fills every field from `read`; fields it has nothing for are cleared.
    pub fn load(&mut self, read: impl Fn(&str) -> Option<Value>) {
        for field in &mut self.fields {
            let value = read(field.key()).unwrap_or_default();
            field.set_value(value);
        }
    }

    pub fn load_record(&mut self, record: &FormRecord) {
        self.load(|key| record.get(key).cloned());
    }

    /// Current value of every field, keyed by field key.
    pub fn values(&self) -> FormRecord {
        self.fields
            .iter()
            .map(|field| (field.key().to_string(), field.value()))
            .collect()
    }

    pub fn value(&self, key: &str) -> Option<Value> {
        self.find(key).map(|idx| self.fields[idx].value())
    }

    pub fn text(&self, key: &str) -> String {
        self.value(key)
            .and_then(|value| value.to_text_scalar())
            .unwrap_or_default()
    }

    pub fn set_value(&mut self, key: &str, value: Value) {
        if let Some(idx) = self.find(key) {
            self.fields[idx].set_value(value);
        }
    }

    /// Swaps the choices of the list field under `key`, keeping its value
    /// when it is still offered.
    pub fn set_options(&mut self, key: &str, options: Vec<SelectOption>) -> bool {
        self.find(key)
            .is_some_and(|idx| self.fields[idx].set_options(options))
    }

    pub fn set_disabled(&mut self, key: &str, disabled: bool) {
        if let Some(idx) = self.find(key) {
            self.fields[idx].set_disabled(disabled);
        }
        if self.fields.get(self.focus).is_some_and(|f| f.is_disabled()) {
            self.focus_next();
        }
    }

    pub fn is_disabled(&self, key: &str) -> bool {
        self.find(key)
            .is_some_and(|idx| self.fields[idx].is_disabled())
    }

    pub fn focused_key(&self) -> Option<&str> {
        self.fields.get(self.focus).map(|field| field.key())
    }

    pub fn focus_first(&mut self) {
        self.focus = self
            .fields
            .iter()
            .position(|field| !field.is_disabled())
            .unwrap_or(0);
    }

    pub fn focus_key(&mut self, key: &str) -> bool {
        match self.find(key) {
            Some(idx) if !self.fields[idx].is_disabled() => {
                self.focus = idx;
                true
            }
            _ => false,
        }
    }

    pub fn focus_next(&mut self) -> bool {
        self.step_focus(true)
    }

    pub fn focus_prev(&mut self) -> bool {
        self.step_focus(false)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> (bool, Option<FieldChange>) {
        let focus = self.focus;
        let Some(field) = self.fields.get_mut(focus) else {
            return (false, None);
        };
        if field.is_disabled() {
            return (false, None);
        }
        let result = field.on_key(key);
        (result.handled, self.change_at(focus, result))
    }

    pub fn handle_text_action(&mut self, action: TextAction) -> (bool, Option<FieldChange>) {
        let focus = self.focus;
        let Some(field) = self.fields.get_mut(focus) else {
            return (false, None);
        };
        let result = field.on_text_action(action);
        (result.handled, self.change_at(focus, result))
    }

    /// Renders label, value, inline error and hint for every field.
    pub fn draw(&self, errors: &FieldErrors, active: bool) -> DrawOutput {
        let label_width = self
            .fields
            .iter()
            .map(|field| UnicodeWidthStr::width(field.label()) + usize::from(field.is_required()) * 2)
            .max()
            .unwrap_or(0);

        let mut out = DrawOutput::default();
        for (idx, field) in self.fields.iter().enumerate() {
            let focused = active && idx == self.focus;
            let marker = if focused {
                Span::styled("❯ ", Style::new().color(Color::Cyan))
            } else {
                Span::new("  ")
            };
            let mut label = field.label().to_string();
            if field.is_required() {
                label.push_str(" *");
            }
            let label_style = match (focused, field.is_disabled()) {
                (_, true) => Style::new().color(Color::DarkGrey),
                (true, false) => Style::new().color(Color::Cyan).bold(),
                (false, false) => Style::new(),
            };
            let padding = label_width.saturating_sub(UnicodeWidthStr::width(label.as_str()));
            let prefix = format!("{label}{}  ", " ".repeat(padding));
            let prefix_width = 2 + UnicodeWidthStr::width(prefix.as_str());

            let drawn = field.draw(focused);
            let first_row = out.lines.len();
            for (row, line) in drawn.lines.into_iter().enumerate() {
                let mut spans = if row == 0 {
                    vec![marker.clone(), Span::styled(prefix.clone(), label_style)]
                } else {
                    vec![Span::new(" ".repeat(prefix_width))]
                };
                spans.extend(line);
                out.push(spans);
            }
            if focused {
                out.cursor = drawn.cursor.map(|cursor| CursorPos {
                    col: cursor.col.saturating_add(prefix_width as u16),
                    row: cursor.row.saturating_add(first_row as u16),
                });
            }

            if let Some(error) = errors.get(field.key()) {
                out.push(vec![Span::styled(
                    format!("{}! {error}", " ".repeat(prefix_width)),
                    Style::new().color(Color::Red),
                )]);
            }
            if let Some(hint) = field.hint().filter(|_| focused) {
                out.push(vec![Span::styled(
                    format!("{}{hint}", " ".repeat(prefix_width)),
                    Style::new().color(Color::DarkGrey),
                )]);
            }
        }
        out
    }

    fn change_at(&self, idx: usize, result: InteractionResult) -> Option<FieldChange> {
        if !result.changed {
            return None;
        }
        let field = &self.fields[idx];
        Some(FieldChange {
            key: field.key().to_string(),
            value: field.value(),
        })
    }

    fn find(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.key() == key)
    }

    fn step_focus(&mut self, forward: bool) -> bool {
        let len = self.fields.len();
        if len == 0 {
            return false;
        }
        for offset in 1..=len {
            let idx = if forward {
                (self.focus + offset) % len
            } else {
                (self.focus + len - offset % len) % len
            };
            if !self.fields[idx].is_disabled() {
                let moved = idx != self.focus;
                self.focus = idx;
                return moved;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::KeyCode;
    use crate::widgets::inputs::{Checkbox, TextInput};

    fn form() -> FormFields {
        FormFields::new()
            .with(TextInput::new("school", "School").required())
            .with(TextInput::new("endDate", "End Date"))
            .with(Checkbox::new("current", "Current"))
    }

    #[test]
    fn focus_skips_disabled_fields() {
        let mut form = form();
        form.focus_first();
        form.set_disabled("endDate", true);
        form.focus_next();
        assert_eq!(form.focused_key(), Some("current"));
        form.focus_prev();
        assert_eq!(form.focused_key(), Some("school"));
        assert!(!form.focus_key("endDate"));
    }

    #[test]
    fn edits_surface_as_field_changes() {
        let mut form = form();
        form.focus_first();
        let (handled, change) = form.handle_key(KeyEvent::plain(KeyCode::Char('M')));
        assert!(handled);
        assert_eq!(
            change,
            Some(FieldChange {
                key: "school".to_string(),
                value: Value::from("M"),
            })
        );

        let (handled, change) = form.handle_key(KeyEvent::plain(KeyCode::Left));
        assert!(handled);
        assert!(change.is_none());
    }

    #[test]
    fn draw_places_errors_under_their_field() {
        let mut form = form();
        form.focus_first();
        let mut errors = FieldErrors::new();
        errors.set("school", "School name is required");

        let out = form.draw(&errors, true);
        let text: Vec<String> = out
            .lines
            .iter()
            .map(crate::ui::span::line_text)
            .collect();
        assert!(text[0].contains("School *"));
        assert!(text[1].trim_start().starts_with("! School name is required"));
        assert_eq!(out.cursor.map(|c| c.row), Some(0));
    }

    #[test]
    fn load_clears_fields_missing_from_source() {
        let mut form = form();
        form.set_value("school", Value::from("MIT"));
        form.load_record(&FormRecord::new().with("current", true));
        assert_eq!(form.text("school"), "");
        assert_eq!(form.value("current"), Some(Value::Bool(true)));
    }
}
