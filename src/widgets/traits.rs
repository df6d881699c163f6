use crate::core::value::Value;
use crate::terminal::{CursorPos, KeyEvent};
use crate::ui::span::{Span, SpanLine};
use crate::widgets::inputs::SelectOption;
use crate::widgets::text_edit::TextBuffer;

#[derive(Debug, Clone, Default)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
    /// Cursor position relative to the first line of `lines`.
    pub cursor: Option<CursorPos>,
}

impl DrawOutput {
    pub fn plain_lines(lines: Vec<String>) -> Self {
        Self {
            lines: lines.into_iter().map(|line| vec![Span::new(line)]).collect(),
            cursor: None,
        }
    }

    pub fn push(&mut self, line: SpanLine) {
        self.lines.push(line);
    }

    pub fn blank(&mut self) {
        self.lines.push(Vec::new());
    }

    /// Shifts every line right by `cols` blank columns.
    pub fn indented(mut self, cols: u16) -> Self {
        let pad = " ".repeat(cols as usize);
        for line in &mut self.lines {
            line.insert(0, Span::new(pad.clone()));
        }
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.col = cursor.col.saturating_add(cols);
        }
        self
    }

    /// Appends `other`, carrying its cursor over if this output has none yet.
    pub fn append(&mut self, other: DrawOutput) {
        if self.cursor.is_none() {
            self.cursor = other.cursor.map(|cursor| CursorPos {
                col: cursor.col,
                row: cursor.row.saturating_add(self.lines.len() as u16),
            });
        }
        self.lines.extend(other.lines);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionResult {
    pub handled: bool,
    /// The widget's value changed and should be reported.
    pub changed: bool,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    /// Key consumed without touching the value (cursor moves and the like).
    pub fn consumed() -> Self {
        Self {
            handled: true,
            changed: false,
        }
    }

    pub fn changed() -> Self {
        Self {
            handled: true,
            changed: true,
        }
    }

    pub fn from_edit(edited: bool) -> Self {
        if edited {
            Self::changed()
        } else {
            Self::consumed()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAction {
    DeleteWordLeft,
    DeleteWordRight,
}

impl TextAction {
    pub(crate) fn apply(self, buffer: &mut TextBuffer) -> bool {
        match self {
            Self::DeleteWordLeft => buffer.delete_word_left(),
            Self::DeleteWordRight => buffer.delete_word_right(),
        }
    }
}

pub trait Drawable: Send {
    /// Record key this widget edits.
    fn key(&self) -> &str;
    fn label(&self) -> &str;
    fn draw(&self, focused: bool) -> DrawOutput;
    /// Extra dim line shown under the field, e.g. a remaining-character count.
    fn hint(&self) -> Option<String> {
        None
    }
}

pub trait Interactive: Send {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult;

    fn text_buffer(&mut self) -> Option<&mut TextBuffer> {
        None
    }

    fn on_text_action(&mut self, action: TextAction) -> InteractionResult {
        let Some(buffer) = self.text_buffer() else {
            return InteractionResult::ignored();
        };
        if action.apply(buffer) {
            InteractionResult::changed()
        } else {
            InteractionResult::consumed()
        }
    }

    fn value(&self) -> Value;
    fn set_value(&mut self, value: Value);

    /// Replaces the choices of a list widget. Returns false for widgets
    /// without options.
    fn set_options(&mut self, _options: Vec<SelectOption>) -> bool {
        false
    }

    fn is_required(&self) -> bool {
        false
    }
    fn is_disabled(&self) -> bool {
        false
    }
    fn set_disabled(&mut self, _disabled: bool) {}
}

pub trait FieldWidget: Drawable + Interactive {}
impl<T> FieldWidget for T where T: Drawable + Interactive {}
