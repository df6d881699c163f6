use crate::core::{EntryIdGenerator, FormRecord, Value};
use crate::resume::{PRESENT, read_section, section_record};
use crate::state::FieldErrors;
use crate::steps::form::{FieldChange, FormFields};
use crate::steps::{StepComponent, StepContext, StepInput};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::traits::DrawOutput;
use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;

pub const CURRENT: &str = "current";
pub const END_DATE: &str = "endDate";

/// One kind of repeatable entry (education, experience).
pub trait EntryKind: Clone + Default + Serialize + DeserializeOwned + Send + 'static {
    /// Record key the whole list is stored under.
    const RECORD_KEY: &'static str;
    const ID_PREFIX: &'static str;
    const TITLE: &'static str;
    const DESCRIPTION: &'static str;
    const NOUN: &'static str;
    const SHORTCUTS: &'static [(&'static str, &'static str)] = &[
        ("Ctrl-N", "add"),
        ("Ctrl-D", "remove"),
        ("PgUp/PgDn", "switch entry"),
    ];

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);

    /// One-line summary shown while the entry is collapsed.
    fn heading(&self) -> String;

    fn fields(&self) -> FormFields;
    fn read(&self, key: &str) -> Value;
    fn write(&mut self, key: &str, value: Value);
    fn validate(&self) -> FieldErrors;

    fn is_current(&self) -> bool;
    fn set_current(&mut self, current: bool);
    fn end_date(&self) -> &str;
    fn set_end_date(&mut self, end_date: String);

    /// Tidies a seeded entry before it is edited.
    fn normalize(&mut self) {}

    /// Adds a sub-item and returns the field key to focus.
    fn add_item(&mut self) -> Option<String> {
        None
    }

    fn remove_item(&mut self, _key: &str) -> bool {
        false
    }
}

/// Step editing a list of entries, one expanded at a time. The list never
/// drops below one entry.
pub struct EntryListStep<K: EntryKind> {
    ids: EntryIdGenerator,
    entries: Vec<K>,
    selected: usize,
    form: FormFields,
    errors: IndexMap<String, FieldErrors>,
}

impl<K: EntryKind> EntryListStep<K> {
    pub fn new(ids: EntryIdGenerator) -> Self {
        let mut step = Self {
            ids,
            entries: Vec::new(),
            selected: 0,
            form: FormFields::new(),
            errors: IndexMap::new(),
        };
        step.ensure_one();
        step.rebuild_form();
        step
    }

    pub fn entries(&self) -> &[K] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.entries.get(self.selected).map(EntryKind::id)
    }

    pub fn errors_for(&self, id: &str) -> Option<&FieldErrors> {
        self.errors.get(id).filter(|errors| !errors.is_empty())
    }

    pub fn is_field_disabled(&self, key: &str) -> bool {
        self.form.is_disabled(key)
    }

    pub fn add_entry(&mut self, ctx: &mut StepContext<'_>) -> String {
        let entry = self.fresh_entry();
        let id = entry.id().to_string();
        self.entries.push(entry);
        self.select(self.entries.len() - 1);
        self.report(ctx);
        id
    }

    /// Removing the last remaining entry is refused.
    pub fn remove_entry(&mut self, id: &str, ctx: &mut StepContext<'_>) -> bool {
        if self.entries.len() <= 1 {
            return false;
        }
        let Some(idx) = self.position(id) else {
            return false;
        };
        self.entries.remove(idx);
        self.errors.shift_remove(id);
        let selected = match idx.cmp(&self.selected) {
            std::cmp::Ordering::Less => self.selected - 1,
            std::cmp::Ordering::Equal => 0,
            std::cmp::Ordering::Greater => self.selected,
        };
        self.select(selected);
        self.report(ctx);
        true
    }

    /// Applies one field edit. While `current` is set the end date is pinned
    /// to "Present" and edits to it are refused.
    pub fn update_entry(
        &mut self,
        id: &str,
        key: &str,
        value: Value,
        ctx: &mut StepContext<'_>,
    ) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        let entry = &mut self.entries[idx];
        if key == END_DATE && entry.is_current() {
            return false;
        }

        if key == CURRENT {
            let current = value.as_bool().unwrap_or(false);
            entry.set_current(current);
            if current {
                entry.set_end_date(PRESENT.to_string());
            } else if entry.end_date() == PRESENT {
                entry.set_end_date(String::new());
            }
        } else {
            entry.write(key, value);
        }

        if let Some(errors) = self.errors.get_mut(id) {
            errors.clear(key);
            if key == CURRENT {
                errors.clear(END_DATE);
            }
        }
        if idx == self.selected && key == CURRENT {
            self.sync_end_date();
        }
        self.report(ctx);
        true
    }

    /// Validates every entry; expands the first one with errors on failure.
    pub fn validate_all(&mut self) -> bool {
        self.errors = self
            .entries
            .iter()
            .map(|entry| (entry.id().to_string(), entry.validate()))
            .filter(|(_, errors)| !errors.is_empty())
            .collect();

        let Some(first_invalid) = self
            .entries
            .iter()
            .position(|entry| self.errors.contains_key(entry.id()))
        else {
            return true;
        };
        self.select(first_invalid);
        let focus = self
            .errors
            .get(self.entries[first_invalid].id())
            .and_then(FieldErrors::first_key)
            .map(str::to_string);
        if let Some(key) = focus {
            self.form.focus_key(&key);
        }
        false
    }

    pub fn select(&mut self, idx: usize) {
        self.selected = idx.min(self.entries.len().saturating_sub(1));
        self.rebuild_form();
    }

    fn apply(&mut self, change: FieldChange, ctx: &mut StepContext<'_>) {
        let Some(id) = self.selected_id().map(str::to_string) else {
            return;
        };
        if !self.update_entry(&id, &change.key, change.value, ctx) {
            // Refused edit: put the widget back in line with the entry.
            let value = self.entries[self.selected].read(&change.key);
            self.form.set_value(&change.key, value);
        }
    }

    fn add_item(&mut self, ctx: &mut StepContext<'_>) -> bool {
        let Some(entry) = self.entries.get_mut(self.selected) else {
            return false;
        };
        let Some(focus) = entry.add_item() else {
            return false;
        };
        let selected = self.selected;
        self.select(selected);
        self.form.focus_key(&focus);
        self.report(ctx);
        true
    }

    fn remove_item(&mut self, ctx: &mut StepContext<'_>) -> bool {
        let Some(key) = self.form.focused_key().map(str::to_string) else {
            return false;
        };
        let Some(entry) = self.entries.get_mut(self.selected) else {
            return false;
        };
        if !entry.remove_item(&key) {
            return false;
        }
        let selected = self.selected;
        self.select(selected);
        self.report(ctx);
        true
    }

    fn report(&self, ctx: &mut StepContext<'_>) {
        ctx.report_update(section_record(K::RECORD_KEY, &self.entries));
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id() == id)
    }

    fn fresh_entry(&self) -> K {
        let mut entry = K::default();
        let taken: HashSet<&str> = self.entries.iter().map(EntryKind::id).collect();
        entry.set_id(self.ids.next_unique(K::ID_PREFIX, |id| taken.contains(id)));
        entry
    }

    fn ensure_one(&mut self) {
        if self.entries.is_empty() {
            let entry = self.fresh_entry();
            self.entries.push(entry);
        }
    }

    /// Gives blank or repeated ids a fresh one and pins current end dates.
    fn normalize(&mut self) {
        let mut seen = HashSet::new();
        for idx in 0..self.entries.len() {
            let id = self.entries[idx].id().to_string();
            if id.is_empty() || !seen.insert(id) {
                let fresh = self.ids.next_unique(K::ID_PREFIX, |candidate| {
                    self.entries.iter().any(|entry| entry.id() == candidate)
                });
                seen.insert(fresh.clone());
                self.entries[idx].set_id(fresh);
            }
            let entry = &mut self.entries[idx];
            entry.normalize();
            if entry.is_current() {
                entry.set_end_date(PRESENT.to_string());
            }
        }
    }

    fn rebuild_form(&mut self) {
        let Some(entry) = self.entries.get(self.selected) else {
            self.form = FormFields::new();
            return;
        };
        let mut form = entry.fields();
        form.load(|key| Some(entry.read(key)));
        form.focus_first();
        self.form = form;
        self.sync_end_date();
    }

    fn sync_end_date(&mut self) {
        let Some(entry) = self.entries.get(self.selected) else {
            return;
        };
        let current = entry.is_current();
        self.form
            .set_value(END_DATE, Value::from(entry.end_date().to_string()));
        self.form.set_disabled(END_DATE, current);
    }
}

impl<K: EntryKind> StepComponent for EntryListStep<K> {
    fn title(&self) -> &str {
        K::TITLE
    }

    fn description(&self) -> &str {
        K::DESCRIPTION
    }

    fn activate(&mut self, shared: &FormRecord) {
        self.entries = read_section(shared, K::RECORD_KEY);
        self.normalize();
        self.ensure_one();
        self.errors.clear();
        self.select(0);
    }

    fn handle(&mut self, input: StepInput, ctx: &mut StepContext<'_>) -> bool {
        let (handled, change) = match input {
            StepInput::Key(key) => self.form.handle_key(key),
            StepInput::Text(action) => self.form.handle_text_action(action),
            StepInput::FocusNext => (self.form.focus_next(), None),
            StepInput::FocusPrev => (self.form.focus_prev(), None),
            StepInput::NextEntry => {
                let next = (self.selected + 1).min(self.entries.len() - 1);
                let moved = next != self.selected;
                self.select(next);
                (moved, None)
            }
            StepInput::PrevEntry => {
                let moved = self.selected > 0;
                self.select(self.selected.saturating_sub(1));
                (moved, None)
            }
            StepInput::AddEntry => {
                self.add_entry(ctx);
                (true, None)
            }
            StepInput::RemoveEntry => {
                let removed = match self.selected_id().map(str::to_string) {
                    Some(id) => self.remove_entry(&id, ctx),
                    None => false,
                };
                (removed, None)
            }
            StepInput::AddItem => (self.add_item(ctx), None),
            StepInput::RemoveItem => (self.remove_item(ctx), None),
            StepInput::Submit => {
                if self.validate_all() {
                    self.report(ctx);
                    ctx.advance();
                }
                return true;
            }
            StepInput::Back => {
                ctx.retreat();
                return true;
            }
        };
        if let Some(change) = change {
            self.apply(change, ctx);
        }
        handled
    }

    fn draw(&self) -> DrawOutput {
        let mut out = DrawOutput::default();
        let total = self.entries.len();
        for (idx, entry) in self.entries.iter().enumerate() {
            let expanded = idx == self.selected;
            let heading = entry.heading();
            let heading = if heading.trim().is_empty() {
                format!("{} {}", K::NOUN, idx + 1)
            } else {
                heading
            };
            let mut line = vec![
                Span::styled(
                    if expanded { "▾ " } else { "▸ " },
                    Style::new().color(Color::Cyan),
                ),
                Span::styled(
                    heading,
                    if expanded {
                        Style::new().bold()
                    } else {
                        Style::new()
                    },
                ),
                Span::styled(
                    format!("  ({} of {total})", idx + 1),
                    Style::new().color(Color::DarkGrey),
                ),
            ];
            if self.errors_for(entry.id()).is_some() {
                line.push(Span::styled(
                    "  needs attention",
                    Style::new().color(Color::Red),
                ));
            }
            out.push(line);

            if expanded {
                let errors = self.errors.get(entry.id()).cloned().unwrap_or_default();
                out.append(self.form.draw(&errors, true).indented(4));
            }
        }
        out
    }

    fn shortcuts(&self) -> &'static [(&'static str, &'static str)] {
        K::SHORTCUTS
    }
}
