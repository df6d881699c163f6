use crate::core::{EntryIdGenerator, FormRecord, Value};
use crate::resume::options::{self, SKILL_LEVELS, STARTER_SKILL_CATEGORIES};
use crate::resume::{Skill, read_section, to_value};
use crate::state::FieldErrors;
use crate::steps::form::{FieldChange, FormFields};
use crate::steps::{StepComponent, StepContext, StepInput};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::inputs::{SelectInput, SelectOption, TextInput};
use crate::widgets::traits::DrawOutput;
use indexmap::IndexMap;
use std::collections::HashSet;

const NAME: &str = "name";
const CATEGORY: &str = "category";
const LEVEL: &str = "level";
const NEW_CATEGORY: &str = "newCategory";
/// Step-wide error, not tied to a field.
pub const FORM_ERROR: &str = "form";

const DEFAULT_CATEGORY: &str = "Technical";

/// Skills list plus a draft skill. Enter on a filled draft field adds it;
/// Enter anywhere else continues.
pub struct SkillsStep {
    ids: EntryIdGenerator,
    skills: Vec<Skill>,
    categories: Vec<String>,
    form: FormFields,
    errors: FieldErrors,
    selected: Option<usize>,
}

impl SkillsStep {
    pub fn new(ids: EntryIdGenerator) -> Self {
        let categories: Vec<String> = STARTER_SKILL_CATEGORIES
            .iter()
            .map(|c| c.to_string())
            .collect();
        let mut step = Self {
            ids,
            skills: Vec::new(),
            form: draft_form(&categories),
            categories,
            errors: FieldErrors::new(),
            selected: None,
        };
        step.reset_draft(DEFAULT_CATEGORY.to_string());
        step
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn draft_category(&self) -> String {
        self.form.text(CATEGORY)
    }

    pub fn set_draft(&mut self, key: &str, value: impl Into<Value>) {
        self.form.set_value(key, value.into());
        self.errors.clear(key);
    }

    /// Skills grouped by category: known categories in list order, then any
    /// category only seen on a skill.
    pub fn skills_by_category(&self) -> IndexMap<&str, Vec<&Skill>> {
        let mut groups: IndexMap<&str, Vec<&Skill>> = IndexMap::new();
        for category in &self.categories {
            if self.skills.iter().any(|skill| &skill.category == category) {
                groups.insert(category.as_str(), Vec::new());
            }
        }
        for skill in &self.skills {
            groups.entry(skill.category.as_str()).or_default().push(skill);
        }
        groups
    }

    /// Adds the draft skill. The draft keeps its category so several skills can
    /// be entered in a row.
    pub fn add_skill(&mut self, ctx: &mut StepContext<'_>) -> bool {
        let name = self.form.text(NAME);
        if name.trim().is_empty() {
            self.errors.set(NAME, "Skill name is required");
            self.form.focus_key(NAME);
            return false;
        }
        let taken: HashSet<&str> = self.skills.iter().map(|s| s.id.as_str()).collect();
        let id = self.ids.next_unique("skill", |id| taken.contains(id));
        let category = self.draft_category();
        self.skills.push(Skill {
            id,
            name: name.trim().to_string(),
            category: category.clone(),
            level: self.form.text(LEVEL),
        });
        self.errors.clear(NAME);
        self.errors.clear(FORM_ERROR);
        self.reset_draft(category);
        self.form.focus_key(NAME);
        self.report(ctx);
        true
    }

    pub fn remove_skill(&mut self, id: &str, ctx: &mut StepContext<'_>) -> bool {
        let Some(idx) = self.skills.iter().position(|skill| skill.id == id) else {
            return false;
        };
        self.skills.remove(idx);
        self.selected = match self.selected {
            _ if self.skills.is_empty() => None,
            Some(sel) if sel >= self.skills.len() => Some(self.skills.len() - 1),
            other => other,
        };
        self.report(ctx);
        true
    }

    /// Adds the draft category name. Blank and duplicate names are rejected.
    pub fn add_category(&mut self, ctx: &mut StepContext<'_>) -> bool {
        let name = self.form.text(NEW_CATEGORY).trim().to_string();
        if name.is_empty() {
            self.errors.set(NEW_CATEGORY, "Category name is required");
            return false;
        }
        if self.categories.iter().any(|c| *c == name) {
            self.errors.set(NEW_CATEGORY, "This category already exists");
            return false;
        }
        self.categories.push(name.clone());
        self.refresh_category_options();
        self.form.set_value(CATEGORY, Value::from(name));
        self.form.set_value(NEW_CATEGORY, Value::from(""));
        self.errors.clear(NEW_CATEGORY);
        self.report(ctx);
        true
    }

    pub fn validate(&mut self) -> bool {
        self.errors.clear(FORM_ERROR);
        if self.skills.is_empty() {
            self.errors.set(FORM_ERROR, "Please add at least one skill");
            return false;
        }
        true
    }

    fn submit(&mut self, ctx: &mut StepContext<'_>) {
        let focused = self
            .form
            .focused_key()
            .filter(|key| !self.form.text(key).trim().is_empty())
            .map(str::to_string);
        match focused.as_deref() {
            Some(NAME) => {
                self.add_skill(ctx);
            }
            Some(NEW_CATEGORY) => {
                self.add_category(ctx);
            }
            _ => {
                if self.validate() {
                    self.report(ctx);
                    ctx.advance();
                }
            }
        }
    }

    fn apply(&mut self, change: FieldChange) {
        self.errors.clear(&change.key);
    }

    fn reset_draft(&mut self, category: String) {
        self.form.set_value(NAME, Value::from(""));
        self.form.set_value(LEVEL, Value::from(""));
        self.form.set_value(NEW_CATEGORY, Value::from(""));
        let category = if self.categories.contains(&category) {
            category
        } else {
            self.categories.first().cloned().unwrap_or_default()
        };
        self.form.set_value(CATEGORY, Value::from(category));
    }

    fn refresh_category_options(&mut self) {
        let options = self.categories.iter().map(SelectOption::same).collect();
        self.form.set_options(CATEGORY, options);
    }

    fn select_skill(&mut self, forward: bool) -> bool {
        let len = self.skills.len();
        if len == 0 {
            return false;
        }
        self.selected = Some(match (self.selected, forward) {
            (None, _) => 0,
            (Some(idx), true) => (idx + 1).min(len - 1),
            (Some(idx), false) => idx.saturating_sub(1),
        });
        true
    }

    fn report(&self, ctx: &mut StepContext<'_>) {
        let mut partial = FormRecord::new();
        match (to_value(&self.skills), to_value(&self.categories)) {
            (Ok(skills), Ok(categories)) => {
                partial.insert("skills", skills);
                partial.insert("skillCategories", categories);
            }
            (Err(error), _) | (_, Err(error)) => {
                tracing::warn!(%error, "failed to encode skills");
                return;
            }
        }
        ctx.report_update(partial);
    }
}

fn draft_form(categories: &[String]) -> FormFields {
    FormFields::new()
        .with(
            TextInput::new(NAME, "Skill Name")
                .required()
                .with_placeholder("React.js, Project Management, Spanish, etc."),
        )
        .with(SelectInput::new(
            CATEGORY,
            "Category",
            categories.iter().map(SelectOption::same).collect(),
        ))
        .with(
            SelectInput::new(LEVEL, "Level (Optional)", options::plain(SKILL_LEVELS))
                .with_placeholder("Select level (optional)"),
        )
        .with(TextInput::new(NEW_CATEGORY, "New Category").with_placeholder("New category name"))
}

impl StepComponent for SkillsStep {
    fn title(&self) -> &str {
        "Skills"
    }

    fn description(&self) -> &str {
        "Add your technical, professional, and personal skills."
    }

    fn activate(&mut self, shared: &FormRecord) {
        self.skills = read_section(shared, "skills");
        let mut seen = HashSet::new();
        for idx in 0..self.skills.len() {
            if self.skills[idx].id.is_empty() || !seen.insert(self.skills[idx].id.clone()) {
                let fresh = self.ids.next_unique("skill", |candidate| {
                    self.skills.iter().any(|skill| skill.id == candidate)
                });
                seen.insert(fresh.clone());
                self.skills[idx].id = fresh;
            }
        }

        let categories: Vec<String> = read_section(shared, "skillCategories");
        self.categories = if categories.is_empty() {
            STARTER_SKILL_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect()
        } else {
            categories
        };
        self.form = draft_form(&self.categories);
        self.reset_draft(DEFAULT_CATEGORY.to_string());
        self.errors.clear_all();
        self.selected = None;
        self.form.focus_first();
    }

    fn handle(&mut self, input: StepInput, ctx: &mut StepContext<'_>) -> bool {
        let (handled, change) = match input {
            StepInput::Key(key) => self.form.handle_key(key),
            StepInput::Text(action) => self.form.handle_text_action(action),
            StepInput::FocusNext => (self.form.focus_next(), None),
            StepInput::FocusPrev => (self.form.focus_prev(), None),
            StepInput::AddEntry => (self.add_skill(ctx), None),
            StepInput::AddItem => (self.add_category(ctx), None),
            StepInput::RemoveEntry | StepInput::RemoveItem => {
                let id = self
                    .selected
                    .and_then(|idx| self.skills.get(idx))
                    .map(|skill| skill.id.clone());
                match id {
                    Some(id) => (self.remove_skill(&id, ctx), None),
                    None => (false, None),
                }
            }
            StepInput::NextEntry => (self.select_skill(true), None),
            StepInput::PrevEntry => (self.select_skill(false), None),
            StepInput::Submit => {
                self.submit(ctx);
                return true;
            }
            StepInput::Back => {
                ctx.retreat();
                return true;
            }
        };
        if let Some(change) = change {
            self.apply(change);
        }
        handled
    }

    fn draw(&self) -> DrawOutput {
        let mut out = self.form.draw(&self.errors, true);
        out.blank();
        out.push(vec![Span::styled(
            format!("Your skills ({})", self.skills.len()),
            Style::new().bold(),
        )]);
        if self.skills.is_empty() {
            out.push(vec![Span::styled(
                "  No skills added yet",
                Style::new().color(Color::DarkGrey),
            )]);
        }
        let selected_id = self
            .selected
            .and_then(|idx| self.skills.get(idx))
            .map(|skill| skill.id.as_str());
        for (category, skills) in self.skills_by_category() {
            out.push(vec![Span::styled(
                format!("  {category}"),
                Style::new().color(Color::Cyan),
            )]);
            for skill in skills {
                let marker = if Some(skill.id.as_str()) == selected_id {
                    Span::styled("    ❯ ", Style::new().color(Color::Cyan))
                } else {
                    Span::new("    • ")
                };
                let mut line = vec![marker, Span::new(skill.name.clone())];
                if !skill.level.is_empty() {
                    line.push(Span::styled(
                        format!(" ({})", skill.level),
                        Style::new().color(Color::DarkGrey),
                    ));
                }
                out.push(line);
            }
        }
        if let Some(error) = self.errors.get(FORM_ERROR) {
            out.push(vec![Span::styled(
                format!("! {error}"),
                Style::new().color(Color::Red),
            )]);
        }
        out
    }

    fn shortcuts(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("Ctrl-N", "add skill"),
            ("Ctrl-L", "add category"),
            ("PgUp/PgDn", "select skill"),
            ("Ctrl-D", "remove skill"),
        ]
    }
}
