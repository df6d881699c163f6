use crate::core::Value;
use crate::resume::Experience;
use crate::state::FieldErrors;
use crate::steps::entries::{CURRENT, END_DATE, EntryKind, EntryListStep};
use crate::steps::form::FormFields;
use crate::widgets::inputs::{Checkbox, TextArea, TextInput};

pub type ExperienceStep = EntryListStep<Experience>;

const BULLET_PREFIX: &str = "bullet-";

fn bullet_key(idx: usize) -> String {
    format!("{BULLET_PREFIX}{idx}")
}

fn bullet_index(key: &str) -> Option<usize> {
    key.strip_prefix(BULLET_PREFIX)?.parse().ok()
}

impl EntryKind for Experience {
    const RECORD_KEY: &'static str = "experience";
    const ID_PREFIX: &'static str = "exp";
    const TITLE: &'static str = "Work Experience";
    const DESCRIPTION: &'static str =
        "Add your work history, with the most recent position first.";
    const NOUN: &'static str = "Position";
    const SHORTCUTS: &'static [(&'static str, &'static str)] = &[
        ("Ctrl-N", "add"),
        ("Ctrl-D", "remove"),
        ("PgUp/PgDn", "switch entry"),
        ("Ctrl-L", "add bullet"),
        ("Ctrl-K", "remove bullet"),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn heading(&self) -> String {
        match (self.job_title.trim(), self.company.trim()) {
            ("", "") => String::new(),
            ("", company) => company.to_string(),
            (title, "") => title.to_string(),
            (title, company) => format!("{title} at {company}"),
        }
    }

    fn fields(&self) -> FormFields {
        let mut form = FormFields::new()
            .with(TextInput::new("company", "Company").required())
            .with(TextInput::new("jobTitle", "Job Title").required())
            .with(TextInput::new("location", "Location"))
            .with(TextInput::new("startDate", "Start Date").required())
            .with(TextInput::new(END_DATE, "End Date").required())
            .with(Checkbox::new(CURRENT, "I currently work here"))
            .with(TextArea::new("description", "Description"));
        for idx in 0..self.bullets.len().max(1) {
            form.push(
                TextInput::new(bullet_key(idx), format!("Bullet {}", idx + 1))
                    .with_placeholder("Led a team of 5 engineers to ..."),
            );
        }
        form
    }

    fn read(&self, key: &str) -> Value {
        if let Some(idx) = bullet_index(key) {
            return self
                .bullets
                .get(idx)
                .map(|bullet| Value::from(bullet.as_str()))
                .unwrap_or_default();
        }
        match key {
            "company" => Value::from(self.company.as_str()),
            "jobTitle" => Value::from(self.job_title.as_str()),
            "location" => Value::from(self.location.as_str()),
            "startDate" => Value::from(self.start_date.as_str()),
            END_DATE => Value::from(self.end_date.as_str()),
            CURRENT => Value::Bool(self.current),
            "description" => Value::from(self.description.as_str()),
            _ => Value::None,
        }
    }

    fn write(&mut self, key: &str, value: Value) {
        if key == CURRENT {
            self.current = value.as_bool().unwrap_or(false);
            return;
        }
        let text = value.to_text_scalar().unwrap_or_default();
        if let Some(idx) = bullet_index(key) {
            if self.bullets.len() <= idx {
                self.bullets.resize(idx + 1, String::new());
            }
            self.bullets[idx] = text;
            return;
        }
        match key {
            "company" => self.company = text,
            "jobTitle" => self.job_title = text,
            "location" => self.location = text,
            "startDate" => self.start_date = text,
            END_DATE => self.end_date = text,
            "description" => self.description = text,
            _ => tracing::debug!(key, "unknown experience field"),
        }
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.company.trim().is_empty() {
            errors.set("company", "Company name is required");
        }
        if self.job_title.trim().is_empty() {
            errors.set("jobTitle", "Job title is required");
        }
        if self.start_date.trim().is_empty() {
            errors.set("startDate", "Start date is required");
        }
        if !self.current && self.end_date.trim().is_empty() {
            errors.set(END_DATE, "End date is required if not current");
        }
        if self.bullets.iter().all(|bullet| bullet.trim().is_empty()) {
            errors.set(bullet_key(0), "Add at least one bullet point");
        }
        errors
    }

    fn is_current(&self) -> bool {
        self.current
    }

    fn set_current(&mut self, current: bool) {
        self.current = current;
    }

    fn end_date(&self) -> &str {
        &self.end_date
    }

    fn set_end_date(&mut self, end_date: String) {
        self.end_date = end_date;
    }

    /// An empty bullet list still shows one slot, so it holds one blank bullet.
    fn normalize(&mut self) {
        if self.bullets.is_empty() {
            self.bullets.push(String::new());
        }
    }

    fn add_item(&mut self) -> Option<String> {
        self.bullets.push(String::new());
        Some(bullet_key(self.bullets.len() - 1))
    }

    /// Keeps at least one bullet slot.
    fn remove_item(&mut self, key: &str) -> bool {
        match bullet_index(key) {
            Some(idx) if idx < self.bullets.len() && self.bullets.len() > 1 => {
                self.bullets.remove(idx);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EntryIdGenerator, FormRecord};
    use crate::resume::PRESENT;
    use crate::steps::{StepComponent, StepContext, StepInput};
    use crate::terminal::{KeyCode, KeyEvent};

    fn filled() -> Experience {
        Experience {
            id: "exp-a".to_string(),
            company: "Acme".to_string(),
            job_title: "Engineer".to_string(),
            start_date: "2020".to_string(),
            end_date: "2023".to_string(),
            bullets: vec!["Shipped the thing".to_string()],
            ..Experience::default()
        }
    }

    #[test]
    fn whitespace_bullets_fail_on_first_slot() {
        let mut exp = filled();
        exp.bullets = vec!["   ".to_string(), String::new()];
        let errors = exp.validate();
        assert_eq!(errors.get("bullet-0"), Some("Add at least one bullet point"));
        assert_eq!(errors.len(), 1);

        exp.bullets[1] = "Cut costs".to_string();
        assert!(exp.validate().is_empty());
    }

    #[test]
    fn required_fields_and_current_rule() {
        let errors = Experience::default().validate();
        assert_eq!(errors.get("company"), Some("Company name is required"));
        assert_eq!(errors.get("jobTitle"), Some("Job title is required"));
        assert_eq!(errors.get("startDate"), Some("Start date is required"));
        assert!(errors.contains(END_DATE));

        let mut exp = filled();
        exp.end_date.clear();
        exp.current = true;
        assert!(exp.validate().is_empty());
    }

    #[test]
    fn bullets_can_be_added_and_removed_down_to_one() {
        let mut exp = filled();
        assert_eq!(exp.add_item().as_deref(), Some("bullet-1"));
        exp.write("bullet-1", Value::from("Second"));
        assert_eq!(exp.read("bullet-1"), Value::from("Second"));

        assert!(exp.remove_item("bullet-0"));
        assert_eq!(exp.bullets, vec!["Second".to_string()]);
        assert!(!exp.remove_item("bullet-0"));
        assert!(!exp.remove_item("company"));
    }

    #[test]
    fn typing_into_new_bullet_reports_whole_list() {
        let mut record = FormRecord::new();
        let mut step = ExperienceStep::new(EntryIdGenerator::new());
        step.activate(&record);
        let mut ctx = StepContext::new(&mut record, false, false);

        assert!(step.handle(StepInput::AddItem, &mut ctx));
        step.handle(StepInput::Key(KeyEvent::plain(KeyCode::Char('X'))), &mut ctx);
        ctx.finish();

        let stored: Vec<Experience> = record.field("experience").expect("decode").expect("present");
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].bullets, vec![String::new(), "X".to_string()]);
    }

    #[test]
    fn seeded_entry_without_bullets_gets_a_fresh_slot() {
        let mut record: FormRecord =
            serde_json::from_str(r#"{"experience": [{"id": "exp-1", "company": "Acme", "bullets": []}]}"#)
                .expect("record");
        let mut step = ExperienceStep::new(EntryIdGenerator::new());
        step.activate(&record);
        assert_eq!(step.entries()[0].bullets, vec![String::new()]);

        let mut ctx = StepContext::new(&mut record, false, false);
        assert!(step.handle(StepInput::AddItem, &mut ctx));
        step.handle(StepInput::Key(KeyEvent::plain(KeyCode::Char('Y'))), &mut ctx);
        ctx.finish();

        let stored: Vec<Experience> = record.field("experience").expect("decode").expect("present");
        assert_eq!(stored[0].bullets, vec![String::new(), "Y".to_string()]);
    }

    #[test]
    fn seeded_current_entry_is_pinned_to_present() {
        let mut exp = filled();
        exp.current = true;
        let mut record = FormRecord::new();
        record.insert("experience", crate::resume::to_value(&vec![exp]).expect("encode"));

        let mut step = ExperienceStep::new(EntryIdGenerator::new());
        step.activate(&record);
        assert_eq!(step.entries()[0].end_date, PRESENT);
        assert!(step.is_field_disabled(END_DATE));
    }
}
