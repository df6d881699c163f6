use crate::core::Value;
use crate::resume::Education;
use crate::resume::options::{self, DEGREES};
use crate::state::FieldErrors;
use crate::steps::entries::{CURRENT, END_DATE, EntryKind, EntryListStep};
use crate::steps::form::FormFields;
use crate::widgets::inputs::{Checkbox, SelectInput, TextArea, TextInput};
use crate::widgets::validators::{self, run_validators};

pub type EducationStep = EntryListStep<Education>;

impl EntryKind for Education {
    const RECORD_KEY: &'static str = "education";
    const ID_PREFIX: &'static str = "edu";
    const TITLE: &'static str = "Education";
    const DESCRIPTION: &'static str =
        "Add your educational background, with the most recent first.";
    const NOUN: &'static str = "Education";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn heading(&self) -> String {
        match (self.degree.trim(), self.school.trim()) {
            ("", "") => String::new(),
            ("", school) => school.to_string(),
            (degree, "") => degree.to_string(),
            (degree, school) => format!("{degree}, {school}"),
        }
    }

    fn fields(&self) -> FormFields {
        FormFields::new()
            .with(
                TextInput::new("school", "School/University")
                    .required()
                    .with_placeholder("Harvard University"),
            )
            .with(TextInput::new("location", "Location").with_placeholder("Cambridge, MA"))
            .with(
                SelectInput::new("degree", "Degree", options::plain(DEGREES))
                    .required()
                    .with_placeholder("Select a degree"),
            )
            .with(
                TextInput::new("fieldOfStudy", "Field of Study")
                    .required()
                    .with_placeholder("Computer Science"),
            )
            .with(TextInput::new("startDate", "Start Date").required().with_placeholder("2018-09"))
            .with(TextInput::new(END_DATE, "End Date").required().with_placeholder("2022-06"))
            .with(Checkbox::new(CURRENT, "I am currently studying here"))
            .with(TextInput::new("gpa", "GPA").with_placeholder("3.8"))
            .with(
                TextArea::new("description", "Additional Information")
                    .with_placeholder("Relevant coursework, honors, awards, etc."),
            )
    }

    fn read(&self, key: &str) -> Value {
        match key {
            "school" => Value::from(self.school.as_str()),
            "location" => Value::from(self.location.as_str()),
            "degree" => Value::from(self.degree.as_str()),
            "fieldOfStudy" => Value::from(self.field_of_study.as_str()),
            "startDate" => Value::from(self.start_date.as_str()),
            END_DATE => Value::from(self.end_date.as_str()),
            CURRENT => Value::Bool(self.current),
            "gpa" => Value::from(self.gpa.as_str()),
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
        match key {
            "school" => self.school = text,
            "location" => self.location = text,
            "degree" => self.degree = text,
            "fieldOfStudy" => self.field_of_study = text,
            "startDate" => self.start_date = text,
            END_DATE => self.end_date = text,
            "gpa" => self.gpa = text,
            "description" => self.description = text,
            _ => tracing::debug!(key, "unknown education field"),
        }
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let required = [
            ("school", &self.school, "School name is required"),
            ("degree", &self.degree, "Degree is required"),
            ("fieldOfStudy", &self.field_of_study, "Field of study is required"),
            ("startDate", &self.start_date, "Start date is required"),
        ];
        for (key, value, message) in required {
            if let Err(message) = run_validators(&[validators::required(message)], value) {
                errors.set(key, message);
            }
        }
        if !self.current && self.end_date.trim().is_empty() {
            errors.set(END_DATE, "End date is required if not current");
        }
        let gpa = validators::optional(validators::decimal("GPA must be a valid number"));
        if let Err(message) = gpa(self.gpa.as_str()) {
            errors.set("gpa", message);
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
}
