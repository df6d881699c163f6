use crate::core::FormRecord;
use crate::resume::PersonalInfo;
use crate::state::FieldErrors;
use crate::steps::form::{FieldChange, FormFields};
use crate::steps::{StepComponent, StepContext, StepInput};
use crate::widgets::inputs::{TextArea, TextInput};
use crate::widgets::traits::DrawOutput;
use crate::widgets::validators::{self, Validator, run_validators};

pub struct PersonalInfoStep {
    form: FormFields,
    errors: FieldErrors,
    summary_max_chars: usize,
}

impl PersonalInfoStep {
    pub fn new(summary_max_chars: usize) -> Self {
        let form = FormFields::new()
            .with(
                TextInput::new("fullName", "Full Name")
                    .required()
                    .with_placeholder("John Doe"),
            )
            .with(
                TextInput::new("email", "Email")
                    .required()
                    .with_placeholder("johndoe@example.com"),
            )
            .with(
                TextInput::new("phone", "Phone")
                    .required()
                    .with_placeholder("(123) 456-7890"),
            )
            .with(
                TextInput::new("location", "Location")
                    .required()
                    .with_placeholder("City, State/Province, Country"),
            )
            .with(
                TextInput::new("linkedIn", "LinkedIn Profile")
                    .with_placeholder("https://linkedin.com/in/johndoe"),
            )
            .with(
                TextInput::new("website", "Personal Website")
                    .with_placeholder("https://johndoe.com"),
            )
            .with(
                TextArea::new("summary", "Professional Summary")
                    .with_max_chars(summary_max_chars)
                    .with_placeholder("Briefly describe your professional background..."),
            );
        Self {
            form,
            errors: FieldErrors::new(),
            summary_max_chars,
        }
    }

    pub fn draft(&self) -> PersonalInfo {
        PersonalInfo {
            full_name: self.form.text("fullName"),
            email: self.form.text("email"),
            phone: self.form.text("phone"),
            location: self.form.text("location"),
            linked_in: self.form.text("linkedIn"),
            website: self.form.text("website"),
            summary: self.form.text("summary"),
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    fn apply(&mut self, change: FieldChange, ctx: &mut StepContext<'_>) {
        self.errors.clear(&change.key);
        ctx.report_update(self.form.values());
    }

    fn submit(&mut self, ctx: &mut StepContext<'_>) {
        self.errors = validate(&self.draft(), self.summary_max_chars);
        match self.errors.first_key() {
            None => ctx.advance(),
            Some(key) => {
                let key = key.to_string();
                self.form.focus_key(&key);
            }
        }
    }
}

/// Field errors for the personal-info section; empty when it may advance.
pub fn validate(info: &PersonalInfo, summary_max_chars: usize) -> FieldErrors {
    let rules: [(&str, &str, Vec<Validator>); 7] = [
        (
            "fullName",
            info.full_name.as_str(),
            vec![validators::required("Full name is required")],
        ),
        (
            "email",
            info.email.as_str(),
            vec![
                validators::required("Email is required"),
                validators::email("Please enter a valid email address"),
            ],
        ),
        (
            "phone",
            info.phone.as_str(),
            vec![validators::required("Phone number is required")],
        ),
        (
            "location",
            info.location.as_str(),
            vec![validators::required("Location is required")],
        ),
        (
            "linkedIn",
            info.linked_in.as_str(),
            vec![validators::optional(validators::contains(
                "linkedin.com",
                "Please enter a valid LinkedIn URL",
            ))],
        ),
        (
            "website",
            info.website.as_str(),
            vec![validators::optional(validators::starts_with(
                "http",
                "Please enter a valid website URL including http:// or https://",
            ))],
        ),
        (
            "summary",
            info.summary.as_str(),
            vec![validators::max_chars(
                summary_max_chars,
                format!("Summary must be {summary_max_chars} characters or fewer"),
            )],
        ),
    ];

    let mut errors = FieldErrors::new();
    for (key, value, validators) in &rules {
        if let Err(message) = run_validators(validators, value) {
            errors.set(*key, message);
        }
    }
    errors
}

impl StepComponent for PersonalInfoStep {
    fn title(&self) -> &str {
        "Personal Information"
    }

    fn description(&self) -> &str {
        "Let's start with your basic contact information."
    }

    fn activate(&mut self, shared: &FormRecord) {
        self.form.load_record(shared);
        self.errors.clear_all();
        self.form.focus_first();
    }

    fn handle(&mut self, input: StepInput, ctx: &mut StepContext<'_>) -> bool {
        let (handled, change) = match input {
            StepInput::Key(key) => self.form.handle_key(key),
            StepInput::Text(action) => self.form.handle_text_action(action),
            StepInput::FocusNext => (self.form.focus_next(), None),
            StepInput::FocusPrev => (self.form.focus_prev(), None),
            StepInput::Submit => {
                self.submit(ctx);
                return true;
            }
            StepInput::Back => {
                ctx.retreat();
                return true;
            }
            _ => return false,
        };
        if let Some(change) = change {
            self.apply(change, ctx);
        }
        handled
    }

    fn draw(&self) -> DrawOutput {
        self.form.draw(&self.errors, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::{KeyCode, KeyEvent};

    fn valid() -> PersonalInfo {
        PersonalInfo {
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-0100".to_string(),
            location: "Berlin".to_string(),
            ..PersonalInfo::default()
        }
    }

    #[test]
    fn required_fields_are_reported_in_order() {
        let errors = validate(&PersonalInfo::default(), 500);
        let keys: Vec<&str> = errors.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["fullName", "email", "phone", "location"]);
        assert_eq!(errors.get("email"), Some("Email is required"));
    }

    #[test]
    fn optional_urls_are_checked_only_when_present() {
        assert!(validate(&valid(), 500).is_empty());

        let mut info = valid();
        info.email = "jane@example".to_string();
        info.linked_in = "https://example.com/jane".to_string();
        info.website = "janedoe.dev".to_string();
        let errors = validate(&info, 500);
        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
        assert_eq!(errors.get("linkedIn"), Some("Please enter a valid LinkedIn URL"));
        assert_eq!(
            errors.get("website"),
            Some("Please enter a valid website URL including http:// or https://")
        );
    }

    #[test]
    fn summary_over_cap_is_rejected() {
        let mut info = valid();
        info.summary = "x".repeat(11);
        assert!(validate(&info, 10).contains("summary"));
        info.summary.pop();
        assert!(validate(&info, 10).is_empty());
    }

    #[test]
    fn typing_reports_owned_keys_and_clears_error() {
        let mut step = PersonalInfoStep::new(500);
        let mut record = FormRecord::new().with("education", "kept");
        step.activate(&record);

        let mut ctx = StepContext::new(&mut record, true, false);
        step.handle(StepInput::Submit, &mut ctx);
        assert!(ctx.actions().is_empty());
        assert!(step.errors().contains("fullName"));

        step.handle(StepInput::Key(KeyEvent::plain(KeyCode::Char('J'))), &mut ctx);
        assert!(!step.errors().contains("fullName"));
        assert!(step.errors().contains("email"));
        ctx.finish();

        assert_eq!(record.text("fullName"), Some("J"));
        assert_eq!(record.text("education"), Some("kept"));
        assert_eq!(record.text("summary"), Some(""));
    }
}
