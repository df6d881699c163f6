use crate::core::FormRecord;
use crate::resume::JobTarget;
use crate::resume::options::{self, COMPANY_SIZES, INDUSTRIES, JOB_LEVELS};
use crate::state::FieldErrors;
use crate::steps::form::{FieldChange, FormFields};
use crate::steps::{StepComponent, StepContext, StepInput};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::inputs::{SelectInput, TextArea, TextInput};
use crate::widgets::traits::DrawOutput;

const TITLE_OR_DESCRIPTION: &str = "Please provide either a target job title or a job description";

/// Either of these satisfies the step; both carry the error when neither is set.
const TARGET_KEYS: [&str; 2] = ["targetJobTitle", "jobDescription"];

pub struct JobTargetStep {
    form: FormFields,
    errors: FieldErrors,
}

impl JobTargetStep {
    pub fn new() -> Self {
        let form = FormFields::new()
            .with(
                TextInput::new("targetJobTitle", "Target Job Title")
                    .with_placeholder("e.g., Software Engineer, Marketing Manager"),
            )
            .with(
                SelectInput::new("targetIndustry", "Target Industry", options::labelled(INDUSTRIES))
                    .with_placeholder("Select industry (optional)"),
            )
            .with(
                SelectInput::new("targetCompanySize", "Company Size", options::labelled(COMPANY_SIZES))
                    .with_placeholder("Select company size (optional)"),
            )
            .with(
                SelectInput::new("targetJobLevel", "Job Level", options::labelled(JOB_LEVELS))
                    .with_placeholder("Select job level (optional)"),
            )
            .with(
                TextArea::new("jobDescription", "Job Description")
                    .with_placeholder("Paste the full job description here for best results..."),
            )
            .with(TextArea::new("keySkillsToHighlight", "Key Skills to Highlight").with_placeholder(
                "List specific skills you want to emphasize (e.g., Python, Project Management, Leadership)",
            ))
            .with(TextArea::new("additionalNotes", "Additional Notes").with_placeholder(
                "Any other information you want to share about your job search goals...",
            ));
        Self {
            form,
            errors: FieldErrors::new(),
        }
    }

    pub fn draft(&self) -> JobTarget {
        JobTarget {
            target_job_title: self.form.text("targetJobTitle"),
            target_industry: self.form.text("targetIndustry"),
            target_company_size: self.form.text("targetCompanySize"),
            target_job_level: self.form.text("targetJobLevel"),
            job_description: self.form.text("jobDescription"),
            key_skills_to_highlight: self.form.text("keySkillsToHighlight"),
            additional_notes: self.form.text("additionalNotes"),
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    fn apply(&mut self, change: FieldChange, ctx: &mut StepContext<'_>) {
        if TARGET_KEYS.contains(&change.key.as_str()) {
            for key in TARGET_KEYS {
                self.errors.clear(key);
            }
        } else {
            self.errors.clear(&change.key);
        }
        ctx.report_update(self.form.values());
    }

    fn submit(&mut self, ctx: &mut StepContext<'_>) {
        self.errors = validate(&self.draft());
        match self.errors.first_key() {
            None => ctx.advance(),
            Some(key) => {
                let key = key.to_string();
                self.form.focus_key(&key);
            }
        }
    }
}

impl Default for JobTargetStep {
    fn default() -> Self {
        Self::new()
    }
}

pub fn validate(target: &JobTarget) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if target.target_job_title.trim().is_empty() && target.job_description.trim().is_empty() {
        for key in TARGET_KEYS {
            errors.set(key, TITLE_OR_DESCRIPTION);
        }
    }
    errors
}

impl StepComponent for JobTargetStep {
    fn title(&self) -> &str {
        "Job Target"
    }

    fn description(&self) -> &str {
        "Help us tailor your resume to your target job. The more information you provide, the better we can optimize your resume."
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
        let mut out = DrawOutput::default();
        out.push(vec![Span::styled(
            "Tip: paste a real job posting so keywords can be matched for applicant tracking systems.",
            Style::new().color(Color::Yellow),
        )]);
        out.blank();
        out.append(self.form.draw(&self.errors, true));
        out
    }
}
