//! The resume flow: five steps, a seeded record and a completion handler that
//! hands the finished record to the generation backend.

pub mod state;

pub use state::{ExitReason, WizardState};

use crate::config::{AppConfig, WizardConfig};
use crate::core::{EntryIdGenerator, FormRecord, Value};
use crate::error::{SetupError, SubmitError};
use crate::gateway::{self, GenerationKind, GenerationResult, ResumeGateway};
use crate::resume::ResumeData;
use crate::resume::options::STARTER_SKILL_CATEGORIES;
use crate::state::{
    BackgroundCompletion, CompletionHandler, Sequencer, StepDescriptor, completion_fn,
};
use crate::steps::{EducationStep, ExperienceStep, JobTargetStep, PersonalInfoStep, SkillsStep};
use std::sync::{Arc, Mutex, PoisonError};

pub fn resume_steps(config: &WizardConfig) -> Vec<StepDescriptor> {
    let ids = EntryIdGenerator::new();
    vec![
        StepDescriptor::new(
            "personal",
            "Personal Info",
            PersonalInfoStep::new(config.summary_max_chars),
        ),
        StepDescriptor::new("education", "Education", EducationStep::new(ids.clone())),
        StepDescriptor::new("experience", "Experience", ExperienceStep::new(ids.clone())),
        StepDescriptor::new("skills", "Skills", SkillsStep::new(ids)),
        StepDescriptor::new("job-target", "Job Target", JobTargetStep::new()),
    ]
}

/// Base every seed is layered on.
pub fn default_record() -> FormRecord {
    let categories = STARTER_SKILL_CATEGORIES
        .iter()
        .map(|category| Value::from(*category))
        .collect::<Vec<_>>();
    FormRecord::new().with("skillCategories", Value::List(categories))
}

pub fn build_resume_wizard(
    config: &AppConfig,
    initial: Option<FormRecord>,
    on_complete: impl CompletionHandler + 'static,
) -> Result<Sequencer, SetupError> {
    let builder = Sequencer::builder(resume_steps(&config.wizard)).with_defaults(default_record());
    match initial {
        Some(initial) => builder.initial_data(initial),
        None => builder,
    }
    .build(on_complete)
}

/// Where the completion worker leaves its result for the shell to pick up.
#[derive(Debug, Clone, Default)]
pub struct OutcomeSlot(Arc<Mutex<Option<GenerationResult>>>);

impl OutcomeSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, result: GenerationResult) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = Some(result);
    }

    pub fn take(&self) -> Option<GenerationResult> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

/// Calls the backend on a worker thread. A failed generation is reported as a
/// rejected submission so the wizard stays on the last step.
pub fn gateway_completion(
    gateway: Arc<dyn ResumeGateway>,
    kind: GenerationKind,
    slot: OutcomeSlot,
) -> impl CompletionHandler {
    BackgroundCompletion::new(move |record: FormRecord| {
        let result = gateway::generate(gateway.as_ref(), kind, &record);
        let outcome = if result.success {
            Ok(())
        } else {
            let message = result.error.clone().unwrap_or_else(|| "Unknown error".to_string());
            Err(SubmitError::Rejected(message))
        };
        slot.store(result);
        outcome
    })
}

/// Completes without a backend: the finished record itself is the output.
pub fn offline_completion(slot: OutcomeSlot) -> impl CompletionHandler {
    completion_fn(move |record: FormRecord| {
        let data = ResumeData::from_record(&record)
            .map_err(|e| SubmitError::InvalidRecord(e.to_string()))?;
        let text = serde_json::to_string_pretty(&record)
            .map_err(|e| SubmitError::InvalidRecord(e.to_string()))?;
        slot.store(GenerationResult::succeeded(text, data.profile()));
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Transition;

    #[test]
    fn resume_flow_has_five_unique_steps() {
        let steps = resume_steps(&WizardConfig::default());
        let ids: Vec<&str> = steps.iter().map(|s| s.id().as_str()).collect();
        assert_eq!(ids, ["personal", "education", "experience", "skills", "job-target"]);
        assert!(steps.iter().all(|s| !s.is_optional()));
    }

    #[test]
    fn seed_is_layered_over_starter_categories() {
        let seed = FormRecord::new().with("fullName", "Jane");
        let sequencer =
            build_resume_wizard(&AppConfig::default(), Some(seed), completion_fn(|_| Ok(())))
                .expect("wizard");
        assert_eq!(sequencer.record().text("fullName"), Some("Jane"));
        let categories = sequencer.record().get("skillCategories").and_then(Value::as_list);
        assert_eq!(categories.map(|list| list.len()), Some(STARTER_SKILL_CATEGORIES.len()));
    }

    #[test]
    fn offline_completion_stores_the_record_as_json() {
        let slot = OutcomeSlot::new();
        let mut sequencer = build_resume_wizard(
            &AppConfig::default(),
            Some(FormRecord::new().with("fullName", "Jane")),
            offline_completion(slot.clone()),
        )
        .expect("wizard");

        assert_eq!(sequencer.submit(), Transition::SubmissionSettled(Ok(())));
        let outcome = slot.take().expect("outcome");
        assert!(outcome.success);
        assert!(outcome.content.unwrap_or_default().contains("\"fullName\": \"Jane\""));
        assert!(slot.take().is_none());
    }
}
