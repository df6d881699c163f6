use crate::state::{Sequencer, Transition};
use crate::steps::StepInput;
use crate::ui::spinner::Spinner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Completed,
    Cancelled,
}

/// Everything the event loop mutates: the sequencer plus shell-level state
/// the steps never see.
pub struct WizardState {
    sequencer: Sequencer,
    spinner: Spinner,
    last_error: Option<String>,
    exit: Option<ExitReason>,
}

impl WizardState {
    pub fn new(sequencer: Sequencer) -> Self {
        Self {
            sequencer,
            spinner: Spinner::new(),
            last_error: None,
            exit: None,
        }
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn sequencer_mut(&mut self) -> &mut Sequencer {
        &mut self.sequencer
    }

    pub fn spinner(&self) -> &Spinner {
        &self.spinner
    }

    /// Message of the most recent failed submission, cleared on the next attempt.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn exit_reason(&self) -> Option<ExitReason> {
        self.exit
    }

    pub fn should_exit(&self) -> bool {
        self.exit.is_some()
    }

    pub fn request_exit(&mut self) {
        if self.exit.is_none() {
            tracing::info!("wizard cancelled");
            self.exit = Some(ExitReason::Cancelled);
        }
    }

    /// Returns whether anything visible changed.
    pub fn dispatch(&mut self, input: StepInput) -> bool {
        let result = self.sequencer.dispatch(input);
        let moved = !result.transitions.is_empty();
        for transition in result.transitions {
            self.apply(transition);
        }
        result.handled || result.record_changed || moved
    }

    pub fn jump_to(&mut self, index: usize) -> bool {
        let transition = self.sequencer.jump_to(index);
        let moved = transition != Transition::Ignored;
        self.apply(transition);
        moved
    }

    /// Animates the spinner and settles a finished submission.
    pub fn tick(&mut self) -> bool {
        if !self.sequencer.is_submitting() {
            return false;
        }
        self.spinner.tick();
        if let Some(result) = self.sequencer.poll_submission() {
            self.apply(Transition::SubmissionSettled(result));
        }
        true
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::SubmissionPending => self.last_error = None,
            Transition::SubmissionSettled(Ok(())) => {
                self.last_error = None;
                self.exit = Some(ExitReason::Completed);
            }
            Transition::SubmissionSettled(Err(error)) => {
                self.last_error = Some(error.to_string());
            }
            Transition::Moved { .. } | Transition::Ignored => {}
        }
    }
}
