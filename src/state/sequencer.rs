use crate::core::FormRecord;
use crate::error::{SetupError, SubmitError};
use crate::state::step::{StepDescriptor, StepStatus};
use crate::state::submission::{CompletionHandler, SubmitResult, Submission};
use crate::steps::{StepAction, StepContext, StepInput};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Editing(usize),
    Submitting,
}

/// Outcome of a navigation or submission request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Moved { from: usize, to: usize },
    SubmissionPending,
    SubmissionSettled(SubmitResult),
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchResult {
    pub handled: bool,
    pub record_changed: bool,
    pub transitions: Vec<Transition>,
}

enum SubmissionState {
    Idle,
    InFlight(Receiver<SubmitResult>),
}

pub struct SequencerBuilder {
    steps: Vec<StepDescriptor>,
    defaults: FormRecord,
    initial: Option<Arc<FormRecord>>,
}

impl SequencerBuilder {
    pub fn new(steps: Vec<StepDescriptor>) -> Self {
        Self {
            steps,
            defaults: FormRecord::new(),
            initial: None,
        }
    }

    /// Base record every seed is layered on.
    pub fn with_defaults(mut self, defaults: FormRecord) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn initial_data(mut self, initial: impl Into<Arc<FormRecord>>) -> Self {
        self.initial = Some(initial.into());
        self
    }

    pub fn build(
        self,
        on_complete: impl CompletionHandler + 'static,
    ) -> Result<Sequencer, SetupError> {
        if self.steps.is_empty() {
            return Err(SetupError::EmptySteps);
        }
        let mut seen = HashSet::new();
        for step in &self.steps {
            if !seen.insert(step.id().as_str()) {
                return Err(SetupError::DuplicateStepId(step.id().to_string()));
            }
        }

        let record = match &self.initial {
            Some(initial) => FormRecord::layered(&self.defaults, initial),
            None => self.defaults.clone(),
        };
        let mut sequencer = Sequencer {
            steps: self.steps,
            current: 0,
            record,
            defaults: self.defaults,
            seed: self.initial,
            revision: 0,
            on_complete: Box::new(on_complete),
            submission: SubmissionState::Idle,
        };
        sequencer.activate_current();
        tracing::debug!(steps = sequencer.steps.len(), "sequencer ready");
        Ok(sequencer)
    }
}

/// Owns step order, the current position and the shared record.
///
/// Validation is the active step's business: the sequencer moves wherever a
/// step asks it to, subject only to bounds, the jump rule and the
/// single-submission guard.
pub struct Sequencer {
    steps: Vec<StepDescriptor>,
    current: usize,
    record: FormRecord,
    defaults: FormRecord,
    seed: Option<Arc<FormRecord>>,
    revision: u64,
    on_complete: Box<dyn CompletionHandler>,
    submission: SubmissionState,
}

impl Sequencer {
    pub fn new(
        steps: Vec<StepDescriptor>,
        initial_data: Option<FormRecord>,
        on_complete: impl CompletionHandler + 'static,
    ) -> Result<Self, SetupError> {
        let builder = SequencerBuilder::new(steps);
        match initial_data {
            Some(initial) => builder.initial_data(initial),
            None => builder,
        }
        .build(on_complete)
    }

    pub fn builder(steps: Vec<StepDescriptor>) -> SequencerBuilder {
        SequencerBuilder::new(steps)
    }

    pub fn steps(&self) -> &[StepDescriptor] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> &StepDescriptor {
        &self.steps[self.current]
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.steps.len()
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    /// Bumped every time the record actually changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.submission, SubmissionState::InFlight(_))
    }

    pub fn phase(&self) -> Phase {
        if self.is_submitting() {
            Phase::Submitting
        } else {
            Phase::Editing(self.current)
        }
    }

    pub fn status_at(&self, index: usize) -> StepStatus {
        StepStatus::of(index, self.current)
    }

    pub fn statuses(&self) -> Vec<StepStatus> {
        (0..self.steps.len()).map(|i| self.status_at(i)).collect()
    }

    /// Completed steps and the one right after the current step are reachable.
    pub fn can_jump_to(&self, index: usize) -> bool {
        !self.is_submitting()
            && index < self.steps.len()
            && (index < self.current || index == self.current + 1)
    }

    pub fn advance(&mut self) -> Transition {
        if self.is_submitting() {
            return Transition::Ignored;
        }
        if self.is_last() {
            return self.submit();
        }
        self.move_to(self.current + 1)
    }

    pub fn retreat(&mut self) -> Transition {
        if self.is_submitting() || self.current == 0 {
            return Transition::Ignored;
        }
        self.move_to(self.current - 1)
    }

    pub fn jump_to(&mut self, index: usize) -> Transition {
        if !self.can_jump_to(index) {
            tracing::debug!(index, current = self.current, "jump rejected");
            return Transition::Ignored;
        }
        self.move_to(index)
    }

    /// Shallow merge; returns whether anything changed.
    pub fn merge_data(&mut self, partial: &FormRecord) -> bool {
        let changed = self.record.merge(partial);
        if changed {
            self.revision += 1;
        }
        changed
    }

    /// Hands a snapshot of the record to the completion handler.
    ///
    /// A second call while one submission is in flight is ignored.
    pub fn submit(&mut self) -> Transition {
        if self.is_submitting() {
            return Transition::Ignored;
        }
        tracing::info!(fields = self.record.len(), "submitting record");
        match self.on_complete.on_complete(self.record.clone()) {
            Submission::Settled(result) => Transition::SubmissionSettled(self.settle(result)),
            Submission::Pending(rx) => {
                self.submission = SubmissionState::InFlight(rx);
                Transition::SubmissionPending
            }
        }
    }

    /// Settles an in-flight submission if its result has arrived.
    pub fn poll_submission(&mut self) -> Option<SubmitResult> {
        let SubmissionState::InFlight(rx) = &self.submission else {
            return None;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(SubmitError::Disconnected),
        };
        self.submission = SubmissionState::Idle;
        Some(self.settle(result))
    }

    /// Replaces the record with `defaults ⊕ initial`. The position is kept and
    /// the current step rebuilds its draft.
    pub fn reset(&mut self, initial: &FormRecord) {
        self.record = FormRecord::layered(&self.defaults, initial);
        self.revision += 1;
        self.activate_current();
        tracing::debug!(fields = self.record.len(), "record re-seeded");
    }

    /// Re-seeds once per distinct `initial` allocation. Handing back the same
    /// `Arc` is a no-op however often it happens.
    pub fn sync_initial_data(&mut self, initial: Arc<FormRecord>) -> bool {
        if self
            .seed
            .as_ref()
            .is_some_and(|seed| Arc::ptr_eq(seed, &initial))
        {
            return false;
        }
        self.reset(&initial);
        self.seed = Some(initial);
        true
    }

    /// Routes input to the current step and applies the navigation it asked for.
    pub fn dispatch(&mut self, input: StepInput) -> DispatchResult {
        let index = self.current;
        let is_last = index + 1 == self.steps.len();
        let mut ctx = StepContext::new(&mut self.record, index == 0, is_last);
        let handled = self.steps[index].renderer_mut().handle(input, &mut ctx);
        let (record_changed, actions) = ctx.finish();
        if record_changed {
            self.revision += 1;
        }

        let transitions = actions
            .into_iter()
            .map(|action| match action {
                StepAction::Advance => self.advance(),
                StepAction::Retreat => self.retreat(),
            })
            .collect();

        DispatchResult {
            handled,
            record_changed,
            transitions,
        }
    }

    fn move_to(&mut self, to: usize) -> Transition {
        let from = self.current;
        self.current = to;
        self.activate_current();
        tracing::debug!(
            from = %self.steps[from].id(),
            to = %self.steps[to].id(),
            "step changed"
        );
        Transition::Moved { from, to }
    }

    fn activate_current(&mut self) {
        let record = &self.record;
        self.steps[self.current].renderer_mut().activate(record);
    }

    fn settle(&mut self, result: SubmitResult) -> SubmitResult {
        self.submission = SubmissionState::Idle;
        match &result {
            Ok(()) => tracing::info!("submission completed"),
            Err(error) => tracing::error!(%error, "submission failed"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;
    use crate::state::submission::completion_fn;
    use crate::steps::StepComponent;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::traits::DrawOutput;
    use std::sync::Mutex;
    use std::sync::mpsc;

    /// Requires one text field before it advances.
    struct RequireField {
        key: &'static str,
        draft: String,
        activations: Arc<Mutex<usize>>,
    }

    impl RequireField {
        fn new(key: &'static str) -> Self {
            Self {
                key,
                draft: String::new(),
                activations: Arc::new(Mutex::new(0)),
            }
        }
    }

    impl StepComponent for RequireField {
        fn title(&self) -> &str {
            self.key
        }

        fn activate(&mut self, shared: &FormRecord) {
            self.draft = shared.text(self.key).unwrap_or_default().to_string();
            *self.activations.lock().expect("lock") += 1;
        }

        fn handle(&mut self, input: StepInput, ctx: &mut StepContext<'_>) -> bool {
            match input {
                StepInput::Key(key) => {
                    let Some(ch) = key.typed_char() else {
                        return false;
                    };
                    self.draft.push(ch);
                    ctx.report_update(FormRecord::new().with(self.key, self.draft.clone()));
                    true
                }
                StepInput::Submit => {
                    if !self.draft.is_empty() {
                        ctx.advance();
                    }
                    true
                }
                _ => false,
            }
        }

        fn draw(&self) -> DrawOutput {
            DrawOutput::plain_lines(vec![self.draft.clone()])
        }
    }

    /// Always valid.
    struct Finish;

    impl StepComponent for Finish {
        fn title(&self) -> &str {
            "done"
        }

        fn activate(&mut self, _shared: &FormRecord) {}

        fn handle(&mut self, input: StepInput, ctx: &mut StepContext<'_>) -> bool {
            if input == StepInput::Submit {
                ctx.advance();
                return true;
            }
            false
        }

        fn draw(&self) -> DrawOutput {
            DrawOutput::default()
        }
    }

    fn passthrough(n: usize) -> Vec<StepDescriptor> {
        (0..n)
            .map(|i| StepDescriptor::new(format!("s{i}"), format!("Step {i}"), Finish))
            .collect()
    }

    fn recorder() -> (
        Arc<Mutex<Vec<FormRecord>>>,
        impl CompletionHandler + 'static,
    ) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let handler = completion_fn(move |record| {
            sink.lock().expect("lock").push(record);
            Ok(())
        });
        (calls, handler)
    }

    fn type_text(seq: &mut Sequencer, text: &str) {
        for ch in text.chars() {
            seq.dispatch(StepInput::Key(KeyEvent::plain(KeyCode::Char(ch))));
        }
    }

    #[test]
    fn rejects_empty_and_duplicate_steps() {
        let (_, handler) = recorder();
        assert_eq!(
            Sequencer::new(Vec::new(), None, handler).err(),
            Some(SetupError::EmptySteps)
        );

        let steps = vec![
            StepDescriptor::new("a", "A", Finish),
            StepDescriptor::new("a", "A again", Finish),
        ];
        let (_, handler) = recorder();
        assert_eq!(
            Sequencer::new(steps, None, handler).err(),
            Some(SetupError::DuplicateStepId("a".to_string()))
        );
    }

    #[test]
    fn starts_at_zero_and_retreat_at_first_is_noop() {
        for n in 1..5 {
            let (_, handler) = recorder();
            let mut seq = Sequencer::new(passthrough(n), None, handler).expect("sequencer");
            assert_eq!(seq.current_index(), 0);
            assert_eq!(seq.retreat(), Transition::Ignored);
            assert_eq!(seq.current_index(), 0);
        }
    }

    #[test]
    fn completes_exactly_once_after_last_advance() {
        for n in 1..5 {
            let (calls, handler) = recorder();
            let mut seq = Sequencer::new(passthrough(n), None, handler).expect("sequencer");
            for expected in 1..n {
                assert_eq!(
                    seq.advance(),
                    Transition::Moved {
                        from: expected - 1,
                        to: expected
                    }
                );
            }
            assert_eq!(seq.current_index(), n - 1);
            assert!(calls.lock().expect("lock").is_empty());

            assert_eq!(seq.advance(), Transition::SubmissionSettled(Ok(())));
            assert_eq!(calls.lock().expect("lock").len(), 1);
            assert_eq!(seq.phase(), Phase::Editing(n - 1));
        }
    }

    #[test]
    fn jump_allows_back_or_one_forward_only() {
        let n = 5;
        for start in 0..n {
            for target in 0..n + 2 {
                let (_, handler) = recorder();
                let mut seq = Sequencer::new(passthrough(n), None, handler).expect("sequencer");
                for _ in 0..start {
                    seq.advance();
                }
                let allowed = target < n && (target < start || target == start + 1);
                let transition = seq.jump_to(target);
                if allowed {
                    assert_eq!(transition, Transition::Moved { from: start, to: target });
                    assert_eq!(seq.current_index(), target);
                } else {
                    assert_eq!(transition, Transition::Ignored);
                    assert_eq!(seq.current_index(), start);
                }
            }
        }
    }

    #[test]
    fn merge_is_shallow_and_skips_identical_partials() {
        let (_, handler) = recorder();
        let mut seq = Sequencer::new(passthrough(1), None, handler).expect("sequencer");

        assert!(seq.merge_data(&FormRecord::new().with("a", 1)));
        assert!(seq.merge_data(&FormRecord::new().with("b", 2)));
        assert!(seq.merge_data(&FormRecord::new().with("a", 3)));
        assert_eq!(seq.record().get("a"), Some(&Value::Number(3.0)));
        assert_eq!(seq.record().get("b"), Some(&Value::Number(2.0)));

        let revision = seq.revision();
        assert!(!seq.merge_data(&FormRecord::new().with("a", 3)));
        assert_eq!(seq.revision(), revision);
    }

    #[test]
    fn new_seed_identity_resets_but_same_reference_does_not() {
        let (_, handler) = recorder();
        let first = Arc::new(FormRecord::new());
        let mut seq = Sequencer::builder(passthrough(2))
            .with_defaults(FormRecord::new().with("skills", Value::List(Vec::new())))
            .initial_data(Arc::clone(&first))
            .build(handler)
            .expect("sequencer");

        seq.merge_data(&FormRecord::new().with("email", "typed@example.com"));
        for _ in 0..3 {
            assert!(!seq.sync_initial_data(Arc::clone(&first)));
        }
        assert_eq!(seq.record().text("email"), Some("typed@example.com"));

        let second = Arc::new(FormRecord::new().with("fullName", "Jane"));
        assert!(seq.sync_initial_data(Arc::clone(&second)));
        assert_eq!(seq.record().text("fullName"), Some("Jane"));
        assert!(seq.record().get("email").is_none());
        assert!(seq.record().contains_key("skills"));

        seq.merge_data(&FormRecord::new().with("phone", "555"));
        assert!(!seq.sync_initial_data(second));
        assert_eq!(seq.record().text("phone"), Some("555"));
    }

    #[test]
    fn navigation_reactivates_destination_step() {
        let (_, handler) = recorder();
        let step = RequireField::new("x");
        let activations = Arc::clone(&step.activations);
        let steps = vec![
            StepDescriptor::new("a", "A", step),
            StepDescriptor::new("b", "B", Finish),
        ];
        let mut seq = Sequencer::new(steps, None, handler).expect("sequencer");
        assert_eq!(*activations.lock().expect("lock"), 1);

        type_text(&mut seq, "foo");
        seq.dispatch(StepInput::Submit);
        seq.retreat();
        assert_eq!(*activations.lock().expect("lock"), 2);
    }

    #[test]
    fn three_step_scenario_hands_full_record_to_completion() {
        let (calls, handler) = recorder();
        let steps = vec![
            StepDescriptor::new("a", "A", RequireField::new("x")),
            StepDescriptor::new("b", "B", RequireField::new("y")),
            StepDescriptor::new("c", "C", Finish),
        ];
        let mut seq = Sequencer::new(steps, None, handler).expect("sequencer");

        seq.dispatch(StepInput::Submit);
        assert_eq!(seq.current_index(), 0, "empty x must not advance");

        type_text(&mut seq, "foo");
        seq.dispatch(StepInput::Submit);
        type_text(&mut seq, "bar");
        seq.dispatch(StepInput::Submit);
        assert_eq!(seq.current_index(), 2);

        let result = seq.dispatch(StepInput::Submit);
        assert_eq!(
            result.transitions,
            vec![Transition::SubmissionSettled(Ok(()))]
        );
        let calls = calls.lock().expect("lock");
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            FormRecord::new().with("x", "foo").with("y", "bar")
        );
    }

    #[test]
    fn pending_submission_blocks_navigation_until_settled() {
        let (tx, rx) = mpsc::channel();
        let rx = Mutex::new(Some(rx));
        let handler = move |_record: FormRecord| {
            let rx = rx.lock().expect("lock").take().expect("single submission");
            Submission::Pending(rx)
        };
        struct Pending<F>(F);
        impl<F: FnMut(FormRecord) -> Submission + Send> CompletionHandler for Pending<F> {
            fn on_complete(&mut self, record: FormRecord) -> Submission {
                (self.0)(record)
            }
        }

        let mut seq = Sequencer::new(passthrough(2), None, Pending(handler)).expect("sequencer");
        seq.advance();
        assert_eq!(seq.advance(), Transition::SubmissionPending);
        assert_eq!(seq.phase(), Phase::Submitting);

        assert_eq!(seq.retreat(), Transition::Ignored);
        assert_eq!(seq.jump_to(0), Transition::Ignored);
        assert_eq!(seq.advance(), Transition::Ignored);
        assert_eq!(seq.submit(), Transition::Ignored);
        assert!(seq.merge_data(&FormRecord::new().with("late", true)));
        assert_eq!(seq.poll_submission(), None);

        tx.send(Err(SubmitError::Rejected("quota".to_string())))
            .expect("send");
        assert_eq!(
            seq.poll_submission(),
            Some(Err(SubmitError::Rejected("quota".to_string())))
        );
        assert_eq!(seq.phase(), Phase::Editing(1));
        assert_eq!(seq.retreat(), Transition::Moved { from: 1, to: 0 });
    }

    #[test]
    fn dropped_worker_settles_as_disconnected() {
        struct Dropping;
        impl CompletionHandler for Dropping {
            fn on_complete(&mut self, _record: FormRecord) -> Submission {
                let (_tx, rx) = mpsc::channel();
                Submission::Pending(rx)
            }
        }

        let mut seq = Sequencer::new(passthrough(1), None, Dropping).expect("sequencer");
        assert_eq!(seq.advance(), Transition::SubmissionPending);
        assert_eq!(seq.poll_submission(), Some(Err(SubmitError::Disconnected)));
        assert!(!seq.is_submitting());
    }

    #[test]
    fn failed_completion_leaves_wizard_usable() {
        let mut attempts = 0;
        let handler = completion_fn(move |_| {
            attempts += 1;
            if attempts == 1 {
                Err(SubmitError::failed("backend down"))
            } else {
                Ok(())
            }
        });
        let mut seq = Sequencer::new(passthrough(1), None, handler).expect("sequencer");
        assert_eq!(
            seq.advance(),
            Transition::SubmissionSettled(Err(SubmitError::failed("backend down")))
        );
        assert!(!seq.is_submitting());
        assert_eq!(seq.advance(), Transition::SubmissionSettled(Ok(())));
    }
}
