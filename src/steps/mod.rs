//! Step components: one per resume section, each owning a local draft.
//!
//! A step only sees the shared record through [`StepContext`]. Every edit is
//! reported immediately with [`StepContext::report_update`], and a step calls
//! [`StepContext::advance`] only after its own validation passes.

pub mod education;
pub mod entries;
pub mod experience;
pub mod form;
pub mod job_target;
pub mod personal;
pub mod skills;

use crate::core::FormRecord;
use crate::terminal::KeyEvent;
use crate::widgets::traits::{DrawOutput, TextAction};

pub use education::EducationStep;
pub use experience::ExperienceStep;
pub use job_target::JobTargetStep;
pub use personal::PersonalInfoStep;
pub use skills::SkillsStep;

/// Input routed from the runtime to the active step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepInput {
    Key(KeyEvent),
    Text(TextAction),
    FocusNext,
    FocusPrev,
    /// Validate and advance.
    Submit,
    Back,
    AddEntry,
    RemoveEntry,
    NextEntry,
    PrevEntry,
    AddItem,
    RemoveItem,
}

/// Navigation a step asked for during one `handle` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    Advance,
    Retreat,
}

/// Capabilities handed to a step while it handles one input.
pub struct StepContext<'a> {
    record: &'a mut FormRecord,
    is_first: bool,
    is_last: bool,
    changed: bool,
    actions: Vec<StepAction>,
}

impl<'a> StepContext<'a> {
    pub fn new(record: &'a mut FormRecord, is_first: bool, is_last: bool) -> Self {
        Self {
            record,
            is_first,
            is_last,
            changed: false,
            actions: Vec::new(),
        }
    }

    /// Latest record, including merges reported earlier in this call.
    pub fn shared_data(&self) -> &FormRecord {
        self.record
    }

    /// Shallow-merges `partial` into the shared record.
    pub fn report_update(&mut self, partial: FormRecord) -> bool {
        let changed = self.record.merge(&partial);
        self.changed |= changed;
        changed
    }

    pub fn advance(&mut self) {
        self.actions.push(StepAction::Advance);
    }

    pub fn retreat(&mut self) {
        self.actions.push(StepAction::Retreat);
    }

    pub fn is_first(&self) -> bool {
        self.is_first
    }

    pub fn is_last(&self) -> bool {
        self.is_last
    }

    pub fn actions(&self) -> &[StepAction] {
        &self.actions
    }

    /// Whether any report changed the record, and the queued navigation.
    pub fn finish(self) -> (bool, Vec<StepAction>) {
        (self.changed, self.actions)
    }
}

pub trait StepComponent: Send {
    fn title(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Rebuilds the local draft from `shared` and moves focus to the first field.
    fn activate(&mut self, shared: &FormRecord);

    /// Returns whether the input was consumed.
    fn handle(&mut self, input: StepInput, ctx: &mut StepContext<'_>) -> bool;

    fn draw(&self) -> DrawOutput;

    /// Step-specific key hints for the footer.
    fn shortcuts(&self) -> &'static [(&'static str, &'static str)] {
        &[]
    }
}
