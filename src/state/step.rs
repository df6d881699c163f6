use crate::core::StepId;
use crate::steps::StepComponent;

/// One page of a wizard. Fixed once the sequencer is built.
pub struct StepDescriptor {
    id: StepId,
    label: String,
    optional: bool,
    renderer: Box<dyn StepComponent>,
}

impl StepDescriptor {
    pub fn new(
        id: impl Into<StepId>,
        label: impl Into<String>,
        renderer: impl StepComponent + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            optional: false,
            renderer: Box::new(renderer),
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn id(&self) -> &StepId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn renderer(&self) -> &dyn StepComponent {
        self.renderer.as_ref()
    }

    pub fn renderer_mut(&mut self) -> &mut dyn StepComponent {
        self.renderer.as_mut()
    }
}

impl std::fmt::Debug for StepDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepDescriptor")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("optional", &self.optional)
            .finish_non_exhaustive()
    }
}

/// Stepper view of a step relative to the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Current,
    Pending,
}

impl StepStatus {
    pub fn of(index: usize, current: usize) -> Self {
        match index.cmp(&current) {
            std::cmp::Ordering::Less => Self::Completed,
            std::cmp::Ordering::Equal => Self::Current,
            std::cmp::Ordering::Greater => Self::Pending,
        }
    }
}
