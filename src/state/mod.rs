pub mod sequencer;
pub mod step;
pub mod submission;
pub mod validation;

pub use sequencer::{DispatchResult, Phase, Sequencer, SequencerBuilder, Transition};
pub use step::{StepDescriptor, StepStatus};
pub use submission::{
    BackgroundCompletion, CompletionHandler, FnCompletion, Submission, SubmitResult,
    completion_fn,
};
pub use validation::FieldErrors;
