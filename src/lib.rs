//! Terminal wizard that collects a resume step by step and sends it to a
//! generation backend.

pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod resume;
pub mod runtime;
pub mod state;
pub mod steps;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use crate::core::{FormRecord, StepId, Value};
pub use error::{Result, WizardError};
pub use state::{Sequencer, SequencerBuilder, StepDescriptor};
pub use steps::{StepComponent, StepContext, StepInput};
