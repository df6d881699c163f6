pub mod renderer;
pub mod span;
pub mod spinner;
pub mod stepper;
pub mod style;

pub use renderer::{RenderFrame, Renderer, RendererConfig};
