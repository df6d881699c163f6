pub mod base;
pub mod inputs;
pub mod text_edit;
pub mod traits;
pub mod validators;
