//! 向导状态机

mod controller;
mod members;
mod step;
mod validators;

pub use controller::{WizardController, WizardMode};
pub use step::WizardStep;
pub use validators::validate_step;
