//! Multi-step upload flow: document details, optional hardcopy linkage or
//! creation, then submission.
//!
//! [`transition`] is pure. It never talks to the network; anything that has
//! to happen as a consequence of a step is returned as a [`WizardEffect`] for
//! the controller to carry out.

mod machine;
mod session;

pub use machine::{Transition, WizardEffect, WizardEvent, WizardState, transition};
pub use session::{HardcopyOption, UploadSession};
