pub mod interaction;
pub mod reconciler;

pub use interaction::{ClickOutcome, classify_click};
pub use reconciler::{ReconcileOutcome, Reconciler, RequestTicket};
