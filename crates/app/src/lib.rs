//! `einvoice-app`
//!
//! **Responsibility:** the invoice form as a state machine, plus the terminal front end.
//!
//! - `state`: pure reducer over the draft and the submission phase
//! - `session`: validation, document rendering and the service call around it
//!
//! The remote service remains the authority for stored invoices; nothing is
//! persisted locally.

pub mod session;
pub mod state;

pub use session::InvoiceSession;
pub use state::{Action, AppState, Failure, Phase};
