//! App layer - central state management and command processing
//!
//! The App actor receives UI events, network responses and fired followups,
//! updates state, and emits network commands and render state.

pub mod state;
pub mod status;
pub mod followup;
pub mod actor;
pub mod commands;

pub use state::{AppState, Effect, Followup};
pub use status::StatusReporter;
pub use actor::AppActor;
