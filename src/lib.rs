//! # Funds Desk
//!
//! A terminal client for a remote funds account.
//!
//! ## Features
//! - Bearer token authentication
//! - Account type, email and balance display
//! - Deposits, with net banking payments finished in the system browser
//! - Automatic balance refresh after direct deposits
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine + followup timers)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod browser;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;

// Re-export commonly used types
pub use models::{AccountSnapshot, Credential, DepositOutcome, DepositRequest, PaymentMode};
pub use error::FundsError;
pub use config::Config;
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{FundsClient, NetworkActor};
pub use browser::{SystemBrowser, UrlOpener};
