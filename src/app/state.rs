//! App state - pure data structure with no I/O logic

use chrono::{DateTime, Local};
use std::collections::BTreeSet;
use std::time::Duration;

use crate::app::status::StatusReporter;
use crate::config::Config;
use crate::messages::ui_events::{Field, InputMode};
use crate::messages::{NetworkCommand, RenderState};
use crate::models::{AccountSnapshot, Credential, PaymentMode};

/// Delayed transition scheduled after a successful deposit
#[derive(Clone, Debug, PartialEq)]
pub enum Followup {
    /// Open the payment gateway and report it
    OpenGateway { url: String },
    /// Re-read the balance after a direct deposit
    RefetchBalance,
}

/// Side effects requested by a state transition, executed by the App actor
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Network(NetworkCommand),
    Schedule { delay: Duration, followup: Followup },
    /// Drop every followup that has not fired yet
    CancelFollowups,
    OpenUrl(String),
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Credential holder
    pub credential: Credential,
    pub token_input: String,
    pub reveal_token: bool,

    // Account
    pub snapshot: Option<AccountSnapshot>,
    pub fetched_at: Option<DateTime<Local>>,

    // Deposit form
    pub amount_input: String,
    pub mode: PaymentMode,

    // Operation tracking
    pub status: StatusReporter,
    pub next_op_id: u64,
    pub in_flight: BTreeSet<u64>,
    /// Highest operation id that has completed so far
    pub last_completed_id: u64,

    // UI state
    pub focus: Field,
    pub input_mode: InputMode,
    pub show_help: bool,

    pub base_url: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        AppState {
            credential: Credential::default(),
            token_input: String::new(),
            reveal_token: false,
            snapshot: None,
            fetched_at: None,
            amount_input: String::new(),
            mode: PaymentMode::default(),
            status: StatusReporter::default(),
            next_op_id: 1,
            in_flight: BTreeSet::new(),
            last_completed_id: 0,
            focus: Field::Token,
            input_mode: InputMode::Normal,
            show_help: false,
            base_url: config.base().to_string(),
        }
    }

    /// Generate a unique, increasing operation ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_op_id;
        self.next_op_id += 1;
        id
    }

    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Get mutable reference to the focused input field
    pub fn current_input_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Token => &mut self.token_input,
            Field::Amount => &mut self.amount_input,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            snapshot: self.snapshot.clone(),
            fetched_at: self.fetched_at,
            is_loading: self.is_loading(),
            error_message: self.status.error().map(str::to_string),
            success_message: self.status.success().map(str::to_string),
            token_input: self.token_input.clone(),
            token_committed: !self.credential.is_empty()
                && self.credential == Credential::new(self.token_input.clone()),
            reveal_token: self.reveal_token,
            amount_input: self.amount_input.clone(),
            mode: self.mode,
            focus: self.focus,
            input_mode: self.input_mode,
            show_help: self.show_help,
            base_url: self.base_url.clone(),
        }
    }
}
