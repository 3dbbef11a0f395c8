//! Render state - data structure sent from App layer to UI for rendering

use chrono::{DateTime, Local};

use crate::messages::ui_events::{Field, InputMode};
use crate::models::{AccountSnapshot, PaymentMode};

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Account
    pub snapshot: Option<AccountSnapshot>,
    pub fetched_at: Option<DateTime<Local>>,

    // Operation status
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub success_message: Option<String>,

    // Inputs
    pub token_input: String,
    pub token_committed: bool,
    pub reveal_token: bool,
    pub amount_input: String,
    pub mode: PaymentMode,

    // UI state
    pub focus: Field,
    pub input_mode: InputMode,
    pub show_help: bool,

    pub base_url: String,
}

impl RenderState {
    /// Token text as it should appear on screen
    pub fn token_display(&self) -> String {
        if self.reveal_token || self.token_input.is_empty() {
            self.token_input.clone()
        } else {
            "•".repeat(self.token_input.chars().count())
        }
    }
}
