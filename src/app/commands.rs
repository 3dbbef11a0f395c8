//! Command handlers - business logic for processing UI events and network results

use crate::app::state::{Effect, Followup};
use crate::app::AppState;
use crate::constants::{
    MSG_DEPOSIT_FAILED, MSG_FETCH_FAILED, MSG_GATEWAY_OPENED, MSG_REDIRECTING, REDIRECT_DELAY,
    REFETCH_DELAY,
};
use crate::error::FundsError;
use crate::messages::ui_events::{Field, InputMode};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{format_amount, Credential, DepositKind, DepositRequest};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_field(&mut self) -> Vec<Effect> {
        let effects = self.leave_field();
        self.focus = self.focus.next();
        effects
    }

    pub fn prev_field(&mut self) -> Vec<Effect> {
        let effects = self.leave_field();
        self.focus = self.focus.prev();
        effects
    }

    /// Leaving the token field while editing commits it
    fn leave_field(&mut self) -> Vec<Effect> {
        if self.input_mode == InputMode::Editing {
            self.input_mode = InputMode::Normal;
            if self.focus == Field::Token {
                return self.commit_token();
            }
        }
        Vec::new()
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        self.input_mode = InputMode::Editing;
    }

    pub fn stop_editing(&mut self) -> Vec<Effect> {
        self.leave_field()
    }

    pub fn enter_char(&mut self, c: char) {
        self.current_input_mut().push(c);
    }

    pub fn delete_char(&mut self) {
        self.current_input_mut().pop();
    }

    pub fn paste(&mut self, text: &str) {
        // Tokens are often copied with a trailing newline
        let text = text.trim_end_matches(['\r', '\n']);
        self.input_mode = InputMode::Editing;
        self.current_input_mut().push_str(text);
    }

    pub fn clear_field(&mut self) {
        self.current_input_mut().clear();
    }

    pub fn toggle_reveal(&mut self) {
        self.reveal_token = !self.reveal_token;
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Credential
    // ========================

    /// Store the raw token. The first non-empty token after an empty one
    /// triggers the initial balance fetch.
    pub fn set_token(&mut self, value: impl Into<String>) -> Vec<Effect> {
        let was_empty = self.credential.is_empty();
        self.credential = Credential::new(value);

        if was_empty && !self.credential.is_empty() {
            tracing::info!("Token entered, loading account");
            self.fetch_balance()
        } else {
            Vec::new()
        }
    }

    pub fn commit_token(&mut self) -> Vec<Effect> {
        let value = self.token_input.clone();
        self.set_token(value)
    }

    // ========================
    // Operations
    // ========================

    fn begin_operation(&mut self) -> u64 {
        let id = self.next_id();
        self.in_flight.insert(id);
        self.status.begin();
        id
    }

    /// Record a precondition failure. No request is made.
    fn reject(&mut self, error: &FundsError) {
        tracing::warn!(%error, "Operation rejected before sending");
        if let Some(message) = error.precondition_message() {
            self.status.fail(message);
        }
    }

    /// Read the account. Fails fast without a token.
    pub fn fetch_balance(&mut self) -> Vec<Effect> {
        if let Err(e) = self.credential.bearer() {
            self.reject(&e);
            return Vec::new();
        }

        let id = self.begin_operation();
        tracing::info!(id, "Fetching balance");
        vec![Effect::Network(NetworkCommand::FetchFunds {
            id,
            credential: self.credential.clone(),
        })]
    }

    /// Validate the form and submit a deposit
    pub fn submit_deposit(&mut self) -> Vec<Effect> {
        self.input_mode = InputMode::Normal;

        if let Err(e) = self.credential.bearer() {
            self.reject(&e);
            return Vec::new();
        }

        let request = match DepositRequest::from_input(&self.amount_input, self.mode) {
            Ok(request) => request,
            Err(e) => {
                self.reject(&e);
                return Vec::new();
            }
        };

        let id = self.begin_operation();
        tracing::info!(id, amount = request.amount, mode = request.mode.as_str(), "Submitting deposit");
        vec![
            Effect::CancelFollowups,
            Effect::Network(NetworkCommand::SubmitDeposit {
                id,
                credential: self.credential.clone(),
                request,
            }),
        ]
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) -> Vec<Effect> {
        let id = response.id();
        self.in_flight.remove(&id);

        // A fetch older than an operation that already completed may not touch
        // the display. Deposit results are always shown.
        let stale = id < self.last_completed_id;
        if !stale {
            self.last_completed_id = id;
        }

        match response {
            NetworkResponse::Funds { result, time_ms, .. } => {
                match result {
                    Ok(snapshot) => {
                        tracing::info!(id, time_ms, "Balance loaded");
                        if stale {
                            tracing::debug!(id, latest = self.last_completed_id, "Discarding stale balance");
                        } else {
                            self.snapshot = Some(snapshot);
                            self.fetched_at = Some(chrono::Local::now());
                        }
                    }
                    Err(e) => {
                        tracing::warn!(id, time_ms, error = %e, "Balance fetch failed");
                        if stale {
                            tracing::debug!(id, latest = self.last_completed_id, "Discarding stale fetch error");
                        } else {
                            self.status.fail(format!("{}{}", MSG_FETCH_FAILED, e));
                        }
                    }
                }
                Vec::new()
            }
            NetworkResponse::Deposit { request, result, time_ms, .. } => match result {
                Ok(outcome) => {
                    if let Some(message) = &outcome.message {
                        tracing::info!(id, %message, "Server message");
                    }
                    if let Some(balance) = outcome.balance {
                        tracing::info!(id, balance, "Server reported balance");
                    }

                    match outcome.kind(request.mode) {
                        DepositKind::Redirect { url } => {
                            tracing::info!(id, time_ms, "Deposit needs gateway payment");
                            self.status.succeed(MSG_REDIRECTING);
                            vec![Effect::Schedule {
                                delay: REDIRECT_DELAY,
                                followup: Followup::OpenGateway { url },
                            }]
                        }
                        DepositKind::Direct => {
                            tracing::info!(id, time_ms, amount = request.amount, "Deposit credited");
                            self.status.succeed(format!(
                                "Successfully deposited {}",
                                format_amount(request.amount)
                            ));
                            self.amount_input.clear();
                            vec![Effect::Schedule {
                                delay: REFETCH_DELAY,
                                followup: Followup::RefetchBalance,
                            }]
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(id, time_ms, error = %e, "Deposit failed");
                    self.status.fail(format!("{}{}", MSG_DEPOSIT_FAILED, e));
                    Vec::new()
                }
            },
        }
    }

    // ========================
    // Delayed followups
    // ========================

    pub fn run_followup(&mut self, followup: Followup) -> Vec<Effect> {
        match followup {
            Followup::OpenGateway { url } => {
                self.status.succeed(MSG_GATEWAY_OPENED);
                self.amount_input.clear();
                vec![Effect::OpenUrl(url)]
            }
            Followup::RefetchBalance => {
                self.status.clear_success();
                self.fetch_balance()
            }
        }
    }

    /// The system browser could not be launched for the gateway
    pub fn gateway_open_failed(&mut self, url: &str, error: &anyhow::Error) {
        tracing::error!(%error, "Could not open payment gateway");
        self.status.fail(format!(
            "Could not open the payment gateway ({}). Open this link to continue: {}",
            error, url
        ));
    }
}
