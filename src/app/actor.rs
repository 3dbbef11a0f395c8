//! App actor - message loop processing UI events, network responses and followups

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::app::followup::{FiredFollowup, FollowupScheduler};
use crate::app::state::{AppState, Effect};
use crate::browser::UrlOpener;
use crate::config::Config;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that owns all client state
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
    opener: Arc<dyn UrlOpener>,
}

impl AppActor {
    pub fn new(
        config: &Config,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
        opener: Arc<dyn UrlOpener>,
    ) -> Self {
        AppActor {
            state: AppState::new(config),
            network_tx,
            render_tx,
            opener,
        }
    }

    /// Pre-fill the token field; it is committed when the actor starts
    pub fn with_token(mut self, token: Option<String>) -> Self {
        if let Some(token) = token {
            self.state.token_input = token;
        }
        self
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        let (fired_tx, mut fired_rx) = mpsc::unbounded_channel::<FiredFollowup>();
        let mut scheduler = FollowupScheduler::new(fired_tx);

        let effects = self.state.commit_token();
        self.apply(effects, &mut scheduler);
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                event = ui_rx.recv() => {
                    // A closed UI channel means the surface is gone
                    let event = match event {
                        Some(UiEvent::Quit) | None => {
                            let cancelled = scheduler.cancel_all();
                            tracing::info!(cancelled, "Shutting down");
                            let _ = self.network_tx.send(NetworkCommand::Shutdown);
                            break;
                        }
                        Some(event) => event,
                    };
                    let effects = self.handle_ui_event(event);
                    self.apply(effects, &mut scheduler);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    let effects = self.state.handle_response(response);
                    self.apply(effects, &mut scheduler);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some((handle, followup)) = fired_rx.recv() => {
                    if !scheduler.take(handle) {
                        continue;
                    }
                    tracing::debug!(handle, ?followup, "Followup fired");
                    let effects = self.state.run_followup(followup);
                    self.apply(effects, &mut scheduler);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }

        // Teardown: nothing scheduled may outlive the actor
        scheduler.cancel_all();
    }

    /// Translate a UI event into state changes
    fn handle_ui_event(&mut self, event: UiEvent) -> Vec<Effect> {
        match event {
            UiEvent::NextField => return self.state.next_field(),
            UiEvent::PrevField => return self.state.prev_field(),

            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => return self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::Paste(text) => self.state.paste(&text),
            UiEvent::ClearField => self.state.clear_field(),

            UiEvent::FetchBalance => return self.state.fetch_balance(),
            UiEvent::SubmitDeposit => return self.state.submit_deposit(),

            UiEvent::ToggleReveal => self.state.toggle_reveal(),
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // Handled by the run loop
            UiEvent::Quit => {}
        }

        Vec::new()
    }

    /// Execute the side effects of a transition
    fn apply(&mut self, effects: Vec<Effect>, scheduler: &mut FollowupScheduler) {
        for effect in effects {
            match effect {
                Effect::Network(cmd) => {
                    if self.network_tx.send(cmd).is_err() {
                        tracing::error!("Network actor is gone");
                    }
                }
                Effect::Schedule { delay, followup } => {
                    scheduler.schedule(delay, followup);
                }
                Effect::CancelFollowups => {
                    let cancelled = scheduler.cancel_all();
                    if cancelled > 0 {
                        tracing::info!(cancelled, "Cancelled pending followups");
                    }
                }
                Effect::OpenUrl(url) => {
                    if let Err(e) = self.opener.open(&url) {
                        self.state.gateway_open_failed(&url, &e);
                    }
                }
            }
        }
    }
}
