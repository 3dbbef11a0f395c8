//! Network actor - runs funds API requests in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::config::Config;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{execute_deposit, execute_fetch, FundsClient};

/// Network actor that processes funds commands
pub struct NetworkActor {
    client: FundsClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(config: &Config, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client: FundsClient::new(config),
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::FetchFunds { id, credential }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, "GET funds");
                                let result = execute_fetch(&client, id, credential).await;
                                tracing::info!(id, ok = result.is_success(), "GET funds completed");
                                let _ = response_tx.send(result);
                            });
                        }

                        Some(NetworkCommand::SubmitDeposit { id, credential, request }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, amount = request.amount, "POST deposit");
                                let result = execute_deposit(&client, id, credential, request).await;
                                tracing::info!(id, ok = result.is_success(), "POST deposit completed");
                                let _ = response_tx.send(result);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            let in_flight = self.active_requests.len();
                            if in_flight > 0 {
                                tracing::info!(in_flight, "Aborting in-flight requests");
                            }
                            self.active_requests.abort_all();
                            break;
                        }
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}
