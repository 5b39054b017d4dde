//! Network actor - runs Car Service calls in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{execute_create, execute_fetch, CarClient};

/// Network actor that processes Car Service commands.
///
/// Requests are never cancelled once spawned; the App layer decides which
/// responses still matter.
pub struct NetworkActor {
    client: CarClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: CarClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        tracing::info!(base_url = %self.client.base_url(), "Network actor started");

        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::FetchCars { id, query }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::debug!(id, path = %query.path(), "Fetching cars");
                                let result = execute_fetch(&client, id, query).await;
                                let _ = response_tx.send(result);
                            });
                        }

                        Some(NetworkCommand::CreateCar { id, car }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::debug!(id, brand = %car.brand, model = %car.model, "Creating car");
                                let result = execute_create(&client, id, car).await;
                                let _ = response_tx.send(result);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            tracing::info!(in_flight = self.active_requests.len(), "Network actor shutting down");
                            self.active_requests.abort_all();
                            break;
                        }
                    }
                }

                // Reap finished tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}
