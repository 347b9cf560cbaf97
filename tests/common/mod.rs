#![allow(dead_code)]

use arrivals_search::config::ClientConfig;
use arrivals_search::domain::model::Notification;
use arrivals_search::domain::ports::Notifier;
use arrivals_search::{ApiClient, FlightClient, MemoryStore};
use httpmock::MockServer;
use std::sync::{Arc, Mutex};

pub const FLIGHT_ENDPOINT: &str = "/api/v1/flight";

/// Collects notifications so tests can count and inspect them.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    received: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> Vec<Notification> {
        self.received.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.received.lock().unwrap().push(notification.clone());
    }
}

pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::new(server.base_url()).with_flight_endpoint(FLIGHT_ENDPOINT)
}

pub fn api_client(
    server: &MockServer,
    storage: MemoryStore,
    notifier: RecordingNotifier,
) -> ApiClient<MemoryStore, RecordingNotifier> {
    ApiClient::new(config_for(server), storage, notifier)
}

pub fn flight_client(
    server: &MockServer,
    storage: MemoryStore,
    notifier: RecordingNotifier,
) -> FlightClient<MemoryStore, RecordingNotifier> {
    FlightClient::new(api_client(server, storage, notifier))
}
