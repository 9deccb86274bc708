//! Analytics events emitted by catalog operations.
//!
//! Notification is fire-and-forget: [`EventNotifier::notify`] never blocks
//! and never fails the operation that triggered it.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::{Value as JsonValue, json};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::AnalyticsSettings;

pub const CREATE_GAME: &str = "Create Game";
pub const CREATE_RELEASE: &str = "Create Release";

/// A tracked event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub user_id: i32,
    #[serde(rename = "event")]
    pub name: String,
    pub properties: JsonValue,
}

impl AnalyticsEvent {
    /// Event about a game, attributed to its owner.
    pub fn for_game(name: &str, user_id: i32, username: &str, game_slug: &str) -> Self {
        Self {
            user_id,
            name: name.to_string(),
            properties: json!({
                "game": game_slug,
                "distinct_id": username,
            }),
        }
    }
}

/// Sink for analytics events.
pub trait EventNotifier: Send + Sync {
    fn notify(&self, event: AnalyticsEvent);
}

pub type SharedNotifier = Arc<dyn EventNotifier>;

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl EventNotifier for NoopNotifier {
    fn notify(&self, event: AnalyticsEvent) {
        debug!(event = %event.name, "Analytics disabled, dropping event");
    }
}

/// Hands events to a bounded queue drained by a background delivery task.
///
/// A full or closed queue drops the event.
#[derive(Clone)]
pub struct QueuedNotifier {
    sender: mpsc::Sender<AnalyticsEvent>,
}

impl QueuedNotifier {
    /// Spawn the delivery task and return a notifier feeding it.
    ///
    /// The task ends once every clone of the notifier is dropped and the
    /// queue is drained. Must be called from within a tokio runtime.
    pub fn spawn(
        endpoint: String,
        token: Option<SecretString>,
        capacity: usize,
    ) -> (Self, JoinHandle<()>) {
        let (notifier, receiver) = Self::channel(capacity);
        let worker = tokio::spawn(deliver_events(
            reqwest::Client::new(),
            endpoint,
            token,
            receiver,
        ));
        (notifier, worker)
    }

    /// Create a notifier and the receiving end of its queue.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<AnalyticsEvent>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

impl EventNotifier for QueuedNotifier {
    fn notify(&self, event: AnalyticsEvent) {
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(event)) => {
                warn!(event = %event.name, "Analytics queue full, dropping event");
            }
            Err(mpsc::error::TrySendError::Closed(event)) => {
                debug!(event = %event.name, "Analytics queue closed, dropping event");
            }
        }
    }
}

/// Post queued events to the collector until every sender is gone.
async fn deliver_events(
    client: reqwest::Client,
    endpoint: String,
    token: Option<SecretString>,
    mut receiver: mpsc::Receiver<AnalyticsEvent>,
) {
    while let Some(event) = receiver.recv().await {
        let mut request = client.post(&endpoint).json(&event);
        if let Some(ref token) = token {
            request = request.bearer_auth(token.expose_secret());
        }

        match request.send().await.and_then(|r| r.error_for_status()) {
            Ok(_) => debug!(event = %event.name, "Analytics event delivered"),
            Err(e) => warn!(event = %event.name, error = %e, "Failed to deliver analytics event"),
        }
    }
    debug!("Analytics delivery stopped");
}

/// A configured notifier plus its delivery task, if any.
pub struct AnalyticsHandle {
    notifier: SharedNotifier,
    worker: Option<JoinHandle<()>>,
}

impl AnalyticsHandle {
    pub fn new(notifier: SharedNotifier, worker: Option<JoinHandle<()>>) -> Self {
        Self { notifier, worker }
    }

    /// Notifier to hand to catalog operations.
    pub fn notifier(&self) -> &dyn EventNotifier {
        self.notifier.as_ref()
    }

    /// Whether events are delivered anywhere.
    pub fn is_enabled(&self) -> bool {
        self.worker.is_some()
    }

    /// Stop accepting events and wait until queued ones are delivered.
    ///
    /// Clones of the notifier taken elsewhere keep the queue open, so drop
    /// them first.
    pub async fn shutdown(self) {
        drop(self.notifier);
        if let Some(worker) = self.worker
            && let Err(e) = worker.await
        {
            warn!(error = %e, "Analytics delivery task failed");
        }
    }
}

/// Build the notifier selected by configuration.
pub fn build_notifier(settings: &AnalyticsSettings) -> AnalyticsHandle {
    match settings.endpoint {
        Some(ref endpoint) => {
            info!("Analytics delivery enabled: {}", endpoint);
            let (notifier, worker) = QueuedNotifier::spawn(
                endpoint.clone(),
                settings.token.clone(),
                settings.queue_capacity,
            );
            AnalyticsHandle::new(Arc::new(notifier), Some(worker))
        }
        None => {
            debug!("Analytics disabled");
            AnalyticsHandle::new(Arc::new(NoopNotifier), None)
        }
    }
}
