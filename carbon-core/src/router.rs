use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::CorrelationId;

/// Channel-backed router used by shells to feed events to a running
/// dispatcher, and by capability tasks to hand back outcomes. Payloads
/// crossing the thread boundary must be `Send + 'static`.
pub struct Router<AppEvent, Outcome> {
    app_tx: UnboundedSender<AppEvent>,
    response_tx: UnboundedSender<(CorrelationId, Outcome)>,
}

impl<AppEvent, Outcome> Clone for Router<AppEvent, Outcome> {
    fn clone(&self) -> Self {
        Self {
            app_tx: self.app_tx.clone(),
            response_tx: self.response_tx.clone(),
        }
    }
}

impl<AppEvent, Outcome> Router<AppEvent, Outcome> {
    /// Create a new router around existing channels.
    pub fn new(
        app_tx: UnboundedSender<AppEvent>,
        response_tx: UnboundedSender<(CorrelationId, Outcome)>,
    ) -> Self {
        Self {
            app_tx,
            response_tx,
        }
    }

    /// Send an event to the dispatcher loop. Returns false once the loop is gone.
    pub fn send_event(&self, event: AppEvent) -> bool
    where
        AppEvent: Send + 'static,
    {
        self.app_tx.send(event).is_ok()
    }

    /// Deliver a capability outcome for `id`.
    pub fn send_response(&self, id: CorrelationId, outcome: Outcome) -> bool
    where
        Outcome: Send + 'static,
    {
        self.response_tx.send((id, outcome)).is_ok()
    }

    /// Clone the underlying response channel sender (primarily for spawning tasks).
    pub fn response_sender(&self) -> UnboundedSender<(CorrelationId, Outcome)> {
        self.response_tx.clone()
    }
}

/// Paired channel endpoints owned by the dispatcher loop.
pub struct RouterChannels<AppEvent, Outcome> {
    pub router: Router<AppEvent, Outcome>,
    pub app_rx: UnboundedReceiver<AppEvent>,
    pub response_rx: UnboundedReceiver<(CorrelationId, Outcome)>,
}

impl<AppEvent, Outcome> RouterChannels<AppEvent, Outcome> {
    /// Allocate an event/response channel pair and return the router plus receivers.
    pub fn new() -> Self {
        let (app_tx, app_rx) = unbounded_channel();
        let (response_tx, response_rx) = unbounded_channel();
        Self {
            router: Router::new(app_tx, response_tx),
            app_rx,
            response_rx,
        }
    }
}

impl<AppEvent, Outcome> Default for RouterChannels<AppEvent, Outcome> {
    fn default() -> Self {
        Self::new()
    }
}
