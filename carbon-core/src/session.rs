use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{App, ChainId, CoreError, CorrelationId, Engine, Request};

/// Single-writer handle around one [`Engine`], shared by the shell's tasks.
///
/// Calls are serialized by a mutex; none of them suspend, so the lock is
/// never held across an await point.
pub struct Session<A: App> {
    engine: Mutex<Engine<A>>,
    factory: Box<dyn Fn() -> Engine<A> + Send + Sync>,
}

impl<A: App> Session<A> {
    /// A session whose engine (and every engine after [`Session::reset`]) is
    /// built by `factory`.
    pub fn new(factory: impl Fn() -> Engine<A> + Send + Sync + 'static) -> Self {
        Self {
            engine: Mutex::new(factory()),
            factory: Box::new(factory),
        }
    }

    pub fn handle_event(&self, event: A::Event) -> Vec<Request<A::Effect>> {
        self.lock().handle_event(event)
    }

    pub fn handle_response(
        &self,
        id: CorrelationId,
        outcome: A::Outcome,
    ) -> Result<Vec<Request<A::Effect>>, CoreError> {
        self.lock().handle_response(id, outcome)
    }

    pub fn view(&self) -> A::View {
        self.lock().snapshot()
    }

    pub fn outstanding(&self) -> usize {
        self.lock().outstanding()
    }

    pub fn is_outstanding(&self, id: &CorrelationId) -> bool {
        self.lock().is_outstanding(id)
    }

    pub fn outstanding_in(&self, chain: ChainId) -> usize {
        self.lock().outstanding_in(chain)
    }

    /// Discard the engine (model and outstanding requests) and start over.
    /// Responses to requests issued before the reset are rejected.
    pub fn reset(&self) {
        let fresh = (self.factory)();
        *self.lock() = fresh;
        tracing::info!("session reset");
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut Engine<A>) -> R) -> R {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Engine<A>> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
