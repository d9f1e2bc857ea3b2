use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::{wire, App, CoreError, CorrelationId, Session};

/// The core boundary as shells see it: bytes in, bytes out.
///
/// Inputs are fully decoded before the session is touched, so malformed
/// bytes never change engine state.
pub struct Bridge<A: App> {
    session: Arc<Session<A>>,
}

impl<A> Bridge<A>
where
    A: App,
    A::Event: DeserializeOwned,
    A::Effect: Serialize,
    A::Outcome: DeserializeOwned,
    A::View: Serialize,
{
    pub fn new(session: Arc<Session<A>>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Arc<Session<A>> {
        &self.session
    }

    /// Decode an event, run it, and return the encoded request list.
    pub fn process_event(&self, event: &[u8]) -> Result<Vec<u8>, CoreError> {
        let event: A::Event = wire::decode(event)?;
        let requests = self.session.handle_event(event);
        Ok(wire::encode(&requests)?)
    }

    /// Decode a response for `id` and return the encoded follow-up requests.
    pub fn handle_response(&self, id: &[u8], outcome: &[u8]) -> Result<Vec<u8>, CoreError> {
        let id = CorrelationId::from_slice(id)?;
        let outcome: A::Outcome = wire::decode(outcome)?;
        let requests = self.session.handle_response(id, outcome)?;
        Ok(wire::encode(&requests)?)
    }

    /// Encoded snapshot of the current view.
    pub fn view(&self) -> Result<Vec<u8>, CoreError> {
        Ok(wire::encode(&self.session.view())?)
    }
}

impl<A: App> Clone for Bridge<A> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
        }
    }
}
