use serde::{Deserialize, Serialize};

use crate::CorrelationId;

/// An effect the core wants the shell to perform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Request<Ef> {
    pub id: CorrelationId,
    pub effect: Ef,
}

/// The shell's answer to a [`Request`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Response<Out> {
    pub id: CorrelationId,
    pub outcome: Out,
}

impl<Out> Response<Out> {
    pub fn new(id: CorrelationId, outcome: Out) -> Self {
        Self { id, outcome }
    }
}
