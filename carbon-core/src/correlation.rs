use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

use crate::DecodeError;

/// Opaque 128-bit identifier tying a response to the request it answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationId([u8; 16]);

impl CorrelationId {
    /// Random (v4) identifier.
    pub fn new() -> Self {
        CorrelationId(*Uuid::new_v4().as_bytes())
    }

    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        CorrelationId(bytes)
    }

    /// Parse the raw bytes handed back by a shell.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        let raw: [u8; 16] = bytes
            .try_into()
            .map_err(|_| DecodeError::InvalidCorrelationId { len: bytes.len() })?;
        Ok(CorrelationId(raw))
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Uuid::from_bytes(self.0), f)
    }
}

/// Identifies one causal chain: the requests descending from a single event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainId(pub u64);

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chain-{}", self.0)
    }
}

struct Entry<T> {
    chain: ChainId,
    value: T,
}

/// Outstanding requests, keyed by correlation id and grouped by chain.
///
/// Each id resolves at most once; a second `resolve` of the same id returns
/// `None`, as does any id that was never registered here.
pub struct CorrelationRegistry<T> {
    outstanding: HashMap<CorrelationId, Entry<T>>,
    chains: HashMap<ChainId, usize>,
}

impl<T> CorrelationRegistry<T> {
    pub fn new() -> Self {
        Self {
            outstanding: HashMap::new(),
            chains: HashMap::new(),
        }
    }

    /// A fresh id that is not currently outstanding.
    pub fn issue(&self) -> CorrelationId {
        loop {
            let id = CorrelationId::new();
            if !self.outstanding.contains_key(&id) {
                return id;
            }
        }
    }

    /// Track `id` as outstanding in `chain`. Returns false (and keeps the
    /// existing entry) if the id is already outstanding.
    pub fn register(&mut self, id: CorrelationId, chain: ChainId, value: T) -> bool {
        if self.outstanding.contains_key(&id) {
            return false;
        }
        self.outstanding.insert(id, Entry { chain, value });
        *self.chains.entry(chain).or_insert(0) += 1;
        true
    }

    /// Remove `id`, returning its chain and payload if it was outstanding.
    pub fn resolve(&mut self, id: &CorrelationId) -> Option<(ChainId, T)> {
        let Entry { chain, value } = self.outstanding.remove(id)?;
        if let Some(count) = self.chains.get_mut(&chain) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.chains.remove(&chain);
            }
        }
        Some((chain, value))
    }

    pub fn get(&self, id: &CorrelationId) -> Option<&T> {
        self.outstanding.get(id).map(|entry| &entry.value)
    }

    pub fn chain_of(&self, id: &CorrelationId) -> Option<ChainId> {
        self.outstanding.get(id).map(|entry| entry.chain)
    }

    pub fn is_outstanding(&self, id: &CorrelationId) -> bool {
        self.outstanding.contains_key(id)
    }

    pub fn outstanding_in(&self, chain: ChainId) -> usize {
        self.chains.get(&chain).copied().unwrap_or(0)
    }

    /// Ids currently awaiting a response, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &CorrelationId> {
        self.outstanding.keys()
    }

    pub fn len(&self) -> usize {
        self.outstanding.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outstanding.is_empty()
    }

    pub fn clear(&mut self) {
        self.outstanding.clear();
        self.chains.clear();
    }
}

impl<T> Default for CorrelationRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
