use std::time::SystemTime;

use crate::{ChainId, CoreError, CorrelationId};

/// Observation variants emitted by the engine
///
/// Carries the app's event, effect and outcome types directly so observers
/// can pattern-match without stringification. No trait bounds are imposed here;
/// helpers add whatever bounds they need.
pub enum Observation<EventType, EffectType, OutcomeType> {
    Event {
        ts: SystemTime,
        chain: ChainId,
        data: EventType,
    },
    Request {
        ts: SystemTime,
        chain: ChainId,
        id: CorrelationId,
        data: EffectType,
    },
    Response {
        ts: SystemTime,
        chain: ChainId,
        id: CorrelationId,
        data: OutcomeType,
    },
    Rejected {
        ts: SystemTime,
        error: CoreError,
    },
}
