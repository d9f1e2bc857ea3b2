//! Carbon core: a pure, synchronous engine that talks to asynchronous shell
//! capabilities through correlated requests and responses.

mod app;
mod bridge;
mod capability;
mod cmd;
mod config;
mod correlation;
mod dispatcher;
mod engine;
mod error;
mod observation;
mod observer;
mod request;
mod router;
mod session;
pub mod wire;

pub use app::{App, AppCommand};
pub use bridge::Bridge;
pub use capability::{CapabilityFailure, EffectKind, OutcomeKind};
pub use cmd::{Command, Resolver, Step};
pub use config::{ConfigError, DispatcherConfig};
pub use correlation::{ChainId, CorrelationId, CorrelationRegistry};
pub use dispatcher::{Dispatcher, Executor};
pub use engine::Engine;
pub use error::{CoreError, DecodeError, EncodeError};
pub use observation::Observation;
pub use observer::{
    filter_observer, filter_with, no_op_observer, tee_observer, tracing_observer, ObserverFn,
};
pub use request::{Request, Response};
pub use router::{Router, RouterChannels};
pub use session::Session;

pub use carbon_core_macros::{Effect, Outcome};
