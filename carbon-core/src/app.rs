use std::fmt::Debug;

use crate::{Command, EffectKind, OutcomeKind};

/// Command type produced by an app's `update`.
pub type AppCommand<A> = Command<<A as App>::Event, <A as App>::Effect, <A as App>::Outcome>;

/// The domain logic driven by the engine.
///
/// `update` must not perform I/O; everything asynchronous goes out as an
/// effect and comes back as an event via the request's resolver.
pub trait App: Send + 'static {
    type Event: Clone + Debug + Send + 'static;
    type Model: Default + Send + 'static;
    type View;
    type Effect: EffectKind + Clone + Debug + Send + 'static;
    type Outcome: OutcomeKind + Clone + Debug + Send + 'static;

    fn update(&self, event: Self::Event, model: &mut Self::Model) -> AppCommand<Self>;

    fn view(&self, model: &Self::Model) -> Self::View;
}
