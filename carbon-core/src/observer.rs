use crate::Observation;
use std::fmt::Debug;
use std::sync::Arc;

/// Callback invoked synchronously by the engine for every [`Observation`].
pub type ObserverFn<Ev, Ef, Out> = Arc<dyn Fn(&Observation<Ev, Ef, Out>) + Send + Sync>;

pub fn no_op_observer<Ev, Ef, Out>() -> ObserverFn<Ev, Ef, Out>
where
    Ev: 'static,
    Ef: 'static,
    Out: 'static,
{
    Arc::new(|_: &Observation<Ev, Ef, Out>| {})
}

/// Logs every observation through `tracing`, one target per kind so they can
/// be enabled independently (`RUST_LOG=carbon-core::Request=debug`).
pub fn tracing_observer<Ev, Ef, Out>() -> ObserverFn<Ev, Ef, Out>
where
    Ev: Debug + 'static,
    Ef: Debug + 'static,
    Out: Debug + 'static,
{
    Arc::new(|observation: &Observation<Ev, Ef, Out>| match observation {
        Observation::Event { chain, data, .. } => {
            tracing::info!(target: "carbon-core::Event", %chain, "Event({:?})", data);
        }
        Observation::Request { chain, id, data, .. } => {
            tracing::debug!(target: "carbon-core::Request", %chain, %id, "Request({:?})", data);
        }
        Observation::Response { chain, id, data, .. } => {
            tracing::debug!(target: "carbon-core::Response", %chain, %id, "Response({:?})", data);
        }
        Observation::Rejected { error, .. } => {
            tracing::warn!(target: "carbon-core::Rejected", %error, "Rejected");
        }
    })
}

/// Pass through only the observation kinds switched on. Rejections always pass.
pub fn filter_observer<Ev, Ef, Out>(
    wrapped: ObserverFn<Ev, Ef, Out>,
    events: bool,
    requests: bool,
    responses: bool,
) -> ObserverFn<Ev, Ef, Out>
where
    Ev: 'static,
    Ef: 'static,
    Out: 'static,
{
    filter_with(wrapped, move |observation| match observation {
        Observation::Event { .. } => events,
        Observation::Request { .. } => requests,
        Observation::Response { .. } => responses,
        Observation::Rejected { .. } => true,
    })
}

pub fn filter_with<Ev, Ef, Out, F>(
    wrapped: ObserverFn<Ev, Ef, Out>,
    keep: F,
) -> ObserverFn<Ev, Ef, Out>
where
    Ev: 'static,
    Ef: 'static,
    Out: 'static,
    F: Fn(&Observation<Ev, Ef, Out>) -> bool + Send + Sync + 'static,
{
    Arc::new(move |observation: &Observation<Ev, Ef, Out>| {
        if keep(observation) {
            wrapped(observation);
        }
    })
}

/// Fan one observation out to several observers, in order.
pub fn tee_observer<Ev, Ef, Out>(
    observers: Vec<ObserverFn<Ev, Ef, Out>>,
) -> ObserverFn<Ev, Ef, Out>
where
    Ev: 'static,
    Ef: 'static,
    Out: 'static,
{
    Arc::new(move |observation: &Observation<Ev, Ef, Out>| {
        observers.iter().for_each(|observer| observer(observation));
    })
}
