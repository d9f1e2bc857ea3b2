use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    App, CapabilityFailure, CorrelationId, DispatcherConfig, EffectKind, Request, RouterChannels,
    Session,
};

/// Shell-side capability implementations, one per app.
///
/// `execute` is only called for non-render effects. Returning `None` is
/// treated like any other capability failure and routed through `fail`, so
/// every request still gets an outcome.
#[async_trait]
pub trait Executor<A: App>: Send + Sync + 'static {
    async fn execute(&self, effect: A::Effect) -> Option<A::Outcome>;

    /// Publish a freshly pulled view.
    fn render(&self, view: A::View);

    /// Outcome to deliver when `effect` could not be executed.
    fn fail(&self, effect: &A::Effect, failure: CapabilityFailure) -> A::Outcome;
}

/// Drives requests from a [`Session`] through an [`Executor`] until every
/// causal chain has terminated.
///
/// Each non-render request runs as its own task; completions come back over a
/// channel and are fed to the session from a single loop, so long chains
/// never grow the call stack.
pub struct Dispatcher<A: App, X> {
    session: Arc<Session<A>>,
    executor: Arc<X>,
    config: DispatcherConfig,
}

impl<A, X> Dispatcher<A, X>
where
    A: App,
    X: Executor<A>,
{
    pub fn new(session: Arc<Session<A>>, executor: Arc<X>, config: DispatcherConfig) -> Self {
        Self {
            session,
            executor,
            config,
        }
    }

    pub fn session(&self) -> &Arc<Session<A>> {
        &self.session
    }

    pub fn executor(&self) -> &Arc<X> {
        &self.executor
    }

    /// Run one event and everything it causes to completion.
    pub async fn dispatch(&self, event: A::Event) {
        let channels = RouterChannels::new();
        channels.router.send_event(event);
        self.run(channels).await;
    }

    /// Process events until every [`crate::Router`] clone is dropped and no
    /// capability is still in flight.
    pub async fn run(&self, channels: RouterChannels<A::Event, A::Outcome>) {
        let RouterChannels {
            router,
            mut app_rx,
            mut response_rx,
        } = channels;
        let responses = router.response_sender();
        drop(router);

        let mut in_flight = HashSet::new();
        let mut accepting = true;

        loop {
            if !accepting && in_flight.is_empty() {
                break;
            }

            tokio::select! {
                event = app_rx.recv(), if accepting => {
                    match event {
                        Some(event) => {
                            let requests = self.session.handle_event(event);
                            self.launch(requests, &responses, &mut in_flight);
                        }
                        None => accepting = false,
                    }
                }
                Some((id, outcome)) = response_rx.recv() => {
                    in_flight.remove(&id);
                    match self.session.handle_response(id, outcome) {
                        Ok(requests) => self.launch(requests, &responses, &mut in_flight),
                        Err(err) => tracing::warn!(%id, error = %err, "response not accepted"),
                    }
                }
                else => break,
            }
        }

        tracing::debug!("dispatcher idle");
    }

    fn launch(
        &self,
        requests: Vec<Request<A::Effect>>,
        responses: &UnboundedSender<(CorrelationId, A::Outcome)>,
        in_flight: &mut HashSet<CorrelationId>,
    ) {
        for Request { id, effect } in requests {
            if effect.is_render() {
                self.executor.render(self.session.view());
                continue;
            }

            tracing::debug!(%id, kind = effect.kind(), "dispatching effect");
            in_flight.insert(id);
            let executor = Arc::clone(&self.executor);
            let responses = responses.clone();
            let limit = self.config.effect_timeout();
            tokio::spawn(async move {
                let outcome = execute_bounded::<A, X>(executor, effect, limit).await;
                let _ = responses.send((id, outcome));
            });
        }
    }
}

async fn execute_bounded<A, X>(executor: Arc<X>, effect: A::Effect, limit: Duration) -> A::Outcome
where
    A: App,
    X: Executor<A>,
{
    let mut task = tokio::spawn({
        let executor = Arc::clone(&executor);
        let effect = effect.clone();
        async move { executor.execute(effect).await }
    });

    let failure = match tokio::time::timeout(limit, &mut task).await {
        Ok(Ok(Some(outcome))) => return outcome,
        Ok(Ok(None)) => CapabilityFailure::NoOutcome,
        Ok(Err(join)) => CapabilityFailure::Panicked(join.to_string()),
        Err(_) => {
            task.abort();
            CapabilityFailure::TimedOut(limit)
        }
    };

    tracing::warn!(kind = effect.kind(), error = %failure, "capability failed");
    executor.fail(&effect, failure)
}
