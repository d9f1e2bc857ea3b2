use std::time::SystemTime;

use crate::{
    tracing_observer, App, AppCommand, ChainId, CoreError, CorrelationId, CorrelationRegistry,
    EffectKind, Observation, ObserverFn, OutcomeKind, Request, Resolver, Step,
};

struct Pending<Ev, Out> {
    kind: &'static str,
    resolve: Option<Resolver<Ev, Out>>,
}

/// Sole owner of the app model. Turns events and responses into requests.
///
/// Every call runs to completion without I/O. Non-render requests are
/// tracked until answered; render requests get a fresh id but are never
/// tracked. A returned batch holds at most one render, always last, and one is
/// added whenever the chain that produced the batch has nothing left in flight.
pub struct Engine<A: App> {
    app: A,
    model: A::Model,
    registry: CorrelationRegistry<Pending<A::Event, A::Outcome>>,
    next_chain: u64,
    observer: ObserverFn<A::Event, A::Effect, A::Outcome>,
}

impl<A: App> Engine<A> {
    pub fn new(app: A) -> Self {
        Self::with_observer(app, tracing_observer())
    }

    pub fn with_observer(app: A, observer: ObserverFn<A::Event, A::Effect, A::Outcome>) -> Self {
        Self {
            app,
            model: A::Model::default(),
            registry: CorrelationRegistry::new(),
            next_chain: 1,
            observer,
        }
    }

    /// Start from an existing model instead of `Model::default()`.
    pub fn with_model(mut self, model: A::Model) -> Self {
        self.model = model;
        self
    }

    /// Open a new causal chain for `event` and return the requests it needs.
    pub fn handle_event(&mut self, event: A::Event) -> Vec<Request<A::Effect>> {
        let chain = ChainId(self.next_chain);
        self.next_chain += 1;
        self.apply(chain, event)
    }

    /// Resolve an outstanding request and continue its chain.
    ///
    /// Unknown ids and mismatched outcome kinds are rejected without touching
    /// the model; a mismatched request stays outstanding.
    pub fn handle_response(
        &mut self,
        id: CorrelationId,
        outcome: A::Outcome,
    ) -> Result<Vec<Request<A::Effect>>, CoreError> {
        let Some(expected) = self.registry.get(&id).map(|pending| pending.kind) else {
            return Err(self.reject(CoreError::UnknownCorrelation(id)));
        };
        let found = outcome.answers();
        if expected != found {
            return Err(self.reject(CoreError::OutcomeMismatch {
                id,
                expected,
                found,
            }));
        }
        let Some((chain, pending)) = self.registry.resolve(&id) else {
            return Err(self.reject(CoreError::UnknownCorrelation(id)));
        };

        (self.observer)(&Observation::Response {
            ts: SystemTime::now(),
            chain,
            id,
            data: outcome.clone(),
        });

        match pending.resolve.and_then(|resolve| resolve(outcome)) {
            Some(event) => Ok(self.apply(chain, event)),
            None => {
                tracing::warn!(%id, %chain, kind = expected, "outcome produced no event");
                Ok(self.emit(chain, AppCommand::<A>::none()))
            }
        }
    }

    /// Fresh view of the current model.
    pub fn snapshot(&self) -> A::View {
        self.app.view(&self.model)
    }

    pub fn model(&self) -> &A::Model {
        &self.model
    }

    /// Number of requests awaiting a response, across all chains.
    pub fn outstanding(&self) -> usize {
        self.registry.len()
    }

    pub fn outstanding_in(&self, chain: ChainId) -> usize {
        self.registry.outstanding_in(chain)
    }

    pub fn is_outstanding(&self, id: &CorrelationId) -> bool {
        self.registry.is_outstanding(id)
    }

    pub fn chain_of(&self, id: &CorrelationId) -> Option<ChainId> {
        self.registry.chain_of(id)
    }

    fn apply(&mut self, chain: ChainId, event: A::Event) -> Vec<Request<A::Effect>> {
        (self.observer)(&Observation::Event {
            ts: SystemTime::now(),
            chain,
            data: event.clone(),
        });
        let cmd = self.app.update(event, &mut self.model);
        self.emit(chain, cmd)
    }

    fn emit(&mut self, chain: ChainId, cmd: AppCommand<A>) -> Vec<Request<A::Effect>> {
        let mut requests = Vec::with_capacity(cmd.len() + 1);
        let mut render = false;

        for Step { effect, resolve } in cmd.into_inner() {
            if effect.is_render() {
                render = true;
                continue;
            }
            let id = self.registry.issue();
            let kind = effect.kind();
            self.registry.register(id, chain, Pending { kind, resolve });
            requests.push(self.request(chain, id, effect));
        }

        if render || self.registry.outstanding_in(chain) == 0 {
            let id = self.registry.issue();
            requests.push(self.request(chain, id, A::Effect::render()));
        }

        requests
    }

    fn request(
        &self,
        chain: ChainId,
        id: CorrelationId,
        effect: A::Effect,
    ) -> Request<A::Effect> {
        (self.observer)(&Observation::Request {
            ts: SystemTime::now(),
            chain,
            id,
            data: effect.clone(),
        });
        Request { id, effect }
    }

    fn reject(&self, error: CoreError) -> CoreError {
        (self.observer)(&Observation::Rejected {
            ts: SystemTime::now(),
            error: error.clone(),
        });
        error
    }
}
