use async_trait::async_trait;
use carbon_core::{CapabilityFailure, Executor};
use carbon_http_manager::{HttpError, HttpRequest, HttpResult};
use carbon_time_manager::TimeResponse;
use std::sync::Arc;

use crate::app::{CarbonApp, Effect, Outcome};
use crate::capabilities::location::{LocationRequest, LocationResponse};
use crate::view_model::ViewModel;

/// The capabilities a platform shell provides to the carbon app.
#[async_trait]
pub trait Shell: Send + Sync + 'static {
    async fn execute_http(&self, request: HttpRequest) -> HttpResult;

    async fn execute_location(&self, request: LocationRequest) -> LocationResponse;

    async fn execute_time(&self) -> TimeResponse;

    fn execute_render(&self, view: ViewModel);
}

/// Adapts a [`Shell`] to the dispatcher's [`Executor`] interface.
pub struct ShellExecutor<S> {
    shell: Arc<S>,
}

impl<S: Shell> ShellExecutor<S> {
    pub fn new(shell: Arc<S>) -> Self {
        Self { shell }
    }

    pub fn shell(&self) -> &Arc<S> {
        &self.shell
    }
}

#[async_trait]
impl<S: Shell> Executor<CarbonApp> for ShellExecutor<S> {
    async fn execute(&self, effect: Effect) -> Option<Outcome> {
        let outcome = match effect {
            Effect::Render => return None,
            Effect::Http(request) => Outcome::Http(self.shell.execute_http(request).await),
            Effect::GetLocation(request) => {
                Outcome::Location(self.shell.execute_location(request).await)
            }
            Effect::Time => Outcome::Time(self.shell.execute_time().await),
        };
        Some(outcome)
    }

    fn render(&self, view: ViewModel) {
        self.shell.execute_render(view);
    }

    // A failed clock reading is an empty instant, which the app treats as unreadable.
    fn fail(&self, effect: &Effect, failure: CapabilityFailure) -> Outcome {
        match effect {
            Effect::Http(_) => Outcome::Http(Err(match failure {
                CapabilityFailure::TimedOut(limit) => {
                    HttpError::Timeout(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX))
                }
                other => HttpError::Transport(other.to_string()),
            })),
            Effect::GetLocation(_) => Outcome::Location(LocationResponse { location: None }),
            Effect::Time | Effect::Render => Outcome::Time(TimeResponse(String::new())),
        }
    }
}
