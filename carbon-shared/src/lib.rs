//! The carbon intensity app: what to fetch, when, and how to show it.
//!
//! Shells drive it either over bytes through [`new_bridge`] or in-process
//! through [`new_dispatcher`] with a [`Shell`] implementation.

pub mod app;
pub mod capabilities;
mod config;
pub mod model;
mod native;
mod shell;
pub mod view_model;

use carbon_core::{AppCommand, Bridge, ConfigError, Dispatcher, Engine, Session};
use std::sync::Arc;

pub use app::{CarbonApp, Effect, Event, Outcome};
pub use config::{AppConfig, INTENSITY_API, POSTCODE_API};
pub use native::NativeShell;
pub use shell::{Shell, ShellExecutor};
pub use view_model::{GenerationMixPoint, IntensityPoint, ViewModel};

pub type Cmd = AppCommand<CarbonApp>;

pub fn new_session(config: &AppConfig) -> Result<Arc<Session<CarbonApp>>, ConfigError> {
    let app = CarbonApp::new(config)?;
    Ok(Arc::new(Session::new(move || Engine::new(app.clone()))))
}

pub fn new_bridge(config: &AppConfig) -> Result<Bridge<CarbonApp>, ConfigError> {
    Ok(Bridge::new(new_session(config)?))
}

pub fn new_dispatcher<S: Shell>(
    config: &AppConfig,
    shell: Arc<S>,
) -> Result<Dispatcher<CarbonApp, ShellExecutor<S>>, ConfigError> {
    config.validate()?;
    Ok(Dispatcher::new(
        new_session(config)?,
        Arc::new(ShellExecutor::new(shell)),
        config.dispatcher.clone(),
    ))
}
