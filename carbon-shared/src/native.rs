use async_trait::async_trait;
use carbon_http_manager::{HttpError, HttpManager, HttpRequest, HttpResult};
use carbon_time_manager::{TimeManager, TimeResponse};
use std::sync::{Mutex, PoisonError};

use crate::capabilities::location::{LocationManager, LocationRequest, LocationResponse};
use crate::config::AppConfig;
use crate::shell::Shell;
use crate::view_model::ViewModel;

/// Shell for native hosts: reqwest for HTTP, the system clock, and a fixed
/// (or absent) location. The most recent view is kept for the host to read.
pub struct NativeShell {
    http: HttpManager,
    clock: TimeManager,
    location: LocationManager,
    view: Mutex<Option<ViewModel>>,
}

impl NativeShell {
    pub fn new(config: &AppConfig) -> Result<Self, HttpError> {
        let location = config
            .location
            .map(LocationManager::Fixed)
            .unwrap_or_default();
        Ok(Self {
            http: HttpManager::new(config.http.clone())?,
            clock: TimeManager::System,
            location,
            view: Mutex::new(None),
        })
    }

    pub fn with_clock(mut self, clock: TimeManager) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_location(mut self, location: LocationManager) -> Self {
        self.location = location;
        self
    }

    pub fn latest_view(&self) -> Option<ViewModel> {
        self.view
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Shell for NativeShell {
    async fn execute_http(&self, request: HttpRequest) -> HttpResult {
        self.http.execute(request).await
    }

    async fn execute_location(&self, request: LocationRequest) -> LocationResponse {
        self.location.locate(request)
    }

    async fn execute_time(&self) -> TimeResponse {
        self.clock.now()
    }

    fn execute_render(&self, view: ViewModel) {
        tracing::debug!(mode = ?view.mode, local = %view.local_name, "render");
        *self.view.lock().unwrap_or_else(PoisonError::into_inner) = Some(view);
    }
}
