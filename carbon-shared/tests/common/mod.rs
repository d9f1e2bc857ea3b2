#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use carbon_core::{Engine, Request, Session};
use carbon_http_manager::{HttpError, HttpRequest, HttpResponse, HttpResult};
use carbon_shared::capabilities::location::{LocationManager, LocationRequest, LocationResponse};
use carbon_shared::model::Model;
use carbon_shared::{AppConfig, CarbonApp, Effect, Shell, ViewModel};
use carbon_time_manager::{TimeManager, TimeResponse};
use chrono::{DateTime, Utc};

pub const NATIONAL: &[u8] = include_bytes!("../fixtures/national.json");
pub const NATIONAL_MIX: &[u8] = include_bytes!("../fixtures/national_mix.json");
pub const REGIONAL: &[u8] = include_bytes!("../fixtures/regional.json");
pub const POSTCODE: &[u8] = include_bytes!("../fixtures/postcode.json");

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn instant(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("valid instant")
        .with_timezone(&Utc)
}

pub fn session() -> Arc<Session<CarbonApp>> {
    session_with(Model::default())
}

pub fn session_with(model: Model) -> Arc<Session<CarbonApp>> {
    init_tracing();
    let app = CarbonApp::new(&AppConfig::default()).expect("default config");
    Arc::new(Session::new(move || {
        Engine::new(app.clone()).with_model(model.clone())
    }))
}

pub fn urls(requests: &[Request<Effect>]) -> Vec<String> {
    requests
        .iter()
        .filter_map(|r| r.effect.clone().into_http())
        .map(|http| http.url)
        .collect()
}

pub fn http_request<'a>(requests: &'a [Request<Effect>], url_part: &str) -> &'a Request<Effect> {
    requests
        .iter()
        .find(|r| matches!(&r.effect, Effect::Http(http) if http.url.contains(url_part)))
        .unwrap_or_else(|| panic!("no http request for {url_part} in {requests:?}"))
}

pub fn kinds(requests: &[Request<Effect>]) -> Vec<&'static str> {
    use carbon_core::EffectKind;
    requests.iter().map(|r| r.effect.kind()).collect()
}

#[derive(Clone, Debug)]
pub enum Route {
    Json(&'static [u8]),
    Status(u16),
    Fail,
    Hang,
}

/// A shell answering from canned routes, matched by url substring.
pub struct ScriptedShell {
    pub clock: TimeManager,
    pub location: LocationManager,
    pub routes: Vec<(&'static str, Route)>,
    pub renders: Mutex<Vec<ViewModel>>,
    pub fetched: Mutex<Vec<String>>,
}

impl ScriptedShell {
    pub fn new(now: &str) -> Self {
        Self {
            clock: TimeManager::Fixed(instant(now)),
            location: LocationManager::Unavailable,
            // first match wins; regional urls also contain "/intensity/"
            routes: vec![
                ("/regional/", Route::Json(REGIONAL)),
                ("/intensity/", Route::Json(NATIONAL)),
                ("/generation/", Route::Json(NATIONAL_MIX)),
                ("/postcodes", Route::Json(POSTCODE)),
            ],
            renders: Mutex::new(Vec::new()),
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub fn route(mut self, part: &'static str, route: Route) -> Self {
        self.routes.insert(0, (part, route));
        self
    }

    pub fn renders(&self) -> Vec<ViewModel> {
        self.renders.lock().expect("renders").clone()
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().expect("fetched").clone()
    }
}

#[async_trait]
impl Shell for ScriptedShell {
    async fn execute_http(&self, request: HttpRequest) -> HttpResult {
        self.fetched.lock().expect("fetched").push(request.url.clone());
        let route = self
            .routes
            .iter()
            .find(|(part, _)| request.url.contains(part))
            .map(|(_, route)| route.clone());
        match route {
            Some(Route::Json(body)) => Ok(HttpResponse::ok(body.to_vec())),
            Some(Route::Status(status)) => Ok(HttpResponse::status(status, Vec::new())),
            Some(Route::Fail) => Err(HttpError::Transport("connection reset".to_string())),
            Some(Route::Hang) => {
                tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
                Err(HttpError::Transport("gave up".to_string()))
            }
            None => Err(HttpError::Transport(format!("no route for {}", request.url))),
        }
    }

    async fn execute_location(&self, request: LocationRequest) -> LocationResponse {
        self.location.locate(request)
    }

    async fn execute_time(&self) -> TimeResponse {
        self.clock.now()
    }

    fn execute_render(&self, view: ViewModel) {
        self.renders.lock().expect("renders").push(view);
    }
}
