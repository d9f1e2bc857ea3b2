use carbon_core::{App, Command};
use carbon_http_manager::{HttpError, HttpRequest, HttpResult};
use carbon_time_manager::TimeResponse;
use chrono::Duration;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::capabilities::location::{LocationRequest, LocationResponse};
use crate::capabilities::{self, get_json};
use crate::config::{AppConfig, Endpoints};
use crate::model::location::{Coordinate, Location};
use crate::model::national::NationalResponse;
use crate::model::national_mix::NationalMixResponse;
use crate::model::postcode::PostcodeResponse;
use crate::model::regional::RegionalResponse;
use crate::model::{national, national_mix, postcode, regional, Mode, Model};
use crate::view_model::ViewModel;
use crate::Cmd;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    GetNational,
    GetLocal,
    SwitchMode(Mode),

    // events local to the core
    #[serde(skip)]
    CurrentTime(Mode, TimeResponse),
    #[serde(skip)]
    SetLocation(LocationResponse),
    #[serde(skip)]
    SetPostcode(Result<PostcodeResponse, HttpError>),
    #[serde(skip)]
    SetRegional(Result<RegionalResponse, HttpError>),
    #[serde(skip)]
    SetNational(Result<NationalResponse, HttpError>),
    #[serde(skip)]
    SetNationalMix(Result<NationalMixResponse, HttpError>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, carbon_core::Effect)]
pub enum Effect {
    #[effect(render)]
    Render,
    Http(HttpRequest),
    GetLocation(LocationRequest),
    Time,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, carbon_core::Outcome)]
pub enum Outcome {
    Http(HttpResult),
    #[outcome(answers = "GetLocation")]
    Location(LocationResponse),
    Time(TimeResponse),
}

/// Carbon intensity for Great Britain, nationally or around the device.
///
/// Data is refetched only when the last successful fetch for the current
/// mode is older than the configured refresh interval.
#[derive(Clone, Debug)]
pub struct CarbonApp {
    endpoints: Endpoints,
    refresh_after: Duration,
}

impl CarbonApp {
    pub fn new(config: &AppConfig) -> Result<Self, carbon_core::ConfigError> {
        Ok(Self {
            endpoints: config.endpoints()?,
            refresh_after: config.refresh_after(),
        })
    }

    fn fetch_national(&self, model: &Model) -> Cmd {
        Command::batch([
            fetch(
                national::url(&self.endpoints.intensity, &model.time),
                Event::SetNational,
            ),
            fetch(
                national_mix::url(&self.endpoints.intensity, &model.time),
                Event::SetNationalMix,
            ),
        ])
    }
}

impl App for CarbonApp {
    type Event = Event;
    type Model = Model;
    type View = ViewModel;
    type Effect = Effect;
    type Outcome = Outcome;

    fn update(&self, event: Event, model: &mut Model) -> Cmd {
        match event {
            Event::GetNational => {
                model.mode = Mode::National;
                capabilities::time(|time| Event::CurrentTime(Mode::National, time))
            }
            Event::GetLocal => {
                model.mode = Mode::Local;
                capabilities::time(|time| Event::CurrentTime(Mode::Local, time))
            }
            Event::SwitchMode(mode) => {
                model.mode = mode;
                Command::render()
            }
            // `mode` is the one that asked for the time, not whatever is showing now
            Event::CurrentTime(mode, response) => {
                let now = match response.instant() {
                    Ok(now) => now,
                    Err(err) => {
                        tracing::warn!(
                            time = %response.0,
                            error = %err,
                            "unreadable clock reading"
                        );
                        return Command::render();
                    }
                };
                model.time = now;

                if now - model.dataset(mode).last_updated <= self.refresh_after {
                    return Command::render();
                }
                match mode {
                    Mode::National => self.fetch_national(model),
                    Mode::Local => capabilities::location(Event::SetLocation),
                }
            }
            Event::SetLocation(LocationResponse {
                location: Some(coordinate),
            }) => fetch(
                postcode::url(&self.endpoints.postcode, &coordinate),
                Event::SetPostcode,
            )
            .and(Command::render()),
            Event::SetLocation(LocationResponse { location: None }) => {
                tracing::info!("location unavailable");
                Command::render()
            }
            Event::SetPostcode(Ok(response)) => {
                let Some(nearest) = response.nearest() else {
                    tracing::warn!("no postcode near the reported location");
                    return Command::render();
                };
                let location = Location {
                    coordinate: Coordinate {
                        latitude: nearest.latitude,
                        longitude: nearest.longitude,
                    },
                    outcode: nearest.outcode.clone(),
                    admin_district: nearest.admin_district.clone().unwrap_or_default(),
                };
                let url = regional::url(&self.endpoints.intensity, &model.time, &location.outcode);
                model.location = Some(location);

                fetch(url, Event::SetRegional).and(Command::render())
            }
            Event::SetRegional(Ok(response)) => {
                let region = response.data;
                tracing::debug!(
                    region = %region.shortname,
                    periods = region.data.len(),
                    "regional intensity"
                );
                model.local.intensity = region.data.clone();
                model.local.mix = region.data;
                model.local.last_updated = model.time;
                Command::render()
            }
            Event::SetNational(Ok(response)) => {
                model.national.intensity = response.data;
                model.national.last_updated = model.time;
                Command::render()
            }
            Event::SetNationalMix(Ok(response)) => {
                model.national.mix = response.data;
                model.national.last_updated = model.time;
                Command::render()
            }
            Event::SetPostcode(Err(err)) => failed("postcode", &err),
            Event::SetRegional(Err(err)) => failed("regional intensity", &err),
            Event::SetNational(Err(err)) => failed("national intensity", &err),
            Event::SetNationalMix(Err(err)) => failed("national generation mix", &err),
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        ViewModel::from(model)
    }
}

fn fetch<T: DeserializeOwned + 'static>(
    url: Result<Url, url::ParseError>,
    make: impl FnOnce(Result<T, HttpError>) -> Event + Send + 'static,
) -> Cmd {
    match url {
        Ok(url) => get_json(url, make),
        Err(err) => {
            tracing::warn!(error = %err, "could not build request url");
            Command::render()
        }
    }
}

fn failed(what: &str, err: &HttpError) -> Cmd {
    tracing::warn!(error = %err, "{what} request failed");
    Command::render()
}
