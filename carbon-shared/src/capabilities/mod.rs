//! Command builders for the capabilities the carbon app uses.
//!
//! Each builder takes the event constructor to run when the shell answers,
//! so `update` reads as "ask for X, then send me Y".

pub mod location;

use carbon_core::Command;
use carbon_http_manager::{HttpError, HttpResponse};
use carbon_time_manager::TimeResponse;
use serde::de::DeserializeOwned;
use url::Url;

use self::location::{LocationRequest, LocationResponse};
use crate::app::{Effect, Event, Outcome};
use crate::Cmd;

pub fn time(make: impl FnOnce(TimeResponse) -> Event + Send + 'static) -> Cmd {
    Command::request(Effect::Time, move |outcome: Outcome| {
        outcome.into_time().map(make)
    })
}

pub fn location(make: impl FnOnce(LocationResponse) -> Event + Send + 'static) -> Cmd {
    Command::request(
        Effect::GetLocation(LocationRequest),
        move |outcome: Outcome| outcome.into_location().map(make),
    )
}

/// GET `url` and decode the body as `T`. Transport errors, non-2xx statuses
/// and undecodable bodies all reach `make` as `Err`.
pub fn get_json<T>(
    url: Url,
    make: impl FnOnce(Result<T, HttpError>) -> Event + Send + 'static,
) -> Cmd
where
    T: DeserializeOwned + 'static,
{
    let request = carbon_http_manager::get(url.as_str()).header("Accept", "application/json");
    Command::request(Effect::Http(request), move |outcome: Outcome| {
        outcome
            .into_http()
            .map(|result| make(result.and_then(|response: HttpResponse| response.json())))
    })
}
