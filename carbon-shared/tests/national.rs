mod common;

use carbon_core::CoreError;
use carbon_http_manager::{HttpError, HttpResponse};
use carbon_shared::model::{Mode, Model};
use carbon_shared::{Effect, Outcome};
use carbon_time_manager::TimeResponse;
use chrono::{DateTime, Utc};
use common::*;

#[test]
fn national_happy_path() {
    let session = session();

    // asks for the time first, nothing to render yet
    let requests = session.handle_event(carbon_shared::Event::GetNational);
    assert_eq!(kinds(&requests), vec!["Time"]);

    let requests = session
        .handle_response(
            requests[0].id,
            Outcome::Time(TimeResponse("2023-07-06T20:30:00Z".to_string())),
        )
        .expect("time accepted");
    assert_eq!(
        urls(&requests),
        vec![
            "https://api.carbonintensity.org.uk/intensity/2023-07-06T20:30Z/fw24h".to_string(),
            "https://api.carbonintensity.org.uk/generation/2023-07-06T20:30Z/2023-07-07T20:30Z"
                .to_string(),
        ]
    );
    assert!(requests.iter().all(|r| !r.effect.is_render()));
    session.with_engine(|engine| assert_eq!(engine.model().time, instant("2023-07-06T20:30:00Z")));

    let intensity = http_request(&requests, "/intensity/").id;
    let mix = http_request(&requests, "/generation/").id;

    let after_intensity = session
        .handle_response(intensity, Outcome::Http(Ok(HttpResponse::ok(NATIONAL.to_vec()))))
        .expect("intensity accepted");
    assert_eq!(kinds(&after_intensity), vec!["Render"]);
    assert!(session.is_outstanding(&mix));

    let view = session.view();
    assert_eq!(view.national_name, "UK");
    assert_eq!(view.national_intensity.len(), 2);
    assert_eq!(view.national_intensity[0].date, "2023-07-04T23:30:00+00:00");
    assert_eq!(view.national_intensity[0].forecast, 142);
    assert_eq!(view.national_intensity[0].actual, Some(129));
    assert_eq!(view.national_intensity[1].actual, None);
    assert!(view.national_mix.is_empty());

    let after_mix = session
        .handle_response(mix, Outcome::Http(Ok(HttpResponse::ok(NATIONAL_MIX.to_vec()))))
        .expect("mix accepted");
    assert_eq!(kinds(&after_mix), vec!["Render"]);
    assert_eq!(session.outstanding(), 0);

    let view = session.view();
    assert_eq!(view.mode, Mode::National);
    assert_eq!(view.national_mix.len(), 8);
    assert_eq!(view.national_mix[0].hh_mm, "23:30");
    assert_eq!(view.national_mix[0].fuel, "biomass");
    assert_eq!(view.national_mix[0].perc, 5.4);
    assert_eq!(view.local_name, "Local");
    assert!(view.local_intensity.is_empty());

    session.with_engine(|engine| {
        assert_eq!(engine.model().national.last_updated, instant("2023-07-06T20:30:00Z"));
    });
}

#[test]
fn recent_data_is_not_refetched() {
    let mut model = Model::default();
    model.national.last_updated = instant("2023-07-06T20:30:00Z");
    let session = session_with(model);

    let requests = session.handle_event(carbon_shared::Event::GetNational);
    let requests = session
        .handle_response(
            requests[0].id,
            Outcome::Time(TimeResponse("2023-07-06T20:59:00Z".to_string())),
        )
        .expect("time accepted");

    assert_eq!(kinds(&requests), vec!["Render"]);
}

#[test]
fn stale_data_is_refetched_from_the_new_time() {
    let mut model = Model::default();
    model.national.last_updated = instant("2023-07-06T20:30:00Z");
    let session = session_with(model);

    let requests = session.handle_event(carbon_shared::Event::GetNational);
    let requests = session
        .handle_response(
            requests[0].id,
            Outcome::Time(TimeResponse("2023-07-06T21:01:00Z".to_string())),
        )
        .expect("time accepted");

    assert_eq!(
        urls(&requests)[0],
        "https://api.carbonintensity.org.uk/intensity/2023-07-06T21:01Z/fw24h"
    );
}

#[test]
fn failures_render_and_leave_data_stale() {
    let session = session();
    let requests = session.handle_event(carbon_shared::Event::GetNational);
    let requests = session
        .handle_response(
            requests[0].id,
            Outcome::Time(TimeResponse("2023-07-06T20:30:00Z".to_string())),
        )
        .expect("time accepted");

    let failed = session
        .handle_response(
            http_request(&requests, "/intensity/").id,
            Outcome::Http(Err(HttpError::Transport("offline".to_string()))),
        )
        .expect("accepted");
    assert_eq!(kinds(&failed), vec!["Render"]);

    let unavailable = session
        .handle_response(
            http_request(&requests, "/generation/").id,
            Outcome::Http(Ok(HttpResponse::status(503, b"busy".to_vec()))),
        )
        .expect("accepted");
    assert_eq!(kinds(&unavailable), vec!["Render"]);

    let view = session.view();
    assert!(view.national_intensity.is_empty());
    assert!(view.national_mix.is_empty());
    session.with_engine(|engine| {
        assert_eq!(engine.model().national.last_updated, DateTime::<Utc>::default());
    });
}

#[test]
fn undecodable_body_is_a_failure() {
    let session = session();
    let requests = session.handle_event(carbon_shared::Event::GetNational);
    let requests = session
        .handle_response(
            requests[0].id,
            Outcome::Time(TimeResponse("2023-07-06T20:30:00Z".to_string())),
        )
        .expect("time accepted");

    let rendered = session
        .handle_response(
            http_request(&requests, "/intensity/").id,
            Outcome::Http(Ok(HttpResponse::ok(b"{\"data\": 7}".to_vec()))),
        )
        .expect("accepted");

    assert_eq!(kinds(&rendered), vec!["Render"]);
    assert!(session.view().national_intensity.is_empty());
}

#[test]
fn unreadable_time_renders_without_fetching() {
    let session = session();
    let requests = session.handle_event(carbon_shared::Event::GetNational);

    let requests = session
        .handle_response(requests[0].id, Outcome::Time(TimeResponse(String::new())))
        .expect("accepted");

    assert_eq!(kinds(&requests), vec!["Render"]);
    assert_eq!(session.outstanding(), 0);
}

#[test]
fn wrong_outcome_kind_is_rejected() {
    let session = session();
    let requests = session.handle_event(carbon_shared::Event::GetNational);
    let id = requests[0].id;

    let err = session
        .handle_response(id, Outcome::Http(Ok(HttpResponse::ok(Vec::new()))))
        .expect_err("time expected");

    assert_eq!(
        err,
        CoreError::OutcomeMismatch {
            id,
            expected: "Time",
            found: "Http",
        }
    );
    assert!(session.is_outstanding(&id));
}

#[test]
fn switching_mode_only_renders() {
    let session = session();

    let requests = session.handle_event(carbon_shared::Event::SwitchMode(Mode::Local));

    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].effect, Effect::Render);
    assert_eq!(session.view().mode, Mode::Local);
}
