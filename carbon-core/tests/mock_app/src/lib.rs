//! Minimal app used to exercise the engine, derives and dispatcher.
//!
//! `Fetch(url)` stands in for network I/O and `Clock` for a time source.

pub mod shell;

use carbon_core::{App, Command, Effect, Outcome};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Effect)]
pub enum MockEffect {
    #[effect(render)]
    Render,
    Fetch(String),
    Clock,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Outcome)]
pub enum MockOutcome {
    Fetch(Result<String, String>),
    #[outcome(answers = "Clock")]
    Tick(u64),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Msg {
    Load(String),
    LoadPair(String, String),
    ReadClock,
    Follow {
        url: String,
        hops: u32,
    },
    Touch,

    // continuations, never sent by a shell
    #[serde(skip)]
    Loaded(Result<String, String>),
    #[serde(skip)]
    Followed {
        url: String,
        hops: u32,
        result: Result<String, String>,
    },
    #[serde(skip)]
    Clocked(u64),
}

#[derive(Default, Debug)]
pub struct Model {
    pub pages: Vec<String>,
    pub errors: Vec<String>,
    pub clock: Option<u64>,
    pub touches: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub pages: Vec<String>,
    pub errors: Vec<String>,
    pub clock: Option<u64>,
    pub touches: u32,
}

pub type Cmd = Command<Msg, MockEffect, MockOutcome>;

fn fetch(
    url: impl Into<String>,
    make: impl FnOnce(Result<String, String>) -> Msg + Send + 'static,
) -> Cmd {
    Command::request(MockEffect::Fetch(url.into()), move |outcome: MockOutcome| {
        outcome.into_fetch().map(make)
    })
}

#[derive(Default)]
pub struct MockApp;

impl App for MockApp {
    type Event = Msg;
    type Model = Model;
    type View = View;
    type Effect = MockEffect;
    type Outcome = MockOutcome;

    fn update(&self, event: Msg, model: &mut Model) -> Cmd {
        match event {
            Msg::Load(url) => fetch(url, Msg::Loaded),
            Msg::LoadPair(first, second) => {
                Command::batch([fetch(first, Msg::Loaded), fetch(second, Msg::Loaded)])
            }
            Msg::ReadClock => Command::request(MockEffect::Clock, |outcome: MockOutcome| {
                outcome.into_tick().map(Msg::Clocked)
            }),
            Msg::Follow { url, hops } => {
                let next = url.clone();
                fetch(url, move |result| Msg::Followed {
                    url: next,
                    hops,
                    result,
                })
            }
            Msg::Touch => {
                model.touches += 1;
                Command::none()
            }
            Msg::Loaded(Ok(page)) => {
                model.pages.push(page);
                Command::render()
            }
            Msg::Loaded(Err(error)) => {
                model.errors.push(error);
                Command::render()
            }
            Msg::Followed { url, hops, result } => {
                match result {
                    Ok(page) => model.pages.push(page),
                    Err(error) => model.errors.push(error),
                }
                if hops > 1 {
                    self.update(Msg::Follow { url, hops: hops - 1 }, model)
                } else {
                    Command::render()
                }
            }
            Msg::Clocked(ts) => {
                model.clock = Some(ts);
                Command::none()
            }
        }
    }

    fn view(&self, model: &Model) -> View {
        View {
            pages: model.pages.clone(),
            errors: model.errors.clone(),
            clock: model.clock,
            touches: model.touches,
        }
    }
}
