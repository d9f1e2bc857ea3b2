use async_trait::async_trait;
use carbon_core::{CapabilityFailure, Executor};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::{MockApp, MockEffect, MockOutcome, View};

/// Executor with scripted behaviour keyed on the fetched url:
/// `slow` never finishes, `panic` panics, `none` yields no outcome,
/// `fail` reports an error, anything else succeeds with `page:<url>`.
#[derive(Default)]
pub struct MockShell {
    pub renders: Mutex<Vec<View>>,
    pub executed: Mutex<Vec<MockEffect>>,
    pub failures: Mutex<Vec<CapabilityFailure>>,
    pub clock: AtomicU64,
}

impl MockShell {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn renders(&self) -> Vec<View> {
        self.renders.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn executed(&self) -> Vec<MockEffect> {
        self.executed.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn failures(&self) -> Vec<CapabilityFailure> {
        self.failures.lock().map(|f| f.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Executor<MockApp> for MockShell {
    async fn execute(&self, effect: MockEffect) -> Option<MockOutcome> {
        if let Ok(mut executed) = self.executed.lock() {
            executed.push(effect.clone());
        }
        match effect {
            MockEffect::Render => None,
            MockEffect::Clock => Some(MockOutcome::Tick(
                self.clock.fetch_add(1, Ordering::SeqCst) + 100,
            )),
            MockEffect::Fetch(url) => match url.as_str() {
                "slow" => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Some(MockOutcome::Fetch(Ok("too late".to_string())))
                }
                "panic" => panic!("capability blew up"),
                "none" => None,
                "fail" => Some(MockOutcome::Fetch(Err("connection refused".to_string()))),
                _ => {
                    tokio::task::yield_now().await;
                    Some(MockOutcome::Fetch(Ok(format!("page:{url}"))))
                }
            },
        }
    }

    fn render(&self, view: View) {
        if let Ok(mut renders) = self.renders.lock() {
            renders.push(view);
        }
    }

    fn fail(&self, effect: &MockEffect, failure: CapabilityFailure) -> MockOutcome {
        if let Ok(mut failures) = self.failures.lock() {
            failures.push(failure.clone());
        }
        match effect {
            MockEffect::Clock => MockOutcome::Tick(0),
            _ => MockOutcome::Fetch(Err(failure.to_string())),
        }
    }
}
