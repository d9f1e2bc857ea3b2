use std::time::Duration;

/// Implemented by an app's effect enum (usually via `#[derive(Effect)]`).
pub trait EffectKind {
    /// Name of the capability this effect invokes.
    fn kind(&self) -> &'static str;

    /// Render effects are pulled by the shell and never answered.
    fn is_render(&self) -> bool;

    /// The render effect of this enum.
    fn render() -> Self;
}

/// Implemented by an app's outcome enum (usually via `#[derive(Outcome)]`).
pub trait OutcomeKind {
    /// Kind of the effect this outcome answers, as reported by [`EffectKind::kind`].
    fn answers(&self) -> &'static str;
}

/// Why a capability could not produce an outcome on its own.
///
/// The dispatcher hands these to [`crate::Executor::fail`] so the correlation
/// still resolves with ordinary outcome data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CapabilityFailure {
    #[error("capability did not complete within {0:?}")]
    TimedOut(Duration),
    #[error("capability task panicked: {0}")]
    Panicked(String),
    #[error("capability produced no outcome")]
    NoOutcome,
}
