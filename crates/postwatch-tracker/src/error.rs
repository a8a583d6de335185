use thiserror::Error;

/// Errors raised while wiring the production collaborators.
///
/// A running cycle never returns an error; per-creator failures are
/// counted in [`crate::RunStats`].
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("post source client: {0}")]
    Source(#[from] postwatch_source::SourceError),

    #[error("webhook notifier: {0}")]
    Notify(#[from] postwatch_notify::NotifyError),
}
