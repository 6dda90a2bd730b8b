use std::path::PathBuf;
use vsearch_scenario::ScenarioError;

#[derive(Debug, thiserror::Error)]
pub enum ExperimentError {
    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("result log write failed: {0}")]
    Log(#[source] std::io::Error),

    #[error("result log is already closed")]
    LogClosed,

    /// More trials were requested than the pool was initialized with.
    #[error("trial pool is empty")]
    EmptyPool,

    #[error("participant field `{0}` must not be empty")]
    MissingParticipantField(&'static str),

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("session export failed: {0}")]
    Export(#[from] serde_json::Error),

    #[error("session has already finished")]
    SessionFinished,
}
