use std::num::ParseFloatError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("cannot access scenario file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Structural problem: bad header, wrong field count, mixed layouts.
    #[error("line {line}: {reason}")]
    Format { line: usize, reason: String },

    #[error("line {line}: invalid number {value:?}: {source}")]
    Parse {
        line: usize,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("invalid volume: {0}")]
    Volume(String),
}

impl ScenarioError {
    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        ScenarioError::Format {
            line,
            reason: reason.into(),
        }
    }
}
