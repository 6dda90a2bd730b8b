use crate::error::ExperimentError;
use serde::{Deserialize, Serialize};

/// Details typed in on the intro screen. Stored as given, never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantInfo {
    pub participant_id: String,
    pub experimenter: String,
    pub start_time: String,
}

impl ParticipantInfo {
    pub fn new(
        participant_id: impl Into<String>,
        experimenter: impl Into<String>,
        start_time: impl Into<String>,
    ) -> Result<Self, ExperimentError> {
        let info = Self {
            participant_id: participant_id.into(),
            experimenter: experimenter.into(),
            start_time: start_time.into(),
        };
        for (name, value) in [
            ("participant_id", &info.participant_id),
            ("experimenter", &info.experimenter),
            ("start_time", &info.start_time),
        ] {
            if value.trim().is_empty() {
                return Err(ExperimentError::MissingParticipantField(name));
            }
        }
        Ok(info)
    }
}
