use serde::{Deserialize, Serialize};

/// Trial state machine events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialState {
    /// Stimuli are on screen and no answer has been given yet.
    AwaitingResponse,
    /// Answer recorded, decision time shown, waiting for the advance key.
    Feedback,
}

/// Recorded result per trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    pub trial_id: String,
    pub correct: bool,
    /// Whether the scenario actually contained the target.
    pub actual: bool,
    /// Whether the participant answered "present".
    pub response: bool,
    pub decision_time_s: f32,
}

impl TrialResult {
    pub const LOG_HEADER: &'static str = "TrialNumber,Correctness,Actual,Response,Time";

    pub fn new(trial_id: impl Into<String>, actual: bool, response: bool, decision_time_s: f32) -> Self {
        Self {
            trial_id: trial_id.into(),
            correct: actual == response,
            actual,
            response,
            decision_time_s,
        }
    }

    /// `s1,correct,True,True,1.23`
    pub fn to_log_line(&self) -> String {
        format!(
            "{},{},{},{},{:.2}",
            self.trial_id,
            if self.correct { "correct" } else { "incorrect" },
            title_bool(self.actual),
            title_bool(self.response),
            self.decision_time_s,
        )
    }
}

fn title_bool(b: bool) -> &'static str {
    if b { "True" } else { "False" }
}
