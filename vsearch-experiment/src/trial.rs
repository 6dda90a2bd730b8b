use vsearch_core::{Scenario, TrialState};

/// The trial currently on screen.
#[derive(Debug, Clone)]
pub struct Trial {
    /// `s<index>`, matching the scenario file name.
    pub id: String,
    pub scenario: Scenario,
    pub state: TrialState,
    /// Seconds since the stimuli appeared, summed from frame times.
    pub elapsed_s: f32,
}

impl Trial {
    pub fn new(id: String, scenario: Scenario) -> Self {
        Self {
            id,
            scenario,
            state: TrialState::AwaitingResponse,
            elapsed_s: 0.0,
        }
    }

    pub fn target_present(&self) -> bool {
        self.scenario.target_present
    }
}
