use crate::config::ExperimentConfig;
use crate::error::ExperimentError;
use crate::export::{SessionRecord, write_session_json};
use crate::participant::ParticipantInfo;
use crate::pool::TrialPool;
use crate::results::ResultLog;
use crate::trial::Trial;
use log::{debug, info, warn};
use rand::Rng;
use std::fs::File;
use std::io::Write;
use vsearch_core::{Host, Key, Phase, TrialResult, TrialState};
use vsearch_scenario::read_scenario_file;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A yes (`true`) or no answer arrived this frame.
    ResponseReceived { response: bool },
    /// The participant confirmed the feedback screen.
    AdvanceRequested,
    TrialStarted { trial_id: String, placements: usize },
    TrialRecorded(TrialResult),
    SessionComplete,
}

/// One participant's run through the trial pool.
///
/// Built once by the host when the session starts and driven by per-frame
/// `update` / `handle_event` calls. Owns the trial pool and the result log.
pub struct Session<W: Write = File> {
    pub phase: Phase,
    pub config: ExperimentConfig,
    pub participant: ParticipantInfo,
    pool: TrialPool,
    log: ResultLog<W>,
    current: Option<Trial>,
    completed: usize,
    results: Vec<TrialResult>,
}

impl Session<File> {
    /// Opens the result log at `config.results_path`.
    pub fn create<R: Rng + ?Sized>(
        config: ExperimentConfig,
        participant: ParticipantInfo,
        rng: &mut R,
    ) -> Result<Self, ExperimentError> {
        let log = ResultLog::create(&config.results_path)?;
        Ok(Self::new(config, participant, rng, log))
    }
}

impl<W: Write> Session<W> {
    /// Shuffles the trial order with `rng`; the session keeps no RNG after
    /// that.
    pub fn new<R: Rng + ?Sized>(
        config: ExperimentConfig,
        participant: ParticipantInfo,
        rng: &mut R,
        log: ResultLog<W>,
    ) -> Self {
        let mut pool = TrialPool::new();
        pool.initialize(config.max_trials, rng);
        info!(
            "session for participant {} ({} trials)",
            participant.participant_id, config.max_trials
        );
        Self {
            phase: Phase::default(),
            config,
            participant,
            pool,
            log,
            current: None,
            completed: 0,
            results: Vec::new(),
        }
    }

    /// Leaves the intro, switches to the experiment scene and shows the
    /// first trial.
    pub fn begin<H: Host>(&mut self, host: &mut H) -> Result<SessionEvent, ExperimentError> {
        if !self.phase.is_intro() {
            return Err(ExperimentError::SessionFinished);
        }
        self.phase = Phase::Experiment;
        host.load_scene(&self.config.experiment_scene);
        self.start_trial(host)
    }

    /// Draws the next trial and instantiates its scenario, or ends the
    /// session once every trial has been answered.
    pub fn start_trial<H: Host>(&mut self, host: &mut H) -> Result<SessionEvent, ExperimentError> {
        if self.phase.is_end() {
            return Err(ExperimentError::SessionFinished);
        }
        if self.completed >= self.config.max_trials {
            self.finish(host)?;
            return Ok(SessionEvent::SessionComplete);
        }

        let index = self.pool.next_trial()?;
        let trial_id = ExperimentConfig::trial_id(index);
        let path = self.config.scenario_file(index);
        let center = self.config.center();

        let scenario = read_scenario_file(&path, |kind, position| {
            host.instantiate(kind, center + position)
        })?;
        info!(
            "running trial {} ({}/{}, {} objects)",
            trial_id,
            self.completed + 1,
            self.config.max_trials,
            scenario.len()
        );

        let placements = scenario.len();
        self.current = Some(Trial::new(trial_id.clone(), scenario));
        Ok(SessionEvent::TrialStarted {
            trial_id,
            placements,
        })
    }

    /// Per-frame tick: advances the decision timer and turns key presses
    /// into events.
    pub fn update<H: Host>(&mut self, host: &mut H) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if !self.phase.allows_response() {
            return events;
        }

        if let Some(trial) = &mut self.current {
            match trial.state {
                TrialState::AwaitingResponse => {
                    trial.elapsed_s += host.elapsed_frame_time();
                    if host.poll_key(Key::Yes) {
                        events.push(SessionEvent::ResponseReceived { response: true });
                    } else if host.poll_key(Key::No) {
                        events.push(SessionEvent::ResponseReceived { response: false });
                    }
                }
                TrialState::Feedback => {
                    if host.poll_key(Key::Advance) {
                        events.push(SessionEvent::AdvanceRequested);
                    }
                }
            }
        }

        events
    }

    /// Applies an event. Returns the follow-up event, or `None` when the event
    /// does not apply to the current trial state.
    pub fn handle_event<H: Host>(
        &mut self,
        event: SessionEvent,
        host: &mut H,
    ) -> Result<Option<SessionEvent>, ExperimentError> {
        match event {
            SessionEvent::ResponseReceived { response } => {
                let Some(trial) = self
                    .current
                    .as_mut()
                    .filter(|t| t.state == TrialState::AwaitingResponse)
                else {
                    return Ok(None);
                };

                let result = TrialResult::new(
                    trial.id.clone(),
                    trial.target_present(),
                    response,
                    trial.elapsed_s,
                );
                self.log.append(&result)?;
                info!(
                    "trial {}: answered {} in {:.2}s ({})",
                    result.trial_id,
                    if response { "yes" } else { "no" },
                    result.decision_time_s,
                    if result.correct { "correct" } else { "incorrect" },
                );

                trial.state = TrialState::Feedback;
                self.results.push(result.clone());
                Ok(Some(SessionEvent::TrialRecorded(result)))
            }

            SessionEvent::AdvanceRequested => {
                let Some(trial) = self
                    .current
                    .take_if(|t| t.state == TrialState::Feedback)
                else {
                    return Ok(None);
                };
                self.completed += 1;
                debug!("trial {} complete", trial.id);

                if self.completed < self.config.max_trials {
                    host.load_scene(&self.config.experiment_scene);
                }
                self.start_trial(host).map(Some)
            }

            _ => Ok(None),
        }
    }

    /// Closes the result log, writes the optional export and switches to the
    /// end scene. The phase only becomes `End` once all of that succeeded,
    /// so a failed call can be retried. Calling it after success does
    /// nothing.
    pub fn finish<H: Host>(&mut self, host: &mut H) -> Result<(), ExperimentError> {
        if self.phase.is_end() {
            return Ok(());
        }
        self.current = None;
        self.log.close()?;

        if let Some(path) = &self.config.export_path {
            let record = SessionRecord {
                participant: self.participant.clone(),
                results: self.results.clone(),
            };
            write_session_json(path, &record)?;
        }

        host.load_scene(&self.config.end_scene);
        self.phase = Phase::End;
        info!(
            "session finished: {} of {} trials answered",
            self.results.len(),
            self.config.max_trials
        );
        Ok(())
    }

    /// Teardown for an interrupted session: flushes and closes the log
    /// without touching the host.
    pub fn abort(&mut self) -> Result<(), ExperimentError> {
        if !self.phase.is_end() {
            warn!(
                "session aborted after {} of {} trials",
                self.completed, self.config.max_trials
            );
        }
        self.log.close()
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_end()
    }

    pub fn current_trial_state(&self) -> Option<TrialState> {
        self.current.as_ref().map(|t| t.state)
    }

    pub fn completed_trials(&self) -> usize {
        self.completed
    }

    pub fn results(&self) -> &[TrialResult] {
        &self.results
    }

    /// `(current trial number, total)` while trials are running.
    pub fn trial_progress(&self) -> Option<(usize, usize)> {
        self.current
            .as_ref()
            .map(|_| (self.completed + 1, self.config.max_trials))
    }
}
