use crate::host::{StdinKeys, TerminalHost};
use anyhow::{Context, Result};
use log::{info, warn};
use vsearch_core::Phase;
use vsearch_experiment::{Session, SessionEvent};
use vsearch_timing::{FramePacer, HighPrecisionTimer, Timer};

/// Drives one session at a fixed frame rate against the terminal host.
pub struct App {
    session: Session,
    host: TerminalHost,
    pacer: FramePacer,
    should_exit: bool,
}

impl App {
    pub fn new(session: Session) -> Self {
        let pacer = FramePacer::new(HighPrecisionTimer::new(), session.config.frame_rate_hz);
        Self {
            session,
            host: TerminalHost::new(),
            pacer,
            should_exit: false,
        }
    }

    pub fn run(mut self) -> Result<()> {
        println!("=== VISUAL SEARCH EXPERIMENT ===");
        println!("Platform: {}", std::env::consts::OS);
        println!("Answer with y (target present) or n (absent), then Enter.");
        println!("Press Enter again to continue, q to quit.\n");

        let input = StdinKeys::spawn();
        let first = self.session.begin(&mut self.host)?;
        self.show(&first);

        while !self.should_exit {
            let dt = self.pacer.tick();
            let frame = input.drain();
            if frame.quit {
                self.cleanup_and_exit()?;
                break;
            }
            self.host.begin_frame(dt.as_secs_f32(), frame.keys);
            self.update()?;
        }

        let stats = self.pacer.timer.frame_stats();
        info!(
            "{} frames, {:.3} ms/frame, jitter {:.3} ms",
            self.pacer.timer.frame_count(),
            stats.average_frame_time_ns / 1e6,
            stats.jitter_ns / 1e6,
        );
        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        let events = self.session.update(&mut self.host);
        for event in events {
            if let Some(next) = self
                .session
                .handle_event(event, &mut self.host)
                .context("trial step failed")?
            {
                self.show(&next);
            }
        }
        Ok(())
    }

    fn show(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::TrialStarted { placements, .. } => {
                if let Some((n, total)) = self.session.trial_progress() {
                    println!("--- Trial {n}/{total} ({placements} objects) ---");
                }
                print!("{}", self.host.describe());
                println!("Is the red cube there? [y/n]");
            }
            SessionEvent::TrialRecorded(result) => {
                println!("Time: {:.2}s", result.decision_time_s);
                println!("Press Enter to continue.");
            }
            SessionEvent::SessionComplete => {
                println!(
                    "\nExperiment completed ({} trials). Thank you!",
                    self.session.completed_trials()
                );
                self.should_exit = true;
            }
            SessionEvent::ResponseReceived { .. } | SessionEvent::AdvanceRequested => {}
        }
    }

    fn cleanup_and_exit(&mut self) -> Result<()> {
        if self.session.phase != Phase::End {
            warn!("quit requested");
        }
        self.session.abort()?;
        println!("\nResults saved to {}", self.session.config.results_path.display());
        self.should_exit = true;
        Ok(())
    }
}
