pub mod config;
pub mod error;
pub mod export;
pub mod participant;
pub mod pool;
pub mod results;
pub mod state;
pub mod trial;

pub use config::ExperimentConfig;
pub use error::ExperimentError;
pub use export::{SessionRecord, write_session_json};
pub use participant::ParticipantInfo;
pub use pool::{PoolState, TrialPool};
pub use results::ResultLog;
pub use state::{Session, SessionEvent};
pub use trial::Trial;
