pub mod timer;

pub use timer::{FramePacer, FrameStats, HighPrecisionTimer, Timer};
