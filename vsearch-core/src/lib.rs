pub mod coords;
pub mod host;
pub mod phase;
pub mod placement;
pub mod scenario;
pub mod trial;

pub use coords::Spherical;
pub use glam::Vec3;
pub use host::{Host, Key};
pub use phase::Phase;
pub use placement::{Color, ObjectKind, Placement, Shape};
pub use scenario::{Layout, Scenario, SearchType};
pub use trial::{TrialResult, TrialState};
