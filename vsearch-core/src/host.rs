use crate::placement::ObjectKind;
use glam::Vec3;

/// Keys the experiment listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// "Target present" answer (Y)
    Yes,
    /// "Target absent" answer (N)
    No,
    /// Confirms the feedback screen and moves on (Space)
    Advance,
}

impl Key {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'y' => Some(Key::Yes),
            'n' => Some(Key::No),
            ' ' => Some(Key::Advance),
            _ => None,
        }
    }
}

/// The engine that draws stimuli and delivers input.
///
/// Implementations own their scene representation. The experiment only asks
/// for objects to be placed, scenes to be switched, and per-frame input and
/// timing.
pub trait Host {
    fn instantiate(&mut self, kind: ObjectKind, position: Vec3);

    /// True only on the frame the key went down.
    fn poll_key(&mut self, key: Key) -> bool;

    /// Replaces the current scene, discarding instantiated objects.
    fn load_scene(&mut self, name: &str);

    /// Seconds since the previous frame.
    fn elapsed_frame_time(&self) -> f32;
}
