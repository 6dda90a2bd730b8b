//! Headless stand-in for the 3D engine: objects are listed on stdout and keys
//! come from stdin.

use log::debug;
use std::collections::HashSet;
use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use vsearch_core::{Host, Key, ObjectKind, Vec3};

/// Input gathered for a single frame.
#[derive(Debug, Default)]
pub struct FrameInput {
    pub keys: HashSet<Key>,
    pub quit: bool,
}

/// Reads stdin on a helper thread so the frame loop never blocks.
///
/// Whole lines are forwarded, so an answer and the Enter that submits it
/// always land in the same frame.
pub struct StdinKeys {
    rx: Receiver<String>,
}

impl StdinKeys {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self { rx }
    }

    /// Drains every line typed since the last frame. `q`, Escape and a
    /// closed stdin all ask to quit.
    pub fn drain(&self) -> FrameInput {
        let mut input = FrameInput::default();
        loop {
            match self.rx.try_recv() {
                Ok(line) => read_line(&line, &mut input),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    input.quit = true;
                    break;
                }
            }
        }
        input
    }
}

/// Maps one submitted line to keys. The Enter ending the line counts as
/// `Advance` only when the line carries no answer.
fn read_line(line: &str, input: &mut FrameInput) {
    let mut answered = false;
    for c in line.chars() {
        match c {
            'q' | 'Q' | '\x1b' => input.quit = true,
            c => {
                if let Some(key) = Key::from_char(c) {
                    answered |= matches!(key, Key::Yes | Key::No);
                    input.keys.insert(key);
                }
            }
        }
    }
    if !answered {
        input.keys.insert(Key::Advance);
    }
}

#[derive(Debug, Default)]
pub struct TerminalHost {
    pub scene: String,
    pub objects: Vec<(ObjectKind, Vec3)>,
    pressed: HashSet<Key>,
    frame_time: f32,
}

impl TerminalHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs this frame's input and duration.
    pub fn begin_frame(&mut self, frame_time: f32, keys: HashSet<Key>) {
        self.frame_time = frame_time;
        self.pressed = keys;
    }

    pub fn describe(&self) -> String {
        let mut out = String::new();
        for (i, (kind, pos)) in self.objects.iter().enumerate() {
            out.push_str(&format!(
                "  {:>3}  {:<12} ({:>7.2}, {:>7.2}, {:>7.2})\n",
                i + 1,
                format!("{kind:?}"),
                pos.x,
                pos.y,
                pos.z
            ));
        }
        out
    }
}

impl Host for TerminalHost {
    fn instantiate(&mut self, kind: ObjectKind, position: Vec3) {
        debug!("instantiate {kind:?} at {position}");
        self.objects.push((kind, position));
    }

    fn poll_key(&mut self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn load_scene(&mut self, name: &str) {
        debug!("load scene {name}");
        self.scene = name.to_string();
        self.objects.clear();
    }

    fn elapsed_frame_time(&self) -> f32 {
        self.frame_time
    }
}
