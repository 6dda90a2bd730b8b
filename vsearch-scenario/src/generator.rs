//! Random scenario layouts.

use crate::error::ScenarioError;
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use vsearch_core::{Layout, ObjectKind, Placement, Scenario, SearchType, Spherical, Vec3};

/// Default inner radius of the spherical shell, keeping objects off the viewer.
pub const SHELL_OFFSET: f32 = 5.5;

/// Region objects are scattered in, centered on the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Volume {
    /// Box with the given full extents.
    Cuboid { size: [f32; 3] },
    /// Radii drawn from `[offset, size)`.
    Shell { size: f32, offset: f32 },
}

impl Default for Volume {
    fn default() -> Self {
        Volume::Cuboid {
            size: [20.0, 10.0, 20.0],
        }
    }
}

impl Volume {
    pub fn layout(&self) -> Layout {
        match self {
            Volume::Cuboid { .. } => Layout::Cartesian,
            Volume::Shell { .. } => Layout::Spherical,
        }
    }

    /// Extents must be finite and non-negative, and a shell's outer radius
    /// may not be smaller than its offset.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let usable = |v: f32| v.is_finite() && v >= 0.0;
        match *self {
            Volume::Cuboid { size } if !size.iter().copied().all(usable) => Err(
                ScenarioError::Volume(format!("cuboid extents {size:?} must be finite and >= 0")),
            ),
            Volume::Shell { size, offset } if !usable(size) || !usable(offset) || size < offset => {
                Err(ScenarioError::Volume(format!(
                    "shell radius {size} must be finite and at least the offset {offset}"
                )))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub cubes: usize,
    pub green_spheres: usize,
    pub red_spheres: usize,
    pub green_spheres_enabled: bool,
    /// Red spheres share the target's color, which turns the search into a
    /// conjunction search.
    pub red_spheres_enabled: bool,
    pub target: bool,
    pub volume: Volume,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            cubes: 1,
            green_spheres: 0,
            red_spheres: 0,
            green_spheres_enabled: false,
            red_spheres_enabled: false,
            target: false,
            volume: Volume::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn search_type(&self) -> SearchType {
        if self.red_spheres_enabled {
            SearchType::Conjunction
        } else {
            SearchType::Feature
        }
    }
}

pub struct Generator<R: Rng> {
    pub config: GeneratorConfig,
    rng: R,
}

impl<R: Rng> Generator<R> {
    pub fn new(config: GeneratorConfig, rng: R) -> Result<Self, ScenarioError> {
        config.volume.validate()?;
        Ok(Self { config, rng })
    }

    /// Builds a fresh scenario: distractor cubes, then the enabled spheres,
    /// then the target if requested.
    pub fn generate(&mut self) -> Scenario {
        let mut kinds = vec![ObjectKind::GreenCube; self.config.cubes];
        if self.config.green_spheres_enabled {
            kinds.extend(std::iter::repeat_n(
                ObjectKind::GreenSphere,
                self.config.green_spheres,
            ));
        }
        if self.config.red_spheres_enabled {
            kinds.extend(std::iter::repeat_n(
                ObjectKind::RedSphere,
                self.config.red_spheres,
            ));
        }
        if self.config.target {
            kinds.push(ObjectKind::Target);
        }

        let placements: Vec<Placement> = kinds.into_iter().map(|k| self.place(k)).collect();
        info!(
            "generated {} placements ({:?}, target {})",
            placements.len(),
            self.config.search_type(),
            if self.config.target { "present" } else { "absent" },
        );

        Scenario::new(
            self.config.target,
            self.config.search_type(),
            self.config.volume.layout(),
            placements,
        )
    }

    fn place(&mut self, kind: ObjectKind) -> Placement {
        let placement = match self.config.volume.clone() {
            Volume::Cuboid { size } => {
                let mut axis = |extent: f32| (self.rng.random::<f32>() - 0.5) * extent;
                let position = Vec3::new(axis(size[0]), axis(size[1]), axis(size[2]));
                Placement::new(kind, position)
            }
            Volume::Shell { size, offset } => {
                let radius = self.rng.random::<f32>() * (size - offset) + offset;
                let polar = self.rng.random::<f32>() * TAU;
                let elevation = self.rng.random::<f32>() * TAU;
                Placement::from_spherical(kind, Spherical::new(radius, polar, elevation))
            }
        };
        debug!("{:?} at {}", kind, placement.position);
        placement
    }
}
