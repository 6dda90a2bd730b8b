use crate::coords::Spherical;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Cube,
    Sphere,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
        }
    }
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Cube => "cube",
            Shape::Sphere => "sphere",
        }
    }
}

impl FromStr for Color {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(Color::Red),
            "green" => Ok(Color::Green),
            _ => Err(()),
        }
    }
}

impl FromStr for Shape {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cube" => Ok(Shape::Cube),
            "sphere" => Ok(Shape::Sphere),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four objects a host knows how to instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Green cube distractor
    GreenCube,
    /// Red cube, the object participants search for
    Target,
    GreenSphere,
    RedSphere,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 4] = [
        ObjectKind::GreenCube,
        ObjectKind::Target,
        ObjectKind::GreenSphere,
        ObjectKind::RedSphere,
    ];

    pub fn new(color: Color, shape: Shape) -> Self {
        match (color, shape) {
            (Color::Green, Shape::Cube) => ObjectKind::GreenCube,
            (Color::Red, Shape::Cube) => ObjectKind::Target,
            (Color::Green, Shape::Sphere) => ObjectKind::GreenSphere,
            (Color::Red, Shape::Sphere) => ObjectKind::RedSphere,
        }
    }

    /// Resolves textual color and shape fields. Unknown names yield `None`.
    pub fn from_names(color: &str, shape: &str) -> Option<Self> {
        let color = color.trim().parse().ok()?;
        let shape = shape.trim().parse().ok()?;
        Some(Self::new(color, shape))
    }

    pub fn color(&self) -> Color {
        match self {
            ObjectKind::GreenCube | ObjectKind::GreenSphere => Color::Green,
            ObjectKind::Target | ObjectKind::RedSphere => Color::Red,
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            ObjectKind::GreenCube | ObjectKind::Target => Shape::Cube,
            ObjectKind::GreenSphere | ObjectKind::RedSphere => Shape::Sphere,
        }
    }

    pub fn is_target(&self) -> bool {
        matches!(self, ObjectKind::Target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub kind: ObjectKind,
    pub position: Vec3,
    /// Only present for placements generated or loaded in spherical form.
    pub spherical: Option<Spherical>,
}

impl Placement {
    pub fn new(kind: ObjectKind, position: Vec3) -> Self {
        Self {
            kind,
            position,
            spherical: None,
        }
    }

    pub fn from_spherical(kind: ObjectKind, spherical: Spherical) -> Self {
        Self {
            kind,
            position: spherical.to_cartesian(),
            spherical: Some(spherical),
        }
    }

    /// The stored spherical form, or one derived from the position.
    pub fn spherical(&self) -> Spherical {
        self.spherical
            .unwrap_or_else(|| Spherical::from_cartesian(self.position))
    }

    pub fn is_target(&self) -> bool {
        self.kind.is_target()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_red_cube_is_target() {
        let targets: Vec<_> = ObjectKind::ALL.iter().filter(|k| k.is_target()).collect();
        assert_eq!(targets, vec![&ObjectKind::Target]);
    }

    #[test]
    fn kinds_round_trip_through_parts() {
        for kind in ObjectKind::ALL {
            assert_eq!(ObjectKind::new(kind.color(), kind.shape()), kind);
            assert_eq!(
                ObjectKind::from_names(kind.color().as_str(), kind.shape().as_str()),
                Some(kind)
            );
        }
    }

    #[test]
    fn unknown_names_do_not_resolve() {
        assert_eq!(ObjectKind::from_names("red", "pyramid"), None);
        assert_eq!(ObjectKind::from_names("blue", "cube"), None);
    }
}
