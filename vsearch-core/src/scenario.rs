use crate::placement::Placement;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    /// Target differs from every distractor by a single feature.
    Feature,
    /// Target shares color with some distractors and shape with others.
    Conjunction,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Feature => "feature",
            SearchType::Conjunction => "conjunction",
        }
    }
}

impl FromStr for SearchType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "feature" => Ok(SearchType::Feature),
            "conjunction" => Ok(SearchType::Conjunction),
            _ => Err(()),
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field layout of the placement lines in a scenario file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// `x,y,z,color,shape`
    #[default]
    Cartesian,
    /// `s,radius,polar,elevation,c,x,y,z,color,shape`
    Spherical,
}

/// One trial layout. The placement list cannot be changed after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub target_present: bool,
    pub search_type: SearchType,
    pub layout: Layout,
    placements: Vec<Placement>,
}

impl Scenario {
    pub fn new(
        target_present: bool,
        search_type: SearchType,
        layout: Layout,
        placements: Vec<Placement>,
    ) -> Self {
        Self {
            target_present,
            search_type,
            layout,
            placements,
        }
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn target_count(&self) -> usize {
        self.placements.iter().filter(|p| p.is_target()).count()
    }

    pub fn presence_str(&self) -> &'static str {
        if self.target_present {
            "present"
        } else {
            "absent"
        }
    }
}
