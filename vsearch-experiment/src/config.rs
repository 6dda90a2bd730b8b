use crate::error::ExperimentError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use vsearch_core::Vec3;
use vsearch_scenario::scenario_path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub max_trials: usize,
    /// Holds the `s<index>.txt` scenario files.
    pub scenario_dir: PathBuf,
    pub results_path: PathBuf,
    /// Optional JSON dump of participant details and results.
    pub export_path: Option<PathBuf>,
    /// Added to every loaded position.
    pub center: [f32; 3],
    pub frame_rate_hz: f64,
    pub experiment_scene: String,
    pub end_scene: String,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            max_trials: 3,
            scenario_dir: PathBuf::from("scenarios"),
            results_path: PathBuf::from("results.txt"),
            export_path: None,
            center: [0.0; 3],
            frame_rate_hz: 60.0,
            experiment_scene: "Experiment".to_string(),
            end_scene: "End".to_string(),
        }
    }
}

impl ExperimentConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ExperimentError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ExperimentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ExperimentError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn center(&self) -> Vec3 {
        Vec3::from_array(self.center)
    }

    pub fn trial_id(index: usize) -> String {
        format!("s{index}")
    }

    pub fn scenario_file(&self, index: usize) -> PathBuf {
        scenario_path(&self.scenario_dir, &Self::trial_id(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "max_trials": 5, "center": [1.0, 2.0, 3.0] }}"#).unwrap();

        let config = ExperimentConfig::from_file(file.path()).unwrap();
        assert_eq!(config.max_trials, 5);
        assert_eq!(config.center(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(config.results_path, PathBuf::from("results.txt"));
        assert_eq!(config.end_scene, "End");
    }

    #[test]
    fn malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "max_trials = 5").unwrap();
        let err = ExperimentConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ExperimentError::Config { .. }));
    }

    #[test]
    fn scenario_files_are_named_by_index() {
        let config = ExperimentConfig {
            scenario_dir: PathBuf::from("stimuli"),
            ..Default::default()
        };
        assert_eq!(config.scenario_file(2), Path::new("stimuli").join("s2.txt"));
    }
}
