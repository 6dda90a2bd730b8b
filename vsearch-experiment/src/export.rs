//! JSON dump of a finished session.

use crate::error::ExperimentError;
use crate::participant::ParticipantInfo;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use vsearch_core::TrialResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub participant: ParticipantInfo,
    pub results: Vec<TrialResult>,
}

pub fn write_session_json(path: &Path, record: &SessionRecord) -> Result<(), ExperimentError> {
    let io_err = |source| ExperimentError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_err)?;
    }
    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    serde_json::to_writer_pretty(&mut writer, record)?;
    writer.flush().map_err(io_err)?;
    info!("session saved to {}", path.display());
    Ok(())
}
