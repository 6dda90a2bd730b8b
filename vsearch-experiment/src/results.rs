use crate::error::ExperimentError;
use log::{debug, error};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use vsearch_core::TrialResult;

/// Append-only trial log in the `results.txt` format.
///
/// The column header goes out when the log is created. The writer is flushed
/// and released by `close`, which may be called any number of times, or by
/// `Drop` if the session ends without closing it.
#[derive(Debug)]
pub struct ResultLog<W: Write = File> {
    writer: Option<BufWriter<W>>,
    lines: usize,
}

impl ResultLog<File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, ExperimentError> {
        let path = path.as_ref();
        let io_err = |source| ExperimentError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let file = File::create(path).map_err(io_err)?;
        debug!("result log opened at {}", path.display());
        Self::new(file)
    }
}

impl<W: Write> ResultLog<W> {
    pub fn new(inner: W) -> Result<Self, ExperimentError> {
        let mut writer = BufWriter::new(inner);
        writeln!(writer, "{}", TrialResult::LOG_HEADER).map_err(ExperimentError::Log)?;
        Ok(Self {
            writer: Some(writer),
            lines: 0,
        })
    }

    pub fn append(&mut self, result: &TrialResult) -> Result<(), ExperimentError> {
        let writer = self.writer.as_mut().ok_or(ExperimentError::LogClosed)?;
        writeln!(writer, "{}", result.to_log_line()).map_err(ExperimentError::Log)?;
        self.lines += 1;
        Ok(())
    }

    /// Number of trial lines written, header excluded.
    pub fn len(&self) -> usize {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines == 0
    }

    pub fn is_closed(&self) -> bool {
        self.writer.is_none()
    }

    pub fn close(&mut self) -> Result<(), ExperimentError> {
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };
        writer.flush().map_err(ExperimentError::Log)?;
        debug!("result log closed after {} trials", self.lines);
        Ok(())
    }
}

impl<W: Write> Drop for ResultLog<W> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            error!("failed to flush result log: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_once_then_one_line_per_trial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("results.txt");

        let mut log = ResultLog::create(&path).unwrap();
        log.append(&TrialResult::new("s1", true, true, 1.23)).unwrap();
        log.append(&TrialResult::new("s3", false, true, 0.4)).unwrap();
        assert_eq!(log.len(), 2);
        log.close().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "TrialNumber,Correctness,Actual,Response,Time\n\
             s1,correct,True,True,1.23\n\
             s3,incorrect,False,True,0.40\n"
        );
    }

    #[test]
    fn double_close_is_a_no_op() {
        let mut log = ResultLog::new(Vec::new()).unwrap();
        log.close().unwrap();
        assert!(log.is_closed());
        log.close().unwrap();
    }

    #[test]
    fn append_after_close_fails() {
        let mut log = ResultLog::new(Vec::new()).unwrap();
        log.close().unwrap();
        let err = log.append(&TrialResult::new("s1", true, true, 1.0)).unwrap_err();
        assert!(matches!(err, ExperimentError::LogClosed));
    }

    #[test]
    fn drop_flushes_pending_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.txt");
        {
            let mut log = ResultLog::create(&path).unwrap();
            log.append(&TrialResult::new("s2", false, false, 2.5)).unwrap();
        }
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("s2,correct,False,False,2.50\n"));
    }
}
