//! Saving the backend-rendered PDF report to disk.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::FlowdeskError;

pub const REPORT_FILE_NAME: &str = "equipment_report.pdf";

/// Directory reports are saved into: Downloads, else home.
pub fn default_report_dir() -> Option<PathBuf> {
    dirs::download_dir().or_else(dirs::home_dir)
}

/// `equipment_report.pdf`, `equipment_report (1).pdf`, ...
fn candidate_paths(dir: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    let stem = REPORT_FILE_NAME.trim_end_matches(".pdf");
    std::iter::once(dir.join(REPORT_FILE_NAME))
        .chain((1..).map(move |n| dir.join(format!("{} ({}).pdf", stem, n))))
}

/// Write report bytes into `dir` without overwriting an earlier report.
///
/// Each name is claimed with `create_new`, so a file that appears between
/// two downloads is skipped instead of replaced.
pub fn save_report(dir: &Path, bytes: &[u8]) -> Result<PathBuf, FlowdeskError> {
    if bytes.is_empty() {
        return Err(FlowdeskError::Report(
            "The server returned an empty report".to_string(),
        ));
    }

    fs::create_dir_all(dir).map_err(|e| {
        FlowdeskError::Report(format!("Failed to create {}: {}", dir.display(), e))
    })?;

    for path in candidate_paths(dir) {
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => {
                return Err(FlowdeskError::Report(format!(
                    "Failed to save report to {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        file.write_all(bytes).map_err(|e| {
            FlowdeskError::Report(format!("Failed to save report to {}: {}", path.display(), e))
        })?;

        info!("Saved report to {:?}", path);
        return Ok(path);
    }

    Err(FlowdeskError::Report(format!(
        "No free file name for the report in {}",
        dir.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_report_writes_bytes() {
        let dir = TempDir::new().unwrap();
        let path = save_report(dir.path(), b"%PDF-1.4 fake").unwrap();

        assert_eq!(path.file_name().unwrap(), REPORT_FILE_NAME);
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4 fake");
    }

    #[test]
    fn test_existing_report_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let first = save_report(dir.path(), b"%PDF first").unwrap();
        let second = save_report(dir.path(), b"%PDF second").unwrap();
        let third = save_report(dir.path(), b"%PDF third").unwrap();

        assert_ne!(first, second);
        assert_eq!(second.file_name().unwrap(), "equipment_report (1).pdf");
        assert_eq!(third.file_name().unwrap(), "equipment_report (2).pdf");
        assert_eq!(std::fs::read(&first).unwrap(), b"%PDF first");
    }

    #[test]
    fn test_report_skips_name_taken_by_another_writer() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(REPORT_FILE_NAME), b"%PDF other").unwrap();
        std::fs::write(dir.path().join("equipment_report (1).pdf"), b"%PDF other 1").unwrap();

        let path = save_report(dir.path(), b"%PDF ours").unwrap();

        assert_eq!(path.file_name().unwrap(), "equipment_report (2).pdf");
        assert_eq!(std::fs::read(dir.path().join(REPORT_FILE_NAME)).unwrap(), b"%PDF other");
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF ours");
    }

    #[test]
    fn test_empty_report_rejected() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            save_report(dir.path(), b""),
            Err(FlowdeskError::Report(_))
        ));
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("reports").join("2025");
        let path = save_report(&nested, b"%PDF").unwrap();
        assert!(path.starts_with(&nested));
    }
}
