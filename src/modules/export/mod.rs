//! Export Module
//!
//! Turns build inputs into generated files.
//!
//! - ABI extraction → one `<Contract>.json` per relevant artifact
//! - Address table → a single TypeScript module
//!
//! Both exporters only plan their outputs; writing or checking the plan
//! against disk happens here.

mod abi_export;
mod ts_export;

pub use abi_export::{orphaned_abis, plan_abis};
pub use ts_export::plan_addresses;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A file the run wants to produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Outcome of applying a plan
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Files whose bytes changed (or were created)
    pub written: usize,
    /// Files already holding the planned bytes
    pub unchanged: usize,
    /// Files that differ from the plan or are no longer produced (check mode only)
    pub stale: Vec<PathBuf>,
}

/// How a plan is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Overwrite every planned file
    Write,
    /// Compare against disk, touch nothing
    Check,
}

/// Write or check every planned file
pub fn apply(plan: &[PlannedFile], mode: Mode) -> Result<Summary> {
    let mut summary = Summary::default();

    for file in plan {
        let current = read_existing(&file.path)?;
        let up_to_date = current.as_deref() == Some(file.contents.as_bytes());

        match mode {
            Mode::Check => {
                if up_to_date {
                    summary.unchanged += 1;
                } else {
                    log::debug!("stale: {}", file.path.display());
                    summary.stale.push(file.path.clone());
                }
            }
            Mode::Write => {
                if let Some(parent) = file.path.parent() {
                    fs::create_dir_all(parent).map_err(|source| Error::Write {
                        path: parent.to_path_buf(),
                        source,
                    })?;
                }
                fs::write(&file.path, &file.contents).map_err(|source| Error::Write {
                    path: file.path.clone(),
                    source,
                })?;
                if up_to_date {
                    summary.unchanged += 1;
                } else {
                    log::info!("wrote {}", file.path.display());
                    summary.written += 1;
                }
            }
        }
    }

    Ok(summary)
}

/// Current bytes at `path`, `None` when nothing is there yet
fn read_existing(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn planned(dir: &TempDir, name: &str, contents: &str) -> PlannedFile {
        PlannedFile {
            path: dir.path().join(name),
            contents: contents.to_string(),
        }
    }

    #[test]
    fn test_write_creates_parents_and_counts() {
        let dir = TempDir::new().unwrap();
        let plan = vec![
            planned(&dir, "abis/Foo.json", "[]\n"),
            planned(&dir, "addresses.ts", "x\n"),
        ];

        let first = apply(&plan, Mode::Write).unwrap();
        assert_eq!(first.written, 2);
        assert_eq!(fs::read_to_string(dir.path().join("abis/Foo.json")).unwrap(), "[]\n");

        let second = apply(&plan, Mode::Write).unwrap();
        assert_eq!(second.written, 0);
        assert_eq!(second.unchanged, 2);
    }

    #[test]
    fn test_check_reports_stale_without_writing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("same.txt"), "same").unwrap();
        fs::write(dir.path().join("old.txt"), "old").unwrap();
        let plan = vec![
            planned(&dir, "same.txt", "same"),
            planned(&dir, "old.txt", "new"),
            planned(&dir, "missing.txt", "new"),
        ];

        let summary = apply(&plan, Mode::Check).unwrap();
        assert_eq!(summary.unchanged, 1);
        assert_eq!(
            summary.stale,
            vec![dir.path().join("old.txt"), dir.path().join("missing.txt")]
        );
        assert_eq!(fs::read_to_string(dir.path().join("old.txt")).unwrap(), "old");
        assert!(!dir.path().join("missing.txt").exists());
    }

    #[test]
    fn test_non_utf8_file_is_stale_and_overwritten() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Foo.json"), [0xff, 0xfe, 0x00]).unwrap();
        let plan = vec![planned(&dir, "Foo.json", "[]\n")];

        let summary = apply(&plan, Mode::Check).unwrap();
        assert_eq!(summary.stale, vec![dir.path().join("Foo.json")]);

        let summary = apply(&plan, Mode::Write).unwrap();
        assert_eq!(summary.written, 1);
        assert_eq!(fs::read_to_string(dir.path().join("Foo.json")).unwrap(), "[]\n");
    }

    #[test]
    fn test_unreadable_target_is_an_error() {
        let dir = TempDir::new().unwrap();
        // A directory where a file is expected cannot be read as one
        fs::create_dir(dir.path().join("Foo.json")).unwrap();
        let plan = vec![planned(&dir, "Foo.json", "[]\n")];

        assert!(matches!(
            apply(&plan, Mode::Check),
            Err(Error::Read { ref path, .. }) if *path == dir.path().join("Foo.json")
        ));
    }
}
