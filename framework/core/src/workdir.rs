//! The scratch directory that a single OpenMC run exports its model into and runs inside.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::TempDir;

use crate::types::BenchResult;

/// Prefix of the temporary directories created for runs.
pub const WORKDIR_PREFIX: &str = "openmc-bench-";

/// A working directory for one run.
///
/// Either borrowed from the caller, in which case it is never removed, or a fresh temporary
/// directory owned by this value. An owned directory is removed when this value is dropped unless
/// it was asked to be kept, so cleanup happens on every exit path of a run.
#[derive(Debug)]
pub struct WorkDir {
    path: PathBuf,
    owned: Option<TempDir>,
    keep: bool,
}

impl WorkDir {
    /// Use `working_dir` if it is given, otherwise create a new temporary directory.
    ///
    /// A relative `working_dir` is resolved against the current directory, so the path stays valid
    /// for a process started inside it. `keep` only has an effect on temporary directories.
    pub fn prepare(working_dir: Option<&Path>, keep: bool) -> BenchResult<Self> {
        match working_dir {
            Some(path) => {
                fs::create_dir_all(path).with_context(|| {
                    format!("Failed to create working directory '{}'", path.display())
                })?;
                let path = std::path::absolute(path).with_context(|| {
                    format!("Failed to resolve working directory '{}'", path.display())
                })?;
                Ok(Self {
                    path,
                    owned: None,
                    keep,
                })
            }
            None => {
                let temp = tempfile::Builder::new()
                    .prefix(WORKDIR_PREFIX)
                    .tempdir()
                    .context("Failed to create temporary working directory")?;
                log::trace!("Created working directory '{}'", temp.path().display());
                Ok(Self {
                    path: temp.path().to_path_buf(),
                    owned: Some(temp),
                    keep,
                })
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this directory was created here and is therefore eligible for removal.
    pub fn is_owned(&self) -> bool {
        self.owned.is_some()
    }
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        let Some(temp) = self.owned.take() else {
            return;
        };

        if self.keep {
            let kept = temp.keep();
            log::info!("Keeping working directory '{}'", kept.display());
        } else if let Err(err) = temp.close() {
            log::warn!(
                "Failed to clean up working directory '{}': {err}",
                self.path.display()
            );
        } else {
            log::trace!("Removed working directory '{}'", self.path.display());
        }
    }
}
