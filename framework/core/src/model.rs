use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::error::RunnerConfigError;
use crate::types::BenchResult;

/// A simulation model that can write its OpenMC input files into a directory.
///
/// This is the only thing the runner needs from a model. How the model is built is up to the
/// implementation.
pub trait ExportModel {
    /// Write the model's input files into `dir`, which already exists.
    fn export_to_dir(&self, dir: &Path) -> BenchResult<()>;
}

impl<F> ExportModel for F
where
    F: Fn(&Path) -> BenchResult<()>,
{
    fn export_to_dir(&self, dir: &Path) -> BenchResult<()> {
        self(dir)
    }
}

/// A model that has already been exported to a directory, such as the `materials.xml`,
/// `geometry.xml` and `settings.xml` files of an OpenMC model.
///
/// Exporting copies the contents of the directory, including sub-directories.
#[derive(Debug, Clone)]
pub struct ModelDir {
    source: PathBuf,
}

impl ModelDir {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl ExportModel for ModelDir {
    fn export_to_dir(&self, dir: &Path) -> BenchResult<()> {
        if !self.source.is_dir() {
            return Err(RunnerConfigError::MissingModelDir {
                path: self.source.clone(),
            }
            .into());
        }

        for entry in walkdir::WalkDir::new(&self.source).min_depth(1) {
            let entry = entry.context("Failed to read model directory")?;
            let relative = entry
                .path()
                .strip_prefix(&self.source)
                .context("Model file outside of model directory")?;
            let target = dir.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target).with_context(|| {
                    format!("Failed to create directory '{}'", target.display())
                })?;
            } else {
                log::trace!("Exporting '{}'", relative.display());
                fs::copy(entry.path(), &target).with_context(|| {
                    format!(
                        "Failed to copy model file '{}' to '{}'",
                        entry.path().display(),
                        target.display()
                    )
                })?;
            }
        }

        Ok(())
    }
}
