use std::path::{is_separator, PathBuf};

use anyhow::bail;
use anyhow::Context;

use crate::types::BenchResult;

/// Name of the OpenMC binary when it is looked up on the user's `PATH`.
pub const DEFAULT_OPENMC_EXEC: &str = "openmc";

/// Resolve the OpenMC executable to benchmark.
///
/// With nothing configured, [`DEFAULT_OPENMC_EXEC`] is looked up on the `PATH`. A configured bare
/// name is also looked up on the `PATH`, while anything containing a path separator must point at
/// an existing file and is returned unchanged.
pub fn resolve_openmc_exec(configured: Option<&str>) -> BenchResult<PathBuf> {
    let exec = configured.unwrap_or(DEFAULT_OPENMC_EXEC);
    if exec.trim().is_empty() {
        bail!("OpenMC executable set to an empty string");
    }

    if !exec.chars().any(is_separator) {
        log::debug!("'{exec}' is not a path so looking in user's 'PATH'");
        return which::which(exec).with_context(|| {
            format!(
                "OpenMC binary '{exec}' not found in PATH. Please install OpenMC or pass \
                 '--openmc-exec' with the correct path."
            )
        });
    }

    let openmc_path = PathBuf::from(exec);
    if !openmc_path.exists() {
        bail!("Path to OpenMC binary set to '{exec}' but that path doesn't exist");
    }
    Ok(openmc_path)
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn empty_exec_is_rejected() {
        for configured in ["", "  "] {
            let err = resolve_openmc_exec(Some(configured)).unwrap_err();
            assert_eq!(err.to_string(), "OpenMC executable set to an empty string");
        }
    }

    #[test]
    fn missing_path_is_rejected() {
        let err = resolve_openmc_exec(Some("/non/existent/path/to/openmc")).unwrap_err();
        assert!(err.to_string().contains("/non/existent/path/to/openmc"));
    }

    #[test]
    fn existing_path_is_used_as_is() {
        let temp = NamedTempFile::new().unwrap();
        let configured = temp.path().to_str().unwrap();

        let resolved = resolve_openmc_exec(Some(configured)).unwrap();
        assert_eq!(resolved, temp.path());
    }

    #[cfg(unix)]
    #[test]
    fn bare_name_is_looked_up_on_path() {
        let resolved = resolve_openmc_exec(Some("sh")).unwrap();
        assert!(resolved.is_absolute());
        assert_eq!(resolved.file_name().unwrap(), "sh");
    }

    #[test]
    fn unknown_bare_name_is_rejected() {
        let err = resolve_openmc_exec(Some("openmc-bench-no-such-binary")).unwrap_err();
        assert!(err.to_string().contains("not found in PATH"));
    }
}
