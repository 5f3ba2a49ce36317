use std::collections::{BTreeMap, HashMap};
use std::process::{Command, Stdio};

/// Marker that starts the version line printed by `openmc -v`.
pub const VERSION_MARKER: &str = "OpenMC version";

/// Keys that `openmc -v` has used for the git revision of the build.
const COMMIT_HASH_KEYS: [&str; 2] = ["Commit hash", "Git SHA1"];

/// Keys that `openmc -v` has used to report whether the build was compiled with MPI.
const MPI_ENABLED_KEYS: [&str; 2] = ["MPI enabled", "MPI Enabled"];

/// Information about the OpenMC build that is benchmarked, as reported by `openmc -v`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: Option<String>,
    pub commit_hash: Option<String>,
    /// Every `Key: Value` line of the banner, plus the version under [VERSION_MARKER].
    pub raw: BTreeMap<String, String>,
}

impl BuildInfo {
    /// Parse the banner printed by `openmc -v`.
    ///
    /// Returns [None] if the output has no lines at all.
    pub fn parse(output: &str) -> Option<Self> {
        if output.lines().next().is_none() {
            return None;
        }

        let mut version = None;
        let mut raw = BTreeMap::new();
        for line in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if version.is_none() {
                if let Some(rest) = line.strip_prefix(VERSION_MARKER) {
                    let rest = rest.trim().to_string();
                    raw.insert(VERSION_MARKER.to_string(), rest.clone());
                    version = Some(rest);
                    continue;
                }
            }
            if let Some((key, value)) = line.split_once(':') {
                raw.insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        let commit_hash = COMMIT_HASH_KEYS
            .iter()
            .find_map(|key| raw.get(*key))
            .cloned();

        Some(Self {
            version,
            commit_hash,
            raw,
        })
    }

    /// Whether the build can be launched with multiple MPI processes.
    ///
    /// Unknown build info is treated as MPI capable. Known build info must say so explicitly.
    pub fn supports_mpi(info: Option<&BuildInfo>) -> bool {
        let Some(info) = info else {
            return true;
        };

        MPI_ENABLED_KEYS
            .iter()
            .find_map(|key| info.raw.get(*key))
            .map(|value| matches!(value.trim().to_lowercase().as_str(), "yes" | "true" | "1"))
            .unwrap_or(false)
    }
}

/// Get the build info of an OpenMC binary by running `<openmc_exec> -v`.
///
/// A binary that can't be launched or exits with an error gives [None] rather than an error, the
/// benchmark can still run without it.
pub fn query_build_info(openmc_exec: &str, env: &HashMap<String, String>) -> Option<BuildInfo> {
    let output = match Command::new(openmc_exec)
        .arg("-v")
        .env_clear()
        .envs(env)
        .stdin(Stdio::null())
        .output()
    {
        Ok(output) => output,
        Err(err) => {
            log::warn!("Failed to execute '{openmc_exec} -v': {err}");
            return None;
        }
    };

    if !output.status.success() {
        log::warn!(
            "'{openmc_exec} -v' command failed with exit code: {status}",
            status = output.status
        );
        return None;
    }

    let info = BuildInfo::parse(&String::from_utf8_lossy(&output.stdout));
    log::debug!("Build info for '{openmc_exec}': {info:?}");
    info
}
