use std::path::PathBuf;

use crate::build_info::BuildInfo;
use crate::time_usage::TimeUsage;
use crate::timing::TimingStats;

/// The outcome of a single OpenMC run.
///
/// A result is produced whenever OpenMC could be started, whatever its exit code. Metrics that
/// could not be collected are [None] rather than errors.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// Exit code of the profiled command.
    ///
    /// If the process was killed by a signal this is the negated signal number.
    pub returncode: i32,
    /// Captured standard output, empty if output was not captured.
    pub stdout: String,
    /// Captured standard error, empty if output was not captured.
    pub stderr: String,
    /// The full command that was run, including the profiler and any MPI launcher.
    pub command: Vec<String>,
    /// The directory the run happened in.
    ///
    /// It no longer exists if it was a temporary directory that wasn't kept.
    pub workdir: PathBuf,
    pub threads: Option<u32>,
    /// The number of MPI processes actually launched, [None] if OpenMC ran without MPI.
    pub mpi_procs: Option<u32>,
    pub time_usage: TimeUsage,
    pub build_info: Option<BuildInfo>,
    /// [None] if output was not captured or OpenMC printed no timing statistics.
    pub timing_stats: Option<TimingStats>,
    /// The number of MPI processes that were asked for.
    pub requested_mpi_procs: Option<u32>,
}

impl RunResult {
    pub fn success(&self) -> bool {
        self.returncode == 0
    }

    /// The OpenMC version of the build that was run, if it could be determined.
    pub fn openmc_version(&self) -> Option<&str> {
        self.build_info.as_ref()?.version.as_deref()
    }
}
