//! Composes the full argument vector for a run:
//! `[profiler, -v, -o, report, (launcher...), openmc, (args...)]`.

use std::path::Path;

use crate::build_info::BuildInfo;
use crate::error::RunnerConfigError;

/// Placeholder in a custom MPI launcher command that is replaced by the number of processes.
pub const PROCS_PLACEHOLDER: &str = "{procs}";

/// Everything needed to build the command for one run.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec<'a> {
    pub openmc_exec: &'a str,
    pub openmc_args: &'a [String],
    /// The effective number of MPI processes, see [select_mpi_procs].
    pub mpi_procs: Option<u32>,
    /// Custom launcher command, used instead of `default_mpi_runner` when not empty.
    pub mpi_command: Option<&'a [String]>,
    pub default_mpi_runner: Option<&'a [String]>,
    pub time_executable: &'a Path,
    pub time_output: &'a Path,
}

/// Reconcile the requested number of MPI processes with what the build supports.
///
/// Returns [None], meaning run without an MPI launcher, when one or fewer processes were requested
/// or the build doesn't support MPI.
pub fn select_mpi_procs(requested: Option<u32>, build_info: Option<&BuildInfo>) -> Option<u32> {
    let requested = requested.filter(|procs| *procs > 1)?;
    if !BuildInfo::supports_mpi(build_info) {
        log::info!(
            "OpenMC build does not support MPI, running {requested} requested processes as one"
        );
        return None;
    }
    if build_info.is_none() {
        log::warn!(
            "OpenMC build info unavailable, assuming MPI support for {requested} processes"
        );
    }
    Some(requested)
}

/// The launcher tokens that go in front of the OpenMC executable.
pub fn resolve_mpi_launcher(
    mpi_procs: Option<u32>,
    mpi_command: Option<&[String]>,
    default_mpi_runner: Option<&[String]>,
) -> Result<Vec<String>, RunnerConfigError> {
    let Some(procs) = mpi_procs.filter(|procs| *procs > 1) else {
        return Ok(Vec::new());
    };

    if let Some(mpi_command) = mpi_command.filter(|cmd| !cmd.is_empty()) {
        return Ok(mpi_command
            .iter()
            .map(|part| part.replace(PROCS_PLACEHOLDER, &procs.to_string()))
            .collect());
    }

    if let Some(runner) = default_mpi_runner.filter(|runner| !runner.is_empty()) {
        let mut launcher = runner.to_vec();
        launcher.push("-np".to_string());
        launcher.push(procs.to_string());
        return Ok(launcher);
    }

    Err(RunnerConfigError::MissingMpiLauncher { procs })
}

pub fn build_command(spec: CommandSpec<'_>) -> Result<Vec<String>, RunnerConfigError> {
    let launcher = resolve_mpi_launcher(spec.mpi_procs, spec.mpi_command, spec.default_mpi_runner)?;

    let mut command = vec![
        spec.time_executable.to_string_lossy().into_owned(),
        "-v".to_string(),
        "-o".to_string(),
        spec.time_output.to_string_lossy().into_owned(),
    ];
    command.extend(launcher);
    command.push(spec.openmc_exec.to_string());
    command.extend(spec.openmc_args.iter().cloned());

    Ok(command)
}
