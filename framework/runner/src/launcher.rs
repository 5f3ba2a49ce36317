use openmc_bench_core::prelude::{parent_environment, BuildInfo, OpenMcRunner};

/// MPI launchers to look for on the `PATH`, in order of preference.
const MPI_LAUNCHERS: [&str; 2] = ["mpirun", "mpiexec"];

/// Thread counts a benchmark sweeps over unless it or the CLI chooses others.
pub const DEFAULT_THREAD_OPTIONS: [u32; 2] = [1, 2];

/// Number of MPI processes a benchmark tries when MPI is available.
pub const DEFAULT_MPI_PROCS: u32 = 2;

/// Find an MPI launcher on the `PATH`.
pub fn detect_mpi_runner() -> Option<Vec<String>> {
    let launcher = MPI_LAUNCHERS
        .iter()
        .find(|candidate| which::which(candidate).is_ok())?;

    log::debug!("Found MPI launcher '{launcher}'");
    Some(vec![launcher.to_string()])
}

/// Whether the runner's default OpenMC executable can be run with MPI.
///
/// An executable whose build info can't be read is assumed to support MPI.
pub fn detect_mpi_enabled(runner: &mut OpenMcRunner) -> bool {
    let openmc_exec = runner.openmc_exec().to_string();
    let build_info = runner.build_info(&openmc_exec, &parent_environment());
    BuildInfo::supports_mpi(build_info.as_ref())
}

/// The MPI options to sweep over when a benchmark doesn't choose its own.
pub fn default_mpi_options(mpi_enabled: bool, launcher_available: bool) -> Vec<Option<u32>> {
    if mpi_enabled && launcher_available {
        vec![None, Some(DEFAULT_MPI_PROCS)]
    } else {
        vec![None]
    }
}
