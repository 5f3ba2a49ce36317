use std::path::PathBuf;

use clap::Parser;
use openmc_bench_core::prelude::{resolve_openmc_exec, BenchResult, DEFAULT_OPENMC_EXEC};

#[derive(Debug, Clone, Parser)]
#[command(about, long_about = None)]
pub struct BenchCli {
    /// The OpenMC executable to benchmark.
    ///
    /// A bare name is looked up on the `PATH`, anything else must be an existing path. If not set,
    /// `openmc` is looked up on the `PATH`.
    #[arg(long, env = "OPENMC_BENCH_OPENMC_PATH")]
    pub openmc_exec: Option<String>,

    /// GNU `time` executable used to measure resource usage. It must support `-v` and `-o`.
    #[arg(long, default_value = "/usr/bin/time")]
    pub time_executable: PathBuf,

    /// Thread counts to benchmark. Specify the flag multiple times to run several, for example
    /// `--threads 1 --threads 4`.
    ///
    /// Overrides the thread counts chosen by the benchmark.
    #[arg(long)]
    pub threads: Vec<u32>,

    /// MPI process counts to benchmark. A count of 0 or 1 runs without MPI.
    ///
    /// Overrides the MPI process counts chosen by the benchmark, which depend on whether OpenMC was
    /// built with MPI and an MPI launcher is installed.
    #[arg(long)]
    pub mpi_procs: Vec<u32>,

    /// Custom MPI launcher command, for example `--mpi-command "srun -n {procs}"`.
    ///
    /// `{procs}` is replaced with the number of processes. If not set, `mpirun -np <procs>` is
    /// used.
    #[arg(long)]
    pub mpi_command: Option<String>,

    /// Extra argument to pass to OpenMC. Can be given multiple times.
    #[arg(long = "openmc-arg", allow_hyphen_values = true)]
    pub openmc_args: Vec<String>,

    /// Keep each run's working directory so the OpenMC output files can be inspected.
    #[arg(long, default_value = "false")]
    pub keep_workdir: bool,

    /// Let OpenMC write straight to the terminal instead of capturing its output.
    ///
    /// OpenMC's own timing statistics can't be collected in this mode.
    #[arg(long, default_value = "false")]
    pub no_capture: bool,

    /// File that a summary of each run is appended to, as JSON lines.
    #[arg(long, default_value = "run_summary.jsonl")]
    pub run_summary: PathBuf,

    /// Do not show a progress bar on the CLI.
    ///
    /// This is recommended for CI/CD environments where the progress bar isn't being looked at by
    /// anyone and is just adding noise to the logs.
    #[arg(long, default_value = "false")]
    pub no_progress: bool,
}

impl BenchCli {
    /// The OpenMC executable to run.
    ///
    /// An executable given on the command line or in the environment must resolve. Without one,
    /// `openmc` is used even when it can't be found on the `PATH`, so the runs still report the
    /// failure.
    pub fn resolved_openmc_exec(&self) -> BenchResult<String> {
        match resolve_openmc_exec(self.openmc_exec.as_deref()) {
            Ok(path) => Ok(path.to_string_lossy().into_owned()),
            Err(e) if self.openmc_exec.is_none() => {
                log::warn!("{e:#}");
                Ok(DEFAULT_OPENMC_EXEC.to_string())
            }
            Err(e) => Err(e),
        }
    }

    /// The custom MPI launcher split into its arguments, [None] if not set or blank.
    pub fn mpi_command_tokens(&self) -> Option<Vec<String>> {
        let tokens = self
            .mpi_command
            .as_deref()?
            .split_whitespace()
            .map(str::to_string)
            .collect::<Vec<_>>();

        (!tokens.is_empty()).then_some(tokens)
    }

    /// The MPI options given on the command line, with counts of 1 or less meaning no MPI.
    pub(crate) fn mpi_options(&self) -> Vec<Option<u32>> {
        let mut options = Vec::with_capacity(self.mpi_procs.len());
        for procs in self.mpi_procs.iter().map(|p| Some(*p).filter(|p| *p > 1)) {
            if !options.contains(&procs) {
                options.push(procs);
            }
        }
        options
    }
}
