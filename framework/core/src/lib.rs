//! Runs OpenMC under GNU `time -v` and turns the profiler report and OpenMC's own timing output
//! into typed metrics.

mod bin_path;
mod build_info;
mod command;
mod environment;
mod error;
mod model;
mod result;
mod runner;
mod time_usage;
mod timing;
mod types;
mod workdir;

pub mod prelude {
    pub use crate::bin_path::{resolve_openmc_exec, DEFAULT_OPENMC_EXEC};
    pub use crate::build_info::{query_build_info, BuildInfo, VERSION_MARKER};
    pub use crate::command::{
        build_command, resolve_mpi_launcher, select_mpi_procs, CommandSpec, PROCS_PLACEHOLDER,
    };
    pub use crate::environment::{
        build_environment, parent_environment, OMP_NUM_THREADS_ENV, OPENMC_THREADS_ENV,
    };
    pub use crate::error::RunnerConfigError;
    pub use crate::model::{ExportModel, ModelDir};
    pub use crate::result::RunResult;
    pub use crate::runner::{
        run_model_with_time, OpenMcRunner, RunOptions, DEFAULT_MPI_RUNNER,
        DEFAULT_TIME_EXECUTABLE, TIME_OUTPUT_FILE,
    };
    pub use crate::time_usage::TimeUsage;
    pub use crate::timing::TimingStats;
    pub use crate::types::BenchResult;
    pub use crate::workdir::{WorkDir, WORKDIR_PREFIX};
}
