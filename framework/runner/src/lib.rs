mod cli;
mod definition;
mod init;
mod launcher;
mod metrics;
mod progress;
mod report;
mod results;
mod run;
#[cfg(test)]
mod test_utils;
mod types;

pub mod prelude {
    pub use crate::cli::BenchCli;
    pub use crate::definition::{BenchmarkDefinition, BenchmarkDefinitionBuilder};
    pub use crate::init::init;
    pub use crate::launcher::{
        default_mpi_options, detect_mpi_enabled, detect_mpi_runner, DEFAULT_MPI_PROCS,
        DEFAULT_THREAD_OPTIONS,
    };
    pub use crate::metrics::TrackedMetric;
    pub use crate::report::{print_summary, summary_table};
    pub use crate::results::BenchmarkResults;
    pub use crate::run::run;
    pub use crate::types::ParamKey;

    pub use openmc_bench_core::prelude::*;
}
