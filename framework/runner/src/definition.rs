use openmc_bench_core::prelude::ExportModel;

use crate::cli::BenchCli;
use crate::init::init;
use crate::launcher::DEFAULT_THREAD_OPTIONS;

/// The builder for a benchmark definition.
///
/// This must be used in the benchmark's `main` function to define the benchmark that you want to
/// run.
pub struct BenchmarkDefinitionBuilder {
    /// The name of the benchmark, which should be unique within the benchmark suite.
    name: String,
    /// This value is initialised for you by [BenchmarkDefinitionBuilder::new_with_init].
    #[doc(hidden)]
    cli: BenchCli,
    /// The OpenMC model that is run for every point in the parameter grid.
    model: Option<Box<dyn ExportModel>>,
    /// Thread counts to sweep over, used if none are given on the command line.
    ///
    /// Defaults to [DEFAULT_THREAD_OPTIONS].
    thread_options: Option<Vec<u32>>,
    /// MPI process counts to sweep over, used if none are given on the command line. [None] in the
    /// list runs without MPI.
    ///
    /// Defaults to running without MPI, plus with two processes if OpenMC supports MPI and a
    /// launcher is installed.
    mpi_options: Option<Vec<Option<u32>>>,
}

pub struct BenchmarkDefinition {
    pub name: String,
    pub cli: BenchCli,
    pub model: Box<dyn ExportModel>,
    pub thread_options: Vec<u32>,
    /// [None] when the defaults should be detected from the OpenMC build.
    pub mpi_options: Option<Vec<Option<u32>>>,
}

impl BenchmarkDefinitionBuilder {
    /// Create a new benchmark definition from its name and command line arguments.
    pub fn new(name: &str, cli: BenchCli) -> Self {
        Self {
            name: name.to_string(),
            cli,
            model: None,
            thread_options: None,
            mpi_options: None,
        }
    }

    /// Initialise logging and parse the command line arguments, then create a new benchmark
    /// definition.
    pub fn new_with_init(name: &str) -> Self {
        Self::new(name, init())
    }

    /// Set the model [BenchmarkDefinitionBuilder::model] for this benchmark.
    pub fn with_model(mut self, model: impl ExportModel + 'static) -> Self {
        self.model = Some(Box::new(model));
        self
    }

    /// Set the default [BenchmarkDefinitionBuilder::thread_options] for this benchmark.
    pub fn with_thread_options(mut self, thread_options: Vec<u32>) -> Self {
        self.thread_options = Some(thread_options);
        self
    }

    /// Set the default [BenchmarkDefinitionBuilder::mpi_options] for this benchmark.
    pub fn with_mpi_options(mut self, mpi_options: Vec<Option<u32>>) -> Self {
        self.mpi_options = Some(mpi_options);
        self
    }

    pub fn build(self) -> anyhow::Result<BenchmarkDefinition> {
        let model = self
            .model
            .ok_or_else(|| anyhow::anyhow!("No model defined for benchmark {}", self.name))?;

        let thread_options = if self.cli.threads.is_empty() {
            self.thread_options
                .unwrap_or_else(|| DEFAULT_THREAD_OPTIONS.to_vec())
        } else {
            self.cli.threads.clone()
        };
        if thread_options.is_empty() {
            anyhow::bail!("No thread counts to run for benchmark {}", self.name);
        }

        let mpi_options = if self.cli.mpi_procs.is_empty() {
            self.mpi_options
        } else {
            Some(self.cli.mpi_options())
        };
        if mpi_options.as_ref().is_some_and(Vec::is_empty) {
            anyhow::bail!("No MPI options to run for benchmark {}", self.name);
        }

        Ok(BenchmarkDefinition {
            name: self.name,
            cli: self.cli,
            model,
            thread_options,
            mpi_options,
        })
    }
}
