/// A point in the benchmark parameter grid.
///
/// `mpi_procs` is the number of MPI processes that was requested. Whether OpenMC actually ran with
/// MPI is recorded in the [openmc_bench_core::prelude::RunResult].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParamKey {
    pub threads: u32,
    pub mpi_procs: Option<u32>,
}

impl ParamKey {
    pub fn new(threads: u32, mpi_procs: Option<u32>) -> Self {
        Self { threads, mpi_procs }
    }
}

impl std::fmt::Display for ParamKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.mpi_procs {
            Some(procs) => write!(f, "threads={}, mpi_procs={procs}", self.threads),
            None => write!(f, "threads={}, mpi_procs=none", self.threads),
        }
    }
}

/// Every combination of the thread and MPI options, threads varying slowest.
pub(crate) fn parameter_grid(thread_options: &[u32], mpi_options: &[Option<u32>]) -> Vec<ParamKey> {
    thread_options
        .iter()
        .flat_map(|threads| {
            mpi_options
                .iter()
                .map(move |mpi_procs| ParamKey::new(*threads, *mpi_procs))
        })
        .collect()
}
