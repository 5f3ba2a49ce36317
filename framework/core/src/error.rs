use std::path::PathBuf;

/// Raised when a run cannot be started because of how it was configured.
///
/// Everything that can go wrong once OpenMC is actually running is recorded in the
/// [crate::result::RunResult] instead.
#[derive(derive_more::Error, derive_more::Display, Debug, Clone, PartialEq, Eq)]
pub enum RunnerConfigError {
    /// MPI ranks were requested, the build supports MPI, but there is no launcher to start them.
    #[display("MPI requested with {procs} processes but no MPI launcher is available")]
    MissingMpiLauncher { procs: u32 },

    /// A [crate::model::ModelDir] points at a directory that does not exist.
    #[display("Model input directory '{}' does not exist", path.display())]
    MissingModelDir { path: PathBuf },
}
