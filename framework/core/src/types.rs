/// Recommended error type for benchmark `main` functions and model exporters. Configuration
/// problems are reported as a [crate::error::RunnerConfigError] inside the [anyhow::Error] so they
/// can be told apart with `downcast_ref`.
pub type BenchResult<T> = anyhow::Result<T>;
