use std::collections::HashMap;

use anyhow::Context;
use openmc_bench_core::prelude::{build_environment, OpenMcRunner, RunOptions, RunResult};
use openmc_bench_summary_model::{append_run_summary, RunSummary};

use crate::definition::{BenchmarkDefinition, BenchmarkDefinitionBuilder};
use crate::launcher::{default_mpi_options, detect_mpi_enabled, detect_mpi_runner};
use crate::metrics::TrackedMetric;
use crate::progress::start_progress;
use crate::report::print_summary;
use crate::results::BenchmarkResults;
use crate::types::{parameter_grid, ParamKey};

/// Run the benchmark once for every point in its parameter grid.
///
/// All runs are attempted even if some fail. The results are printed and a summary of each run is
/// appended to the run summary file, then an error is returned if any OpenMC run exited with a
/// non-zero exit code.
pub fn run(definition: BenchmarkDefinitionBuilder) -> anyhow::Result<BenchmarkResults> {
    let definition = definition.build()?;

    log::info!("Running benchmark: {}", definition.name);

    let cli = &definition.cli;
    let mpi_command = cli.mpi_command_tokens();
    let mut runner = OpenMcRunner::default()
        .with_openmc_exec(cli.resolved_openmc_exec()?)
        .with_time_executable(&cli.time_executable)
        .with_default_mpi_runner(detect_mpi_runner());

    let mpi_options = match &definition.mpi_options {
        Some(mpi_options) => mpi_options.clone(),
        None => {
            let launcher_available = mpi_command.is_some() || runner.default_mpi_runner().is_some();
            default_mpi_options(detect_mpi_enabled(&mut runner), launcher_available)
        }
    };

    let grid = parameter_grid(&definition.thread_options, &mpi_options);
    log::debug!("Parameter grid for {}: {:?}", definition.name, grid);

    let run_id = nanoid::nanoid!();
    let started_at = chrono::Utc::now().timestamp();
    let progress = (!cli.no_progress).then(|| start_progress(grid.len() as u64));

    let mut results = BenchmarkResults::new(definition.name.clone());
    for key in grid {
        if let Some(progress) = &progress {
            progress.set_message(key.to_string());
        }

        let mut options = definition.run_options(key);
        if let Some(mpi_command) = &mpi_command {
            options = options.mpi_command(mpi_command.clone());
        }

        let result = runner
            .run_model(&*definition.model, &options)
            .with_context(|| format!("Failed to run benchmark {} with {key}", definition.name))?;

        if !result.success() {
            log::error!(
                "OpenMC exited with {} for {key}: {}",
                result.returncode,
                result.stderr.trim()
            );
        }

        let summary = run_summary(&run_id, started_at, &definition.name, key, &result);
        append_run_summary(&summary, &cli.run_summary).with_context(|| {
            format!(
                "Failed to write run summary to '{}'",
                cli.run_summary.display()
            )
        })?;

        results.insert(key, result);

        if let Some(progress) = &progress {
            progress.inc(1);
        }
    }

    if let Some(progress) = progress {
        progress.finish_and_clear();
    }

    print_summary(&results);

    let failed = results.failed();
    if !failed.is_empty() {
        anyhow::bail!(
            "OpenMC failed for {} of {} runs of benchmark {}: {}",
            failed.len(),
            results.len(),
            definition.name,
            failed
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        );
    }

    Ok(results)
}

impl BenchmarkDefinition {
    pub(crate) fn run_options(&self, key: ParamKey) -> RunOptions {
        let mut options = RunOptions::default()
            .threads(key.threads)
            .openmc_args(self.cli.openmc_args.clone())
            .keep_workdir(self.cli.keep_workdir)
            .capture_output(!self.cli.no_capture);
        if let Some(procs) = key.mpi_procs {
            options = options.mpi_procs(procs);
        }
        options
    }
}

fn run_summary(
    run_id: &str,
    started_at: i64,
    name: &str,
    key: ParamKey,
    result: &RunResult,
) -> RunSummary {
    let mut summary = RunSummary::new(
        run_id.to_string(),
        name.to_string(),
        started_at,
        Some(key.threads),
        key.mpi_procs,
    );
    summary.mpi_procs = result.mpi_procs;
    summary.returncode = result.returncode;
    summary.openmc_version = result.openmc_version().map(str::to_string);
    for metric in TrackedMetric::ALL {
        summary.add_metric(metric.to_string(), metric.value(result));
    }
    for (k, v) in build_environment(std::iter::empty(), result.threads, &HashMap::new()) {
        summary.add_env(k, v);
    }

    summary
}

#[cfg(test)]
mod tests {
    use openmc_bench_core::prelude::{OMP_NUM_THREADS_ENV, OPENMC_THREADS_ENV};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_utils::run_result;

    #[test]
    fn summary_of_run() {
        let mut result = run_result(None);
        result.threads = Some(2);
        result.requested_mpi_procs = Some(2);
        result.returncode = 3;

        let summary = run_summary(
            "run-id",
            1_700_000_000,
            "InfiniteMediumEigenvalue",
            ParamKey::new(2, Some(2)),
            &result,
        );

        assert_eq!(summary.run_id, "run-id");
        assert_eq!(summary.threads, Some(2));
        assert_eq!(summary.requested_mpi_procs, Some(2));
        assert_eq!(summary.mpi_procs, None);
        assert_eq!(summary.returncode, 3);
        assert_eq!(summary.metrics.len(), TrackedMetric::ALL.len());
        assert_eq!(summary.metrics["elapsed_wall"], Some(62.5));
        assert_eq!(summary.metrics["transport_time"], None);
        assert_eq!(summary.env.len(), 2);
        assert_eq!(summary.env[OMP_NUM_THREADS_ENV], "2");
        assert_eq!(summary.env[OPENMC_THREADS_ENV], "2");
    }
}
