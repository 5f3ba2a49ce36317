//! Runs OpenMC models under `time -v` and collects the resulting metrics.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use anyhow::Context;

use crate::build_info::{query_build_info, BuildInfo};
use crate::command::{build_command, select_mpi_procs, CommandSpec};
use crate::environment::{build_environment, parent_environment};
use crate::model::ExportModel;
use crate::result::RunResult;
use crate::time_usage::TimeUsage;
use crate::timing::TimingStats;
use crate::types::BenchResult;
use crate::workdir::WorkDir;

/// Name of the resource usage report written into the working directory.
pub const TIME_OUTPUT_FILE: &str = "time-usage.txt";

/// GNU `time`, which must support `-v` and `-o`.
pub const DEFAULT_TIME_EXECUTABLE: &str = "/usr/bin/time";

pub const DEFAULT_MPI_RUNNER: &str = "mpirun";

/// Options for a single [OpenMcRunner::run_model] call.
#[derive(Debug, Clone)]
pub struct RunOptions {
    threads: Option<u32>,
    mpi_procs: Option<u32>,
    mpi_command: Option<Vec<String>>,
    openmc_args: Vec<String>,
    extra_env: HashMap<String, String>,
    working_dir: Option<PathBuf>,
    keep_workdir: bool,
    openmc_exec: Option<String>,
    time_executable: Option<PathBuf>,
    capture_output: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            threads: None,
            mpi_procs: None,
            mpi_command: None,
            openmc_args: Vec::new(),
            extra_env: HashMap::new(),
            working_dir: None,
            keep_workdir: false,
            openmc_exec: None,
            time_executable: None,
            capture_output: true,
        }
    }
}

impl RunOptions {
    /// Number of OpenMP threads, set as both `OMP_NUM_THREADS` and `OPENMC_THREADS`.
    pub fn threads(mut self, threads: u32) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Number of MPI processes to request. One or fewer runs without MPI.
    pub fn mpi_procs(mut self, procs: u32) -> Self {
        self.mpi_procs = Some(procs);
        self
    }

    /// Custom MPI launcher command. Any `{procs}` in its arguments is replaced by the number of
    /// processes.
    pub fn mpi_command(mut self, command: Vec<String>) -> Self {
        self.mpi_command = Some(command);
        self
    }

    /// Extra arguments passed to the OpenMC executable.
    pub fn openmc_args(mut self, args: Vec<String>) -> Self {
        self.openmc_args = args;
        self
    }

    /// An additional environment variable for the OpenMC process, overriding any other value.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_env.insert(key.into(), value.into());
        self
    }

    /// Run in this directory instead of a temporary one. It is never removed.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Keep the temporary working directory after the run.
    pub fn keep_workdir(mut self, keep: bool) -> Self {
        self.keep_workdir = keep;
        self
    }

    /// Run a different OpenMC executable than the runner's default.
    pub fn openmc_exec(mut self, exec: impl Into<String>) -> Self {
        self.openmc_exec = Some(exec.into());
        self
    }

    /// Use a different GNU `time` executable than the runner's default.
    pub fn time_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.time_executable = Some(path.into());
        self
    }

    /// Capture stdout and stderr, which is required for timing statistics. Otherwise the
    /// output goes to this process's streams.
    pub fn capture_output(mut self, capture: bool) -> Self {
        self.capture_output = capture;
        self
    }
}

/// Runs OpenMC models while capturing timing information.
///
/// The runner remembers the build info of its default OpenMC executable after it has been queried
/// successfully once.
#[derive(Debug, Clone)]
pub struct OpenMcRunner {
    openmc_exec: String,
    time_executable: PathBuf,
    default_mpi_runner: Option<Vec<String>>,
    cached_build_info: Option<BuildInfo>,
}

impl Default for OpenMcRunner {
    fn default() -> Self {
        Self {
            openmc_exec: crate::bin_path::DEFAULT_OPENMC_EXEC.to_string(),
            time_executable: PathBuf::from(DEFAULT_TIME_EXECUTABLE),
            default_mpi_runner: Some(vec![DEFAULT_MPI_RUNNER.to_string()]),
            cached_build_info: None,
        }
    }
}

impl OpenMcRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_openmc_exec(mut self, exec: impl Into<String>) -> Self {
        self.openmc_exec = exec.into();
        self.cached_build_info = None;
        self
    }

    pub fn with_time_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.time_executable = path.into();
        self
    }

    /// Set the launcher used when MPI processes are requested without a custom command. [None]
    /// means MPI runs need a custom command.
    pub fn with_default_mpi_runner(mut self, runner: Option<Vec<String>>) -> Self {
        self.default_mpi_runner = runner.filter(|runner| !runner.is_empty());
        self
    }

    pub fn openmc_exec(&self) -> &str {
        &self.openmc_exec
    }

    pub fn time_executable(&self) -> &Path {
        &self.time_executable
    }

    pub fn default_mpi_runner(&self) -> Option<&[String]> {
        self.default_mpi_runner.as_deref()
    }

    /// Get the build info for `openmc_exec`.
    ///
    /// Only the runner's default executable is cached, any other executable is queried every time.
    pub fn build_info(
        &mut self,
        openmc_exec: &str,
        env: &HashMap<String, String>,
    ) -> Option<BuildInfo> {
        let is_default = openmc_exec == self.openmc_exec;
        if is_default {
            if let Some(info) = &self.cached_build_info {
                return Some(info.clone());
            }
        }

        let info = query_build_info(openmc_exec, env);
        if is_default {
            self.cached_build_info = info.clone();
        }
        info
    }

    /// Export `model` to a working directory and run OpenMC on it under `time -v`.
    ///
    /// A non-zero exit code from OpenMC is not an error, it is recorded in the [RunResult]. Errors
    /// are only returned when the run could not be set up or started.
    pub fn run_model<M>(&mut self, model: &M, options: &RunOptions) -> BenchResult<RunResult>
    where
        M: ExportModel + ?Sized,
    {
        let openmc_exec = options
            .openmc_exec
            .clone()
            .unwrap_or_else(|| self.openmc_exec.clone());
        let time_executable = options
            .time_executable
            .clone()
            .unwrap_or_else(|| self.time_executable.clone());

        // Dropping the work dir cleans it up, whichever way this function returns.
        let workdir = WorkDir::prepare(options.working_dir.as_deref(), options.keep_workdir)?;

        model
            .export_to_dir(workdir.path())
            .context("Failed to export model")?;

        let time_output = workdir.path().join(TIME_OUTPUT_FILE);

        let env = build_environment(parent_environment(), options.threads, &options.extra_env);
        let build_info = self.build_info(&openmc_exec, &env);
        let mpi_procs = select_mpi_procs(options.mpi_procs, build_info.as_ref());

        let command = build_command(CommandSpec {
            openmc_exec: &openmc_exec,
            openmc_args: &options.openmc_args,
            mpi_procs,
            mpi_command: options.mpi_command.as_deref(),
            default_mpi_runner: self.default_mpi_runner.as_deref(),
            time_executable: &time_executable,
            time_output: &time_output,
        })?;

        log::info!(
            "Running '{}' in '{}'",
            command.join(" "),
            workdir.path().display()
        );

        let mut process = Command::new(&command[0]);
        process
            .args(&command[1..])
            .current_dir(workdir.path())
            .env_clear()
            .envs(&env);

        let (status, stdout, stderr) = if options.capture_output {
            let output = process
                .output()
                .with_context(|| format!("Failed to run '{}'", command[0]))?;
            (
                output.status,
                String::from_utf8_lossy(&output.stdout).into_owned(),
                String::from_utf8_lossy(&output.stderr).into_owned(),
            )
        } else {
            let status = process
                .status()
                .with_context(|| format!("Failed to run '{}'", command[0]))?;
            (status, String::new(), String::new())
        };

        let returncode = exit_code(status);
        if returncode == 0 {
            log::debug!("OpenMC finished successfully");
        } else {
            log::warn!("OpenMC exited with {returncode}");
        }

        let time_usage = TimeUsage::from_report_file(&time_output);
        let timing_stats = if options.capture_output {
            TimingStats::parse(&[&stdout, &stderr])
        } else {
            None
        };

        Ok(RunResult {
            returncode,
            stdout,
            stderr,
            command,
            workdir: workdir.path().to_path_buf(),
            threads: options.threads,
            mpi_procs,
            time_usage,
            build_info,
            timing_stats,
            requested_mpi_procs: options.mpi_procs,
        })
    }
}

/// Convenience wrapper that runs `model` with a default [OpenMcRunner].
pub fn run_model_with_time<M>(model: &M, options: &RunOptions) -> BenchResult<RunResult>
where
    M: ExportModel + ?Sized,
{
    OpenMcRunner::default().run_model(model, options)
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt as _;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }

    -1
}
