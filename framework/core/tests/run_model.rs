#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt as _;
use std::path::{Path, PathBuf};

use openmc_bench_core::prelude::*;
use pretty_assertions::assert_eq;
use serial_test::serial;
use tempfile::TempDir;

/// Stands in for GNU `time -v -o <file> <command...>`.
const FAKE_TIME: &str = r#"#!/bin/sh
[ "$1" = "-v" ] && shift
if [ "$1" = "-o" ]; then
    out="$2"
    shift 2
fi
"$@"
status=$?
if [ -n "$out" ] && [ -z "$FAKE_TIME_NO_REPORT" ]; then
    {
        printf '\tCommand being timed: "%s"\n' "$*"
        printf '\tUser time (seconds): 1.25\n'
        printf '\tSystem time (seconds): 0.05\n'
        printf '\tPercent of CPU this job got: 98%%\n'
        printf '\tElapsed (wall clock) time (h:mm:ss or m:ss): 0:05.00\n'
        printf '\tMaximum resident set size (kbytes): 123456\n'
        printf '\tExit status: %s\n' "$status"
    } > "$out"
fi
exit $status
"#;

/// Stands in for `openmc`, including its `-v` banner.
const FAKE_OPENMC: &str = r#"#!/bin/sh
if [ "$1" = "-v" ]; then
    if [ -n "$FAKE_VERSION_LOG" ]; then
        echo version >> "$FAKE_VERSION_LOG"
    fi
    printf 'OpenMC version 0.14.0\nCommit hash: abc123\nMPI enabled: %s\n' "${FAKE_MPI_ENABLED:-no}"
    exit 0
fi
if [ ! -f settings.xml ]; then
    echo "settings.xml not found" >&2
    exit 2
fi
echo " Total time elapsed              =  12.34 seconds"
echo "threads=$OMP_NUM_THREADS/$OPENMC_THREADS args=$*"
exit ${FAKE_OPENMC_EXIT:-0}
"#;

/// Stands in for `mpirun -np <n> <command...>`.
const FAKE_MPIRUN: &str = r#"#!/bin/sh
echo "launcher: $*"
shift 2
exec "$@"
"#;

struct Fixture {
    dir: TempDir,
    time: PathBuf,
    openmc: PathBuf,
    mpirun: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let time = write_script(dir.path(), "time", FAKE_TIME);
        let openmc = write_script(dir.path(), "openmc", FAKE_OPENMC);
        let mpirun = write_script(dir.path(), "mpirun", FAKE_MPIRUN);
        Self {
            dir,
            time,
            openmc,
            mpirun,
        }
    }

    fn runner(&self) -> OpenMcRunner {
        OpenMcRunner::default()
            .with_openmc_exec(self.openmc.to_str().unwrap())
            .with_time_executable(&self.time)
            .with_default_mpi_runner(Some(vec![self.mpirun.to_str().unwrap().to_string()]))
    }
}

fn write_script(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("failed to write script");
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

fn model(dir: &Path) -> BenchResult<()> {
    fs::write(dir.join("settings.xml"), "<settings/>")?;
    Ok(())
}

#[test]
#[serial]
fn successful_run_is_fully_populated() {
    let fixture = Fixture::new();
    let mut runner = fixture.runner();

    let result = runner
        .run_model(&model, &RunOptions::default().threads(2))
        .unwrap();

    assert_eq!(result.returncode, 0);
    assert!(result.success());
    assert_eq!(result.threads, Some(2));
    assert_eq!(result.mpi_procs, None);
    assert_eq!(result.requested_mpi_procs, None);
    assert!(result.stdout.contains("threads=2/2"));

    assert_eq!(result.time_usage.elapsed_seconds, Some(5.0));
    assert_eq!(result.time_usage.user_seconds, Some(1.25));
    assert_eq!(result.time_usage.system_seconds, Some(0.05));
    assert_eq!(result.time_usage.max_rss_kb, Some(123456));
    assert_eq!(result.time_usage.cpu_percent, Some(98.0));

    let timing = result.timing_stats.as_ref().unwrap();
    assert_eq!(timing.total_elapsed, Some(12.34));
    assert_eq!(timing.initialization, None);

    assert_eq!(result.openmc_version(), Some("0.14.0"));
    assert_eq!(
        result.build_info.as_ref().unwrap().commit_hash.as_deref(),
        Some("abc123")
    );

    assert_eq!(
        result.command,
        vec![
            fixture.time.to_str().unwrap().to_string(),
            "-v".to_string(),
            "-o".to_string(),
            result
                .workdir
                .join(TIME_OUTPUT_FILE)
                .to_str()
                .unwrap()
                .to_string(),
            fixture.openmc.to_str().unwrap().to_string(),
        ]
    );

    assert!(!result.workdir.exists());
}

#[test]
#[serial]
fn failed_run_still_returns_result() {
    let fixture = Fixture::new();
    let mut runner = fixture.runner();

    let result = runner
        .run_model(
            &model,
            &RunOptions::default().threads(1).env("FAKE_OPENMC_EXIT", "1"),
        )
        .unwrap();

    assert_eq!(result.returncode, 1);
    assert!(!result.success());
    assert_eq!(result.time_usage.max_rss_kb, Some(123456));
    assert_eq!(result.time_usage.raw["Exit status"], "1");
    assert_eq!(result.timing_stats.unwrap().total_elapsed, Some(12.34));
}

#[test]
#[serial]
fn model_files_are_in_the_working_directory() {
    let fixture = Fixture::new();
    let mut runner = fixture.runner();
    let empty_model = |_: &Path| -> BenchResult<()> { Ok(()) };

    let result = runner
        .run_model(&empty_model, &RunOptions::default())
        .unwrap();

    assert_eq!(result.returncode, 2);
    assert!(result.stderr.contains("settings.xml not found"));
    assert_eq!(result.timing_stats, None);
}

#[test]
#[serial]
fn kept_workdir_exists_after_run() {
    let fixture = Fixture::new();
    let mut runner = fixture.runner();

    let result = runner
        .run_model(&model, &RunOptions::default().keep_workdir(true))
        .unwrap();

    assert!(result.workdir.join("settings.xml").is_file());
    assert!(result.workdir.join(TIME_OUTPUT_FILE).is_file());
    assert!(result
        .workdir
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with(WORKDIR_PREFIX));

    fs::remove_dir_all(&result.workdir).unwrap();
}

#[test]
#[serial]
fn supplied_workdir_is_never_removed() {
    let fixture = Fixture::new();
    let mut runner = fixture.runner();
    let supplied = fixture.dir.path().join("supplied");

    for keep in [false, true] {
        let result = runner
            .run_model(
                &model,
                &RunOptions::default()
                    .working_dir(&supplied)
                    .keep_workdir(keep),
            )
            .unwrap();

        assert_eq!(result.workdir, supplied);
        assert!(supplied.join("settings.xml").is_file());
    }
}

#[test]
#[serial]
fn relative_workdir_still_gets_time_report() {
    let fixture = Fixture::new();
    let mut runner = fixture.runner();
    let parent = tempfile::Builder::new()
        .prefix("relative-workdir-")
        .tempdir_in(".")
        .unwrap();
    let supplied = parent.path().join("run");
    assert!(supplied.is_relative());

    let result = runner
        .run_model(&model, &RunOptions::default().working_dir(&supplied))
        .unwrap();

    assert_eq!(result.returncode, 0);
    assert!(result.workdir.is_absolute());
    assert_eq!(result.time_usage.max_rss_kb, Some(123456));
    assert_eq!(result.time_usage.elapsed_seconds, Some(5.0));
    assert!(supplied.join(TIME_OUTPUT_FILE).is_file());
}

#[test]
#[serial]
fn mpi_is_skipped_when_build_lacks_support() {
    let fixture = Fixture::new();
    let mut runner = fixture.runner();

    let result = runner
        .run_model(
            &model,
            &RunOptions::default()
                .mpi_procs(2)
                .env("FAKE_MPI_ENABLED", "no"),
        )
        .unwrap();

    assert_eq!(result.returncode, 0);
    assert_eq!(result.mpi_procs, None);
    assert_eq!(result.requested_mpi_procs, Some(2));
    assert!(!result
        .command
        .contains(&fixture.mpirun.to_str().unwrap().to_string()));
}

#[test]
#[serial]
fn mpi_uses_default_launcher() {
    let fixture = Fixture::new();
    let mut runner = fixture.runner();

    let result = runner
        .run_model(
            &model,
            &RunOptions::default()
                .mpi_procs(2)
                .env("FAKE_MPI_ENABLED", "yes"),
        )
        .unwrap();

    assert_eq!(result.returncode, 0);
    assert_eq!(result.mpi_procs, Some(2));
    assert_eq!(result.command[4], fixture.mpirun.to_str().unwrap());
    assert_eq!(result.command[5..7].to_vec(), vec!["-np".to_string(), "2".to_string()]);
    assert!(result.stdout.contains("launcher: -np 2"));
}

#[test]
#[serial]
fn mpi_uses_custom_launcher() {
    let fixture = Fixture::new();
    let mut runner = fixture.runner();
    let mpirun = fixture.mpirun.to_str().unwrap().to_string();

    let result = runner
        .run_model(
            &model,
            &RunOptions::default()
                .mpi_procs(3)
                .mpi_command(vec![mpirun.clone(), "-n".to_string(), "{procs}".to_string()])
                .env("FAKE_MPI_ENABLED", "yes"),
        )
        .unwrap();

    assert_eq!(result.mpi_procs, Some(3));
    assert_eq!(
        result.command[4..7].to_vec(),
        vec![mpirun, "-n".to_string(), "3".to_string()]
    );
    assert!(result.stdout.contains("launcher: -n 3"));
}

#[test]
#[serial]
fn output_can_be_inherited() {
    let fixture = Fixture::new();
    let mut runner = fixture.runner();

    let result = runner
        .run_model(&model, &RunOptions::default().capture_output(false))
        .unwrap();

    assert_eq!(result.returncode, 0);
    assert_eq!(result.stdout, "");
    assert_eq!(result.stderr, "");
    assert_eq!(result.timing_stats, None);
    assert_eq!(result.time_usage.elapsed_seconds, Some(5.0));
}

#[test]
#[serial]
fn missing_report_gives_empty_time_usage() {
    let fixture = Fixture::new();
    let mut runner = fixture.runner();

    let result = runner
        .run_model(
            &model,
            &RunOptions::default().env("FAKE_TIME_NO_REPORT", "1"),
        )
        .unwrap();

    assert_eq!(result.returncode, 0);
    assert_eq!(result.time_usage, TimeUsage::default());
    assert!(result.timing_stats.is_some());
}

#[test]
#[serial]
fn build_info_is_cached_for_default_executable_only() {
    let fixture = Fixture::new();
    let mut runner = fixture.runner();
    let version_log = fixture.dir.path().join("versions.log");
    let options = RunOptions::default().env("FAKE_VERSION_LOG", version_log.to_str().unwrap());
    let version_queries = || fs::read_to_string(&version_log).unwrap_or_default().lines().count();

    runner.run_model(&model, &options).unwrap();
    runner.run_model(&model, &options).unwrap();
    assert_eq!(version_queries(), 1);

    let other_openmc = write_script(fixture.dir.path(), "openmc-develop", FAKE_OPENMC);
    let override_options = options
        .clone()
        .openmc_exec(other_openmc.to_str().unwrap());
    runner.run_model(&model, &override_options).unwrap();
    runner.run_model(&model, &override_options).unwrap();
    assert_eq!(version_queries(), 3);

    runner.run_model(&model, &options).unwrap();
    assert_eq!(version_queries(), 3);
}

#[test]
#[serial]
fn missing_openmc_still_runs_profiler() {
    let fixture = Fixture::new();
    let mut runner = fixture.runner().with_openmc_exec("/non/existent/path/to/openmc");

    let result = runner.run_model(&model, &RunOptions::default()).unwrap();

    assert_eq!(result.build_info, None);
    assert_ne!(result.returncode, 0);
    assert_eq!(result.timing_stats, None);
}

#[test]
#[serial]
fn missing_profiler_is_an_error() {
    let fixture = Fixture::new();
    let mut runner = fixture
        .runner()
        .with_time_executable("/non/existent/path/to/time");

    let result = runner.run_model(&model, &RunOptions::default());

    assert!(result.is_err());
}
