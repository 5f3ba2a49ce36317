use std::path::PathBuf;

use openmc_bench_core::prelude::{RunResult, TimeUsage, TimingStats};

pub(crate) fn run_result(timing_stats: Option<TimingStats>) -> RunResult {
    RunResult {
        returncode: 0,
        stdout: String::new(),
        stderr: String::new(),
        command: vec!["/usr/bin/time".to_string()],
        workdir: PathBuf::from("/tmp/openmc-bench-test"),
        threads: Some(1),
        mpi_procs: None,
        time_usage: TimeUsage {
            elapsed_seconds: Some(62.5),
            user_seconds: Some(60.1),
            system_seconds: None,
            max_rss_kb: Some(123456),
            cpu_percent: Some(99.0),
            raw: Default::default(),
        },
        build_info: None,
        timing_stats,
        requested_mpi_procs: None,
    }
}
