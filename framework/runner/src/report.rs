use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::metrics::TrackedMetric;
use crate::results::BenchmarkResults;

#[derive(Tabled)]
struct MetricsRow {
    threads: u32,
    #[tabled(display = "procs")]
    mpi_procs: Option<u32>,
    returncode: i32,
    #[tabled(rename = "elapsed_wall (s)", display = "float2")]
    elapsed_wall: Option<f64>,
    #[tabled(rename = "user_cpu (s)", display = "float2")]
    user_cpu: Option<f64>,
    #[tabled(rename = "system_cpu (s)", display = "float2")]
    system_cpu: Option<f64>,
    #[tabled(display = "float0")]
    max_rss_kb: Option<f64>,
    #[tabled(rename = "cpu (%)", display = "float0")]
    cpu_percent: Option<f64>,
    #[tabled(rename = "total (s)", display = "float2")]
    total_time_elapsed: Option<f64>,
    #[tabled(rename = "init (s)", display = "float2")]
    initialization_time: Option<f64>,
    #[tabled(rename = "transport (s)", display = "float2")]
    transport_time: Option<f64>,
    #[tabled(rename = "inactive (p/s)", display = "float0")]
    calc_rate_inactive: Option<f64>,
    #[tabled(rename = "active (p/s)", display = "float0")]
    calc_rate_active: Option<f64>,
}

fn procs(n: &Option<u32>) -> String {
    n.map_or_else(|| "-".to_string(), |n| n.to_string())
}

fn float2(n: &Option<f64>) -> String {
    n.map_or_else(|| "n/a".to_string(), |n| format!("{:.2}", n))
}

fn float0(n: &Option<f64>) -> String {
    n.map_or_else(|| "n/a".to_string(), |n| format!("{:.0}", n))
}

/// Render the tracked metrics of every run as a table.
pub fn summary_table(results: &BenchmarkResults) -> String {
    let rows = results
        .iter()
        .map(|(key, result)| MetricsRow {
            threads: key.threads,
            mpi_procs: result.mpi_procs,
            returncode: result.returncode,
            elapsed_wall: TrackedMetric::ElapsedWall.value(result),
            user_cpu: TrackedMetric::UserCpu.value(result),
            system_cpu: TrackedMetric::SystemCpu.value(result),
            max_rss_kb: TrackedMetric::MaxRssKb.value(result),
            cpu_percent: TrackedMetric::CpuPercent.value(result),
            total_time_elapsed: TrackedMetric::TotalTimeElapsed.value(result),
            initialization_time: TrackedMetric::InitializationTime.value(result),
            transport_time: TrackedMetric::TransportTime.value(result),
            calc_rate_inactive: TrackedMetric::CalcRateInactive.value(result),
            calc_rate_active: TrackedMetric::CalcRateActive.value(result),
        })
        .collect::<Vec<_>>();

    let mut table = Table::new(&rows);
    table.with(Style::modern());

    table.to_string()
}

/// Print the summary of a benchmark sweep to stdout.
pub fn print_summary(results: &BenchmarkResults) {
    println!("\nSummary of benchmark {}", results.name());
    println!("{}", summary_table(results));
}
