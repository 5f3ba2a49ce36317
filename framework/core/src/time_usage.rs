//! Parser for the report written by GNU `time -v -o <file>`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const ELAPSED_KEY: &str = "Elapsed (wall clock) time";
const USER_TIME_KEY: &str = "User time (seconds)";
const SYSTEM_TIME_KEY: &str = "System time (seconds)";
const MAX_RSS_KEY: &str = "Maximum resident set size";
const CPU_PERCENT_KEY: &str = "Percent of CPU this job got";

/// Resource usage of a run, as reported by the profiler.
///
/// Each metric is independently optional. A report that is missing, truncated or has a value the
/// profiler could not compute leaves the affected metric as [None].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeUsage {
    pub elapsed_seconds: Option<f64>,
    pub user_seconds: Option<f64>,
    pub system_seconds: Option<f64>,
    pub max_rss_kb: Option<u64>,
    pub cpu_percent: Option<f64>,
    /// Every `Key: Value` line of the report.
    pub raw: BTreeMap<String, String>,
}

impl TimeUsage {
    /// Read and parse the report file.
    ///
    /// A report that doesn't exist or can't be read, for example because the profiled command
    /// was killed before the profiler could write it, gives a [TimeUsage] with no metrics.
    pub fn from_report_file(path: &Path) -> Self {
        match fs::read(path) {
            Ok(content) => Self::parse(&String::from_utf8_lossy(&content)),
            Err(err) => {
                log::warn!(
                    "Could not read resource usage report '{}': {err}",
                    path.display()
                );
                Self::default()
            }
        }
    }

    pub fn parse(report: &str) -> Self {
        let raw = report
            .lines()
            .filter_map(|line| line.split_once(": "))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .collect::<BTreeMap<_, _>>();

        Self {
            elapsed_seconds: lookup_stat(&raw, ELAPSED_KEY).and_then(parse_elapsed),
            user_seconds: lookup_stat(&raw, USER_TIME_KEY).and_then(parse_float),
            system_seconds: lookup_stat(&raw, SYSTEM_TIME_KEY).and_then(parse_float),
            max_rss_kb: lookup_stat(&raw, MAX_RSS_KEY).and_then(|v| v.parse().ok()),
            cpu_percent: lookup_stat(&raw, CPU_PERCENT_KEY).and_then(parse_percent),
            raw,
        }
    }
}

/// Keys carry their unit, such as `Maximum resident set size (kbytes)`, so match on the prefix.
fn lookup_stat<'a>(raw: &'a BTreeMap<String, String>, key_prefix: &str) -> Option<&'a str> {
    raw.iter()
        .find(|(key, _)| key.starts_with(key_prefix))
        .map(|(_, value)| value.as_str())
}

fn parse_float(value: &str) -> Option<f64> {
    value.parse().ok()
}

fn parse_percent(value: &str) -> Option<f64> {
    parse_float(value.trim_end_matches('%'))
}

/// Convert `[[H:]M:]S[.frac]` into seconds.
fn parse_elapsed(value: &str) -> Option<f64> {
    let parts = value.split(':').collect::<Vec<_>>();
    match parts.as_slice() {
        [seconds] => parse_float(seconds),
        [minutes, seconds] => {
            let minutes = minutes.parse::<u64>().ok()?;
            Some(minutes as f64 * 60.0 + parse_float(seconds)?)
        }
        [hours, minutes, seconds] => {
            let hours = hours.parse::<u64>().ok()?;
            let minutes = minutes.parse::<u64>().ok()?;
            Some(hours as f64 * 3600.0 + minutes as f64 * 60.0 + parse_float(seconds)?)
        }
        _ => None,
    }
}
