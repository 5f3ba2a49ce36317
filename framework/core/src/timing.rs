use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

pub const TOTAL_ELAPSED: &str = "total_elapsed";
pub const INITIALIZATION: &str = "initialization";
pub const TRANSPORT: &str = "transport";
pub const CALC_RATE_INACTIVE: &str = "calc_rate_inactive";
pub const CALC_RATE_ACTIVE: &str = "calc_rate_active";

/// Timing lines from the summary OpenMC prints at the end of a run, with the key each value is
/// stored under.
fn timing_patterns() -> &'static [(&'static str, Regex)] {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (
                INITIALIZATION,
                r"^Total time for initialization\s*=\s*([0-9.eE+-]+)\s*seconds$",
            ),
            (
                TRANSPORT,
                r"^Time in transport only\s*=\s*([0-9.eE+-]+)\s*seconds$",
            ),
            (
                TOTAL_ELAPSED,
                r"^Total time elapsed\s*=\s*([0-9.eE+-]+)\s*seconds$",
            ),
            (
                CALC_RATE_INACTIVE,
                r"^Calculation Rate \(inactive\)\s*=\s*([0-9.eE+-]+)\s*particles/second$",
            ),
            (
                CALC_RATE_ACTIVE,
                r"^Calculation Rate \(active\)\s*=\s*([0-9.eE+-]+)\s*particles/second$",
            ),
        ]
        .into_iter()
        // Safety: these regex literals are guaranteed to compile
        .map(|(key, pattern)| (key, Regex::new(pattern).unwrap()))
        .collect()
    })
}

/// Timing statistics reported by OpenMC on its own output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimingStats {
    pub total_elapsed: Option<f64>,
    pub initialization: Option<f64>,
    pub transport: Option<f64>,
    /// Particles per second during inactive batches.
    pub calc_rate_inactive: Option<f64>,
    /// Particles per second during active batches.
    pub calc_rate_active: Option<f64>,
    pub raw: BTreeMap<String, f64>,
}

impl TimingStats {
    /// Scan every line of `streams` for OpenMC timing lines.
    ///
    /// Returns [None] when no line matched at all, so that a run without timing output can be
    /// told apart from one that reported zeros. When a line appears more than once the last
    /// value wins.
    pub fn parse(streams: &[&str]) -> Option<Self> {
        let patterns = timing_patterns();
        let mut values = BTreeMap::new();

        for line in streams
            .iter()
            .flat_map(|stream| stream.lines())
            .map(str::trim)
            .filter(|line| !line.is_empty())
        {
            for (key, pattern) in patterns {
                let Some(captures) = pattern.captures(line) else {
                    continue;
                };
                match captures[1].parse::<f64>() {
                    Ok(value) => {
                        values.insert(key.to_string(), value);
                    }
                    Err(err) => {
                        log::trace!("Ignoring timing line '{line}': {err}");
                    }
                }
            }
        }

        if values.is_empty() {
            return None;
        }

        Some(Self {
            total_elapsed: values.get(TOTAL_ELAPSED).copied(),
            initialization: values.get(INITIALIZATION).copied(),
            transport: values.get(TRANSPORT).copied(),
            calc_rate_inactive: values.get(CALC_RATE_INACTIVE).copied(),
            calc_rate_active: values.get(CALC_RATE_ACTIVE).copied(),
            raw: values,
        })
    }
}
