use openmc_bench_core::prelude::RunResult;

/// A metric reported for every benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TrackedMetric {
    /// Wall clock time of the whole command, in seconds.
    #[display("elapsed_wall")]
    ElapsedWall,
    #[display("user_cpu")]
    UserCpu,
    #[display("system_cpu")]
    SystemCpu,
    /// Peak resident memory, in kilobytes.
    #[display("max_rss_kb")]
    MaxRssKb,
    #[display("cpu_percent")]
    CpuPercent,
    /// OpenMC's own measurement of its total run time, in seconds.
    #[display("total_time_elapsed")]
    TotalTimeElapsed,
    #[display("initialization_time")]
    InitializationTime,
    #[display("transport_time")]
    TransportTime,
    /// Particles per second during inactive batches.
    #[display("calc_rate_inactive")]
    CalcRateInactive,
    /// Particles per second during active batches.
    #[display("calc_rate_active")]
    CalcRateActive,
}

impl TrackedMetric {
    pub const ALL: [TrackedMetric; 10] = [
        TrackedMetric::ElapsedWall,
        TrackedMetric::UserCpu,
        TrackedMetric::SystemCpu,
        TrackedMetric::MaxRssKb,
        TrackedMetric::CpuPercent,
        TrackedMetric::TotalTimeElapsed,
        TrackedMetric::InitializationTime,
        TrackedMetric::TransportTime,
        TrackedMetric::CalcRateInactive,
        TrackedMetric::CalcRateActive,
    ];

    /// Value of this metric for `result`, [None] if it could not be measured.
    pub fn value(self, result: &RunResult) -> Option<f64> {
        let usage = &result.time_usage;
        let timing = result.timing_stats.as_ref();

        match self {
            TrackedMetric::ElapsedWall => usage.elapsed_seconds,
            TrackedMetric::UserCpu => usage.user_seconds,
            TrackedMetric::SystemCpu => usage.system_seconds,
            TrackedMetric::MaxRssKb => usage.max_rss_kb.map(|kb| kb as f64),
            TrackedMetric::CpuPercent => usage.cpu_percent,
            TrackedMetric::TotalTimeElapsed => timing?.total_elapsed,
            TrackedMetric::InitializationTime => timing?.initialization,
            TrackedMetric::TransportTime => timing?.transport,
            TrackedMetric::CalcRateInactive => timing?.calc_rate_inactive,
            TrackedMetric::CalcRateActive => timing?.calc_rate_active,
        }
    }

    /// Value of this metric for `result`, NaN if it could not be measured.
    pub fn track(self, result: &RunResult) -> f64 {
        self.value(result).unwrap_or(f64::NAN)
    }
}
