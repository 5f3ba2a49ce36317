use std::collections::BTreeMap;

use openmc_bench_core::prelude::RunResult;

use crate::metrics::TrackedMetric;
use crate::types::ParamKey;

/// The results of a benchmark sweep, one per point in the parameter grid.
#[derive(Debug, Clone)]
pub struct BenchmarkResults {
    name: String,
    results: BTreeMap<ParamKey, RunResult>,
}

impl BenchmarkResults {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            results: BTreeMap::new(),
        }
    }

    /// Name of the benchmark the results belong to.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn insert(&mut self, key: ParamKey, result: RunResult) {
        if self.results.insert(key, result).is_some() {
            log::warn!("Replaced the result for {key} in benchmark {}", self.name);
        }
    }

    pub fn get(&self, key: &ParamKey) -> Option<&RunResult> {
        self.results.get(key)
    }

    /// Results ordered by thread count, then by MPI process count.
    pub fn iter(&self) -> impl Iterator<Item = (&ParamKey, &RunResult)> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Keys of the runs that OpenMC did not finish successfully.
    pub fn failed(&self) -> Vec<ParamKey> {
        self.results
            .iter()
            .filter(|(_, result)| !result.success())
            .map(|(key, _)| *key)
            .collect()
    }

    /// Value of `metric` for the run at `key`.
    ///
    /// Returns [None] if there is no run for `key`, and NaN if the run didn't produce the metric.
    pub fn track(&self, metric: TrackedMetric, key: &ParamKey) -> Option<f64> {
        self.get(key).map(|result| metric.track(result))
    }
}
