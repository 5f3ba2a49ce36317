use itertools::Itertools;
use serde::{Deserialize, Serialize};
use sha3::Digest;
use std::collections::{BTreeMap, HashMap};
use std::io::{BufRead, Read, Write};
use std::path::Path;

/// Summary of one benchmark sample
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    /// The id of the sweep this sample belongs to
    ///
    /// Chosen by the runner. Every sample of one sweep shares the same id.
    pub run_id: String,
    /// The name of the benchmark that was run
    pub benchmark_name: String,
    /// The time the sweep started
    ///
    /// This is a Unix timestamp in seconds.
    pub started_at: i64,
    /// The number of OpenMP threads the sample was run with
    pub threads: Option<u32>,
    /// The number of MPI processes the sample was actually launched with
    ///
    /// This is [None] when MPI was not requested, or when it was requested but the OpenMC build
    /// does not support it. See [RunSummary::requested_mpi_procs].
    pub mpi_procs: Option<u32>,
    /// The number of MPI processes that were asked for
    pub requested_mpi_procs: Option<u32>,
    /// The exit code of the profiled command
    pub returncode: i32,
    /// The OpenMC version reported by `openmc -v`, if it could be determined
    pub openmc_version: Option<String>,
    /// Tracked metric values by metric name
    ///
    /// A metric that could not be parsed from the output of the run is stored as [None].
    pub metrics: BTreeMap<String, Option<f64>>,
    /// Environment variables set for the run
    ///
    /// This won't capture all environment variables. Just the ones that the runner sets on the
    /// OpenMC process.
    pub env: HashMap<String, String>,
}

impl RunSummary {
    /// Create a new run summary
    pub fn new(
        run_id: String,
        benchmark_name: String,
        started_at: i64,
        threads: Option<u32>,
        requested_mpi_procs: Option<u32>,
    ) -> Self {
        Self {
            run_id,
            benchmark_name,
            started_at,
            threads,
            mpi_procs: None,
            requested_mpi_procs,
            returncode: 0,
            openmc_version: None,
            metrics: BTreeMap::new(),
            env: HashMap::with_capacity(0),
        }
    }

    /// Add a metric value
    pub fn add_metric(&mut self, name: impl Into<String>, value: Option<f64>) {
        self.metrics.insert(name.into(), value);
    }

    /// Add an environment variable
    pub fn add_env(&mut self, key: String, value: String) {
        self.env.insert(key, value);
    }

    /// Whether the profiled command exited successfully
    pub fn success(&self) -> bool {
        self.returncode == 0
    }

    /// Compute a fingerprint for this run summary
    ///
    /// The fingerprint is intended to identify the configuration that produced the sample, so that
    /// samples from different sweeps can be compared. It uses the
    ///     - Benchmark name
    ///     - Thread count
    ///     - Effective MPI process count
    ///     - OpenMC version
    ///     - Environment variables
    ///
    /// The fingerprint is computed using [sha3::Sha3_256].
    pub fn fingerprint(&self) -> String {
        let mut hasher = sha3::Sha3_256::new();
        Digest::update(&mut hasher, self.benchmark_name.as_bytes());
        if let Some(threads) = self.threads {
            Digest::update(&mut hasher, b"threads");
            Digest::update(&mut hasher, threads.to_le_bytes());
        }
        if let Some(mpi_procs) = self.mpi_procs {
            Digest::update(&mut hasher, b"mpi_procs");
            Digest::update(&mut hasher, mpi_procs.to_le_bytes());
        }
        if let Some(version) = &self.openmc_version {
            Digest::update(&mut hasher, version.as_bytes());
        }
        self.env
            .iter()
            .sorted_by_key(|(k, _)| k.to_owned())
            .for_each(|(k, v)| {
                Digest::update(&mut hasher, k.as_bytes());
                Digest::update(&mut hasher, v.as_bytes());
            });

        format!("{:x}", hasher.finalize())
    }
}

/// Append the run summary to a file
///
/// The summary will be serialized to JSON and output as a single line followed by a newline. The
/// recommended file extension is `.jsonl`.
pub fn append_run_summary(run_summary: &RunSummary, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)?;
    store_run_summary(run_summary, &mut file)?;
    file.write_all(b"\n")?;
    Ok(())
}

/// Serialize the run summary to a writer
pub fn store_run_summary<W: Write>(run_summary: &RunSummary, writer: &mut W) -> anyhow::Result<()> {
    serde_json::to_writer(writer, run_summary)?;
    Ok(())
}

/// Load a run summary from a reader
pub fn load_run_summary<R: Read>(reader: R) -> anyhow::Result<RunSummary> {
    let reader = std::io::BufReader::new(reader);
    let run_summary: RunSummary = serde_json::from_reader(reader)?;
    Ok(run_summary)
}

/// Load run summaries from a file
///
/// The file should contain one JSON object per line. This is the format produced by
/// [append_run_summary]. Blank lines are skipped.
pub fn load_summary_runs(path: impl AsRef<Path>) -> anyhow::Result<Vec<RunSummary>> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    let mut runs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let run: RunSummary = serde_json::from_str(&line)?;
        runs.push(run);
    }
    Ok(runs)
}
