use std::collections::HashMap;

/// Thread count variable read by the OpenMP runtime.
pub const OMP_NUM_THREADS_ENV: &str = "OMP_NUM_THREADS";

/// Thread count variable read by OpenMC itself.
pub const OPENMC_THREADS_ENV: &str = "OPENMC_THREADS";

/// Snapshot of the current process environment.
///
/// Variables whose name or value is not valid UTF-8 are skipped.
pub fn parent_environment() -> HashMap<String, String> {
    std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

/// Build the environment for an OpenMC child process.
///
/// Starts from `parent`, sets both thread count variables when `threads` is given and finally
/// applies `extra_env`, which wins over anything set before it.
pub fn build_environment<I>(
    parent: I,
    threads: Option<u32>,
    extra_env: &HashMap<String, String>,
) -> HashMap<String, String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut env: HashMap<String, String> = parent.into_iter().collect();
    if let Some(threads) = threads {
        env.insert(OMP_NUM_THREADS_ENV.to_string(), threads.to_string());
        env.insert(OPENMC_THREADS_ENV.to_string(), threads.to_string());
    }
    env.extend(
        extra_env
            .iter()
            .map(|(key, value)| (key.clone(), value.clone())),
    );
    env
}
