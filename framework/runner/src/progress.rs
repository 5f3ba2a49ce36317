use indicatif::{ProgressBar, ProgressStyle};

/// Displays a progress bar over the runs of a benchmark sweep.
pub fn start_progress(total_runs: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_runs);
    match ProgressStyle::with_template(
        "{spinner:.green} [{wide_bar:.cyan/blue}] {pos}/{len} runs [{elapsed_precise}] {msg}",
    ) {
        Ok(style) => pb.set_style(style.progress_chars("#>-")),
        Err(e) => log::warn!("Failed to set progress style: {e}"),
    }
    pb.enable_steady_tick(std::time::Duration::from_secs(1));

    pb
}
