//! Fetch progress display for the command-line interface

use std::sync::Arc;

use cabin_dl::ProgressCallback;
use indicatif::{ProgressBar, ProgressStyle};

/// Creates a progress bar counting fetched cabins
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} cabins ({percent}%)")
            .expect("Failed to create progress style")
            .progress_chars("#>-"),
    );
    pb
}

/// Progress bar sized by the server's cabin count once the first page arrives
pub struct ProgressManager {
    pub pb: ProgressBar,
}

impl ProgressManager {
    pub fn new(message: &str) -> Self {
        eprintln!("{}", message);
        Self {
            pb: create_progress_bar(0),
        }
    }

    /// Callback that drives this bar from the fetcher
    pub fn callback(&self) -> ProgressCallback {
        let pb = self.pb.clone();
        Arc::new(move |fetched: u64, total: u64| {
            if pb.length().unwrap_or(0) != total {
                pb.set_length(total);
            }
            pb.set_position(fetched);
        })
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}
