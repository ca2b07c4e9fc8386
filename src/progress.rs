//! Progress reporting for corpus extraction.

use indicatif::{ProgressBar, ProgressStyle};

/// Count-style progress bar (lines extracted out of total), with an optional label.
pub fn make_count_progress(total: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::with_template(
        "{spinner:.green} {msg} {pos}/{len} [{bar:.cyan/blue}] {percent:>3}%  \
         it/s: {per_sec}  elapsed: {elapsed_precise}  eta: {eta_precise}"
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("█▉▊▋▌▍▎▏  ");
    pb.set_style(style);
    if !label.is_empty() {
        pb.set_message(label.to_string());
    }
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// A small wrapper that is a no-op when progress is disabled.
pub struct ProgressScope {
    pb: Option<ProgressBar>,
}

impl ProgressScope {
    pub fn count<T: Into<String>>(enabled: bool, label: T, total: u64) -> Self {
        let pb = enabled.then(|| make_count_progress(total, &label.into()));
        Self { pb }
    }
    pub fn disabled() -> Self {
        Self { pb: None }
    }
    #[inline]
    pub fn inc_items(&self, delta: u64) {
        if let Some(pb) = &self.pb { pb.inc(delta); }
    }
    pub fn finish<T: Into<String>>(&self, msg: T) {
        if let Some(pb) = &self.pb { pb.finish_with_message(msg.into()); }
    }
    pub fn abandon(&self) {
        if let Some(pb) = &self.pb { pb.abandon(); }
    }
}
