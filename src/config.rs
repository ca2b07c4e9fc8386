use crate::cardinality::Cardinality;
use crate::top_hashtags::TopHashtags;

/// Environment override for the Top-K strategy (`exact` | `bounded`).
pub const ENV_TOPK_STRATEGY: &str = "TWEETPRO_TOPK_STRATEGY";

/// Options for building a corpus from a file, with builder chaining.
#[derive(Clone, Debug)]
pub struct CorpusOptions {
    pub top_hashtags: TopHashtags,
    pub cardinality: Cardinality,
    pub progress: bool,                 // show a line-count progress bar while extracting
    pub progress_label: Option<String>, // optional label for progress bar

    // IO tuning
    pub read_buffer_bytes: usize,       // BufReader capacity
}

impl Default for CorpusOptions {
    fn default() -> Self {
        Self {
            top_hashtags: TopHashtags::default(),
            cardinality: Cardinality::default(),
            progress: false,
            progress_label: None,
            read_buffer_bytes: 256 * 1024,
        }
    }
}

impl CorpusOptions {
    pub fn with_top_hashtags(mut self, strategy: TopHashtags) -> Self {
        self.top_hashtags = strategy;
        self
    }
    pub fn with_cardinality(mut self, strategy: Cardinality) -> Self {
        self.cardinality = strategy;
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = Some(label.into());
        self
    }
    pub fn with_read_buffer(mut self, bytes: usize) -> Self {
        self.read_buffer_bytes = bytes.max(8 * 1024);
        self
    }

    /// Apply `TWEETPRO_TOPK_STRATEGY` if set. Unknown values are logged and ignored.
    pub fn merge_env(mut self) -> Self {
        if let Ok(raw) = std::env::var(ENV_TOPK_STRATEGY) {
            match raw.parse::<TopHashtags>() {
                Ok(s) => self.top_hashtags = s,
                Err(e) => tracing::warn!("{} ignored: {}", ENV_TOPK_STRATEGY, e),
            }
        }
        self
    }
}
