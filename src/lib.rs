mod config;
mod error;
mod model;
mod progress;
mod reader;
mod util;

mod extract;
mod corpus;
mod cardinality;
mod top_hashtags;

pub use crate::config::{CorpusOptions, ENV_TOPK_STRATEGY};
pub use crate::error::{Error, Result};
pub use crate::model::{Tweet, TweetBuilder, User, UserBuilder};

pub use crate::corpus::{Corpus, CorpusSummary};
pub use crate::cardinality::Cardinality;
pub use crate::top_hashtags::{checked_limit, HashtagCounts, TopHashtags, BOUNDED_FACTOR};

// export the extractor pieces so each step can be exercised on its own
pub use crate::extract::{
    extract_line, isolate_text, keys, strip_punctuation, tokenize, CorpusBuilder, IsolatedText,
    TokenCursor,
};

// export line reading for binaries and tests
pub use crate::reader::{is_zst, read_lines};

pub use crate::util::init_tracing_once;
