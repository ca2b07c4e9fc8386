//! Top-K hashtag strategies: exact counting, and a bounded table capped at `10 × K` keys.
//!
//! Both fold hashtags to lowercase before counting and rank by descending count.
//! Ties are broken by first-observed order: the sequence number a key got when it entered the
//! table. A key re-admitted after eviction takes a fresh sequence number.

use crate::corpus::Corpus;
use crate::error::{Error, Result};
use ahash::AHashMap;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The bounded table holds at most `BOUNDED_FACTOR * k` distinct hashtags.
pub const BOUNDED_FACTOR: usize = 10;

/// Which Top-K counting strategy a corpus uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TopHashtags {
    /// Full hashtag→count table.
    Exact,
    /// Table capped at `10 × K`; new keys past the cap evict the lowest count and inherit it + 1.
    #[default]
    Bounded,
}

impl TopHashtags {
    /// Top `k` hashtags of every top-level tweet in `corpus`.
    pub fn top(&self, corpus: &Corpus, k: usize) -> Vec<String> {
        let tags = corpus.iter().flat_map(|t| t.hashtags().iter().map(String::as_str));
        self.rank(tags, k)
    }

    /// Top `k` hashtags of an arbitrary hashtag stream, in observation order.
    pub fn rank<'a, I>(&self, tags: I, k: usize) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if k == 0 {
            return Vec::new();
        }
        let counts = self.counts(tags, k);
        tracing::debug!(strategy = %self, k, distinct = counts.len(), "ranking hashtags");
        counts.top(k)
    }

    /// The frequency table this strategy builds for limit `k`.
    pub fn counts<'a, I>(&self, tags: I, k: usize) -> HashtagCounts
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = match self {
            TopHashtags::Exact => HashtagCounts::exact(),
            TopHashtags::Bounded => HashtagCounts::bounded(k.saturating_mul(BOUNDED_FACTOR)),
        };
        for tag in tags {
            counts.observe(tag);
        }
        counts
    }
}

impl fmt::Display for TopHashtags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TopHashtags::Exact => "exact",
            TopHashtags::Bounded => "bounded",
        })
    }
}

impl FromStr for TopHashtags {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "exact" | "standard" => Ok(TopHashtags::Exact),
            "bounded" | "approx" | "countmin" => Ok(TopHashtags::Bounded),
            other => Err(Error::InvalidArgument(format!(
                "unknown top-hashtags strategy {other:?}"
            ))),
        }
    }
}

/// Validate a signed limit coming from outside the type system.
pub fn checked_limit(k: i64) -> Result<usize> {
    usize::try_from(k)
        .map_err(|_| Error::InvalidArgument(format!("top-K limit must be >= 0, got {k}")))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Entry {
    count: u64,
    seq: u64,
}

/// Case-folded hashtag counts, optionally capped.
#[derive(Clone, Debug, Default)]
pub struct HashtagCounts {
    table: AHashMap<String, Entry>,
    cap: Option<usize>,
    next_seq: u64,
}

impl HashtagCounts {
    pub fn exact() -> Self {
        Self::default()
    }

    pub fn bounded(cap: usize) -> Self {
        Self { cap: Some(cap), ..Self::default() }
    }

    pub fn cap(&self) -> Option<usize> {
        self.cap
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn count(&self, tag: &str) -> Option<u64> {
        self.table.get(&tag.to_lowercase()).map(|e| e.count)
    }

    pub fn observe(&mut self, tag: &str) {
        let key = tag.to_lowercase();
        if let Some(e) = self.table.get_mut(&key) {
            e.count += 1;
            return;
        }
        let count = match self.cap {
            Some(cap) if self.table.len() >= cap => match self.evict_min() {
                Some(evicted) => evicted + 1,
                None => return,
            },
            _ => 1,
        };
        let seq = self.next_seq;
        self.next_seq += 1;
        self.table.insert(key, Entry { count, seq });
    }

    /// Remove the lowest-count entry, returning its count. Among equal counts the most recently
    /// admitted entry goes first.
    fn evict_min(&mut self) -> Option<u64> {
        let victim = self
            .table
            .iter()
            .min_by(|a, b| a.1.count.cmp(&b.1.count).then(b.1.seq.cmp(&a.1.seq)))
            .map(|(k, _)| k.clone())?;
        let evicted = self.table.remove(&victim)?;
        tracing::trace!(hashtag = %victim, count = evicted.count, "evicted");
        Some(evicted.count)
    }

    /// Keys ranked by count (desc), then first-observed order, truncated to `k`.
    pub fn top(&self, k: usize) -> Vec<String> {
        let mut ranked: Vec<(&String, &Entry)> = self.table.iter().collect();
        ranked.sort_by(|a, b| b.1.count.cmp(&a.1.count).then(a.1.seq.cmp(&b.1.seq)));
        ranked.into_iter().take(k).map(|(tag, _)| tag.clone()).collect()
    }
}
