//! The in-memory corpus: top-level tweets in input order, the deduplicated author table, and the
//! strategies used to answer aggregate queries.

use crate::cardinality::Cardinality;
use crate::config::CorpusOptions;
use crate::error::{Error, Result};
use crate::extract::CorpusBuilder;
use crate::model::{Tweet, User};
use crate::progress::ProgressScope;
use crate::reader::read_lines;
use crate::top_hashtags::{checked_limit, TopHashtags};
use anyhow::Context;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct Corpus {
    tweets: Vec<Tweet>,
    users: BTreeMap<u64, Arc<User>>,
    top_hashtags: TopHashtags,
    cardinality: Cardinality,
}

/// Aggregate view of a corpus, as emitted by the binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusSummary {
    pub tweets: usize,
    pub unique_users: usize,
    pub cardinality_strategy: Cardinality,
    pub top_hashtags_strategy: TopHashtags,
    pub k: usize,
    pub top_hashtags: Vec<String>,
}

impl Corpus {
    /// Extract every non-blank line. The first failing line aborts the whole batch.
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::extract_all(lines, &ProgressScope::disabled())
    }

    pub fn from_builder(builder: CorpusBuilder) -> Self {
        let (tweets, users) = builder.into_parts();
        Self {
            tweets,
            users,
            top_hashtags: TopHashtags::default(),
            cardinality: Cardinality::default(),
        }
    }

    /// Read and extract a corpus file (plain or `.zst`) with default options.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        Self::open_with(path, &CorpusOptions::default())
    }

    pub fn open_with(path: &Path, opts: &CorpusOptions) -> anyhow::Result<Self> {
        let lines = read_lines(path, opts.read_buffer_bytes)?;
        let label = opts.progress_label.clone().unwrap_or_else(|| "Extracting tweets".to_string());
        let pb = ProgressScope::count(opts.progress, label, lines.len() as u64);

        let mut corpus = Self::extract_all(&lines, &pb)
            .with_context(|| format!("extract {}", path.display()))?;
        corpus.set_top_hashtags_strategy(opts.top_hashtags);
        corpus.set_cardinality_strategy(opts.cardinality);
        Ok(corpus)
    }

    fn extract_all<I, S>(lines: I, pb: &ProgressScope) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let started = Instant::now();
        let mut builder = CorpusBuilder::new();
        for (i, line) in lines.into_iter().enumerate() {
            if let Err(e) = builder.push_line(line.as_ref()) {
                pb.abandon();
                tracing::error!(line = i + 1, error = %e, "extraction failed, discarding corpus");
                return Err(Error::Line { line: i + 1, source: Box::new(e) });
            }
            pb.inc_items(1);
        }
        let corpus = Self::from_builder(builder);
        pb.finish("Extraction done");
        tracing::info!(
            tweets = corpus.tweet_count(),
            users = corpus.users.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "corpus built"
        );
        Ok(corpus)
    }

    pub fn tweet_count(&self) -> usize {
        self.tweets.len()
    }

    pub fn tweets(&self) -> &[Tweet] {
        &self.tweets
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tweet> {
        self.tweets.iter()
    }

    /// Registered authors in ascending id order.
    pub fn users(&self) -> impl ExactSizeIterator<Item = &User> + '_ {
        self.users.values().map(|u| u.as_ref())
    }

    pub fn user(&self, id: u64) -> Option<&Arc<User>> {
        self.users.get(&id)
    }

    /// Top-level tweets whose author equals `user`.
    pub fn tweets_by(&self, user: &User) -> Vec<&Tweet> {
        self.tweets.iter().filter(|t| t.author() == user).collect()
    }

    pub fn unique_users_count(&self) -> usize {
        self.cardinality.count(self)
    }

    pub fn top_hashtags(&self, k: usize) -> Vec<String> {
        self.top_hashtags.top(self, k)
    }

    /// Like [`Corpus::top_hashtags`], for limits that arrive signed. Negative `k` is rejected.
    pub fn try_top_hashtags(&self, k: i64) -> Result<Vec<String>> {
        Ok(self.top_hashtags(checked_limit(k)?))
    }

    pub fn top_hashtags_strategy(&self) -> TopHashtags {
        self.top_hashtags
    }

    pub fn set_top_hashtags_strategy(&mut self, strategy: TopHashtags) {
        self.top_hashtags = strategy;
    }

    pub fn cardinality_strategy(&self) -> Cardinality {
        self.cardinality
    }

    pub fn set_cardinality_strategy(&mut self, strategy: Cardinality) {
        self.cardinality = strategy;
    }

    pub fn summary(&self, k: usize) -> CorpusSummary {
        CorpusSummary {
            tweets: self.tweet_count(),
            unique_users: self.unique_users_count(),
            cardinality_strategy: self.cardinality,
            top_hashtags_strategy: self.top_hashtags,
            k,
            top_hashtags: self.top_hashtags(k),
        }
    }
}

/// Two corpora are equal when their tweets and authors are; strategies are configuration.
impl PartialEq for Corpus {
    fn eq(&self, other: &Self) -> bool {
        self.tweets == other.tweets && self.users == other.users
    }
}

impl Eq for Corpus {}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Tweet;
    type IntoIter = std::slice::Iter<'a, Tweet>;

    fn into_iter(self) -> Self::IntoIter {
        self.tweets.iter()
    }
}
