//! Ad-hoc record extractor for the line-oriented tweet export.
//!
//! Each line is a quasi-JSON tweet object. Rather than running a JSON parser we:
//!  1. isolate the tweet text (and the nested retweet's text) by scanning for the closing quote,
//!  2. strip `"[]{}` and split the rest of the line on commas into `key:value` tokens,
//!  3. walk those tokens with a [`TokenCursor`], resolving fields in a fixed order.
//!
//! Step 1 runs first because text is the one field whose value may contain commas.

use crate::error::{Error, Result};
use crate::model::{Tweet, User};
use ahash::AHashMap;
use std::collections::BTreeMap;
use std::ops::Range;
use std::str::FromStr;
use std::sync::Arc;
use url::Url;

/// Raw-line anchors (quoted keys) used before tokenization.
const TEXT_ANCHOR: &str = "\"text\":";
const RETWEETED_STATUS_ANCHOR: &str = "\"retweeted_status\":";

/// Token prefixes after punctuation stripping.
pub mod keys {
    pub const ID: &str = "id:";
    pub const TEXT: &str = "text:";
    pub const ID_STR: &str = "id_str:";
    pub const NAME: &str = "name:";
    pub const SCREEN_NAME: &str = "screen_name:";
    pub const FOLLOWERS_COUNT: &str = "followers_count:";
    pub const FRIENDS_COUNT: &str = "friends_count:";
    pub const FAVOURITES_COUNT: &str = "favourites_count:";
    pub const VERIFIED: &str = "verified:";
    pub const STATUSES_COUNT: &str = "statuses_count:";
    pub const RETWEETED_STATUS: &str = "retweeted_status:";
    pub const RETWEET_COUNT: &str = "retweet_count:";
    pub const FAVORITE_COUNT: &str = "favorite_count:";
    pub const ENTITIES: &str = "entities:";
    pub const INDICES: &str = "indices";
    pub const MEDIA_URL: &str = "media_url:";
    /// Last key of a tweet object; closes a nested retweet block.
    pub const TWEET_END: &str = "favorited:";
}

#[inline]
fn field_name(key: &'static str) -> &'static str {
    key.trim_end_matches(':')
}

// ----------------------------- Step 1: text isolation ------------------------------------

/// Byte range of the string value following the first `"text":` at or after `from`.
/// The value ends at the first quote not immediately preceded by a backslash.
fn text_span(line: &str, from: usize) -> Result<Option<Range<usize>>> {
    let Some(rel) = line[from..].find(TEXT_ANCHOR) else { return Ok(None) };
    let open = from + rel + TEXT_ANCHOR.len();
    let bytes = line.as_bytes();
    if bytes.get(open) != Some(&b'"') {
        let end = line[open..].find(',').map_or(line.len(), |i| open + i);
        return Err(Error::MalformedValue { field: "text", value: line[open..end].to_string() });
    }
    let start = open + 1;
    for i in start..bytes.len() {
        if bytes[i] == b'"' && bytes[i - 1] != b'\\' {
            return Ok(Some(start..i));
        }
    }
    Err(Error::MalformedValue { field: "text", value: line[start..].to_string() })
}

/// Output of step 1: both text bodies, plus the line with those bodies blanked out so the
/// comma split in step 2 cannot fragment them. The `"text":` keys stay in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsolatedText {
    pub text: String,
    pub original_text: Option<String>,
    pub remainder: String,
}

pub fn isolate_text(line: &str) -> Result<IsolatedText> {
    let span = text_span(line, 0)?.ok_or(Error::MissingField("text"))?;
    let original_span = match line.find(RETWEETED_STATUS_ANCHOR) {
        Some(at) => text_span(line, at + RETWEETED_STATUS_ANCHOR.len())?,
        None => None,
    };

    let text = line[span.clone()].to_string();
    let original_text = original_span.as_ref().map(|r| line[r.clone()].to_string());

    let mut spans = vec![span];
    spans.extend(original_span);
    spans.sort_by_key(|r| r.start);
    spans.dedup();

    let mut remainder = String::with_capacity(line.len());
    let mut at = 0;
    for r in spans {
        remainder.push_str(&line[at..r.start]);
        at = r.end;
    }
    remainder.push_str(&line[at..]);

    Ok(IsolatedText { text, original_text, remainder })
}

// ----------------------------- Step 2: tokenization --------------------------------------

pub fn strip_punctuation(line: &str) -> String {
    line.chars().filter(|c| !matches!(c, '"' | '[' | ']' | '{' | '}')).collect()
}

pub fn tokenize(stripped: &str) -> Vec<&str> {
    stripped.split(',').collect()
}

// ----------------------------- Step 3: token cursor --------------------------------------

/// A forward-only window over the token sequence. Lookups scan from the window start for the
/// first token with the given prefix; `advance_to` drops everything before a marker.
#[derive(Clone, Copy, Debug)]
pub struct TokenCursor<'a> {
    window: &'a [&'a str],
}

impl<'a> TokenCursor<'a> {
    pub fn new(tokens: &'a [&'a str]) -> Self {
        Self { window: tokens }
    }

    pub fn window(&self) -> &'a [&'a str] {
        self.window
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.window.iter().position(|t| t.starts_with(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Drop leading tokens so the window starts at the first token prefixed by `key`.
    pub fn advance_to(&mut self, key: &'static str) -> Result<()> {
        let at = self.position(key).ok_or(Error::MissingField(field_name(key)))?;
        self.window = &self.window[at..];
        Ok(())
    }

    /// Raw value of the first `key:` token in the window.
    pub fn value(&self, key: &'static str) -> Result<&'a str> {
        self.window
            .iter()
            .find_map(|t| t.strip_prefix(key))
            .ok_or(Error::MissingField(field_name(key)))
    }

    pub fn parse<T: FromStr>(&self, key: &'static str) -> Result<T> {
        let raw = self.value(key)?;
        raw.trim().parse::<T>().map_err(|_| Error::MalformedValue {
            field: field_name(key),
            value: raw.to_string(),
        })
    }

    /// The sub-window that starts at `start` and ends before the next `end`.
    pub fn block(&self, start: &'static str, end: &'static str) -> Result<TokenCursor<'a>> {
        let from = self.position(start).ok_or(Error::MissingField(field_name(start)))?;
        let len = self.window[from..]
            .iter()
            .position(|t| t.starts_with(end))
            .ok_or(Error::MissingField(field_name(end)))?;
        Ok(TokenCursor::new(&self.window[from..from + len]))
    }
}

// ----------------------------- Accumulator -----------------------------------------------

/// Explicit accumulator threaded through extraction: top-level tweets in input order and the
/// id-keyed author table.
#[derive(Debug, Default)]
pub struct CorpusBuilder {
    tweets: Vec<Tweet>,
    index: AHashMap<u64, usize>,
    users: BTreeMap<u64, Arc<User>>,
}

impl CorpusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract one line into the accumulator. Blank lines are skipped and yield `None`.
    pub fn push_line(&mut self, line: &str) -> Result<Option<&Tweet>> {
        if line.trim().is_empty() {
            return Ok(None);
        }
        extract_line(line, self)?;
        Ok(self.tweets.last())
    }

    pub fn tweets(&self) -> &[Tweet] {
        &self.tweets
    }

    pub fn users(&self) -> &BTreeMap<u64, Arc<User>> {
        &self.users
    }

    pub fn find_tweet(&self, id: u64) -> Option<&Tweet> {
        self.index.get(&id).map(|&i| &self.tweets[i])
    }

    pub(crate) fn into_parts(self) -> (Vec<Tweet>, BTreeMap<u64, Arc<User>>) {
        (self.tweets, self.users)
    }

    fn push_tweet(&mut self, tweet: Tweet) {
        self.index.entry(tweet.id()).or_insert(self.tweets.len());
        self.tweets.push(tweet);
    }
}

/// Extract a top-level tweet from one raw line, registering new authors and appending the tweet
/// to `acc`. Returns a copy of the extracted tweet.
pub fn extract_line(line: &str, acc: &mut CorpusBuilder) -> Result<Tweet> {
    let isolated = isolate_text(line)?;
    let stripped = strip_punctuation(&isolated.remainder);
    let tokens = tokenize(&stripped);

    let top = Extraction {
        acc: &mut *acc,
        original_text: isolated.original_text.as_deref(),
        nested: false,
    };
    let tweet = top.run(TokenCursor::new(&tokens), isolated.text)?;
    acc.push_tweet(tweet.clone());
    Ok(tweet)
}

/// One pass of step 3 over a token window, either top-level or a nested retweet target.
struct Extraction<'acc, 't> {
    acc: &'acc mut CorpusBuilder,
    original_text: Option<&'t str>,
    nested: bool,
}

impl Extraction<'_, '_> {
    fn run(mut self, mut cur: TokenCursor<'_>, text: String) -> Result<Tweet> {
        let id: u64 = cur.parse(keys::ID)?;
        cur.advance_to(keys::TEXT)?;

        let author = self.resolve_author(&cur)?;
        cur.advance_to(keys::STATUSES_COUNT)?;

        let original = self.resolve_original(&cur)?;

        // Counts and entities are the first matches after `statuses_count`; on a retweet those
        // belong to the nested block.
        let retweet_count: u64 = cur.parse(keys::RETWEET_COUNT)?;
        let like_count: u64 = cur.parse(keys::FAVORITE_COUNT)?;

        // `entities:` rather than `hashtags:`: the first token is `entities:hashtags:...`.
        cur.advance_to(keys::ENTITIES)?;
        let hashtags = hashtags(&cur)?;
        let media_url = media_url(&cur)?;

        let mut b = Tweet::builder(id, author)
            .text(text)
            .hashtags(hashtags)
            .retweet_count(retweet_count)
            .like_count(like_count)
            .media_url(media_url);
        if let Some(original) = original {
            b = b.original(original);
        }
        Ok(b.build())
    }

    fn resolve_author(&mut self, cur: &TokenCursor<'_>) -> Result<Arc<User>> {
        let id: u64 = cur.parse(keys::ID_STR)?;
        if let Some(user) = self.acc.users.get(&id) {
            return Ok(Arc::clone(user));
        }

        // `name:` with nothing after it is an empty display name, which is allowed.
        let user = Arc::new(
            User::builder(id)
                .name(cur.value(keys::NAME)?)
                .screen_name(cur.value(keys::SCREEN_NAME)?)
                .followers_count(cur.parse(keys::FOLLOWERS_COUNT)?)
                .friends_count(cur.parse(keys::FRIENDS_COUNT)?)
                .favourites_count(cur.parse(keys::FAVOURITES_COUNT)?)
                .verified(cur.parse(keys::VERIFIED)?)
                .statuses_count(cur.parse(keys::STATUSES_COUNT)?)
                .build(),
        );
        if !self.nested {
            self.acc.users.insert(id, Arc::clone(&user));
        }
        Ok(user)
    }

    /// Retweet detection: reuse an already extracted original, or extract the nested block.
    fn resolve_original(&mut self, cur: &TokenCursor<'_>) -> Result<Option<Tweet>> {
        if self.nested || !cur.contains(keys::RETWEETED_STATUS) {
            return Ok(None);
        }
        let block = cur.block(keys::RETWEETED_STATUS, keys::TWEET_END)?;
        let original_id: u64 = block.parse(keys::ID)?;

        let known = self.acc.find_tweet(original_id).cloned();
        let original = match known {
            Some(known) => {
                tracing::debug!(original_id, "retweet of an already extracted tweet");
                known
            }
            None => {
                tracing::debug!(original_id, "extracting nested retweet target");
                let text = self.original_text.ok_or(Error::MissingField("text"))?.to_string();
                let nested = Extraction { acc: &mut *self.acc, original_text: None, nested: true };
                nested.run(block, text)?
            }
        };
        Ok(Some(original))
    }
}

/// Hashtags are present iff the token after the entities marker is an `indices` entry.
/// The first one sits inside the compound `entities:hashtags:text:<tag>` token; later ones are
/// plain `text:<tag>` tokens.
fn hashtags(cur: &TokenCursor<'_>) -> Result<Vec<String>> {
    let window = cur.window();
    let present = window.get(1).is_some_and(|t| t.starts_with(keys::INDICES));
    if !present {
        return Ok(Vec::new());
    }
    let first = window[0]
        .splitn(4, ':')
        .nth(3)
        .ok_or(Error::MissingField("hashtags.text"))?;
    let mut tags = vec![first.to_string()];
    tags.extend(window[1..].iter().filter_map(|t| t.strip_prefix(keys::TEXT)).map(str::to_string));
    Ok(tags)
}

/// Rebuild the media URL as `http:` plus the raw path with escape backslashes removed.
fn media_url(cur: &TokenCursor<'_>) -> Result<Option<Url>> {
    let Some(raw) = cur.window().iter().find_map(|t| t.strip_prefix(keys::MEDIA_URL)) else {
        return Ok(None);
    };
    let path = raw.split_once(':').map_or(raw, |(_, rest)| rest);
    let rebuilt = format!("http:{}", path.replace('\\', ""));
    Url::parse(&rebuilt)
        .map(Some)
        .map_err(|source| Error::MalformedUrl { raw: raw.to_string(), source })
}
