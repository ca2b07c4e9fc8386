//! Tweet and User records with builders. Plain data; extraction lives in `extract`.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// A tweet author. `id` is the identity key used for deduplication.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct User {
    id: u64,
    name: String,
    screen_name: String,
    followers_count: u64,
    friends_count: u64,
    favourites_count: u64,
    statuses_count: u64,
    verified: bool,
}

impl User {
    pub fn builder(id: u64) -> UserBuilder { UserBuilder::new(id) }

    pub fn id(&self) -> u64 { self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn screen_name(&self) -> &str { &self.screen_name }
    pub fn followers_count(&self) -> u64 { self.followers_count }
    pub fn friends_count(&self) -> u64 { self.friends_count }
    pub fn favourites_count(&self) -> u64 { self.favourites_count }
    pub fn statuses_count(&self) -> u64 { self.statuses_count }
    pub fn is_verified(&self) -> bool { self.verified }
}

#[derive(Clone, Debug, Default)]
pub struct UserBuilder {
    id: u64,
    name: String,
    screen_name: String,
    followers_count: u64,
    friends_count: u64,
    favourites_count: u64,
    statuses_count: u64,
    verified: bool,
}

impl UserBuilder {
    pub fn new(id: u64) -> Self {
        Self { id, ..Default::default() }
    }
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
    pub fn screen_name(mut self, screen_name: impl Into<String>) -> Self {
        self.screen_name = screen_name.into();
        self
    }
    pub fn followers_count(mut self, n: u64) -> Self {
        self.followers_count = n;
        self
    }
    pub fn friends_count(mut self, n: u64) -> Self {
        self.friends_count = n;
        self
    }
    pub fn favourites_count(mut self, n: u64) -> Self {
        self.favourites_count = n;
        self
    }
    pub fn statuses_count(mut self, n: u64) -> Self {
        self.statuses_count = n;
        self
    }
    pub fn verified(mut self, yes: bool) -> Self {
        self.verified = yes;
        self
    }
    pub fn build(self) -> User {
        User {
            id: self.id,
            name: self.name,
            screen_name: self.screen_name,
            followers_count: self.followers_count,
            friends_count: self.friends_count,
            favourites_count: self.favourites_count,
            statuses_count: self.statuses_count,
            verified: self.verified,
        }
    }
}

/// A single tweet. `original` is set iff this tweet is a retweet; nesting is one level deep.
///
/// Equality is structural over every field, the original included, so two non-retweets
/// compare equal when everything else matches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Tweet {
    id: u64,
    author: Arc<User>,
    text: String,
    hashtags: Vec<String>,
    like_count: u64,
    retweet_count: u64,
    media_url: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    original: Option<Box<Tweet>>,
}

impl Tweet {
    pub fn builder(id: u64, author: Arc<User>) -> TweetBuilder { TweetBuilder::new(id, author) }

    pub fn id(&self) -> u64 { self.id }
    pub fn author(&self) -> &User { &self.author }
    /// Shared handle to the author record.
    pub fn author_arc(&self) -> &Arc<User> { &self.author }
    pub fn text(&self) -> &str { &self.text }
    pub fn hashtags(&self) -> &[String] { &self.hashtags }
    pub fn like_count(&self) -> u64 { self.like_count }
    pub fn retweet_count(&self) -> u64 { self.retweet_count }
    pub fn media_url(&self) -> Option<&Url> { self.media_url.as_ref() }
    pub fn is_retweet(&self) -> bool { self.original.is_some() }
    pub fn original(&self) -> Option<&Tweet> { self.original.as_deref() }
}

impl fmt::Display for Tweet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Clone, Debug)]
pub struct TweetBuilder {
    id: u64,
    author: Arc<User>,
    text: String,
    hashtags: Vec<String>,
    like_count: u64,
    retweet_count: u64,
    media_url: Option<Url>,
    original: Option<Box<Tweet>>,
}

impl TweetBuilder {
    pub fn new(id: u64, author: Arc<User>) -> Self {
        Self {
            id,
            author,
            text: String::new(),
            hashtags: Vec::new(),
            like_count: 0,
            retweet_count: 0,
            media_url: None,
            original: None,
        }
    }
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
    pub fn hashtags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hashtags.extend(tags.into_iter().map(Into::into));
        self
    }
    pub fn like_count(mut self, n: u64) -> Self {
        self.like_count = n;
        self
    }
    pub fn retweet_count(mut self, n: u64) -> Self {
        self.retweet_count = n;
        self
    }
    pub fn media_url(mut self, url: Option<Url>) -> Self {
        self.media_url = url;
        self
    }
    pub fn original(mut self, original: Tweet) -> Self {
        self.original = Some(Box::new(original));
        self
    }
    pub fn build(self) -> Tweet {
        Tweet {
            id: self.id,
            author: self.author,
            text: self.text,
            hashtags: self.hashtags,
            like_count: self.like_count,
            retweet_count: self.retweet_count,
            media_url: self.media_url,
            original: self.original,
        }
    }
}
