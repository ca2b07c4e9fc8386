#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Author fixture rendered into the export's `"user":{...}` object.
#[derive(Clone, Debug)]
pub struct UserFx {
    pub id: u64,
    pub name: String,
    pub screen_name: String,
    pub followers: u64,
    pub friends: u64,
    pub favourites: u64,
    pub verified: bool,
    pub statuses: u64,
}

/// Tweet fixture. `line()` renders it the way the export does: one object per line, keys in
/// Twitter's order, text bodies and descriptions free to contain commas.
#[derive(Clone, Debug)]
pub struct TweetFx {
    pub id: u64,
    pub text: String,
    pub user: UserFx,
    pub hashtags: Vec<String>,
    pub media: Option<String>,
    pub retweets: u64,
    pub likes: u64,
    pub retweeted: Option<Box<TweetFx>>,
}

pub fn user(id: u64, name: &str, screen_name: &str) -> UserFx {
    UserFx {
        id,
        name: name.to_string(),
        screen_name: screen_name.to_string(),
        followers: 10,
        friends: 20,
        favourites: 30,
        verified: false,
        statuses: 40,
    }
}

pub fn tweet(id: u64, text: &str, user: UserFx) -> TweetFx {
    TweetFx {
        id,
        text: text.to_string(),
        user,
        hashtags: Vec::new(),
        media: None,
        retweets: 0,
        likes: 0,
        retweeted: None,
    }
}

impl TweetFx {
    pub fn hashtags(mut self, tags: &[&str]) -> Self {
        self.hashtags = tags.iter().map(|s| s.to_string()).collect();
        self
    }
    pub fn media(mut self, file: &str) -> Self {
        self.media = Some(file.to_string());
        self
    }
    pub fn counts(mut self, retweets: u64, likes: u64) -> Self {
        self.retweets = retweets;
        self.likes = likes;
        self
    }
    pub fn retweet_of(mut self, original: TweetFx) -> Self {
        self.retweeted = Some(Box::new(original));
        self
    }

    pub fn line(&self) -> String {
        self.object()
    }

    fn object(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!(
            r#"{{"created_at":"Thu May 08 12:22:58 +0000 2014","id":{id},"id_str":"{id}","text":"{text}","source":"<a href=\"http:\/\/twitter.com\" rel=\"nofollow\">Twitter for iPhone<\/a>","truncated":false,"in_reply_to_status_id":null,"in_reply_to_status_id_str":null,"in_reply_to_user_id":null,"in_reply_to_user_id_str":null,"in_reply_to_screen_name":null,"user":{user},"geo":null,"coordinates":null,"place":null,"contributors":null,"#,
            id = self.id,
            text = self.text,
            user = user_object(&self.user),
        ));
        if let Some(original) = &self.retweeted {
            s.push_str(&format!(r#""retweeted_status":{},"#, original.object()));
        }
        s.push_str(&format!(
            r#""retweet_count":{},"favorite_count":{},"entities":{},"favorited":false,"retweeted":false,"possibly_sensitive":false,"filter_level":"medium","lang":"en"}}"#,
            self.retweets,
            self.likes,
            entities_object(&self.hashtags, self.media.as_deref()),
        ));
        s
    }
}

fn user_object(u: &UserFx) -> String {
    format!(
        r#"{{"id":{id},"id_str":"{id}","name":"{name}","screen_name":"{screen}","location":"Rome, Italy","url":null,"description":"coffee, code, and [brackets]","protected":false,"followers_count":{followers},"friends_count":{friends},"listed_count":3,"created_at":"Mon Jan 02 10:00:00 +0000 2012","favourites_count":{favs},"utc_offset":7200,"time_zone":"Rome","geo_enabled":false,"verified":{verified},"statuses_count":{statuses},"lang":"en","contributors_enabled":false,"is_translator":false,"profile_background_color":"C0DEED","profile_image_url":"http:\/\/pbs.twimg.com\/profile_images\/1\/avatar_normal.jpeg","default_profile":true,"following":null,"follow_request_sent":null,"notifications":null}}"#,
        id = u.id,
        name = u.name,
        screen = u.screen_name,
        followers = u.followers,
        friends = u.friends,
        favs = u.favourites,
        verified = u.verified,
        statuses = u.statuses,
    )
}

fn entities_object(tags: &[String], media: Option<&str>) -> String {
    let hashtags: Vec<String> = tags
        .iter()
        .enumerate()
        .map(|(i, t)| format!(r#"{{"text":"{}","indices":[{},{}]}}"#, t, i * 10, i * 10 + t.len() + 1))
        .collect();
    let mut s = format!(
        r#"{{"hashtags":[{}],"symbols":[],"urls":[],"user_mentions":[{{"screen_name":"someone","name":"Some One","id":42,"id_str":"42","indices":[3,11]}}]"#,
        hashtags.join(",")
    );
    if let Some(file) = media {
        s.push_str(&format!(
            r#","media":[{{"id":464717213304627201,"id_str":"464717213304627201","indices":[80,102],"media_url":"http:\/\/pbs.twimg.com\/media\/{file}","media_url_https":"https:\/\/pbs.twimg.com\/media\/{file}","url":"http:\/\/t.co\/abc","display_url":"pic.twitter.com\/abc","type":"photo"}}]"#
        ));
    }
    s.push('}');
    s
}

/// The author of the sample retweet.
pub fn jasmine() -> UserFx {
    UserFx {
        id: 311_000_001,
        name: "jasmine s.".into(),
        screen_name: "jasminesaff".into(),
        followers: 311,
        friends: 245,
        favourites: 1200,
        verified: false,
        statuses: 10704,
    }
}

/// The author of the retweeted original.
pub fn nine_gag() -> UserFx {
    UserFx {
        id: 16_548_023,
        name: "9GAG Tweets".into(),
        screen_name: "9GAGTweets".into(),
        followers: 251032,
        friends: 3,
        favourites: 5,
        verified: false,
        statuses: 124287,
    }
}

pub fn original_9gag() -> TweetFx {
    tweet(464717213304627200, r#"When you see it, you \"get\" it"#, nine_gag())
        .hashtags(&["Hulk", "thor"])
        .media("BnLliEDCcAAGxd9.jpg")
        .counts(120, 300)
}

pub fn jasmine_retweet() -> TweetFx {
    tweet(464731336310140929, r#"RT @9GAGTweets: When you see it, you \"get\" it"#, jasmine())
        .hashtags(&["Hulk", "thor"])
        .retweet_of(original_9gag())
        .counts(0, 1)
}

/// Write lines to a fresh temp dir and return the file path.
pub fn write_corpus(name: &str, lines: &[String]) -> PathBuf {
    let dir = tempfile::tempdir().unwrap().into_path();
    let path = dir.join(name);
    let mut f = File::create(&path).unwrap();
    for l in lines {
        writeln!(&mut f, "{}", l).unwrap();
    }
    path
}

/// Same as `write_corpus`, zstd-compressed.
pub fn write_zst_corpus(name: &str, lines: &[String]) -> PathBuf {
    let dir = tempfile::tempdir().unwrap().into_path();
    let path = dir.join(name);
    write_zst_lines(&path, lines);
    path
}

pub fn write_zst_lines(path: &Path, lines: &[String]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let f = File::create(path).unwrap();
    let mut enc = zstd::stream::write::Encoder::new(f, 3).unwrap();
    for l in lines {
        writeln!(&mut enc, "{}", l).unwrap();
    }
    enc.finish().unwrap();
}
