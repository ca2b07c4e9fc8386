use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use tweetpro::{checked_limit, init_tracing_once, Corpus, CorpusOptions, TopHashtags};

const DEFAULT_K: usize = 10;
const USAGE: &str = "usage: tweetpro <corpus.jsonl[.zst]> [k] [exact|bounded]";

fn main() -> Result<()> {
    init_tracing_once();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next().map(PathBuf::from) else {
        bail!(USAGE);
    };
    let k = match args.next() {
        Some(raw) => {
            let signed: i64 = raw
                .parse()
                .with_context(|| format!("k must be an integer, got {raw:?}"))?;
            checked_limit(signed)?
        }
        None => DEFAULT_K,
    };

    let mut opts = CorpusOptions::default().with_progress(true).merge_env();
    if let Some(raw) = args.next() {
        opts = opts.with_top_hashtags(raw.parse::<TopHashtags>()?);
    }

    let corpus = Corpus::open_with(&path, &opts)?;
    let summary = corpus.summary(k);
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
