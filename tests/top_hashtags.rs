use tweetpro::{checked_limit, Error, HashtagCounts, TopHashtags, BOUNDED_FACTOR};

const SAMPLE: [&str; 5] = ["a", "a", "b", "A", "c"];

/// Case folding merges "A" and "a"; ties at count 1 fall back to first-observed order.
#[test]
fn sample_ranking_both_strategies() {
    for s in [TopHashtags::Exact, TopHashtags::Bounded] {
        assert_eq!(s.rank(SAMPLE, 1), ["a"], "{s}");
        let two = s.rank(SAMPLE, 2);
        assert_eq!(two[0], "a");
        assert!(two[1] == "b" || two[1] == "c");
        assert_eq!(two, ["a", "b"], "first-observed tie-break");
        assert_eq!(s.counts(SAMPLE, 2).count("A"), Some(3));
    }
}

#[test]
fn zero_and_oversized_limits() {
    for s in [TopHashtags::Exact, TopHashtags::Bounded] {
        assert!(s.rank(SAMPLE, 0).is_empty());
        assert!(s.rank(std::iter::empty(), 5).is_empty());
        // More than the distinct count: everything, unpadded.
        assert_eq!(s.rank(SAMPLE, 50), ["a", "b", "c"]);
    }
    assert!(matches!(checked_limit(-1), Err(Error::InvalidArgument(_))));
    assert_eq!(checked_limit(0).unwrap(), 0);
}

/// At the cap, an unseen key evicts the lowest count and is seeded with that count + 1.
#[test]
fn bounded_eviction_reseeds_from_evicted_count() {
    let mut t = HashtagCounts::bounded(2);
    for tag in ["a", "a", "b", "c"] {
        t.observe(tag);
    }
    assert_eq!(t.len(), 2);
    assert_eq!(t.count("a"), Some(2));
    assert_eq!(t.count("b"), None);
    assert_eq!(t.count("c"), Some(2));

    // Existing keys still increment at the cap.
    t.observe("C");
    assert_eq!(t.count("c"), Some(3));
    assert_eq!(t.top(2), ["c", "a"]);
}

/// Among equal minimum counts the most recently admitted entry is evicted.
#[test]
fn bounded_eviction_tie_prefers_newest() {
    let mut t = HashtagCounts::bounded(2);
    for tag in ["a", "b", "c"] {
        t.observe(tag);
    }
    assert_eq!(t.count("a"), Some(1));
    assert_eq!(t.count("b"), None);
    assert_eq!(t.count("c"), Some(2));
}

/// The bounded table never grows past `10 × K`.
#[test]
fn bounded_table_respects_cap() {
    let tags: Vec<String> = (0..5_000).map(|i| format!("tag{}", (i * 7919) % 1_237)).collect();
    for k in [1usize, 3, 10, 40] {
        let counts = TopHashtags::Bounded.counts(tags.iter().map(String::as_str), k);
        assert_eq!(counts.cap(), Some(k * BOUNDED_FACTOR));
        assert!(counts.len() <= k * BOUNDED_FACTOR, "k={k} len={}", counts.len());
        assert_eq!(TopHashtags::Bounded.rank(tags.iter().map(String::as_str), k).len(), k);
    }
    assert!(HashtagCounts::bounded(0).is_empty());
}

/// With at most `10 × K` distinct hashtags nothing is evicted, so bounded equals exact.
#[test]
fn bounded_matches_exact_below_cap() {
    // 25 distinct tags with skewed frequencies, mixed case.
    let mut tags = Vec::new();
    for i in 0..25u32 {
        for j in 0..(i % 7 + 1) {
            let tag = format!("Tag{i}");
            tags.push(if j % 2 == 0 { tag } else { tag.to_uppercase() });
        }
    }
    for k in [3usize, 5, 10] {
        let exact = TopHashtags::Exact.rank(tags.iter().map(String::as_str), k);
        let bounded = TopHashtags::Bounded.rank(tags.iter().map(String::as_str), k);
        let mut a = exact.clone();
        let mut b = bounded.clone();
        a.sort();
        b.sort();
        assert_eq!(a, b, "k={k}");
        assert!(exact.iter().all(|t| t == &t.to_lowercase()));
    }
}

#[test]
fn strategy_names_parse() {
    assert_eq!("exact".parse::<TopHashtags>().unwrap(), TopHashtags::Exact);
    assert_eq!(" Bounded ".parse::<TopHashtags>().unwrap(), TopHashtags::Bounded);
    assert_eq!("countmin".parse::<TopHashtags>().unwrap(), TopHashtags::Bounded);
    assert!(matches!("fuzzy".parse::<TopHashtags>(), Err(Error::InvalidArgument(_))));
    assert_eq!(TopHashtags::default(), TopHashtags::Bounded);
    assert_eq!(TopHashtags::Exact.to_string(), "exact");
}
