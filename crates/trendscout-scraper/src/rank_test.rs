use super::*;

fn record(keyword: &str, popularity: u8, category: Category, source: Source) -> TrendRecord {
    TrendRecord::new(keyword, popularity, category, source)
}

// -----------------------------------------------------------------------
// is_valid_keyword
// -----------------------------------------------------------------------

#[test]
fn short_keywords_are_dropped() {
    assert!(!is_valid_keyword("ai"));
    assert!(!is_valid_keyword("  ai  "));
    assert!(is_valid_keyword("ai3"));
}

#[test]
fn underscore_runs_are_dropped() {
    assert!(!is_valid_keyword("foo__bar"));
    assert!(is_valid_keyword("foo_bar"));
}

#[test]
fn long_keywords_are_dropped() {
    assert!(is_valid_keyword(&"a".repeat(MAX_KEYWORD_CHARS)));
    assert!(!is_valid_keyword(&"a".repeat(MAX_KEYWORD_CHARS + 1)));
}

// -----------------------------------------------------------------------
// dedup_trends
// -----------------------------------------------------------------------

#[test]
fn dedup_keeps_higher_popularity() {
    let raw = vec![
        record("remote work", 80, Category::Business, Source::Seasonal),
        record("Remote Work ", 95, Category::Business, Source::GoogleTrends),
    ];
    let kept = dedup_trends(raw);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].popularity, 95);
    assert_eq!(kept[0].source, Source::GoogleTrends);
}

#[test]
fn dedup_tie_goes_to_higher_priority_source() {
    let raw = vec![
        record("nature walk", 85, Category::Nature, Source::UnsplashTopics),
        record("nature walk", 85, Category::Nature, Source::PexelsApi),
        record("nature walk", 85, Category::Nature, Source::Seasonal),
    ];
    let kept = dedup_trends(raw);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].source, Source::PexelsApi);
}

#[test]
fn dedup_lower_popularity_never_replaces() {
    let raw = vec![
        record("salad bowl", 90, Category::Food, Source::Seasonal),
        record("salad bowl", 89, Category::Food, Source::GoogleTrends),
    ];
    let kept = dedup_trends(raw);
    assert_eq!(kept[0].source, Source::Seasonal);
}

#[test]
fn replacement_keeps_first_slot() {
    let raw = vec![
        record("alpha one", 70, Category::General, Source::Seasonal),
        record("beta two", 75, Category::General, Source::Seasonal),
        record("alpha one", 90, Category::General, Source::PexelsApi),
    ];
    let kept = dedup_trends(raw);
    let keywords: Vec<&str> = kept.iter().map(|r| r.keyword.as_str()).collect();
    assert_eq!(keywords, vec!["alpha one", "beta two"]);
    assert_eq!(kept[0].popularity, 90);
}

// -----------------------------------------------------------------------
// rank_trends
// -----------------------------------------------------------------------

#[test]
fn word_count_breaks_popularity_ties() {
    let raw = vec![
        record("kwb", 90, Category::General, Source::PexelsApi),
        record("kwa two", 90, Category::General, Source::PexelsApi),
    ];
    let ranked = rank_trends(raw, DEFAULT_TOP_N);
    assert_eq!(ranked[0].keyword, "kwa two");
    assert_eq!(ranked[1].keyword, "kwb");
}

#[test]
fn full_ties_keep_input_order() {
    let raw = vec![
        record("first one", 80, Category::General, Source::PexelsApi),
        record("second one", 80, Category::General, Source::PexelsApi),
    ];
    let ranked = rank_trends(raw, DEFAULT_TOP_N);
    assert_eq!(ranked[0].keyword, "first one");
}

#[test]
fn rank_truncates_to_top_n() {
    let raw: Vec<TrendRecord> = (0..30u8)
        .map(|i| record(&format!("keyword {i}"), 60 + i, Category::General, Source::Seasonal))
        .collect();
    let ranked = rank_trends(raw, 5);
    assert_eq!(ranked.len(), 5);
    assert_eq!(ranked[0].popularity, 89);
    assert!(ranked.windows(2).all(|w| w[0].popularity >= w[1].popularity));
}

#[test]
fn rank_of_all_invalid_is_empty() {
    let raw = vec![
        record("ai", 99, Category::Technology, Source::GoogleTrends),
        record("x__y", 99, Category::General, Source::GoogleTrends),
    ];
    assert!(rank_trends(raw, DEFAULT_TOP_N).is_empty());
}

// -----------------------------------------------------------------------
// summarize_categories
// -----------------------------------------------------------------------

#[test]
fn summaries_count_and_average_per_category() {
    let mut records = Vec::new();
    for i in 0..12u8 {
        records.push(record(&format!("tech {i}"), 80 + i, Category::Technology, Source::PexelsApi));
    }
    for i in 0..8u8 {
        records.push(record(&format!("biz {i}"), 60 + i, Category::Business, Source::PexelsApi));
    }

    let summaries = summarize_categories(&records);
    assert_eq!(summaries.len(), 2);

    let tech = &summaries[0];
    assert_eq!(tech.name, "Technology");
    assert_eq!(tech.count, 12);
    let tech_total: u32 = (0..12).map(|i| 80 + i).sum();
    assert!((tech.avg_popularity - f64::from(tech_total) / 12.0).abs() < 1e-9);
    assert_eq!(tech.top_keywords.len(), 5);
    assert_eq!(tech.top_keywords[0].popularity, 91);

    let biz = &summaries[1];
    assert_eq!(biz.name, "Business");
    assert_eq!(biz.count, 8);
    assert!((biz.avg_popularity - 63.5).abs() < 1e-9);
}

#[test]
fn summaries_sorted_by_average_then_first_seen() {
    let records = vec![
        record("salad bowl", 70, Category::Food, Source::Seasonal),
        record("forest trail", 90, Category::Nature, Source::Seasonal),
        record("study desk", 70, Category::Education, Source::Seasonal),
    ];
    let names: Vec<String> = summarize_categories(&records)
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["Nature", "Food", "Education"]);
}

#[test]
fn summaries_of_nothing_are_empty() {
    assert!(summarize_categories(&[]).is_empty());
}
