//! Popularity scoring for extracted keywords.

use rand::Rng;
use trendscout_core::Source;

pub const MIN_SCORE: u8 = 50;
pub const MAX_SCORE: u8 = 99;

/// Random spread applied on top of the lexical score, in both directions.
const JITTER: i32 = 2;

/// Lexical bonus tiers. Only the first tier with a matching marker applies.
const BONUS_TIERS: &[(&[&str], i32)] = &[
    (&["ai", "artificial intelligence", "machine learning", "3d"], 8),
    (&["sustainable", "green", "eco", "renewable"], 6),
    (&["remote work", "digital transformation", "hybrid"], 6),
    (&["health", "wellness", "mental health"], 5),
    (&["diversity", "inclusion"], 4),
];

/// Starting score for keywords from `source`.
#[must_use]
pub fn base_score(source: Source) -> i32 {
    match source {
        Source::GoogleTrends => 88,
        Source::PexelsApi => 85,
        Source::UnsplashApi => 84,
        Source::UnsplashTopics => 78,
        Source::Seasonal => 72,
    }
}

/// Score before jitter and clamping.
#[must_use]
pub fn lexical_score(keyword: &str, source: Source) -> i32 {
    let lowered = keyword.to_lowercase();
    let mut score = base_score(source);

    if let Some((_, bonus)) = BONUS_TIERS
        .iter()
        .find(|(markers, _)| markers.iter().any(|m| lowered.contains(m)))
    {
        score += bonus;
    }

    // Two- and three-word phrases are more specific than single words.
    match keyword.split_whitespace().count() {
        2 => score += 3,
        3 => score += 2,
        _ => {}
    }

    let len = keyword.chars().count();
    if len > 40 {
        score -= 6;
    } else if len > 30 {
        score -= 3;
    }

    score
}

/// Scores `keyword` in `[MIN_SCORE, MAX_SCORE]` using the thread-local RNG for
/// jitter.
#[must_use]
pub fn score(keyword: &str, source: Source) -> u8 {
    score_with_rng(keyword, source, &mut rand::rng())
}

/// Same as [`score`] with a caller-supplied RNG.
pub fn score_with_rng<R: Rng + ?Sized>(keyword: &str, source: Source, rng: &mut R) -> u8 {
    let jittered = lexical_score(keyword, source) + rng.random_range(-JITTER..=JITTER);
    let clamped = jittered.clamp(i32::from(MIN_SCORE), i32::from(MAX_SCORE));
    u8::try_from(clamped).unwrap_or(MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ALL_SOURCES: [Source; 5] = [
        Source::GoogleTrends,
        Source::PexelsApi,
        Source::UnsplashApi,
        Source::UnsplashTopics,
        Source::Seasonal,
    ];

    #[test]
    fn base_scores_rank_trends_above_seasonal() {
        assert!(base_score(Source::GoogleTrends) > base_score(Source::PexelsApi));
        assert!(base_score(Source::PexelsApi) > base_score(Source::UnsplashApi));
        assert!(base_score(Source::UnsplashApi) > base_score(Source::UnsplashTopics));
        assert!(base_score(Source::UnsplashTopics) > base_score(Source::Seasonal));
    }

    #[test]
    fn plain_single_word_gets_base_score() {
        assert_eq!(lexical_score("landscape", Source::UnsplashTopics), 78);
    }

    #[test]
    fn only_first_bonus_tier_applies() {
        // "3d" (tier one, +8) wins over "green" (tier two).
        assert_eq!(lexical_score("3d green", Source::Seasonal), 72 + 8 + 3);
    }

    #[test]
    fn remote_work_gets_bonus_and_phrase_bonus() {
        assert_eq!(lexical_score("remote work", Source::PexelsApi), 85 + 6 + 3);
    }

    #[test]
    fn three_word_phrase_bonus() {
        assert_eq!(
            lexical_score("diversity inclusion panel", Source::UnsplashApi),
            84 + 4 + 2
        );
    }

    #[test]
    fn long_phrases_are_penalized() {
        // 33 characters, one word.
        let medium = "x".repeat(33);
        assert_eq!(lexical_score(&medium, Source::Seasonal), 72 - 3);
        let long = "x".repeat(45);
        assert_eq!(lexical_score(&long, Source::Seasonal), 72 - 6);
    }

    #[test]
    fn jitter_stays_within_two_points() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let s = i32::from(score_with_rng("landscape", Source::UnsplashTopics, &mut rng));
            assert!((76..=80).contains(&s), "score {s} outside 78 ± 2");
        }
    }

    #[test]
    fn score_is_always_clamped() {
        let long = "long phrase ".repeat(8);
        let keywords = [
            "ai",
            "artificial intelligence machine",
            "remote work",
            "x",
            long.as_str(),
        ];
        let mut rng = StdRng::seed_from_u64(42);
        for keyword in keywords {
            for source in ALL_SOURCES {
                for _ in 0..50 {
                    let s = score_with_rng(keyword, source, &mut rng);
                    assert!((MIN_SCORE..=MAX_SCORE).contains(&s), "score {s} out of range");
                }
            }
        }
    }

    #[test]
    fn top_score_is_capped_at_99() {
        // 88 + 8 + 3 = 99 before jitter.
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            assert!(score_with_rng("ai art", Source::GoogleTrends, &mut rng) <= MAX_SCORE);
        }
    }
}
