//! Substring rules mapping keywords to categories.

use trendscout_core::Category;

/// Checked in order; the first category with any marker contained in the
/// keyword wins.
const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (
        Category::Technology,
        &[
            "ai", "artificial", "machine learning", "ml", "blockchain", "saas", "api", "cloud",
            "vr", "ar", "3d", "data", "tech",
        ],
    ),
    (
        Category::Business,
        &[
            "business", "corporate", "office", "startup", "strategy", "marketing", "revenue",
            "meeting",
        ],
    ),
    (
        Category::Medical,
        &[
            "medical", "health", "healthcare", "doctor", "nurse", "patient", "therapy", "vaccine",
            "fitness", "wellness",
        ],
    ),
    (
        Category::Education,
        &[
            "education", "school", "student", "teacher", "university", "learning", "research",
        ],
    ),
    (
        Category::Food,
        &[
            "food", "cuisine", "cooking", "meal", "recipe", "kitchen", "coffee", "tea",
            "restaurant", "diet", "vegan", "plant",
        ],
    ),
    (
        Category::Nature,
        &[
            "nature", "forest", "mountain", "ocean", "sea", "beach", "sky", "wildlife", "green",
            "sustainable", "climate",
        ],
    ),
    (
        Category::Lifestyle,
        &[
            "lifestyle", "family", "people", "beauty", "fashion", "home", "interior", "yoga",
            "meditation",
        ],
    ),
];

/// Maps `keyword` to its category, or [`Category::General`] when no rule
/// matches.
#[must_use]
pub fn categorize(keyword: &str) -> Category {
    let lowered = keyword.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(_, markers)| markers.iter().any(|m| lowered.contains(m)))
        .map_or(Category::General, |(category, _)| *category)
}
