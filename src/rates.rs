//! Numeric policy tables: regional CPM rates and subscriber-size tiers.
//!
//! Kept as data so the rates can be audited and tested apart from the code
//! that applies them.

use serde::{Deserialize, Serialize};

/// Global-average CPM used when a location is unknown or unlisted.
pub const DEFAULT_CPM: f64 = 0.5;

/// Dollars earned per 1,000 monetized views, by country.
pub const CPM_TABLE: &[(&str, f64)] = &[
    ("united states", 2.5),
    ("australia", 2.3),
    ("united kingdom", 2.2),
    ("canada", 2.0),
    ("norway", 2.0),
    ("switzerland", 2.0),
    ("germany", 1.8),
    ("new zealand", 1.8),
    ("netherlands", 1.6),
    ("france", 1.5),
    ("japan", 1.2),
    ("south korea", 1.0),
    ("spain", 0.9),
    ("italy", 0.9),
    ("mexico", 0.6),
    ("brazil", 0.5),
    ("russia", 0.4),
    ("indonesia", 0.3),
    ("philippines", 0.25),
    ("india", 0.2),
    ("pakistan", 0.15),
    ("bangladesh", 0.15),
];

const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("usa", "united states"),
    ("us", "united states"),
    ("u.s.", "united states"),
    ("u.s.a.", "united states"),
    ("united states of america", "united states"),
    ("america", "united states"),
    ("uk", "united kingdom"),
    ("u.k.", "united kingdom"),
    ("great britain", "united kingdom"),
    ("england", "united kingdom"),
    ("korea", "south korea"),
    ("republic of korea", "south korea"),
    ("holland", "netherlands"),
];

/// Lower-cases, trims and resolves aliases. "Los Angeles, USA" resolves on its
/// last comma-separated component.
pub fn normalize_country(location: &str) -> String {
    let lower = location.trim().to_lowercase();
    let last = lower.rsplit(',').next().unwrap_or("").trim();
    for candidate in [lower.as_str(), last] {
        if let Some((_, canonical)) = COUNTRY_ALIASES.iter().find(|(alias, _)| *alias == candidate) {
            return (*canonical).to_string();
        }
        if CPM_TABLE.iter().any(|(name, _)| *name == candidate) {
            return candidate.to_string();
        }
    }
    lower
}

pub fn cpm_rate(location: &str) -> f64 {
    let country = normalize_country(location);
    CPM_TABLE
        .iter()
        .find(|(name, _)| *name == country)
        .map(|(_, rate)| *rate)
        .unwrap_or(DEFAULT_CPM)
}

/// Growth-rate tier: monthly growth percent = `base + engagement * engagement_weight`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthTier {
    /// Exclusive lower bound on subscribers.
    pub above: u64,
    pub base: f64,
    pub engagement_weight: f64,
}

/// Descending thresholds; a count equal to a threshold falls to the next row.
pub const GROWTH_TIERS: &[GrowthTier] = &[
    GrowthTier { above: 10_000_000, base: 0.5, engagement_weight: 0.3 },
    GrowthTier { above: 1_000_000, base: 1.2, engagement_weight: 0.4 },
    GrowthTier { above: 100_000, base: 2.5, engagement_weight: 0.5 },
    GrowthTier { above: 10_000, base: 4.0, engagement_weight: 0.6 },
    GrowthTier { above: 0, base: 8.0, engagement_weight: 0.8 },
];

pub const MIN_GROWTH_PERCENT: f64 = 0.1;
pub const MAX_GROWTH_PERCENT: f64 = 25.0;

pub fn growth_tier(subscribers: u64) -> GrowthTier {
    GROWTH_TIERS
        .iter()
        .copied()
        .find(|t| subscribers > t.above)
        .unwrap_or(GROWTH_TIERS[GROWTH_TIERS.len() - 1])
}

/// Parameters for the synthetic history: compound monthly growth and the
/// typical monthly views per subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryTier {
    pub above: u64,
    pub monthly_growth: f64,
    pub views_per_subscriber: f64,
}

pub const HISTORY_TIERS: &[HistoryTier] = &[
    HistoryTier { above: 10_000_000, monthly_growth: 0.008, views_per_subscriber: 8.0 },
    HistoryTier { above: 1_000_000, monthly_growth: 0.015, views_per_subscriber: 12.0 },
    HistoryTier { above: 100_000, monthly_growth: 0.025, views_per_subscriber: 18.0 },
    HistoryTier { above: 10_000, monthly_growth: 0.035, views_per_subscriber: 25.0 },
    HistoryTier { above: 0, monthly_growth: 0.05, views_per_subscriber: 35.0 },
];

pub fn history_tier(subscribers: u64) -> HistoryTier {
    HISTORY_TIERS
        .iter()
        .copied()
        .find(|t| subscribers > t.above)
        .unwrap_or(HISTORY_TIERS[HISTORY_TIERS.len() - 1])
}

/// Calendar-month multipliers (January first): post-holiday dip in January,
/// summer peak in July, holiday lift in December.
pub const SEASONAL: [f64; 12] = [0.94, 0.97, 1.0, 1.0, 1.02, 1.05, 1.08, 1.05, 0.98, 1.0, 1.03, 1.06];
