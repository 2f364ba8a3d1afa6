use crate::dates;
use crate::fields::ParsedStats;
use crate::numeric;
use crate::rates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Weeks per month used to turn a weekly upload cadence into a monthly one.
pub const WEEKS_PER_MONTH: f64 = 4.33;
pub const DEFAULT_UPLOADS_PER_WEEK: f64 = 2.0;

/// Per-video view volume at which the engagement bonus saturates.
const BONUS_VIEWS_CAP: f64 = 10_000.0;
const BONUS_MAX: f64 = 0.3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeriveOpts {
    pub now: DateTime<Utc>,
    /// Known upload cadence; `None` assumes two videos a week.
    pub uploads_per_week: Option<f64>,
    /// Overrides the parsed location for the CPM lookup when set.
    pub location: Option<String>,
}

impl Default for DeriveOpts {
    fn default() -> Self {
        Self { now: Utc::now(), uploads_per_week: None, location: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub subscribers: u64,
    pub total_views: u64,
    pub total_videos: u64,
    pub avg_views_per_video: u64,
    pub estimated_monthly_revenue: u64,
    pub uploads_per_week: f64,
    pub cpm_rate: f64,
    pub channel_age_years: f64,
    /// False when the join date could not be read; `channel_age_years` is then 0.
    pub age_known: bool,
    pub growth_rate_percent: f64,
    pub engagement_rate_percent: Option<f64>,
    pub viral_score: Option<f64>,
    pub content_score: Option<f64>,
}

pub fn derive(parsed: &ParsedStats, opts: &DeriveOpts) -> DerivedStats {
    let subscribers = numeric::normalize(parsed.subscribers.as_str());
    let total_views = numeric::normalize(parsed.total_views.as_str());
    let total_videos = numeric::normalize(parsed.total_videos.as_str());

    let avg_views_per_video = avg_views(total_views, total_videos);
    let uploads_per_week = opts
        .uploads_per_week
        .filter(|u| u.is_finite() && *u > 0.0)
        .unwrap_or(DEFAULT_UPLOADS_PER_WEEK);
    let location = effective_location(parsed, opts.location.as_deref());
    let cpm_rate = rates::cpm_rate(location);
    let estimated_monthly_revenue = if total_views > 0 && total_videos > 0 {
        monthly_revenue(avg_views_per_video, uploads_per_week, cpm_rate)
    } else {
        0
    };

    let (channel_age_years, age_known) = match dates::parse_join_date(parsed.joined_date.as_str()) {
        Some(joined) => (dates::age_in_years(joined, opts.now), true),
        None => {
            tracing::debug!(joined = %parsed.joined_date, "join date unreadable; age unknown");
            (0.0, false)
        }
    };

    let engagement_rate_percent = numeric::parse_percent(parsed.engagement_rate.as_str());
    let growth_rate_percent = growth_rate(subscribers, engagement_rate_percent.unwrap_or(0.0));

    DerivedStats {
        subscribers,
        total_views,
        total_videos,
        avg_views_per_video,
        estimated_monthly_revenue,
        uploads_per_week,
        cpm_rate,
        channel_age_years,
        age_known,
        growth_rate_percent,
        engagement_rate_percent,
        viral_score: numeric::parse_score(parsed.viral_score.as_str()),
        content_score: numeric::parse_score(parsed.content_score.as_str()),
    }
}

/// The location that prices views: an explicit override if non-blank,
/// otherwise whatever the text said.
pub fn effective_location<'a>(parsed: &'a ParsedStats, known: Option<&'a str>) -> &'a str {
    match known.map(str::trim) {
        Some(k) if !k.is_empty() => k,
        _ => parsed.location.as_str(),
    }
}

pub fn avg_views(total_views: u64, total_videos: u64) -> u64 {
    if total_videos == 0 || total_views == 0 {
        return 0;
    }
    (total_views as f64 / total_videos as f64).round() as u64
}

/// CPM model: monthly views from cadence, priced at the regional rate, with a
/// bonus of up to 30% that scales with per-video reach.
pub fn monthly_revenue(avg_views_per_video: u64, uploads_per_week: f64, cpm_rate: f64) -> u64 {
    let avg = avg_views_per_video as f64;
    let monthly_views = avg * uploads_per_week * WEEKS_PER_MONTH;
    let base = monthly_views / 1000.0 * cpm_rate;
    let bonus = 1.0 + (avg / BONUS_VIEWS_CAP).min(1.0) * BONUS_MAX;
    let revenue = (base * bonus).round();
    if revenue.is_finite() && revenue > 0.0 { revenue as u64 } else { 0 }
}

/// Monthly growth estimate in percent, tiered by channel size and nudged by
/// engagement, clamped to [0.1, 25].
pub fn growth_rate(subscribers: u64, engagement_percent: f64) -> f64 {
    let tier = rates::growth_tier(subscribers);
    let engagement = if engagement_percent.is_finite() { engagement_percent } else { 0.0 };
    (tier.base + engagement * tier.engagement_weight)
        .clamp(rates::MIN_GROWTH_PERCENT, rates::MAX_GROWTH_PERCENT)
}
