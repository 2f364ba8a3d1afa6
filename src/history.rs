use crate::derive::DerivedStats;
use crate::fields::ParsedStats;
use crate::numeric;
use crate::rates;
use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const SERIES_LEN: usize = 6;

/// Half-width of the multiplicative noise applied to each synthetic month.
pub const VARIANCE: f64 = 0.05;

const MIN_SUBSCRIBERS: u64 = 1;
const MIN_VIEWS: u64 = 10;
const MIN_REVENUE: f64 = 0.01;

/// Revenue lift per month after the third, as monetization matures.
const LATE_MONTH_BOOST: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub month: String,
    pub subscribers: u64,
    pub views: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryOpts {
    pub now: DateTime<Utc>,
}

impl Default for HistoryOpts {
    fn default() -> Self {
        Self { now: Utc::now() }
    }
}

/// "May 2026" style label for the month `back` months before `now`.
pub fn month_label(now: DateTime<Utc>, back: u32) -> (String, u32) {
    let date = now
        .date_naive()
        .with_day(1)
        .and_then(|d| d.checked_sub_months(Months::new(back)))
        .unwrap_or(NaiveDate::MIN);
    (date.format("%b %Y").to_string(), date.month0())
}

fn jitter<R: Rng>(rng: &mut R) -> f64 {
    1.0 + rng.random_range(-VARIANCE..=VARIANCE)
}

fn round_cents(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Projects the current totals backwards into a six-month series, oldest first.
///
/// Earlier months are `current * (1 + g)^-(5 - i)` shaped by a seasonal
/// multiplier and +-5% noise from `rng`; the final month carries the current
/// subscriber count unchanged. The output is a plausible chart, not history.
pub fn synthesize<R: Rng>(
    parsed: &ParsedStats,
    derived: &DerivedStats,
    opts: &HistoryOpts,
    rng: &mut R,
) -> Vec<HistoricalPoint> {
    let current = numeric::normalize(parsed.subscribers.as_str());
    let tier = rates::history_tier(current);
    let last = (SERIES_LEN - 1) as u32;

    let series: Vec<HistoricalPoint> = (0..SERIES_LEN as u32)
        .map(|i| {
            let back = last - i;
            let (month, month0) = month_label(opts.now, back);
            let seasonal = rates::SEASONAL[month0 as usize];

            let subscribers = if back == 0 {
                current
            } else {
                let compound = (1.0 + tier.monthly_growth).powi(-(back as i32));
                let projected = (current as f64 * compound * seasonal * jitter(rng)).round();
                (projected as u64).max(MIN_SUBSCRIBERS)
            };

            let views_ratio = tier.views_per_subscriber * seasonal * jitter(rng);
            let views = ((subscribers as f64 * views_ratio).round() as u64).max(MIN_VIEWS);

            let boost = 1.0 + LATE_MONTH_BOOST * i.saturating_sub(2) as f64;
            let revenue = round_cents(views as f64 / 1000.0 * derived.cpm_rate * boost).max(MIN_REVENUE);

            HistoricalPoint { month, subscribers, views, revenue }
        })
        .collect();

    tracing::debug!(
        current,
        growth = tier.monthly_growth,
        first = series.first().map(|p| p.subscribers),
        "synthesized history"
    );
    series
}
