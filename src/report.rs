use crate::derive::{self, DeriveOpts, DerivedStats};
use crate::fields::{self, ParsedStats};
use crate::history::{self, HistoricalPoint, HistoryOpts};
use crate::import::ImportedPoint;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistorySource {
    Synthetic,
    Imported,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelReport {
    pub parsed: ParsedStats,
    pub derived: DerivedStats,
    pub history: Vec<HistoricalPoint>,
    pub history_source: HistorySource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeOpts {
    pub now: DateTime<Utc>,
    pub uploads_per_week: Option<f64>,
}

impl Default for AnalyzeOpts {
    fn default() -> Self {
        Self { now: Utc::now(), uploads_per_week: None }
    }
}

impl AnalyzeOpts {
    fn derive_opts(&self, known_location: Option<&str>) -> DeriveOpts {
        DeriveOpts {
            now: self.now,
            uploads_per_week: self.uploads_per_week,
            location: known_location.map(str::to_string),
        }
    }
}

fn parse_and_derive(raw: &str, known_location: Option<&str>, opts: &AnalyzeOpts) -> (ParsedStats, DerivedStats) {
    let parsed = fields::match_stats(raw);
    let derived = derive::derive(&parsed, &opts.derive_opts(known_location));
    (parsed, derived)
}

/// Text in, report out: match fields, derive metrics, synthesize history.
/// Deterministic for a given `opts.now` and seeded `rng`.
pub fn analyze<R: Rng>(
    raw: &str,
    known_location: Option<&str>,
    opts: &AnalyzeOpts,
    rng: &mut R,
) -> ChannelReport {
    let (parsed, derived) = parse_and_derive(raw, known_location, opts);
    let history = history::synthesize(&parsed, &derived, &HistoryOpts { now: opts.now }, rng);
    ChannelReport { parsed, derived, history, history_source: HistorySource::Synthetic }
}

/// Same as [`analyze`] but charts a user-supplied history instead of a
/// synthetic one. Revenue per month is priced at the channel's CPM rate.
pub fn analyze_with_history(
    raw: &str,
    known_location: Option<&str>,
    opts: &AnalyzeOpts,
    imported: &[ImportedPoint],
) -> ChannelReport {
    let (parsed, derived) = parse_and_derive(raw, known_location, opts);
    let history = imported.iter().map(|p| p.to_historical(derived.cpm_rate)).collect();
    ChannelReport { parsed, derived, history, history_source: HistorySource::Imported }
}

/// Compiles every regex up front.
pub fn prewarm_regexes() {
    crate::markup::prewarm_regexes();
    crate::numeric::prewarm_regexes();
    crate::fields::prewarm_regexes();
    crate::dates::prewarm_regexes();
}
