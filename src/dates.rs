use crate::markup;
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

const DAYS_PER_YEAR: f64 = 365.25;

static RE_ORDINAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").unwrap()
});

static RE_PAREN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\([^)]*\)").unwrap()
});

static RE_ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").unwrap()
});

static RE_MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?\s+((?:19|20)\d{2})\b").unwrap()
});

static RE_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b((?:19|20)\d{2})\b").unwrap()
});

const FULL_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
];

/// Parses the join date forms the generator tends to emit: ISO dates,
/// "Jan 15, 2010", "15th January 2010", "March 2012", a bare year. Partial
/// dates resolve to the first day of the period.
pub fn parse_join_date(input: &str) -> Option<NaiveDate> {
    let cleaned = markup::clean_value(input);
    let cleaned = RE_PAREN.replace_all(&cleaned, "");
    let cleaned = RE_ORDINAL.replace_all(&cleaned, "$1");
    let s = cleaned.trim().trim_start_matches("on ").trim_start_matches("On ").trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    // %b/%B accept both abbreviated and full month names when parsing
    for fmt in FULL_DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    if let Some(m) = RE_ISO_DATE.find(s) {
        if let Ok(d) = NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d") {
            return Some(d);
        }
    }
    if let Some(caps) = RE_MONTH_YEAR.captures(s) {
        let month = &caps[1][..3];
        let candidate = format!("1 {} {}", month, &caps[2]);
        if let Ok(d) = NaiveDate::parse_from_str(&candidate, "%d %b %Y") {
            return Some(d);
        }
    }
    if let Some(caps) = RE_YEAR.captures(s) {
        if let Ok(year) = caps[1].parse::<i32>() {
            return NaiveDate::from_ymd_opt(year, 1, 1);
        }
    }
    None
}

/// Years between `joined` and `now`, never negative.
pub fn age_in_years(joined: NaiveDate, now: DateTime<Utc>) -> f64 {
    let days = (now.date_naive() - joined).num_days();
    (days as f64 / DAYS_PER_YEAR).max(0.0)
}

pub fn prewarm_regexes() {
    Lazy::force(&RE_ORDINAL);
    Lazy::force(&RE_PAREN);
    Lazy::force(&RE_ISO_DATE);
    Lazy::force(&RE_MONTH_YEAR);
    Lazy::force(&RE_YEAR);
}
