use crate::markup;
use once_cell::sync::Lazy;
use regex::Regex;

// First number in the text with an optional unit suffix. The suffix must end on
// a word boundary so "5 members" is not read as 5M.
static RE_QUANTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d[\d,]*(?:\.\d+)?)\s*(?:(thousand|million|billion|k|m|b)\b)?").unwrap()
});

static RE_DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"-?\d+(?:\.\d+)?").unwrap()
});

static RE_SCORE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(?:/\s*(\d+(?:\.\d+)?))?").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Thousand,
    Million,
    Billion,
}

impl Unit {
    fn from_suffix(s: &str) -> Option<Unit> {
        match s.to_ascii_lowercase().as_str() {
            "k" | "thousand" => Some(Unit::Thousand),
            "m" | "million" => Some(Unit::Million),
            "b" | "billion" => Some(Unit::Billion),
            _ => None,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            Unit::Thousand => 1_000.0,
            Unit::Million => 1_000_000.0,
            Unit::Billion => 1_000_000_000.0,
        }
    }
}

/// Converts a human-formatted count ("1,234", "1.2M", "**3.4k**", "2B subscribers")
/// into an integer. Returns 0 when no digit can be found.
///
/// With a unit suffix the fractional part participates and the product is
/// rounded; without one the fractional part is dropped.
pub fn normalize(input: &str) -> u64 {
    let cleaned = markup::strip_markup(input);
    let Some(caps) = RE_QUANTITY.captures(&cleaned) else {
        return 0;
    };
    let digits = caps[1].replace(',', "");
    match caps.get(2).and_then(|m| Unit::from_suffix(m.as_str())) {
        Some(unit) => {
            let base: f64 = digits.parse().unwrap_or(0.0);
            let value = (base * unit.multiplier()).round();
            if value.is_finite() && value > 0.0 { value as u64 } else { 0 }
        }
        None => {
            let int_part = digits.split('.').next().unwrap_or("");
            int_part
                .parse::<u64>()
                .unwrap_or_else(|_| int_part.parse::<f64>().map(|f| f as u64).unwrap_or(0))
        }
    }
}

const COMPACT_UNITS: [(f64, &str); 3] = [(1e3, "K"), (1e6, "M"), (1e9, "B")];

/// Short display form: 999, 1.2K, 3.4M, 2B. A value that rounds up to 1000 of
/// one unit is shown in the next one, so 999,960 is "1M".
pub fn format_compact(n: u64) -> String {
    if n < 1_000 {
        return n.to_string();
    }
    let mut idx = match n {
        1_000..=999_999 => 0,
        1_000_000..=999_999_999 => 1,
        _ => 2,
    };
    let mut s = format!("{:.1}", n as f64 / COMPACT_UNITS[idx].0);
    if idx + 1 < COMPACT_UNITS.len() && s.parse::<f64>().is_ok_and(|v| v >= 1_000.0) {
        idx += 1;
        s = format!("{:.1}", n as f64 / COMPACT_UNITS[idx].0);
    }
    if s.ends_with(".0") {
        s.truncate(s.len() - 2);
    }
    format!("{s}{}", COMPACT_UNITS[idx].1)
}

/// Thousands-separated form: 1234567 -> "1,234,567".
pub fn format_grouped(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Reads the first decimal from a rate such as "4.5%" or "~3.2 percent".
pub fn parse_percent(input: &str) -> Option<f64> {
    let cleaned = markup::strip_markup(input);
    RE_DECIMAL
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Reads a score and rescales it to a 0-10 range: "8.5/10" -> 8.5, "85/100" -> 8.5.
pub fn parse_score(input: &str) -> Option<f64> {
    let cleaned = markup::strip_markup(input);
    let caps = RE_SCORE.captures(&cleaned)?;
    let value: f64 = caps[1].parse().ok()?;
    match caps.get(2).and_then(|d| d.as_str().parse::<f64>().ok()) {
        Some(den) if den > 0.0 => Some(value * 10.0 / den),
        Some(_) => None,
        None => Some(value),
    }
}

pub fn prewarm_regexes() {
    Lazy::force(&RE_QUANTITY);
    Lazy::force(&RE_DECIMAL);
    Lazy::force(&RE_SCORE);
}
