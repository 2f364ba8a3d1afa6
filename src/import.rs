use crate::history::HistoricalPoint;
use crate::numeric;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("no data: expected a header row followed by monthly rows")]
    Empty,
    #[error("Header must include Month, Subscribers, Views")]
    MissingColumns { missing: Vec<&'static str> },
    #[error("row {line} is missing the {column} column")]
    ShortRow { line: usize, column: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedPoint {
    pub month: String,
    pub subscribers: u64,
    pub views: u64,
    pub engagement: Option<f64>,
    pub retention: Option<f64>,
    pub ctr: Option<f64>,
}

impl ImportedPoint {
    pub fn to_historical(&self, cpm_rate: f64) -> HistoricalPoint {
        HistoricalPoint {
            month: self.month.clone(),
            subscribers: self.subscribers,
            views: self.views,
            revenue: ((self.views as f64 / 1000.0 * cpm_rate) * 100.0).round() / 100.0,
        }
    }
}

static RE_CELL_SEP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[,\t]").unwrap()
});

#[derive(Debug)]
struct Columns {
    month: usize,
    subscribers: usize,
    views: usize,
    engagement: Option<usize>,
    retention: Option<usize>,
    ctr: Option<usize>,
}

fn locate(headers: &[String], needle: &str) -> Option<usize> {
    headers.iter().position(|h| h.contains(needle))
}

fn resolve_columns(header: &str) -> Result<Columns, ImportError> {
    let headers: Vec<String> = RE_CELL_SEP
        .split(header)
        .map(|h| h.trim().to_lowercase())
        .collect();
    let month = locate(&headers, "month");
    let subscribers = locate(&headers, "subscribers");
    let views = locate(&headers, "views");
    match (month, subscribers, views) {
        (Some(month), Some(subscribers), Some(views)) => Ok(Columns {
            month,
            subscribers,
            views,
            engagement: locate(&headers, "engagement"),
            retention: locate(&headers, "retention"),
            ctr: locate(&headers, "ctr"),
        }),
        _ => {
            let missing = [("Month", month), ("Subscribers", subscribers), ("Views", views)]
                .into_iter()
                .filter(|(_, idx)| idx.is_none())
                .map(|(name, _)| name)
                .collect();
            Err(ImportError::MissingColumns { missing })
        }
    }
}

/// Parses a user-supplied monthly history table:
/// `Month, Subscribers, Views[, Engagement, Retention, CTR]`, comma or tab
/// separated, columns found by case-insensitive header substring.
///
/// Unlike the text matcher this fails on a malformed header or a short row.
pub fn parse_history_csv(input: &str) -> Result<Vec<ImportedPoint>, ImportError> {
    let mut lines = input
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty());
    let (_, header) = lines.next().ok_or(ImportError::Empty)?;
    let cols = resolve_columns(header)?;

    let mut out = Vec::new();
    for (idx, line) in lines {
        let cells: Vec<&str> = RE_CELL_SEP.split(line).map(str::trim).collect();
        let cell = |i: usize, column: &'static str| {
            cells
                .get(i)
                .copied()
                .filter(|c| !c.is_empty())
                .ok_or(ImportError::ShortRow { line: idx + 1, column })
        };
        let optional = |i: Option<usize>| i.and_then(|i| cells.get(i)).and_then(|c| numeric::parse_percent(c));
        out.push(ImportedPoint {
            month: cell(cols.month, "Month")?.to_string(),
            subscribers: numeric::normalize(cell(cols.subscribers, "Subscribers")?),
            views: numeric::normalize(cell(cols.views, "Views")?),
            engagement: optional(cols.engagement),
            retention: optional(cols.retention),
            ctr: optional(cols.ctr),
        });
    }
    tracing::debug!(rows = out.len(), "imported history");
    Ok(out)
}
