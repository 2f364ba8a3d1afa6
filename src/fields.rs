use crate::markup;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    ChannelName,
    Subscribers,
    TotalViews,
    TotalVideos,
    JoinedDate,
    Location,
    EngagementRate,
    LikeToViewRatio,
    CommentToViewRatio,
    ViralScore,
    ContentScore,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::ChannelName,
        Field::Subscribers,
        Field::TotalViews,
        Field::TotalVideos,
        Field::JoinedDate,
        Field::Location,
        Field::EngagementRate,
        Field::LikeToViewRatio,
        Field::CommentToViewRatio,
        Field::ViralScore,
        Field::ContentScore,
    ];

    pub fn default_value(self) -> &'static str {
        match self {
            Field::ChannelName => "Unknown Channel",
            Field::Subscribers | Field::TotalViews | Field::TotalVideos => "0",
            Field::JoinedDate | Field::Location => "Unknown",
            Field::EngagementRate
            | Field::LikeToViewRatio
            | Field::CommentToViewRatio
            | Field::ViralScore
            | Field::ContentScore => "N/A",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Field::ChannelName => "channel_name",
            Field::Subscribers => "subscribers",
            Field::TotalViews => "total_views",
            Field::TotalVideos => "total_videos",
            Field::JoinedDate => "joined_date",
            Field::Location => "location",
            Field::EngagementRate => "engagement_rate",
            Field::LikeToViewRatio => "like_to_view_ratio",
            Field::CommentToViewRatio => "comment_to_view_ratio",
            Field::ViralScore => "viral_score",
            Field::ContentScore => "content_score",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// An extracted value together with whether the text actually supplied it.
/// `present == false` means nothing matched and `value` holds the field default,
/// which keeps "the text said Unknown" apart from "no match".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    pub value: String,
    pub present: bool,
}

impl FieldValue {
    pub fn found(value: impl Into<String>) -> Self {
        Self { value: value.into(), present: true }
    }

    pub fn defaulted(field: Field) -> Self {
        Self { value: field.default_value().to_string(), present: false }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl PartialEq<&str> for FieldValue {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedStats {
    pub channel_name: FieldValue,
    pub subscribers: FieldValue,
    pub total_views: FieldValue,
    pub total_videos: FieldValue,
    pub joined_date: FieldValue,
    pub location: FieldValue,
    pub engagement_rate: FieldValue,
    pub like_to_view_ratio: FieldValue,
    pub comment_to_view_ratio: FieldValue,
    pub viral_score: FieldValue,
    pub content_score: FieldValue,
}

impl Default for ParsedStats {
    fn default() -> Self {
        Self {
            channel_name: FieldValue::defaulted(Field::ChannelName),
            subscribers: FieldValue::defaulted(Field::Subscribers),
            total_views: FieldValue::defaulted(Field::TotalViews),
            total_videos: FieldValue::defaulted(Field::TotalVideos),
            joined_date: FieldValue::defaulted(Field::JoinedDate),
            location: FieldValue::defaulted(Field::Location),
            engagement_rate: FieldValue::defaulted(Field::EngagementRate),
            like_to_view_ratio: FieldValue::defaulted(Field::LikeToViewRatio),
            comment_to_view_ratio: FieldValue::defaulted(Field::CommentToViewRatio),
            viral_score: FieldValue::defaulted(Field::ViralScore),
            content_score: FieldValue::defaulted(Field::ContentScore),
        }
    }
}

impl ParsedStats {
    pub fn get(&self, field: Field) -> &FieldValue {
        match field {
            Field::ChannelName => &self.channel_name,
            Field::Subscribers => &self.subscribers,
            Field::TotalViews => &self.total_views,
            Field::TotalVideos => &self.total_videos,
            Field::JoinedDate => &self.joined_date,
            Field::Location => &self.location,
            Field::EngagementRate => &self.engagement_rate,
            Field::LikeToViewRatio => &self.like_to_view_ratio,
            Field::CommentToViewRatio => &self.comment_to_view_ratio,
            Field::ViralScore => &self.viral_score,
            Field::ContentScore => &self.content_score,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut FieldValue {
        match field {
            Field::ChannelName => &mut self.channel_name,
            Field::Subscribers => &mut self.subscribers,
            Field::TotalViews => &mut self.total_views,
            Field::TotalVideos => &mut self.total_videos,
            Field::JoinedDate => &mut self.joined_date,
            Field::Location => &mut self.location,
            Field::EngagementRate => &mut self.engagement_rate,
            Field::LikeToViewRatio => &mut self.like_to_view_ratio,
            Field::CommentToViewRatio => &mut self.comment_to_view_ratio,
            Field::ViralScore => &mut self.viral_score,
            Field::ContentScore => &mut self.content_score,
        }
    }

    pub fn is_present(&self, field: Field) -> bool {
        self.get(field).present
    }

    /// Fields that fell back to their default.
    pub fn missing(&self) -> Vec<Field> {
        Field::ALL.into_iter().filter(|f| !self.is_present(*f)).collect()
    }
}

/// Shape of the value token a label-anchored rule captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// Free text up to end of line (names, dates, places).
    Text,
    /// Counts with separators and an optional unit: "45,600,000", "1.2M", "3 million".
    Count,
    /// Rates and scores: "4.5%", "0.03", "8.5/10".
    Rate,
}

impl ValueShape {
    fn pattern(self) -> &'static str {
        match self {
            ValueShape::Text => r"(?P<value>.+)",
            ValueShape::Count => r"(?P<value>\d[\d.,]*(?:\s*(?:thousand|million|billion|[kmb])\b)?)",
            ValueShape::Rate => r"(?P<value>\d[\d.,]*\s*%?(?:\s*/\s*\d+(?:\.\d+)?)?)",
        }
    }
}

/// One row of the extraction table. `labels` are tried in order, so the more
/// specific spellings come first. `keywords` drive the generic colon-split
/// fallback: regex fragments that must start at a word boundary of the label,
/// so "view" never fires inside "Overview".
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: Field,
    pub shape: ValueShape,
    pub labels: &'static [&'static str],
    pub keywords: &'static [&'static str],
}

pub const RULES: &[FieldRule] = &[
    FieldRule {
        field: Field::ChannelName,
        shape: ValueShape::Text,
        labels: &["Channel Name", "Channel Title", "Channel", "Name", "Title"],
        keywords: &[r"channel\s+(?:name|title)", r"name\b"],
    },
    FieldRule {
        field: Field::Subscribers,
        shape: ValueShape::Count,
        labels: &["Subscriber Count", "Total Subscribers", "Subscribers", "Subscriber", "Subs"],
        keywords: &["subscri"],
    },
    FieldRule {
        field: Field::TotalViews,
        shape: ValueShape::Count,
        labels: &["All-time Views", "All Time Views", "Total View Count", "Total Views", "View Count", "Views"],
        keywords: &[r"views?\b"],
    },
    FieldRule {
        field: Field::TotalVideos,
        shape: ValueShape::Count,
        labels: &["Total Videos", "Number of Videos", "Video Count", "Videos Uploaded", "Total Uploads", "Uploads", "Videos"],
        keywords: &[r"videos?\b", r"uploads?\b"],
    },
    FieldRule {
        field: Field::JoinedDate,
        shape: ValueShape::Text,
        labels: &["Joined Date", "Join Date", "Date Joined", "Channel Created", "Creation Date", "Created On", "Created", "Joined", "Started"],
        keywords: &["join", r"creat(?:ed|ion|e)\b", r"since\b"],
    },
    FieldRule {
        field: Field::Location,
        shape: ValueShape::Text,
        labels: &["Location", "Country", "Region"],
        keywords: &["locat", "countr"],
    },
    FieldRule {
        field: Field::EngagementRate,
        shape: ValueShape::Rate,
        labels: &["Average Engagement Rate", "Avg Engagement Rate", "Engagement Rate", "Engagement"],
        keywords: &["engag"],
    },
    FieldRule {
        field: Field::LikeToViewRatio,
        shape: ValueShape::Rate,
        labels: &["Like-to-View Ratio", "Like to View Ratio", "Like/View Ratio", "Likes to Views", "Like Ratio"],
        keywords: &[r"likes?[\s-]*(?:to|/|per)\b", r"like\s+ratio"],
    },
    FieldRule {
        field: Field::CommentToViewRatio,
        shape: ValueShape::Rate,
        labels: &["Comment-to-View Ratio", "Comment to View Ratio", "Comment/View Ratio", "Comments to Views", "Comment Ratio"],
        keywords: &[r"comments?[\s-]*(?:to|/|per)\b", r"comment\s+ratio"],
    },
    FieldRule {
        field: Field::ViralScore,
        shape: ValueShape::Rate,
        labels: &["Viral Score", "Virality Score", "Virality"],
        keywords: &["viral"],
    },
    FieldRule {
        field: Field::ContentScore,
        shape: ValueShape::Rate,
        labels: &["Content Quality Score", "Content Score", "Content Quality"],
        keywords: &[r"content\s+(?:score|quality)"],
    },
];

/// Order in which the colon-split fallback tests keywords. Ratio fields go
/// before views so "Like-to-View Ratio" is never read as a view count, and the
/// channel name goes last so "Channel Created" lands on the join date.
const FALLBACK_ORDER: [Field; 11] = [
    Field::LikeToViewRatio,
    Field::CommentToViewRatio,
    Field::EngagementRate,
    Field::ViralScore,
    Field::ContentScore,
    Field::Subscribers,
    Field::TotalVideos,
    Field::TotalViews,
    Field::JoinedDate,
    Field::Location,
    Field::ChannelName,
];

struct CompiledRule {
    field: Field,
    label_res: Vec<Regex>,
    keyword_re: Regex,
}

fn label_pattern(label: &str) -> String {
    // "All-time Views" also accepts "All time Views" and "Alltime Views"
    label
        .split([' ', '-'])
        .map(regex::escape)
        .join(r"[\s-]?")
}

static COMPILED: Lazy<Vec<CompiledRule>> = Lazy::new(|| {
    RULES
        .iter()
        .map(|rule| CompiledRule {
            field: rule.field,
            label_res: rule
                .labels
                .iter()
                .map(|label| {
                    let pat = format!(
                        r"(?i)^{}\s*(?:\([^)]*\))?\s*:\s*{}",
                        label_pattern(label),
                        rule.shape.pattern()
                    );
                    Regex::new(&pat).unwrap()
                })
                .collect(),
            keyword_re: Regex::new(&format!(r"(?i)\b(?:{})", rule.keywords.join("|"))).unwrap(),
        })
        .collect()
});

static RE_HANDLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[\s(:])(@[A-Za-z0-9_-]+)").unwrap()
});

fn compiled(field: Field) -> Option<&'static CompiledRule> {
    COMPILED.iter().find(|r| r.field == field)
}

fn prepare_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| markup::strip_line_leader(&markup::strip_markup(l)).to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

/// Extracts the eleven channel fields from free-form text. Never fails:
/// anything not found gets its documented default.
///
/// Resolution order per field:
/// 1. label-anchored rules, label spellings in table order, first line wins;
/// 2. colon-split fallback on keyword, each line claimed by at most one field;
/// 3. for the channel name only, the first `@handle` in the text.
pub fn match_stats(raw: &str) -> ParsedStats {
    let lines = prepare_lines(raw);
    let mut out = ParsedStats::default();

    for rule in COMPILED.iter() {
        if let Some((label_idx, line_idx, value)) = match_labels(rule, &lines) {
            tracing::trace!(field = %rule.field, label_idx, line = line_idx, "label match");
            *out.get_mut(rule.field) = FieldValue::found(value);
        }
    }

    for (line_idx, line) in lines.iter().enumerate() {
        let Some((label, rest)) = line.split_once(':') else { continue };
        let label = label.to_lowercase();
        let Some(field) = fallback_field(&label) else { continue };
        if out.is_present(field) {
            continue;
        }
        let value = markup::clean_value(rest);
        if value.is_empty() {
            continue;
        }
        tracing::trace!(field = %field, line = line_idx, "keyword fallback match");
        *out.get_mut(field) = FieldValue::found(value);
    }

    if !out.channel_name.present {
        if let Some(handle) = lines
            .iter()
            .find_map(|l| RE_HANDLE.captures(l).map(|c| c[1].to_string()))
        {
            tracing::trace!(handle = %handle, "channel name recovered from handle");
            out.channel_name = FieldValue::found(handle);
        }
    }

    let missing = out.missing();
    if !missing.is_empty() {
        tracing::debug!(?missing, "fields defaulted");
    }
    out
}

fn match_labels(rule: &CompiledRule, lines: &[String]) -> Option<(usize, usize, String)> {
    for (label_idx, re) in rule.label_res.iter().enumerate() {
        for (line_idx, line) in lines.iter().enumerate() {
            if let Some(caps) = re.captures(line) {
                let value = markup::clean_value(&caps["value"]);
                if !value.is_empty() {
                    return Some((label_idx, line_idx, value));
                }
            }
        }
    }
    None
}

fn fallback_field(label_lower: &str) -> Option<Field> {
    FALLBACK_ORDER.into_iter().find(|field| {
        compiled(*field)
            .map(|r| r.keyword_re.is_match(label_lower))
            .unwrap_or(false)
    })
}

pub fn prewarm_regexes() {
    Lazy::force(&COMPILED);
    Lazy::force(&RE_HANDLE);
}
