use once_cell::sync::Lazy;
use regex::Regex;

// Emphasis markers the upstream generator sprinkles around labels and values:
// **bold**, *italic*, `code`, ~~strike~~
static RE_EMPHASIS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[*`~]+").unwrap()
});

// Underscore emphasis only at token edges so handles like @my_channel survive
static RE_UNDERSCORE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<pre>^|[\s:(])_+|_+(?P<post>[\s:,.)]|$)").unwrap()
});

// Leading list bullets and heading marks: "- ", "• ", "1. ", "## "
static RE_LEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:#{1,6}\s+|[-+•·]\s+|\d{1,2}[.)]\s+)").unwrap()
});

static RE_SPACES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s{2,}").unwrap()
});

/// Removes emphasis markers and collapses runs of whitespace. Leaves `@`, `%`,
/// `/` and digits untouched so values survive intact.
pub fn strip_markup(input: &str) -> String {
    let s = RE_EMPHASIS.replace_all(input, "");
    let s = RE_UNDERSCORE.replace_all(&s, "${pre}${post}");
    let s = RE_SPACES.replace_all(&s, " ");
    s.trim().to_string()
}

/// Strips the bullet or heading prefix of a line before label matching.
pub fn strip_line_leader(line: &str) -> &str {
    match RE_LEADER.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

/// Full clean-up for an extracted value: markup removed and trailing
/// sentence punctuation dropped ("1.2M." -> "1.2M").
pub fn clean_value(input: &str) -> String {
    let s = strip_markup(input);
    s.trim_end_matches(['.', ',', ';', '!']).trim().to_string()
}

pub fn prewarm_regexes() {
    Lazy::force(&RE_EMPHASIS);
    Lazy::force(&RE_UNDERSCORE);
    Lazy::force(&RE_LEADER);
    Lazy::force(&RE_SPACES);
}
