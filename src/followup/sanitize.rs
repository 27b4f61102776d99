//! Cleanup of follow-up completion replies
//!
//! Models leak reasoning into their replies in several shapes: tagged
//! blocks, stray tags, fenced blocks, and plain-text meta commentary.
//! Everything left after stripping those is joined into a single line.

use regex::Regex;
use std::sync::LazyLock;

/// Reply text meaning "no remark needed"
pub const NO_REMARK_SENTINEL: &str = "NO_ASSUMPTION_MADE";

static TAGGED_BLOCK_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ["reasoning", "thinking", "analysis"]
        .iter()
        .map(|tag| {
            Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>"))
                .expect("valid tagged block regex")
        })
        .collect()
});

static ANY_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]+>").expect("valid tag regex"));

static CODE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("valid code fence regex"));

/// Line prefixes that mark leftover meta commentary (compared lower-cased)
const META_PREFIXES: &[&str] = &[
    "we have",
    "applied filter",
    "result count",
    "assumptions made",
    "so we",
    "according to",
    "the format",
    "use the",
    "that matches",
    "we need to",
    "we should",
];

fn is_meta_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    META_PREFIXES.iter().any(|p| lower.starts_with(p))
        || (lower.contains("behavior") && lower.contains("choose"))
}

/// Remove one layer of matching surrounding quotes
fn strip_quotes(text: &str) -> &str {
    const PAIRS: [(char, char); 4] = [('"', '"'), ('\'', '\''), ('“', '”'), ('‘', '’')];

    for (open, close) in PAIRS {
        if let Some(inner) = text.strip_prefix(open).and_then(|t| t.strip_suffix(close)) {
            return inner.trim();
        }
    }
    text
}

/// Clean a raw follow-up reply; `None` when nothing user-facing remains
pub fn sanitize(raw: &str) -> Option<String> {
    let mut text = raw.to_string();
    for re in TAGGED_BLOCK_RES.iter() {
        text = re.replace_all(&text, "").into_owned();
    }
    text = ANY_TAG_RE.replace_all(&text, "").into_owned();
    text = CODE_FENCE_RE.replace_all(&text, "").into_owned();

    let joined = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_meta_line(line))
        .collect::<Vec<_>>()
        .join(" ");

    let cleaned = strip_quotes(joined.trim()).trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// True when the cleaned text asks for no follow-up
pub fn is_no_remark(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains(&NO_REMARK_SENTINEL.to_lowercase()) || lower.contains("no assumptions")
}

/// Caller-visible follow-up message for a raw reply
pub fn follow_up_message(raw: &str) -> Option<String> {
    sanitize(raw).filter(|text| !is_no_remark(text))
}
