//! Plain-text extraction from page HTML.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref COMMENT: Regex = Regex::new(r"(?s)<!--.*?-->").unwrap();
    static ref SCRIPT: Regex = Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap();
    static ref STYLE: Regex = Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").unwrap();
    static ref HEADING: Regex = Regex::new(r"(?is)<h[1-6]\b[^>]*>(.*?)</h[1-6]\s*>").unwrap();
    static ref TAG: Regex = Regex::new(r"(?s)<[^>]*>").unwrap();
    static ref ENTITY: Regex = Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Text content of an HTML fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedContent {
    /// All visible text, whitespace collapsed.
    pub content: String,
    /// Heading texts in document order, without duplicates.
    pub headings: Vec<String>,
}

/// Extract the visible text and headings from an HTML fragment.
///
/// Script and style elements and comments are dropped. Tags become
/// whitespace, common entities are decoded and runs of whitespace collapse
/// to a single space.
pub fn extract(html: &str) -> ExtractedContent {
    let html = COMMENT.replace_all(html, " ");
    let html = SCRIPT.replace_all(&html, " ");
    let html = STYLE.replace_all(&html, " ");

    let mut headings: Vec<String> = Vec::new();
    for captures in HEADING.captures_iter(&html) {
        let text = to_text(&captures[1]);
        if !text.is_empty() && !headings.contains(&text) {
            headings.push(text);
        }
    }

    ExtractedContent {
        content: to_text(&html),
        headings,
    }
}

fn to_text(html: &str) -> String {
    let stripped = TAG.replace_all(html, " ");
    let decoded = ENTITY.replace_all(&stripped, |captures: &Captures| {
        decode_entity(&captures[1]).unwrap_or_else(|| captures[0].to_string())
    });
    WHITESPACE.replace_all(&decoded, " ").trim().to_string()
}

fn decode_entity(entity: &str) -> Option<String> {
    let decoded = match entity {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "euro" => '€',
        "hellip" => '…',
        "ndash" => '–',
        "mdash" => '—',
        _ => {
            let hex = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"));
            let code = if let Some(hex) = hex {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                entity.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)?
        }
    };
    Some(decoded.to_string())
}
