use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// The minimal post record shown in the listing. Every other field of the
/// source document is dropped when a page is mapped into this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub uid: Option<String>,
    pub first_publication_date: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

/// One mapped page of the listing. `next_page` is the opaque cursor URL
/// supplied by the content source; `None` means the listing is exhausted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPage {
    pub results: Vec<PostSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
}

const MONTHS_PT_BR: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Format a publication timestamp as `dd MMM yyyy` with pt-BR month
/// abbreviations, e.g. "15 mar 2021". Returns `None` when the raw value
/// does not parse as a timestamp.
pub fn format_publication_date(raw: &str) -> Option<String> {
    // Prismic emits RFC 3339 as well as "+0000"-style offsets.
    let date = chrono::DateTime::parse_from_rfc3339(raw)
        .or_else(|_| chrono::DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .ok()?;

    Some(format!(
        "{:02} {} {}",
        date.day(),
        MONTHS_PT_BR[date.month0() as usize],
        date.year()
    ))
}
