// src/query.rs
//
// Read-side helpers the page renderers use on the merged document.
// Pure functions; nothing here touches the network or the state.

use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use serde_json::Value;

use crate::document::{SiteDocument, is_truthy};

/// Filter value meaning "no filter".
pub const ALL: &str = "all";

/* ---------------- Organization ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HeroStats {
    pub served: u64,
    pub years: u64,
    pub locations: u64,
}

impl Default for HeroStats {
    fn default() -> Self {
        Self { served: 5000, years: 10, locations: 8 }
    }
}

/// `organization.stats`; each figure that is absent or unreadable takes its
/// built-in value on its own.
pub fn hero_stats(doc: &SiteDocument) -> HeroStats {
    let defaults = HeroStats::default();
    let Some(stats) = doc
        .category("organization")
        .and_then(|org| org.get("stats"))
        .filter(|v| is_truthy(v))
    else {
        return defaults;
    };

    HeroStats {
        served: stat(stats, "served").unwrap_or(defaults.served),
        years: stat(stats, "years").unwrap_or(defaults.years),
        locations: stat(stats, "locations").unwrap_or(defaults.locations),
    }
}

/// `5000`, `5000.0`, `"5000"` and `"5,000+"` all read as 5000.
fn stat(stats: &Value, key: &str) -> Option<u64> {
    match stats.get(key)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)),
        Value::String(text) => text.trim().trim_end_matches('+').replace(',', "").parse().ok(),
        _ => None,
    }
}

/* ---------------- News ---------------- */

/// First `n` news entries, in document order.
pub fn latest_news(doc: &SiteDocument, n: usize) -> &[Value] {
    let news = doc.items("news");
    &news[..news.len().min(n)]
}

pub fn news_by_category<'a>(doc: &'a SiteDocument, filter: &str) -> Vec<&'a Value> {
    doc.items("news")
        .iter()
        .filter(|item| filter == ALL || field(item, "category") == Some(filter))
        .collect()
}

/* ---------------- Locations ---------------- */

/// Locations of one `locationType` (or all), capped at `limit`.
pub fn locations_by_type<'a>(doc: &'a SiteDocument, filter: &str, limit: usize) -> Vec<&'a Value> {
    doc.items("serviceLocations")
        .iter()
        .filter(|loc| filter == ALL || field(loc, "locationType") == Some(filter))
        .take(limit)
        .collect()
}

/// Locations belonging to a service, matched by either `locationType` or
/// `serviceTypeId` (older rows only carry one of the two).
pub fn locations_for_service<'a>(
    doc: &'a SiteDocument,
    location_type: &str,
    service_type_id: &str,
) -> Vec<&'a Value> {
    doc.items("serviceLocations")
        .iter()
        .filter(|loc| {
            field(loc, "locationType") == Some(location_type)
                || field(loc, "serviceTypeId") == Some(service_type_id)
        })
        .collect()
}

fn field<'a>(item: &'a Value, key: &str) -> Option<&'a str> {
    item.get(key).and_then(Value::as_str)
}

/* ---------------- Text ---------------- */

/// `2026-02-10` → `2026/02/10`. Empty stays empty; anything unparsable is
/// returned as given.
pub fn format_date(date: &str) -> String {
    let date = date.trim();
    if date.is_empty() {
        return s!();
    }
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(date).ok().map(|dt| dt.date_naive()));

    match parsed {
        Some(d) => d.format("%Y/%m/%d").to_string(),
        None => s!(date),
    }
}

/// Cut to `max` characters and mark the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => join!(&text[..cut], "..."),
        None => s!(text),
    }
}
