//! Display ordering for timeline sections.
//!
//! Sorting is view-only: it orders a copy of the collection for rendering and
//! never touches the stored (persisted) order.

use std::cmp::Ordering;

use chrono::NaiveDate;

use super::TimelineEntity;

/// Newest first by `sort_date`; entities without a date sort last.
pub fn by_date_desc<T: TimelineEntity>(a: &T, b: &T) -> Ordering {
    compare_dates_desc(a.sort_date(), b.sort_date())
}

/// Descending comparison of date-like strings.
///
/// Parseable dates (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`, or with `/`) come first,
/// newest first; unparseable text follows in reverse lexical order; missing
/// or blank values are treated as the oldest and always sort last.
pub fn compare_dates_desc(a: Option<&str>, b: Option<&str>) -> Ordering {
    sort_key(b).cmp(&sort_key(a))
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum DateKey<'a> {
    Missing,
    Text(&'a str),
    Date(NaiveDate),
}

fn sort_key(value: Option<&str>) -> DateKey<'_> {
    match value.map(str::trim) {
        None | Some("") => DateKey::Missing,
        Some(raw) => parse_date_like(raw).map_or(DateKey::Text(raw), DateKey::Date),
    }
}

/// Parses a partial date, anchoring missing month/day to the first.
pub fn parse_date_like(raw: &str) -> Option<NaiveDate> {
    let normalized = raw.trim().replace('/', "-");
    let mut parts = normalized.split('-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = match parts.next() {
        Some(m) => m.parse().ok()?,
        None => 1,
    };
    let day: u32 = match parts.next() {
        Some(d) => d.parse().ok()?,
        None => 1,
    };
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Returns a display-ordered copy of `items`. The sort is stable, so entities
/// that compare equal keep their stored relative order.
pub fn sorted_for_display<T: Clone>(
    items: &[T],
    comparator: impl Fn(&T, &T) -> Ordering,
) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| comparator(a, b));
    sorted
}
