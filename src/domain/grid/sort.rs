use std::cmp::Ordering;

use chrono::{DateTime, Datelike, NaiveDate};

use crate::domain::entities::column::ColumnKind;
use crate::domain::entities::grid::{SortDirection, SortSpec};
use crate::domain::entities::record::{parse_leading_number, CellValue, Record};

/// Comparable projection of a cell. Two keys compare numerically when both
/// carry a number and as case-sensitive text otherwise.
#[derive(Debug, Clone, PartialEq)]
struct SortKey {
    number: Option<f64>,
    text: String,
}

impl SortKey {
    fn number(number: f64) -> Self {
        Self {
            number: Some(number),
            text: number.to_string(),
        }
    }

    fn text(text: String) -> Self {
        Self { number: None, text }
    }

    fn compare(&self, other: &SortKey) -> Ordering {
        match (self.number, other.number) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            _ => self.text.cmp(&other.text),
        }
    }
}

fn sort_key(value: &CellValue, kind: Option<ColumnKind>) -> Option<SortKey> {
    if value.is_null() {
        return None;
    }
    match kind {
        None => Some(SortKey {
            number: value.as_number(),
            text: value.to_string(),
        }),
        Some(ColumnKind::Text) => {
            let text = value.to_string();
            if text.is_empty() {
                None
            } else {
                Some(SortKey::text(text.to_lowercase()))
            }
        }
        Some(ColumnKind::Number) => match value {
            CellValue::Number(number) if !number.is_nan() => Some(SortKey::number(*number)),
            CellValue::Text(text) => {
                let cleaned: String = text.chars().filter(|c| !matches!(c, ',' | '$' | '%')).collect();
                parse_leading_number(&cleaned).map(SortKey::number)
            }
            _ => None,
        },
        Some(ColumnKind::Date) => match value {
            CellValue::Number(number) if !number.is_nan() => Some(SortKey::number(*number)),
            CellValue::Text(text) => parse_date(text)
                .map(|date| SortKey::number(f64::from(date.num_days_from_ce()))),
            _ => None,
        },
    }
}

/// Stable merge sort that tolerates comparators without a total order; mixed
/// number and text cells can form cycles.
fn merge_sort_by<T>(mut items: Vec<T>, compare: &impl Fn(&T, &T) -> Ordering) -> Vec<T> {
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let mut left = merge_sort_by(items, compare).into_iter().peekable();
    let mut right = merge_sort_by(right, compare).into_iter().peekable();

    let mut merged = Vec::with_capacity(left.len() + right.len());
    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        if compare(r, l) == Ordering::Less {
            merged.extend(right.next());
        } else {
            merged.extend(left.next());
        }
    }
    merged.extend(left);
    merged.extend(right);
    merged
}

/// Accepts `DD/MM/YY` (years below 50 land in 20xx), `DD/MM/YYYY`, ISO dates
/// and RFC 3339 timestamps.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let parts: Vec<&str> = text.split('/').collect();
    if let [day, month, year] = parts.as_slice() {
        let day: u32 = day.trim().parse().ok()?;
        let month: u32 = month.trim().parse().ok()?;
        let year_text = year.trim();
        let mut year: i32 = year_text.parse().ok()?;
        if year_text.len() <= 2 {
            year += if year < 50 { 2000 } else { 1900 };
        }
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
}

/// Stable sort on one column. Nulls go last whichever way the direction points.
pub fn apply_sort<'a>(
    rows: Vec<&'a Record>,
    sort: Option<&SortSpec>,
    kind: Option<ColumnKind>,
) -> Vec<&'a Record> {
    let Some(sort) = sort else {
        return rows;
    };

    let keyed: Vec<(Option<SortKey>, &'a Record)> = rows
        .into_iter()
        .map(|record| (sort_key(record.value(&sort.column), kind), record))
        .collect();

    let keyed = merge_sort_by(keyed, &|(a, _), (b, _)| match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match sort.direction {
            SortDirection::Asc => a.compare(b),
            SortDirection::Desc => b.compare(a),
        },
    });

    keyed.into_iter().map(|(_, record)| record).collect()
}
