//! Month label resolution
//!
//! A single immutable lookup from normalized month spellings (English and
//! Portuguese, full and abbreviated) to a month number. Labels may carry a
//! year; bare labels are placed in the season around a reference year.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::error::{CoreError, Result};

/// Reference year used when a label carries no year.
pub const DEFAULT_REFERENCE_YEAR: i32 = 2025;

/// Bare labels for this month and later belong to the year before the reference.
const SEASON_ROLLOVER_MONTH: u32 = 7;

const MONTH_SPELLINGS: &[(&str, u32)] = &[
    ("january", 1), ("jan", 1), ("janeiro", 1),
    ("february", 2), ("feb", 2), ("fevereiro", 2), ("fev", 2),
    ("march", 3), ("mar", 3), ("marco", 3),
    ("april", 4), ("apr", 4), ("abril", 4), ("abr", 4),
    ("may", 5), ("maio", 5), ("mai", 5),
    ("june", 6), ("jun", 6), ("junho", 6),
    ("july", 7), ("jul", 7), ("julho", 7),
    ("august", 8), ("aug", 8), ("agosto", 8), ("ago", 8),
    ("september", 9), ("sep", 9), ("sept", 9), ("setembro", 9), ("set", 9),
    ("october", 10), ("oct", 10), ("outubro", 10), ("out", 10),
    ("november", 11), ("nov", 11), ("novembro", 11),
    ("december", 12), ("dec", 12), ("dezembro", 12), ("dez", 12),
];

lazy_static::lazy_static! {
    /// Normalized spelling -> month number (1-12).
    static ref MONTH_CALENDAR: HashMap<&'static str, u32> = MONTH_SPELLINGS.iter().copied().collect();
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        other => other,
    }
}

/// Lower-case, strip accents and collapse separators to single spaces.
pub fn normalize_label(label: &str) -> String {
    let folded: String = label
        .trim()
        .to_lowercase()
        .chars()
        .map(fold_accent)
        .map(|c| if matches!(c, '-' | '/' | '_' | '.' | ',') { ' ' } else { c })
        .collect();
    folded
        .split_whitespace()
        .filter(|token| *token != "de")
        .collect::<Vec<_>>()
        .join(" ")
}

/// Month number for a single normalized name token.
pub fn month_number(name: &str) -> Option<u32> {
    MONTH_CALENDAR.get(name).copied()
}

fn parse_year(token: &str) -> Option<i32> {
    if !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    match token.len() {
        2 => token.parse::<i32>().ok().map(|yy| 2000 + yy),
        4 => token.parse::<i32>().ok(),
        _ => None,
    }
}

fn season_year(month: u32, reference_year: i32) -> i32 {
    if month >= SEASON_ROLLOVER_MONTH {
        reference_year - 1
    } else {
        reference_year
    }
}

/// Resolve a label to the first day of its month using [`DEFAULT_REFERENCE_YEAR`].
pub fn resolve_month(label: &str) -> Result<NaiveDate> {
    resolve_month_in(label, DEFAULT_REFERENCE_YEAR)
}

/// Resolve a label to the first day of its month.
///
/// Accepted forms: `Dezembro`, `dec.`, `December 2024`, `fev/25`,
/// `Fevereiro de 2025`, `2024-12`. Labels without a year fall in the season
/// around `reference_year`: July-December of the previous year, January-June
/// of the reference year.
///
/// Bare labels can therefore only order a span of up to twelve months that
/// starts in July or later and ends by June. A plain `Janeiro..Dezembro`
/// upload sorts as July..June, so growth for January would be measured
/// against December. Send labels with years (`Janeiro 2025`) for anything
/// that does not fit that window.
pub fn resolve_month_in(label: &str, reference_year: i32) -> Result<NaiveDate> {
    let unresolvable = || CoreError::UnresolvableMonthLabel(label.to_string());
    let normalized = normalize_label(label);
    let tokens: Vec<&str> = normalized.split(' ').filter(|t| !t.is_empty()).collect();

    let (year, month) = match tokens.as_slice() {
        [name] => {
            let month = month_number(name).ok_or_else(unresolvable)?;
            (season_year(month, reference_year), month)
        }
        [first, second] => {
            if let Some(month) = month_number(first) {
                (parse_year(second).ok_or_else(unresolvable)?, month)
            } else if first.len() == 4 {
                let year = parse_year(first).ok_or_else(unresolvable)?;
                let month = second.parse::<u32>().map_err(|_| unresolvable())?;
                (year, month)
            } else {
                return Err(unresolvable());
            }
        }
        _ => return Err(unresolvable()),
    };

    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(unresolvable)
}
