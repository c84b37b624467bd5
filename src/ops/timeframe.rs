use std::sync::LazyLock;

use chrono::{Datelike, Months, NaiveDate};
use regex::Regex;
use serde::Serialize;

use crate::model::quarter::{Quarter, QuarterAxis};

static MONTHS_RE: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"^(\d+)\s*months$") {
    Ok(re) => re,
    Err(_) => unreachable!("static regex pattern"),
});
static YEARS_RE: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"^(\d+)\s*years?$") {
    Ok(re) => re,
    Err(_) => unreachable!("static regex pattern"),
});
static QUARTER_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"^Q(\d+)\s*-\s*Q(\d+)\s+(\d+)$") {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    });

/// Length of the window used when no timeframe expression resolves.
pub const DEFAULT_WINDOW_MONTHS: u32 = 12;

/// A resolved planning window: `start` inclusive, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Timeframe {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Parse a timeframe expression relative to `today`.
///
/// Recognized forms, tried in order:
/// 1. `<N>months`: N months from the first day of the current month
/// 2. `<N>year` / `<N>years`: N years from the first day of the current month
/// 3. `Q<a>-Q<b> <year>`: first day of quarter a through the end of quarter b
///
/// Returns `None` for anything else, including the empty string.
pub fn parse_timeframe(expr: &str, today: NaiveDate) -> Option<Timeframe> {
    let expr = expr.trim();
    if expr.is_empty() {
        return None;
    }

    if let Some(months) = capture_count(&MONTHS_RE, expr) {
        if let Some(tf) = window_from_month_start(today, months) {
            return Some(tf);
        }
    }

    if let Some(years) = capture_count(&YEARS_RE, expr) {
        if let Some(tf) = years.checked_mul(12).and_then(|m| window_from_month_start(today, m)) {
            return Some(tf);
        }
    }

    if let Some(tf) = parse_quarter_range(expr) {
        return Some(tf);
    }

    None
}

/// Resolve an expression, falling back to a 12-month window from the first
/// day of the current month when it does not parse.
pub fn resolve_or_default(expr: &str, today: NaiveDate) -> Timeframe {
    match parse_timeframe(expr, today) {
        Some(tf) => tf,
        None => {
            tracing::debug!(timeframe = expr, "unrecognized timeframe, using default window");
            default_timeframe(today)
        }
    }
}

/// The fallback window.
pub fn default_timeframe(today: NaiveDate) -> Timeframe {
    let start = first_of_month(today);
    Timeframe {
        start,
        end: start
            .checked_add_months(Months::new(DEFAULT_WINDOW_MONTHS))
            .unwrap_or(NaiveDate::MAX),
    }
}

/// Build the quarter axis for a window.
///
/// Walks whole months from `start` while before `end`, collecting each
/// month's quarter once. A window too short (or inverted) to contain a
/// month step still yields the quarter of `start`.
pub fn build_axis(timeframe: &Timeframe) -> QuarterAxis {
    let start = timeframe.start;
    let months = (0u32..)
        .map_while(|k| start.checked_add_months(Months::new(k)))
        .take_while(|d| *d < timeframe.end)
        .map(|d| Quarter::from_date(&d));
    QuarterAxis::new(months).unwrap_or_else(|| QuarterAxis::single(Quarter::from_date(&start)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// A positive count captured by the first group of `re`.
fn capture_count(re: &Regex, expr: &str) -> Option<u32> {
    let caps = re.captures(expr)?;
    let n: u32 = caps[1].parse().ok()?;
    (n > 0).then_some(n)
}

fn window_from_month_start(today: NaiveDate, months: u32) -> Option<Timeframe> {
    let start = first_of_month(today);
    let end = start.checked_add_months(Months::new(months))?;
    Some(Timeframe { start, end })
}

fn parse_quarter_range(expr: &str) -> Option<Timeframe> {
    let caps = QUARTER_RANGE_RE.captures(expr)?;
    let first: u8 = caps[1].parse().ok()?;
    let last: u8 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    if !(1..=4).contains(&first) || !(1..=4).contains(&last) || year <= 0 {
        return None;
    }

    let start = Quarter { year, number: first }.first_day()?;
    let last_quarter = Quarter { year, number: last };
    let end = NaiveDate::from_ymd_opt(year, last_quarter.last_month(), 1)?
        .checked_add_months(Months::new(1))?;
    Some(Timeframe { start, end })
}
