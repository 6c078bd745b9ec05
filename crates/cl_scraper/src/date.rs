use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{4})-(\d{2})-(\d{2})").unwrap());
static DATE_DOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{4})\.(\d{2})\.(\d{2})").unwrap());

/// Scan free-form text or an attribute value for a calendar date, trying
/// `YYYY-MM-DD` then `YYYY.MM.DD`. First match wins; absence is a normal
/// result, never an error.
pub fn find_date(text: &str) -> Option<NaiveDate> {
    scan(&DATE_DASH, text).or_else(|| scan(&DATE_DOT, text))
}

fn scan(pattern: &Regex, text: &str) -> Option<NaiveDate> {
    let caps = pattern.captures(text)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
