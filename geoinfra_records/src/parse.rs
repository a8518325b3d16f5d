//! Conversions from Brazilian form text to column values.
//!
//! Numbers use `.` as thousands separator and `,` as decimal separator (`R$ 1.234,56`).
//! Dates are written `dd/mm/yyyy` and stored as ISO `yyyy-mm-dd`.

use regex::Regex;
use std::sync::LazyLock;
use time::{Date, Month};

static NOT_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9,.\-]").unwrap());
static BR_DATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").unwrap());

/// Removes everything except ASCII digits, `,`, `.` and `-`.
pub fn strip_not_number(text: &str) -> String {
	NOT_NUMBER.replace_all(text, "").into_owned()
}

/// Parses a Brazilian formatted number. Currency symbols, spaces and `%` are ignored.
///
/// ```
/// use geoinfra_records::parse::to_number;
///
/// assert_eq!(to_number("R$ 1.234,56"), Some(1234.56));
/// assert_eq!(to_number("abc"), None);
/// ```
pub fn to_number(text: &str) -> Option<f64> {
	let raw = strip_not_number(text).replace('.', "").replacen(',', ".", 1);
	if raw.is_empty() {
		return None;
	}
	raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parses a Brazilian formatted number and drops the fractional part.
pub fn to_int(text: &str) -> Option<i64> {
	to_number(text).map(|n| n.trunc() as i64)
}

/// Converts `dd/mm/yyyy` into `yyyy-mm-dd`. Impossible dates such as `31/02/2024` give `None`.
pub fn parse_br_date(text: &str) -> Option<String> {
	let captures = BR_DATE.captures(text.trim())?;
	let day: u8 = captures[1].parse().ok()?;
	let month: u8 = captures[2].parse().ok()?;
	let year: i32 = captures[3].parse().ok()?;

	let date = Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()?;
	Some(format!(
		"{:04}-{:02}-{:02}",
		date.year(),
		u8::from(date.month()),
		date.day()
	))
}
