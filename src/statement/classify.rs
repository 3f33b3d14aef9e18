//! Recognises the shapes of lines found in the text of a payout statement.
//!
//! All functions here are pure and total: every line is either recognised or
//! not, nothing is ever an error.

use std::sync::OnceLock;

use regex::Regex;

/// The currency symbol used for every amount on the statement.
pub const CURRENCY_SYMBOL: char = '₹';

/// Literal markers that identify the fixed header and footer text of a
/// statement template.
///
/// A line is noise when it is empty, contains any of [NoiseMarkers::substrings]
/// or is exactly equal to one of [NoiseMarkers::exact_lines].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoiseMarkers {
    /// Markers that classify a line as noise if they occur anywhere in it,
    /// e.g. the account holder's name line or the statement banner.
    pub substrings: Vec<String>,
    /// Markers that classify a line as noise only if the whole line matches,
    /// e.g. a section title.
    pub exact_lines: Vec<String>,
}

impl NoiseMarkers {
    /// Create a set of markers from substring and exact-line markers.
    pub fn new(substrings: Vec<String>, exact_lines: Vec<String>) -> Self {
        Self {
            substrings,
            exact_lines,
        }
    }
}

impl Default for NoiseMarkers {
    /// The markers for the weekly statement template.
    fn default() -> Self {
        Self::new(
            vec![
                "Praveen K -".to_owned(),
                "Weekly Statement".to_owned(),
                "Processed Event".to_owned(),
                "Jan 15, 2024".to_owned(),
            ],
            vec!["Transactions".to_owned()],
        )
    }
}

/// The date found at the start of a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionStart<'a> {
    /// Three letter weekday abbreviation, e.g. "Mon".
    pub weekday: &'a str,
    /// Month token, e.g. "Jan".
    pub month: &'a str,
    /// Day of the month as written on the statement.
    pub day: &'a str,
    /// Everything after the date.
    pub remainder: &'a str,
}

impl TransactionStart<'_> {
    /// The short date token, e.g. "Mon, Jan 15".
    pub fn date(&self) -> String {
        format!("{}, {} {}", self.weekday, self.month, self.day)
    }
}

/// The time of day found at the start of a balance line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimePrefix<'a> {
    /// The whole time token as written, e.g. "2:30 PM".
    pub time: &'a str,
    /// Hour of the day on a 12 hour clock.
    pub hour: &'a str,
    /// Minutes past the hour.
    pub minute: &'a str,
    /// Either "AM" or "PM".
    pub meridiem: &'a str,
    /// The text after the time token with processed dates and currency
    /// amounts removed, trimmed. May be empty.
    pub remainder: String,
}

fn transaction_start_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(Mon|Tue|Wed|Thu|Fri|Sat|Sun),\s+(\w+)\s+(\d+)\s+(.+)")
            .expect("transaction start regex")
    })
}

fn weekday_date_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(Mon|Tue|Wed|Thu|Fri|Sat|Sun),\s+\w+\s+\d+").expect("weekday date regex")
    })
}

fn processed_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Z][a-z]+\s+\d+\s+\d+:\d+\s+(AM|PM)\s*$").expect("processed marker regex")
    })
}

fn time_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+):(\d+)\s+(AM|PM)").expect("time prefix regex"))
}

fn processed_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[A-Z][a-z]+\s+\d+\s+\d+:\d+\s+(AM|PM)").expect("processed date regex")
    })
}

fn currency_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-?₹[\d,]+\.\d{2}").expect("currency regex"))
}

fn currency_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?₹[\d,]+\.\d{2}$").expect("currency token regex"))
}

fn bare_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+[\d,]*\.\d+$").expect("bare number regex"))
}

/// The text extraction library sometimes emits a NUL byte in place of the
/// colon in a time token.
pub fn normalize_time_separators(line: &str) -> String {
    line.replace('\0', ":")
}

/// Whether `line` is empty or part of the statement's fixed header/footer text.
pub fn is_noise(line: &str, markers: &NoiseMarkers) -> bool {
    line.is_empty()
        || markers
            .substrings
            .iter()
            .any(|marker| line.contains(marker.as_str()))
        || markers.exact_lines.iter().any(|marker| line == marker)
}

/// Match a line that starts a transaction, e.g. "Mon, Jan 15 Trip ₹123.45".
///
/// Returns `None` if the line does not start with a weekday and date followed
/// by some more text.
pub fn match_transaction_start(line: &str) -> Option<TransactionStart<'_>> {
    let captures = transaction_start_re().captures(line)?;

    Some(TransactionStart {
        weekday: captures.get(1)?.as_str(),
        month: captures.get(2)?.as_str(),
        day: captures.get(3)?.as_str(),
        remainder: captures.get(4)?.as_str(),
    })
}

/// Whether `line` begins with a weekday and date, regardless of what follows.
pub fn starts_with_weekday_date(line: &str) -> bool {
    weekday_date_prefix_re().is_match(line)
}

/// Whether `line` consists of nothing but a processed timestamp, e.g.
/// "Jan 16 9:05 AM".
///
/// NUL bytes are read as colons.
pub fn match_processed_marker(line: &str) -> bool {
    processed_marker_re().is_match(&normalize_time_separators(line))
}

/// Match a line starting with a time of day, e.g. "2:30 PM ₹50.00 ₹999.00".
///
/// `line` is expected to have had its time separators normalized with
/// [normalize_time_separators].
pub fn match_time_prefix(line: &str) -> Option<TimePrefix<'_>> {
    let captures = time_prefix_re().captures(line)?;
    let time = captures.get(0)?;

    let rest = line[time.end()..].trim();
    let rest = processed_date_re().replace_all(rest, "");
    let rest = currency_re().replace_all(&rest, "");

    Some(TimePrefix {
        time: time.as_str(),
        hour: captures.get(1)?.as_str(),
        minute: captures.get(2)?.as_str(),
        meridiem: captures.get(3)?.as_str(),
        remainder: rest.trim().to_owned(),
    })
}

/// Find every currency amount in `line`, in the order they appear.
pub fn extract_currency_amounts(line: &str) -> Vec<&str> {
    currency_re()
        .find_iter(line)
        .map(|amount| amount.as_str())
        .collect()
}

/// Whether the whole of `token` is a single currency amount, e.g. "-₹1,234.50".
pub fn is_currency_token(token: &str) -> bool {
    currency_token_re().is_match(token)
}

/// Whether the whole line is a decimal number without a currency symbol.
pub fn looks_like_bare_number(line: &str) -> bool {
    bare_number_re().is_match(line)
}
