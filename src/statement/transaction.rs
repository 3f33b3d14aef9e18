//! The transaction records extracted from a statement.

use serde::Serialize;

use crate::statement::sanitize::{clean_currency, clean_text};

/// A transaction as it was read from the statement text.
///
/// Amounts keep their currency symbol and digit grouping, e.g. "₹1,234.50".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTransaction {
    /// The short date token without a year, e.g. "Mon, Jan 15".
    pub date: String,
    /// The time of day, e.g. "2:30 PM", or empty if the statement had none.
    pub time: String,
    /// The free-text description joined from one or more lines.
    pub event_description: String,
    /// The earnings amount, or empty.
    pub earnings: String,
    /// The payout amount, or empty.
    pub payouts: String,
    /// The running balance, or empty.
    pub balance: String,
}

impl RawTransaction {
    /// The date followed by the time, if there is one.
    pub fn date_time(&self) -> String {
        if self.time.is_empty() {
            self.date.clone()
        } else {
            format!("{} {}", self.date, self.time)
        }
    }

    /// Whether the record carries anything worth keeping.
    ///
    /// A record needs at least a description, an earnings amount or a balance.
    pub fn has_content(&self) -> bool {
        !self.event_description.is_empty() || !self.earnings.is_empty() || !self.balance.is_empty()
    }
}

/// A transaction ready to be written to a spreadsheet.
///
/// Control characters are replaced with spaces and the currency symbol is
/// removed from amounts, which stay as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanedTransaction {
    /// The date and, if known, the time of day.
    #[serde(rename = "Date")]
    pub date: String,
    /// The free-text description.
    #[serde(rename = "Event Description")]
    pub event_description: String,
    /// The earnings amount without the currency symbol.
    #[serde(rename = "Your Earnings")]
    pub earnings: String,
    /// The payout amount without the currency symbol.
    #[serde(rename = "Payouts")]
    pub payouts: String,
    /// The balance without the currency symbol.
    #[serde(rename = "Balance")]
    pub balance: String,
}

impl From<&RawTransaction> for CleanedTransaction {
    fn from(raw: &RawTransaction) -> Self {
        Self {
            date: clean_text(&raw.date_time()),
            event_description: clean_text(&raw.event_description),
            earnings: clean_currency(&raw.earnings),
            payouts: clean_currency(&raw.payouts),
            balance: clean_currency(&raw.balance),
        }
    }
}
