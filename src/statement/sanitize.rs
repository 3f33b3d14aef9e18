//! Normalizes extracted text before it is written to a spreadsheet.

use crate::statement::classify::CURRENCY_SYMBOL;

/// Replace each control character in `text` with a single space.
///
/// Newlines, carriage returns and tabs are kept. The result has the same
/// number of characters as `text`.
pub fn clean_text(text: &str) -> String {
    text.chars()
        .map(|c| {
            if (c as u32) < 0x20 && !matches!(c, '\n' | '\r' | '\t') {
                ' '
            } else {
                c
            }
        })
        .collect()
}

/// Remove the currency symbol from `value` and trim it.
///
/// The sign and digit grouping are left as they are, e.g. "-₹1,234.50"
/// becomes "-1,234.50".
pub fn clean_currency(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    value.replace(CURRENCY_SYMBOL, "").trim().to_owned()
}
