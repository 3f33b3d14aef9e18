//! Rebuilds multi-line transaction records from the flattened statement text.
//!
//! Text extracted from a PDF loses its column layout, so records are found by
//! the order in which a few unambiguous markers appear:
//!
//! 1. A line starting with a weekday and date begins a record. Currency
//!    amounts on that line are the earnings and payouts, the other words
//!    start the description.
//! 2. The first line starting with a time of day carries the time and the
//!    balance (the right-most amount on the line).
//! 3. A line holding only a processed timestamp ends the record.
//!
//! Anything else that follows a start line is more description. Lines that do
//! not belong to any record are skipped, so malformed input never fails.

use crate::statement::{
    classify::{
        NoiseMarkers, TransactionStart, extract_currency_amounts, is_currency_token, is_noise,
        looks_like_bare_number, match_processed_marker, match_time_prefix,
        match_transaction_start, normalize_time_separators, starts_with_weekday_date,
    },
    transaction::RawTransaction,
};

/// Why description collection stopped for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopReason {
    /// The next record starts on the current line, which is left for the
    /// next record.
    NextTransaction,
    /// A header/footer line, which is discarded.
    Noise,
    /// The processed timestamp line, which is discarded.
    ProcessedMarker,
    /// There are no more lines.
    EndOfInput,
}

/// The states of the parser.
#[derive(Debug)]
enum State {
    /// Looking for the start of the next record.
    Seeking,
    /// Appending lines to the record that started on an earlier line.
    CollectingDescription(PendingTransaction),
}

/// A record that is still being read.
#[derive(Debug, Default)]
struct PendingTransaction {
    date: String,
    time: String,
    description_fragments: Vec<String>,
    earnings: String,
    payouts: String,
    balance: String,
}

impl PendingTransaction {
    /// Start a record from the text after the date on its first line.
    ///
    /// The first two currency amounts become the earnings and payouts, any
    /// further amounts are dropped. Every other word becomes its own
    /// description fragment.
    fn start(start: &TransactionStart) -> Self {
        let mut pending = Self {
            date: start.date(),
            ..Default::default()
        };

        for token in start.remainder.split_whitespace() {
            if is_currency_token(token) {
                if pending.earnings.is_empty() {
                    pending.earnings = token.to_owned();
                } else if pending.payouts.is_empty() {
                    pending.payouts = token.to_owned();
                }
            } else {
                pending.description_fragments.push(token.to_owned());
            }
        }

        pending
    }

    /// Add a line found between the start line and the end of the record.
    fn collect_line(&mut self, line: &str) {
        let normalized = normalize_time_separators(line);

        if self.time.is_empty()
            && let Some(time_prefix) = match_time_prefix(&normalized)
        {
            self.time = time_prefix.time.to_owned();

            if let Some(balance) = extract_currency_amounts(&normalized).last() {
                self.balance = (*balance).to_owned();
            }

            if !time_prefix.remainder.is_empty() {
                self.description_fragments.push(time_prefix.remainder);
            }

            return;
        }

        if !line.is_empty() && !looks_like_bare_number(line) {
            self.description_fragments.push(line.to_owned());
        }
    }

    /// Build the final record, or `None` if it has nothing worth keeping.
    fn finish(self) -> Option<RawTransaction> {
        let transaction = RawTransaction {
            date: self.date,
            time: self.time,
            event_description: self.description_fragments.join(" ").trim().to_owned(),
            earnings: self.earnings,
            payouts: self.payouts,
            balance: self.balance,
        };

        if transaction.has_content() {
            Some(transaction)
        } else {
            tracing::debug!("Dropping empty transaction dated '{}'", transaction.date);
            None
        }
    }
}

/// Decide whether collection for the current record stops at `line`.
fn stop_reason(line: Option<&&str>, markers: &NoiseMarkers) -> Option<StopReason> {
    match line {
        None => Some(StopReason::EndOfInput),
        Some(line) if starts_with_weekday_date(line) => Some(StopReason::NextTransaction),
        Some(line) if is_noise(line, markers) => Some(StopReason::Noise),
        Some(line) if match_processed_marker(line) => Some(StopReason::ProcessedMarker),
        Some(_) => None,
    }
}

/// Read the transactions from `lines`, in document order.
///
/// `lines` should be the trimmed lines of every page, in page order. Returns
/// an empty list if no transactions were found.
pub fn reconstruct_transactions(lines: &[&str], markers: &NoiseMarkers) -> Vec<RawTransaction> {
    let mut transactions = Vec::new();
    let mut cursor = 0;
    let mut state = State::Seeking;

    loop {
        state = match state {
            State::Seeking => {
                let Some(line) = lines.get(cursor) else {
                    break;
                };
                cursor += 1;

                if is_noise(line, markers) {
                    State::Seeking
                } else if let Some(start) = match_transaction_start(line) {
                    State::CollectingDescription(PendingTransaction::start(&start))
                } else {
                    tracing::trace!("Skipping unrecognised line {cursor}: {line:?}");
                    State::Seeking
                }
            }
            State::CollectingDescription(mut pending) => {
                match stop_reason(lines.get(cursor), markers) {
                    Some(reason) => {
                        // The next start line is left under the cursor so it
                        // is read again while seeking.
                        if matches!(reason, StopReason::Noise | StopReason::ProcessedMarker) {
                            cursor += 1;
                        }

                        if let Some(transaction) = pending.finish() {
                            transactions.push(transaction);
                        }

                        State::Seeking
                    }
                    None => {
                        pending.collect_line(lines[cursor]);
                        cursor += 1;
                        State::CollectingDescription(pending)
                    }
                }
            }
        }
    }

    transactions
}
