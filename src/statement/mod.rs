//! Extraction of transactions from the text of a weekly payout statement.
//!
//! The text of every page is split into lines, the lines of all pages are
//! joined in page order and then read by [reconstruct_transactions].

pub mod classify;
pub mod pages;
pub mod reconstruct;
pub mod sanitize;
pub mod transaction;

pub use classify::NoiseMarkers;
pub use pages::{PageSource, PdfPages, StaticPages};
pub use reconstruct::reconstruct_transactions;
pub use transaction::{CleanedTransaction, RawTransaction};

use crate::Error;

/// Split the text of each page into trimmed lines, in page order.
///
/// Pages without any text are skipped.
pub fn flatten_pages(pages: &[String]) -> Vec<&str> {
    let mut lines = Vec::new();

    for (page_number, text) in pages.iter().enumerate() {
        if text.trim().is_empty() {
            tracing::debug!("Skipping page {} as it has no text", page_number + 1);
            continue;
        }

        lines.extend(text.split('\n').map(str::trim));
    }

    lines
}

/// Read the transactions from every page of `source`.
///
/// Returns an empty list if no transactions were found.
///
/// # Errors
/// Returns an error if `source` cannot produce its pages.
pub fn extract_transactions(
    source: &impl PageSource,
    markers: &NoiseMarkers,
) -> Result<Vec<RawTransaction>, Error> {
    let pages = source.pages()?;
    let lines = flatten_pages(&pages);

    tracing::debug!(
        "Read {} lines of text from {} pages",
        lines.len(),
        pages.len()
    );

    let transactions = reconstruct_transactions(&lines, markers);

    tracing::info!("Found {} transactions", transactions.len());

    Ok(transactions)
}

/// Prepare transactions for a spreadsheet.
pub fn clean_transactions(transactions: &[RawTransaction]) -> Vec<CleanedTransaction> {
    transactions.iter().map(CleanedTransaction::from).collect()
}

#[cfg(test)]
mod statement_tests {
    use crate::statement::{
        NoiseMarkers, StaticPages, clean_transactions, extract_transactions, flatten_pages,
    };

    #[test]
    fn flattens_pages_in_order() {
        let pages = vec!["a\n b \r".to_owned(), "c".to_owned()];

        assert_eq!(flatten_pages(&pages), vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_page_contributes_nothing() {
        let pages = StaticPages(vec![
            "Mon, Jan 15 Trip ₹10.00\nJan 15 2:45 PM".to_owned(),
            String::new(),
            "   \n".to_owned(),
            "Tue, Jan 16 Tip ₹5.00".to_owned(),
        ]);

        let got = extract_transactions(&pages, &NoiseMarkers::default()).unwrap();

        assert_eq!(got.len(), 2);
        assert_eq!(got[0].date, "Mon, Jan 15");
        assert_eq!(got[1].date, "Tue, Jan 16");
    }

    #[test]
    fn record_continues_across_page_break() {
        let pages = StaticPages(vec![
            "Mon, Jan 15 Trip ₹10.00\nAirport".to_owned(),
            "drop-off\n2:30 PM ₹999.00\nJan 15 2:45 PM".to_owned(),
        ]);

        let got = extract_transactions(&pages, &NoiseMarkers::default()).unwrap();

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].event_description, "Trip Airport drop-off");
        assert_eq!(got[0].balance, "₹999.00");
    }

    #[test]
    fn page_footer_ends_record() {
        let pages = StaticPages(vec![
            "Mon, Jan 15 Trip fare ₹10.00\nAirport\nPraveen K - Page 1 of 2".to_owned(),
            "2:30 PM ₹999.00\nTue, Jan 16 Tip ₹5.00".to_owned(),
        ]);

        let got = extract_transactions(&pages, &NoiseMarkers::default()).unwrap();

        assert_eq!(got.len(), 2);
        assert_eq!(got[0].event_description, "Trip fare Airport");
        assert_eq!(got[0].time, "");
        assert_eq!(got[0].balance, "");
        assert_eq!(got[1].date, "Tue, Jan 16");
        assert!(
            got.iter()
                .all(|transaction| !transaction.event_description.contains("Praveen K")),
            "footer text leaked into a description: {got:?}"
        );
    }

    #[test]
    fn no_pages_no_transactions() {
        let got = extract_transactions(&StaticPages::default(), &NoiseMarkers::default()).unwrap();

        assert!(got.is_empty());
    }

    #[test]
    fn cleans_in_order() {
        let pages = StaticPages(vec![
            "Mon, Jan 15 Trip ₹10.00\n2:30 PM ₹1,999.00\nTue, Jan 16 Tip ₹5.00".to_owned(),
        ]);
        let raw = extract_transactions(&pages, &NoiseMarkers::default()).unwrap();

        let got = clean_transactions(&raw);

        assert_eq!(got.len(), 2);
        assert_eq!(got[0].date, "Mon, Jan 15 2:30 PM");
        assert_eq!(got[0].earnings, "10.00");
        assert_eq!(got[0].balance, "1,999.00");
        assert_eq!(got[1].earnings, "5.00");
    }
}
