//! Payout Sheet converts weekly payout statements from a ride-share platform
//! into Excel spreadsheets.
//!
//! A statement is a PDF whose transactions are laid out as text lines: a line
//! starting with the weekday and date opens a transaction, its description may
//! run over several lines and the time of the transaction is on a line of its
//! own. [statement] reads those lines back into transactions and
//! [spreadsheet] writes them out as an `.xlsx` workbook.
//!
//! This library also provides the HTTP server that serves an upload page and
//! returns the converted spreadsheet.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
pub mod config;
mod endpoints;
mod error;
mod html;
mod index_page;
mod logging;
mod not_found;
mod routing;
pub mod spreadsheet;
pub mod statement;
mod timestamp;
mod upload;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use error::{Error, ErrorBody, ErrorCategory};
pub use logging::logging_middleware;
pub use routing::build_router;

use crate::{
    spreadsheet::write_workbook,
    statement::{NoiseMarkers, PageSource, clean_transactions, extract_transactions},
};

/// Convert the statement in `source` to the bytes of an `.xlsx` workbook.
///
/// # Errors
///
/// Returns [Error::NoTransactionsFound] if the statement has no transactions,
/// otherwise any error from reading the pages or writing the workbook.
pub fn convert_statement(
    source: &impl PageSource,
    markers: &NoiseMarkers,
) -> Result<Vec<u8>, Error> {
    let transactions = extract_transactions(source, markers)?;

    if transactions.is_empty() {
        return Err(Error::NoTransactionsFound);
    }

    write_workbook(&clean_transactions(&transactions))
}

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
