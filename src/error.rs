//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The multipart form did not have a file field.
    #[error("No file uploaded")]
    MissingFile,

    /// The file field in the multipart form had an empty file name.
    #[error("No file selected")]
    EmptyFileName,

    /// The uploaded file name does not end in `.pdf`.
    #[error("Only PDF files are allowed")]
    NotPdf,

    /// The multipart form could not be read.
    #[error("Could not parse multipart form: {0}")]
    MultipartError(String),

    /// The request body is larger than the upload limit.
    #[error("File is too large, the limit is {0} bytes")]
    PayloadTooLarge(usize),

    /// No transactions could be found in the statement.
    ///
    /// This is reported to the client as a bad request rather than a crash,
    /// the document was most likely not a supported statement.
    #[error("No transactions found in PDF")]
    NoTransactionsFound,

    /// The text of the PDF could not be extracted.
    #[error("could not extract text from PDF: {0}")]
    PdfExtraction(String),

    /// The spreadsheet could not be written.
    #[error("could not write spreadsheet: {0}")]
    Spreadsheet(String),

    /// A file system operation failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// A timestamp for a file name could not be formatted.
    #[error("could not format timestamp: {0}")]
    InvalidTimestamp(String),

    /// The task that processes the statement panicked or was cancelled.
    #[error("processing task failed: {0}")]
    TaskFailed(String),
}

/// Broad groups of errors that clients can tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// The request can be fixed by the client, e.g. by uploading a different file.
    BadRequest,
    /// The uploaded file is over the size limit.
    PayloadTooLarge,
    /// Something went wrong on the server.
    InternalError,
}

impl ErrorCategory {
    /// The HTTP status code for the category.
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorCategory::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCategory::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCategory::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Error {
    /// Which category the error falls into.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::MissingFile
            | Error::EmptyFileName
            | Error::NotPdf
            | Error::MultipartError(_)
            | Error::NoTransactionsFound => ErrorCategory::BadRequest,
            Error::PayloadTooLarge(_) => ErrorCategory::PayloadTooLarge,
            Error::PdfExtraction(_)
            | Error::Spreadsheet(_)
            | Error::Io(_)
            | Error::InvalidTimestamp(_)
            | Error::TaskFailed(_) => ErrorCategory::InternalError,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value.to_string())
    }
}

/// The JSON body sent to the client when a request fails.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// A description of the error for display.
    pub error: String,
    /// Whether the client or the server is at fault.
    pub category: ErrorCategory,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let category = self.category();

        let message = match category {
            ErrorCategory::BadRequest | ErrorCategory::PayloadTooLarge => self.to_string(),
            ErrorCategory::InternalError => {
                tracing::error!("An unexpected error occurred: {}", self);
                format!("Error processing file: {self}")
            }
        };

        (
            category.status_code(),
            Json(ErrorBody {
                error: message,
                category,
            }),
        )
            .into_response()
    }
}
