//! The API endpoints URIs.

/// The root route which serves the upload page.
pub const ROOT: &str = "/";
/// The route for uploading a statement and downloading the spreadsheet.
pub const UPLOAD: &str = "/upload";
