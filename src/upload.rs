//! Route handler for converting an uploaded statement to a spreadsheet.

use std::path::{Path, PathBuf};

use axum::{
    body::Bytes,
    extract::{Multipart, State, multipart::MultipartError},
    http::{
        StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    app_state::UploadState,
    config::MAX_UPLOAD_BYTES,
    convert_statement,
    spreadsheet::XLSX_CONTENT_TYPE,
    statement::PdfPages,
    timestamp::{file_timestamp, now, unique_timestamp},
};

/// The name of the multipart form field holding the statement.
pub const FILE_FIELD: &str = "file";

/// Route handler for converting an uploaded PDF statement to an `.xlsx` file.
///
/// The statement is saved to the upload directory while it is processed and
/// removed afterwards, whether or not processing succeeded.
///
/// # Errors
///
/// Returns a bad request if the form has no PDF file or no transactions were
/// found, and an internal server error if the PDF or the spreadsheet could not
/// be processed.
pub async fn upload_statement(
    State(state): State<UploadState>,
    mut multipart: Multipart,
) -> Result<Response, Error> {
    let start_time = std::time::Instant::now();
    let (file_name, data) = read_pdf_field(&mut multipart).await?;

    tracing::debug!("Received file '{}' that is {} bytes", file_name, data.len());

    let processed_at = now();
    let upload_path = state.upload_dir.join(format!(
        "{}_{}",
        unique_timestamp(processed_at)?,
        secure_file_name(&file_name)
    ));
    let upload = TempUpload::create(upload_path, &data).await?;

    let path = upload.path().to_owned();
    let noise_markers = state.noise_markers.clone();
    let workbook = tokio::task::spawn_blocking(move || {
        convert_statement(&PdfPages::new(path), &noise_markers)
    })
    .await
    .map_err(|error| Error::TaskFailed(error.to_string()))?;

    drop(upload);
    let workbook = workbook?;

    tracing::info!(
        "Converted '{}' in {}ms",
        file_name,
        start_time.elapsed().as_millis()
    );

    let download_name = format!("payout_statement_{}.xlsx", file_timestamp(processed_at)?);

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, XLSX_CONTENT_TYPE.to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{download_name}\""),
            ),
        ],
        workbook,
    )
        .into_response())
}

/// Find the statement in the form and check that it looks like a PDF.
///
/// Parts without a file name are not files and are ignored.
async fn read_pdf_field(multipart: &mut Multipart) -> Result<(String, Bytes), Error> {
    while let Some(field) = multipart.next_field().await.map_err(map_multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };

        if file_name.is_empty() {
            return Err(Error::EmptyFileName);
        }

        if !file_name.to_lowercase().ends_with(".pdf") {
            return Err(Error::NotPdf);
        }

        let data = field.bytes().await.map_err(map_multipart_error)?;

        return Ok((file_name, data));
    }

    Err(Error::MissingFile)
}

fn map_multipart_error(error: MultipartError) -> Error {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::PayloadTooLarge(MAX_UPLOAD_BYTES)
    } else {
        tracing::error!("Could not read multipart form: {error}");
        Error::MultipartError(error.body_text())
    }
}

/// Reduce a client supplied file name to a name that is safe to use on the
/// server's file system.
///
/// Directories are dropped, characters other than ASCII letters, digits, `.`,
/// `-` and `_` become `_` and leading dots are removed.
pub fn secure_file_name(file_name: &str) -> String {
    let base_name = file_name.rsplit(['/', '\\']).next().unwrap_or_default();

    let safe_name: String = base_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let safe_name = safe_name.trim_start_matches('.');

    if safe_name.is_empty() {
        "statement.pdf".to_owned()
    } else {
        safe_name.to_owned()
    }
}

/// An uploaded file that is deleted when this value is dropped.
#[derive(Debug)]
pub struct TempUpload {
    path: PathBuf,
}

impl TempUpload {
    /// Write `data` to `path`.
    ///
    /// # Errors
    /// Returns [Error::Io] if the file cannot be written. Anything partially
    /// written is removed.
    pub async fn create(path: PathBuf, data: &[u8]) -> Result<Self, Error> {
        let upload = Self { path };

        tokio::fs::write(&upload.path, data).await.map_err(|error| {
            Error::Io(format!("could not save {}: {error}", upload.path.display()))
        })?;

        Ok(upload)
    }

    /// Where the file was saved.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!("Removed upload {}", self.path.display()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
            Err(error) => {
                tracing::warn!("Could not remove upload {}: {error}", self.path.display())
            }
        }
    }
}

#[cfg(test)]
mod secure_file_name_tests {
    use super::secure_file_name;

    #[test]
    fn keeps_simple_names() {
        assert_eq!(secure_file_name("statement-2024_01.pdf"), "statement-2024_01.pdf");
    }

    #[test]
    fn drops_directories() {
        assert_eq!(secure_file_name("../../etc/passwd.pdf"), "passwd.pdf");
        assert_eq!(secure_file_name(r"C:\Users\me\week 3.pdf"), "week_3.pdf");
    }

    #[test]
    fn replaces_unsafe_characters() {
        assert_eq!(secure_file_name("my statement (1).pdf"), "my_statement__1_.pdf");
        assert_eq!(secure_file_name("résumé.pdf"), "r_sum_.pdf");
    }

    #[test]
    fn removes_leading_dots() {
        assert_eq!(secure_file_name(".hidden.pdf"), "hidden.pdf");
        assert_eq!(secure_file_name("..."), "statement.pdf");
    }
}
