//! Sources of per-page statement text.

use std::{
    panic::{self, AssertUnwindSafe},
    path::{Path, PathBuf},
};

use crate::Error;

/// Something that can produce the plain text of each page of a statement, in
/// page order.
pub trait PageSource {
    /// The text of each page. A page without text is an empty string.
    ///
    /// # Errors
    /// Returns an error if the document cannot be read.
    fn pages(&self) -> Result<Vec<String>, Error>;
}

/// The pages of a PDF file on the local file system.
#[derive(Debug, Clone)]
pub struct PdfPages {
    path: PathBuf,
}

impl PdfPages {
    /// Read pages from the PDF at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_owned(),
        }
    }
}

impl PageSource for PdfPages {
    /// Extract the text of each page with [pdf_extract].
    ///
    /// # Errors
    /// Returns [Error::Io] if the file cannot be read and
    /// [Error::PdfExtraction] if the text cannot be extracted. The extraction
    /// library panics on some malformed documents, those panics are returned
    /// as [Error::PdfExtraction] too.
    fn pages(&self) -> Result<Vec<String>, Error> {
        let data = std::fs::read(&self.path).map_err(|error| {
            Error::Io(format!("could not read {}: {error}", self.path.display()))
        })?;

        tracing::debug!("Read {} bytes from {}", data.len(), self.path.display());

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(&data)
        }));

        match result {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(error)) => Err(Error::PdfExtraction(error.to_string())),
            Err(_) => Err(Error::PdfExtraction(
                "the PDF could not be read, it may be malformed".to_owned(),
            )),
        }
    }
}

/// Pages held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticPages(pub Vec<String>);

impl PageSource for StaticPages {
    fn pages(&self) -> Result<Vec<String>, Error> {
        Ok(self.0.clone())
    }
}
