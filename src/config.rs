//! Command line configuration for the server and the converter.

use std::{net::IpAddr, path::PathBuf};

use clap::{Args, Parser};

use crate::statement::NoiseMarkers;

/// The largest upload the server accepts, 16 MiB.
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Overrides for the header and footer text of the statement template.
#[derive(Args, Debug, Clone, Default)]
pub struct NoiseMarkerArgs {
    /// Text that marks a whole line as header or footer text wherever it
    /// appears in the line. Replaces the default markers, may be repeated.
    #[arg(long = "noise-marker", value_name = "TEXT")]
    pub substrings: Vec<String>,

    /// A line that is header or footer text only if it matches exactly.
    /// Replaces the default exact-line markers, may be repeated.
    #[arg(long = "noise-line", value_name = "TEXT")]
    pub exact_lines: Vec<String>,
}

impl NoiseMarkerArgs {
    /// The markers to use, falling back to the defaults for any kind of marker
    /// that was not given.
    pub fn noise_markers(&self) -> NoiseMarkers {
        let defaults = NoiseMarkers::default();

        NoiseMarkers::new(
            if self.substrings.is_empty() {
                defaults.substrings
            } else {
                self.substrings.clone()
            },
            if self.exact_lines.is_empty() {
                defaults.exact_lines
            } else {
                self.exact_lines.clone()
            },
        )
    }
}

/// Converts weekly payout statements (PDF) to Excel spreadsheets.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct ServerConfig {
    /// The address to listen on.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 5000)]
    pub port: u16,

    /// Directory for temporarily storing uploaded statements.
    #[arg(long, default_value = "uploads")]
    pub upload_dir: PathBuf,

    /// Header and footer markers of the statement template.
    #[command(flatten)]
    pub noise_markers: NoiseMarkerArgs,
}
