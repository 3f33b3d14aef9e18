use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use payout_sheet::{
    Error,
    config::NoiseMarkerArgs,
    convert_statement,
    statement::{PdfPages, clean_transactions, extract_transactions},
};

/// Convert a weekly payout statement (PDF) to an Excel spreadsheet without
/// starting the server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The statement to convert.
    pdf: PathBuf,

    /// Where to write the spreadsheet. Defaults to the PDF path with an
    /// `.xlsx` extension.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the transactions as JSON instead of writing a spreadsheet.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    noise_markers: NoiseMarkerArgs,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(filter::LevelFilter::INFO),
        )
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("Could not convert {}: {error}", args.pdf.display());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let source = PdfPages::new(&args.pdf);
    let markers = args.noise_markers.noise_markers();

    if args.json {
        let transactions = extract_transactions(&source, &markers)?;
        if transactions.is_empty() {
            return Err(Error::NoTransactionsFound);
        }

        let json = serde_json::to_string_pretty(&clean_transactions(&transactions))
            .map_err(|error| Error::Io(error.to_string()))?;
        println!("{json}");

        return Ok(());
    }

    let workbook = convert_statement(&source, &markers)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.pdf.with_extension("xlsx"));
    std::fs::write(&output, workbook)?;

    tracing::info!("Wrote {}", output.display());

    Ok(())
}
