//! `fxgen`: fetches the latest rates between a list of currencies and prints them as a C++
//! header.
//!
//! ```bash
//! fxgen --currencies USD,EUR,GBP --output fx_rates.h
//! ```
//!
//! Logs go to stderr, filtered by `RUST_LOG` (default `info`).

use std::{fs::File, io::{self, BufWriter}, path::PathBuf, process::ExitCode};

use chrono::Local;
use clap::Parser;
use fxgen::{currency::list, url::DEFAULT_BASE_URL, write_header, CurrencyCode, Error, ExchangeRateApi, RateMatrix};
use log::{error, info};

/// Generate a C++ header with the FX rates between currencies.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
	/// Comma separated list of currencies to get rates for.
	#[arg(short, long, value_delimiter = ',', default_values_t = list::DEFAULT)]
	currencies: Vec<CurrencyCode>,
	/// Output file for the rates [default: stdout].
	#[arg(short, long)]
	output: Option<PathBuf>,
	/// Quote service endpoint the base currency code is appended to.
	#[arg(long, env = "FXGEN_BASE_URL", default_value = DEFAULT_BASE_URL, hide = true)]
	base_url: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
	init_logger();
	let cli = Cli::parse();
	match run(cli).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			error!("{e}");
			ExitCode::FAILURE
		}
	}
}

async fn run(cli: Cli) -> Result<(), Error> {
	let names: Vec<String> = cli.currencies.iter().map(ToString::to_string).collect();
	info!("Getting rates for {names:?}");

	let source = ExchangeRateApi::with_base_url(reqwest::Client::new(), cli.base_url);
	let matrix = RateMatrix::build(&source, cli.currencies).await?;
	let generated_at = Some(Local::now().fixed_offset());

	// Nothing is opened before the matrix is complete, so a failed fetch leaves no file behind.
	match cli.output {
		Some(path) => {
			let file = File::create(&path)?;
			write_header(BufWriter::new(file), &matrix, generated_at)?;
			info!("Wrote {} rates to {}", matrix.len() * matrix.len(), path.display());
		}
		None => write_header(io::stdout().lock(), &matrix, generated_at)?,
	}
	Ok(())
}

fn init_logger() {
	env_logger::Builder::new()
		.filter_level(log::LevelFilter::Info)
		.parse_default_env()
		.init();
}
