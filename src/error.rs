//! [`Error`] type.

use std::io;

use crate::currency::CurrencyCode;

/// An error from the quote service, the HTTP client, or while writing the output.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// No currencies were given to build a matrix from.
	#[error("at least one currency is required")]
	NoCurrencies,
	/// The rate-limit was hit.
	#[error("you have hit the quote service rate limit")]
	RateLimit,
	/// HTTP error.
	#[error("http error: {0}")]
	Http(#[from] reqwest::Error),
	/// Failed to parse the response.
	#[error("failed to parse the response")]
	ResponseParse,
	/// The quote for `base` has no rate for `target`.
	#[error("no {base}/{target} rate in the quote for {base}")]
	MissingRate {
		/// The currency the quote was fetched for.
		base: CurrencyCode,
		/// The currency that was looked up.
		target: CurrencyCode,
	},
	/// The quote for `base` has a rate for `target` that isn't finite and positive.
	#[error("invalid {base}/{target} rate: {rate}")]
	InvalidRate {
		/// The currency the quote was fetched for.
		base: CurrencyCode,
		/// The currency that was looked up.
		target: CurrencyCode,
		/// The offending rate.
		rate: f64,
	},
	/// Failed to write the output.
	#[error("i/o error: {0}")]
	Io(#[from] io::Error),
}
