//! C++ header generation.
//!
//! The header declares, in an anonymous namespace, the currency names and the rates as a
//! fixed-size `double` array, so downstream C++ code can `#include` a snapshot of the market.

use std::{
	fmt::{self, Display, Formatter},
	io,
};

use chrono::{DateTime, FixedOffset, SecondsFormat};

use crate::matrix::RateMatrix;

/// Writes the header for `matrix` into `out`, then flushes it.
///
/// With `generated_at`, the header also records that time, as a comment and as a
/// `std::chrono::system_clock::time_point` named `rates_date`.
pub fn write_header(
	mut out: impl io::Write,
	matrix: &RateMatrix,
	generated_at: Option<DateTime<FixedOffset>>,
) -> io::Result<()> {
	write!(out, "{}", Header { matrix, generated_at })?;
	out.flush()
}

/// Renders the header for `matrix` into a string.
///
/// See [`write_header`].
pub fn render_header(matrix: &RateMatrix, generated_at: Option<DateTime<FixedOffset>>) -> String {
	Header { matrix, generated_at }.to_string()
}

/// The header text of a matrix.
struct Header<'a> {
	matrix: &'a RateMatrix,
	generated_at: Option<DateTime<FixedOffset>>,
}

impl Display for Header<'_> {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		let Header { matrix, generated_at } = *self;

		writeln!(f, "// FX rates from Exchange Rate API")?;
		if let Some(generated_at) = generated_at {
			writeln!(f, "// generated at {}", generated_at.to_rfc3339_opts(SecondsFormat::Micros, false))?;
		}
		writeln!(f, "#pragma once")?;
		writeln!(f)?;
		writeln!(f, "#include <vector>")?;
		writeln!(f, "#include <string>")?;
		if generated_at.is_some() {
			writeln!(f, "#include <chrono>")?;
		}
		writeln!(f)?;
		writeln!(f, "namespace {{")?;

		if let Some(generated_at) = generated_at {
			writeln!(
				f,
				"  const std::chrono::system_clock::time_point rates_date(std::chrono::microseconds({}LL));",
				generated_at.timestamp_micros(),
			)?;
		}

		write!(f, "  std::vector<std::string> currencies {{ ")?;
		for (i, currency) in matrix.currencies().iter().enumerate() {
			if i > 0 { write!(f, ", ")?; }
			write!(f, "\"{currency}\"")?;
		}
		writeln!(f, " }};")?;

		let n = matrix.len();
		writeln!(f, "  const double rates[{n}][{n}] = {{")?;
		for (currency, row) in matrix.iter() {
			write!(f, "     /*{currency}*/ {{ ")?;
			for (j, &rate) in row.iter().enumerate() {
				if j > 0 { write!(f, ", ")?; }
				write!(f, "{}", Literal(rate))?;
			}
			writeln!(f, " }},")?;
		}
		writeln!(f, "  }};")?;

		writeln!(f, "}} // namespace")
	}
}

/// A `double` literal: the shortest decimal that reads back as the same value, always with a
/// `.` or an exponent.
struct Literal(f64);

impl Display for Literal {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		// Debug formatting of f64 is shortest round-trip and keeps the `.0` of whole numbers.
		write!(f, "{:?}", self.0)
	}
}
