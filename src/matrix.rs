//! The [`RateMatrix`] and how it is built from a [`QuoteSource`].

use std::{cmp::Ordering, ops::Index};

use log::{info, trace};

use crate::{currency::CurrencyCode, error::Error, source::QuoteSource};

/// Square matrix of conversion rates between an ordered list of currencies.
///
/// Entry `(i, j)` is how many units of currency `j` equal one unit of currency `i`. The diagonal
/// is `1.0` and `m[i][j] * m[j][i]` is `1.0` up to rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct RateMatrix {
	currencies: Vec<CurrencyCode>,
	rows: Vec<Vec<f64>>,
}

impl RateMatrix {
	/// Builds the matrix for `currencies`, in the given order.
	///
	/// Fetches one quote per currency, in order, and nothing else. The entries right of the
	/// diagonal come from the quotes; the ones left of it are reciprocals of rows already built.
	///
	/// # Errors
	/// - [`Error::NoCurrencies`] if `currencies` is empty.
	/// - Whatever the `source` fails with.
	/// - [`Error::MissingRate`] if a quote lacks a currency that comes after its base.
	/// - [`Error::InvalidRate`] if such a rate, or its reciprocal, isn't a normal positive number.
	pub async fn build<S: QuoteSource>(
		source: S,
		currencies: impl IntoIterator<Item = CurrencyCode>,
	) -> Result<Self, Error> {
		let currencies: Vec<CurrencyCode> = currencies.into_iter().collect();
		if currencies.is_empty() {
			return Err(Error::NoCurrencies);
		}

		let n = currencies.len();
		let mut rows: Vec<Vec<f64>> = Vec::with_capacity(n);
		for (i, &base) in currencies.iter().enumerate() {
			let quote = source.fetch(base).await?;
			match quote.last_updated_at {
				Some(updated) => info!("Got {} {base} rates, last updated {updated}", quote.len()),
				None => info!("Got {} {base} rates", quote.len()),
			}

			let mut row = Vec::with_capacity(n);
			for (j, &target) in currencies.iter().enumerate() {
				let rate = match j.cmp(&i) {
					Ordering::Equal => 1.0,
					Ordering::Less => {
						let rate = 1.0 / rows[j][i];
						trace!("{base}/{target} = 1 / {target}/{base} = {rate}");
						rate
					}
					Ordering::Greater => {
						let rate = quote.get(target).ok_or(Error::MissingRate { base, target })?;
						// The reciprocal fills the entry across the diagonal, so it must be normal too.
						if !(rate > 0.0 && rate.is_normal() && rate.recip().is_normal()) {
							return Err(Error::InvalidRate { base, target, rate });
						}
						rate
					}
				};
				row.push(rate);
			}
			rows.push(row);
		}

		Ok(Self { currencies, rows })
	}

	/// The currencies, in row (and column) order.
	#[inline] pub fn currencies(&self) -> &[CurrencyCode] { &self.currencies }
	/// The rows, one per currency.
	#[inline] pub fn rows(&self) -> &[Vec<f64>] { &self.rows }
	/// The count of currencies.
	#[inline] pub fn len(&self) -> usize { self.currencies.len() }
	/// Always `false` for a built matrix.
	#[inline] pub fn is_empty(&self) -> bool { self.currencies.is_empty() }

	/// Gets entry `(i, j)`, if both indices are in range.
	pub fn get(&self, i: usize, j: usize) -> Option<f64> {
		self.rows.get(i)?.get(j).copied()
	}

	/// Gets the rate from `from` to `to`, if both are in the matrix.
	pub fn rate(&self, from: CurrencyCode, to: CurrencyCode) -> Option<f64> {
		let i = self.position(from)?;
		let j = self.position(to)?;
		self.get(i, j)
	}

	/// Converts an amount between currencies.
	///
	/// Returns [`None`] if either the `from` or `to` currencies are missing.
	pub fn convert(&self, amount: f64, from: CurrencyCode, to: CurrencyCode) -> Option<f64> {
		Some(amount * self.rate(from, to)?)
	}

	/// Iterates over the rows along with their base currency.
	pub fn iter(&self) -> impl Iterator<Item = (CurrencyCode, &[f64])> + '_ {
		self.currencies.iter().copied().zip(self.rows.iter().map(Vec::as_slice))
	}

	fn position(&self, currency: CurrencyCode) -> Option<usize> {
		self.currencies.iter().position(|&c| c == currency)
	}
}

impl Index<usize> for RateMatrix {
	type Output = [f64];
	#[inline] fn index(&self, i: usize) -> &[f64] { &self.rows[i] }
}

#[cfg(test)]
mod tests {
	use std::{cell::RefCell, collections::HashMap};

	use approx::assert_relative_eq;

	use super::*;
	use crate::{currency::list::*, rates::Rates};

	/// Quotes from fixed tables and records which bases were asked for.
	#[derive(Default)]
	struct Table {
		quotes: HashMap<CurrencyCode, Vec<(CurrencyCode, f64)>>,
		calls: RefCell<Vec<CurrencyCode>>,
	}

	impl Table {
		fn with(mut self, base: CurrencyCode, rates: &[(CurrencyCode, f64)]) -> Self {
			self.quotes.insert(base, rates.to_vec());
			self
		}

		/// Quotes derived from a value of each currency in a common unit, so they are consistent.
		fn from_values(values: &[(CurrencyCode, f64)]) -> Self {
			values.iter().fold(Self::default(), |table, &(base, base_value)| {
				let rates: Vec<_> = values.iter()
					.map(|&(target, target_value)| (target, base_value / target_value))
					.collect();
				table.with(base, &rates)
			})
		}
	}

	impl QuoteSource for Table {
		async fn fetch(&self, base: CurrencyCode) -> Result<Rates, Error> {
			self.calls.borrow_mut().push(base);
			let quote = self.quotes.get(&base).ok_or(Error::ResponseParse)?;
			let mut rates = Rates::new(base);
			rates.extend(quote.iter().copied());
			Ok(rates)
		}
	}

	fn values() -> Table {
		Table::from_values(&[
			(USD, 1.0),
			(EUR, 1.08),
			(GBP, 1.27),
			(JPY, 0.0064),
			(CHF, 1.11),
			(KRW, 0.00073),
		])
	}

	#[tokio::test]
	async fn test_two_currencies() {
		let table = Table::default().with(USD, &[(EUR, 0.9)]).with(EUR, &[]);
		let matrix = RateMatrix::build(&table, [USD, EUR]).await.unwrap();
		assert_eq!(matrix.currencies(), [USD, EUR]);
		assert_eq!(matrix[0], [1.0, 0.9]);
		assert_eq!(matrix[1][1], 1.0);
		assert_relative_eq!(matrix[1][0], 1.0 / 0.9, max_relative = 1e-12);
		assert_relative_eq!(matrix[1][0], 1.111_111_111_111, max_relative = 1e-12);
	}

	#[tokio::test]
	async fn test_invariants() {
		let table = values();
		let currencies = [USD, EUR, GBP, JPY, CHF, KRW];
		let matrix = RateMatrix::build(&table, currencies).await.unwrap();
		assert_eq!(matrix.len(), currencies.len());
		for i in 0..matrix.len() {
			assert_eq!(matrix[i].len(), currencies.len());
			assert_eq!(matrix[i][i], 1.0);
			for j in 0..matrix.len() {
				assert_relative_eq!(matrix[i][j] * matrix[j][i], 1.0, max_relative = 1e-9);
			}
		}
	}

	#[tokio::test]
	async fn test_one_fetch_per_currency_in_order() {
		let table = values();
		RateMatrix::build(&table, [JPY, USD, KRW, EUR]).await.unwrap();
		assert_eq!(*table.calls.borrow(), [JPY, USD, KRW, EUR]);
	}

	#[tokio::test]
	async fn test_lower_triangle_is_reciprocal_not_quoted() {
		// EUR quotes USD inconsistently; the matrix must not use it.
		let table = Table::default()
			.with(USD, &[(EUR, 0.8)])
			.with(EUR, &[(USD, 2.0)]);
		let matrix = RateMatrix::build(&table, [USD, EUR]).await.unwrap();
		assert_eq!(matrix[1][0], 1.0 / 0.8);
	}

	#[tokio::test]
	async fn test_reorder_is_relabeling() {
		let table = values();
		let ab = RateMatrix::build(&table, [GBP, JPY]).await.unwrap();
		let ba = RateMatrix::build(&table, [JPY, GBP]).await.unwrap();
		assert_relative_eq!(ab[0][1], 1.0 / ba[1][0], max_relative = 1e-12);
		assert_relative_eq!(ab.rate(GBP, JPY).unwrap(), ba.rate(GBP, JPY).unwrap(), max_relative = 1e-12);
		assert_relative_eq!(ab.rate(JPY, GBP).unwrap(), ba.rate(JPY, GBP).unwrap(), max_relative = 1e-12);
	}

	#[tokio::test]
	async fn test_single_currency() {
		let table = Table::default().with(CHF, &[]);
		let matrix = RateMatrix::build(&table, [CHF]).await.unwrap();
		assert_eq!(matrix.rows(), [vec![1.0]]);
	}

	#[tokio::test]
	async fn test_empty() {
		let table = values();
		let result = RateMatrix::build(&table, Vec::new()).await;
		assert!(matches!(result, Err(Error::NoCurrencies)));
		assert!(table.calls.borrow().is_empty());
	}

	#[tokio::test]
	async fn test_missing_rate_fails() {
		let table = Table::default()
			.with(USD, &[(EUR, 0.9)])
			.with(EUR, &[(USD, 1.1)]);
		match RateMatrix::build(&table, [USD, EUR, GBP]).await {
			Err(Error::MissingRate { base, target }) => {
				assert_eq!(base, USD);
				assert_eq!(target, GBP);
			}
			other => panic!("unexpected {other:?}"),
		}
		assert_eq!(*table.calls.borrow(), [USD]);
	}

	#[tokio::test]
	async fn test_missing_rate_in_later_row_fails() {
		let table = Table::default()
			.with(USD, &[(EUR, 0.9), (GBP, 0.8)])
			.with(EUR, &[(USD, 1.1)]);
		match RateMatrix::build(&table, [USD, EUR, GBP]).await {
			Err(Error::MissingRate { base, target }) => {
				assert_eq!(base, EUR);
				assert_eq!(target, GBP);
			}
			other => panic!("unexpected {other:?}"),
		}
	}

	#[tokio::test]
	async fn test_zero_rate_fails() {
		let table = Table::default().with(USD, &[(EUR, 0.0)]);
		assert!(matches!(
			RateMatrix::build(&table, [USD, EUR]).await,
			Err(Error::InvalidRate { rate, .. }) if rate == 0.0
		));
	}

	#[tokio::test]
	async fn test_subnormal_rate_fails() {
		let table = Table::default().with(USD, &[(EUR, 1e-310)]).with(EUR, &[]);
		assert!(matches!(
			RateMatrix::build(&table, [USD, EUR]).await,
			Err(Error::InvalidRate { base, target, .. }) if base == USD && target == EUR
		));
		assert_eq!(*table.calls.borrow(), [USD]);
	}

	#[tokio::test]
	async fn test_rate_with_subnormal_reciprocal_fails() {
		let table = Table::default().with(USD, &[(EUR, 1e308)]).with(EUR, &[]);
		assert!(matches!(
			RateMatrix::build(&table, [USD, EUR]).await,
			Err(Error::InvalidRate { rate, .. }) if rate == 1e308
		));
	}

	#[tokio::test]
	async fn test_non_finite_rate_fails() {
		for rate in [f64::INFINITY, f64::NAN, -0.5] {
			let table = Table::default().with(USD, &[(EUR, rate)]);
			assert!(matches!(
				RateMatrix::build(&table, [USD, EUR]).await,
				Err(Error::InvalidRate { .. })
			));
		}
	}

	#[tokio::test]
	async fn test_source_error_propagates() {
		let table = Table::default().with(USD, &[(EUR, 0.9)]);
		assert!(matches!(
			RateMatrix::build(&table, [USD, EUR]).await,
			Err(Error::ResponseParse)
		));
	}

	#[tokio::test]
	async fn test_lookup() {
		let table = Table::default()
			.with(USD, &[(EUR, 0.5), (GBP, 0.25)])
			.with(EUR, &[(GBP, 0.5)])
			.with(GBP, &[]);
		let matrix = RateMatrix::build(&table, [USD, EUR, GBP]).await.unwrap();
		assert_eq!(matrix.rate(GBP, USD), Some(4.0));
		assert_eq!(matrix.rate(EUR, GBP), Some(0.5));
		assert_eq!(matrix.rate(EUR, JPY), None);
		assert_eq!(matrix.convert(10.0, EUR, USD), Some(20.0));
		assert_eq!(matrix.get(2, 3), None);
		let bases: Vec<_> = matrix.iter().map(|(base, _)| base).collect();
		assert_eq!(bases, [USD, EUR, GBP]);
	}
}
