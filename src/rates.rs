//! Currency rates container.

use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Utc};

use crate::currency::CurrencyCode;

/// The rates quoted for one base currency.
///
/// Each rate is the amount of the target currency that equals one unit of the base.
#[derive(Clone, PartialEq)]
pub struct Rates {
	base: CurrencyCode,
	rates: BTreeMap<CurrencyCode, f64>,
	/// When the quote service last refreshed this dataset, if it said.
	pub last_updated_at: Option<DateTime<Utc>>,
}

impl Rates {
	/// Creates an empty [`Rates`] value for the given base currency.
	pub fn new(base: CurrencyCode) -> Self {
		Self { base, rates: BTreeMap::new(), last_updated_at: None }
	}

	/// The base currency.
	#[inline] pub fn base(&self) -> CurrencyCode { self.base }
	/// Gets the count of rates.
	#[inline] pub fn len(&self) -> usize { self.rates.len() }
	/// Gets whether there are no rates.
	#[inline] pub fn is_empty(&self) -> bool { self.rates.is_empty() }

	/// Inserts a rate, replacing and returning the previous one for that currency.
	pub fn insert(&mut self, currency: CurrencyCode, rate: f64) -> Option<f64> {
		self.rates.insert(currency, rate)
	}

	/// Iterates over currency rates, ordered by currency code.
	pub fn iter(&self) -> impl Iterator<Item = (CurrencyCode, f64)> + '_ {
		self.rates.iter().map(|(&currency, &rate)| (currency, rate))
	}

	/// Gets the rate for the given currency, if exists.
	///
	/// The base currency is always `1.0`, even when the service left it out.
	pub fn get(&self, currency: CurrencyCode) -> Option<f64> {
		match self.rates.get(&currency) {
			Some(&rate) => Some(rate),
			None if currency == self.base => Some(1.0),
			None => None,
		}
	}

	/// Converts an amount between currencies.
	///
	/// Returns [`None`] if either the `from` or `to` currencies are missing.
	pub fn convert(&self, amount: f64, from: CurrencyCode, to: CurrencyCode) -> Option<f64> {
		let from_value = self.get(from)?;
		let to_value = self.get(to)?;
		Some(amount * (to_value / from_value))
	}
}

impl Extend<(CurrencyCode, f64)> for Rates {
	fn extend<T: IntoIterator<Item = (CurrencyCode, f64)>>(&mut self, iter: T) {
		self.rates.extend(iter)
	}
}

impl fmt::Debug for Rates {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{} ", self.base)?;
		let mut m = f.debug_map();
		for (currency, rate) in self.iter() {
			m.entry(&format_args!("{currency}"), &rate);
		}
		m.finish()
	}
}
