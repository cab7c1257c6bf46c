//! [`QuoteSource`]

use crate::{currency::CurrencyCode, error::Error, rates::Rates};

/// Something that quotes the latest rates for a base currency.
///
/// [`ExchangeRateApi`](crate::ExchangeRateApi) is the network implementation. Anything else,
/// e.g. a fixed table in a test, can stand in for it when building a
/// [`RateMatrix`](crate::RateMatrix).
#[allow(async_fn_in_trait)]
pub trait QuoteSource {
	/// Fetches the rates for `base`.
	///
	/// An unknown `base` is an error of the source's choosing.
	async fn fetch(&self, base: CurrencyCode) -> Result<Rates, Error>;
}

impl<S: QuoteSource + ?Sized> QuoteSource for &S {
	#[inline] async fn fetch(&self, base: CurrencyCode) -> Result<Rates, Error> {
		(**self).fetch(base).await
	}
}
