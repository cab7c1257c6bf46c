//! [`ExchangeRateApi`], the HTTP [`QuoteSource`].

use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde_json as json;

use crate::{
	currency::CurrencyCode,
	error::Error,
	rates::Rates,
	source::QuoteSource,
	url::{self, DEFAULT_BASE_URL},
};

/// Client of an [Exchange Rate API](https://www.exchangerate-api.com/)-style `latest` endpoint.
///
/// `GET <base_url>/<BASE>` must answer with a JSON object holding a `rates` object that maps
/// currency codes to numbers.
#[derive(Debug, Clone)]
pub struct ExchangeRateApi {
	client: reqwest::Client,
	base_url: String,
	timeout: Option<Duration>,
}

impl Default for ExchangeRateApi {
	fn default() -> Self { Self::new(reqwest::Client::new()) }
}

impl ExchangeRateApi {
	/// Creates a client of the public endpoint.
	pub fn new(client: reqwest::Client) -> Self {
		Self::with_base_url(client, DEFAULT_BASE_URL)
	}

	/// Creates a client of the endpoint at `base_url`.
	pub fn with_base_url(client: reqwest::Client, base_url: impl Into<String>) -> Self {
		Self { client, base_url: base_url.into(), timeout: None }
	}

	/// Sets a timeout on every request.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	/// The endpoint the base currency code is appended to.
	pub fn base_url(&self) -> &str { &self.base_url }
}

impl QuoteSource for ExchangeRateApi {
	async fn fetch(&self, base: CurrencyCode) -> Result<Rates, Error> {
		let url = url::latest_url(&self.base_url, base);
		info!("Fetching {base} rates from {url}");
		let mut request = self.client.get(&url);
		if let Some(timeout) = self.timeout {
			request = request.timeout(timeout);
		}
		let response = request.send().await?;

		if response.status() == 429 {
			return Err(Error::RateLimit);
		}

		let response = response.error_for_status()?;
		let body = response.bytes().await?;
		let payload = json::from_slice::<json::Value>(&body).map_err(|_| Error::ResponseParse)?;
		parse_rates(base, &payload)
	}
}

/// Reads a `latest` response body.
///
/// Entries that aren't a currency code mapped to a number are skipped.
pub(crate) fn parse_rates(base: CurrencyCode, payload: &json::Value) -> Result<Rates, Error> {
	let data = payload
		.get("rates")
		.and_then(|rates| rates.as_object())
		.ok_or(Error::ResponseParse)?;

	let mut rates = Rates::new(base);
	for (currency, value) in data {
		let Ok(currency) = currency.parse::<CurrencyCode>() else {
			debug!("Skipping {base} rate with unusable code {currency:?}");
			continue;
		};
		let Some(value) = value.as_f64() else {
			debug!("Skipping non-numeric {base}/{currency} rate {value}");
			continue;
		};
		rates.insert(currency, value);
	}

	rates.last_updated_at = payload
		.get("time_last_updated")
		.and_then(|time| time.as_i64())
		.and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));

	Ok(rates)
}
