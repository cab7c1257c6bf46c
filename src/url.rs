//! URL building

use crate::currency::CurrencyCode;

/// The default quote service endpoint, to which the base currency code is appended.
pub const DEFAULT_BASE_URL: &str = "https://api.exchangerate-api.com/v4/latest/";

/// Builds the URL of the latest rates for `base`.
///
/// Exactly one `/` separates `base_url` from the code, whether or not `base_url` ends in one.
pub fn latest_url(base_url: &str, base: CurrencyCode) -> String {
	let base_url = base_url.trim_end_matches('/');
	let code: &str = base.as_ref();
	let mut url = String::with_capacity(base_url.len() + 1 + code.len());
	url.push_str(base_url);
	url.push('/');
	url.push_str(code);
	url
}
