//! [Currency codes](CurrencyCode).

use std::{
	fmt::{self, Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

const CURRENCY_LEN_MIN: usize = 2;
const CURRENCY_LEN_MAX: usize = 5;

/// [Currency code](https://en.wikipedia.org/wiki/ISO_4217).
///
/// Codes are checked for shape only (2 to 5 uppercase ASCII letters), not against a list of
/// known currencies. The quote service is the authority on which codes it understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CurrencyCode {
	/// The code in uppercase ASCII, followed by zeroes.
	code: [u8; CURRENCY_LEN_MAX],
	/// The count of non-zero bytes in `code`.
	len: u8,
}

/// The default currency code is [`USD`](list::USD).
///
/// It is chosen for being the most traded currency.
impl Default for CurrencyCode {
	#[inline] fn default() -> Self { list::USD }
}

impl CurrencyCode {
	/// Creates a [`CurrencyCode`] from a fixed-size array at compile time.
	///
	/// # Panics
	/// If `N` is out of range or the code has a byte that isn't uppercase ASCII. In a const
	/// context this is a compile error.
	pub const fn from_array<const N: usize>(code: [u8; N]) -> Self {
		assert!(N >= CURRENCY_LEN_MIN && N <= CURRENCY_LEN_MAX, "currency code length out of range");
		let mut buf = [0u8; CURRENCY_LEN_MAX];
		let mut n = 0;
		while n < N {
			assert!(code[n].is_ascii_uppercase(), "currency code must be uppercase ASCII");
			buf[n] = code[n];
			n += 1;
		}
		Self { code: buf, len: N as u8 }
	}

	/// The length of the code in letters.
	#[inline] pub const fn len(&self) -> usize { self.len as usize }

	/// Always `false`; a code has at least two letters.
	#[inline] pub const fn is_empty(&self) -> bool { self.len == 0 }
}

impl TryFrom<&[u8]> for CurrencyCode {
	type Error = Error;

	fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
		let len = value.len();
		if len < CURRENCY_LEN_MIN { return Err(Error::TooShort); }
		if len > CURRENCY_LEN_MAX { return Err(Error::TooLong); }
		if let Some(&bad_char) = value.iter().find(|c| !c.is_ascii_uppercase()) {
			return Err(Error::InvalidCharacter(bad_char));
		}
		let mut code = [0u8; CURRENCY_LEN_MAX];
		code[..len].copy_from_slice(value);
		Ok(Self { code, len: len as u8 })
	}
}

impl TryFrom<&str> for CurrencyCode {
	type Error = Error;
	#[inline] fn try_from(value: &str) -> Result<Self, Self::Error> { Self::try_from(value.as_bytes()) }
}

impl FromStr for CurrencyCode {
	type Err = Error;
	#[inline] fn from_str(s: &str) -> Result<Self, Self::Err> { Self::try_from(s.trim()) }
}

impl AsRef<[u8]> for CurrencyCode {
	#[inline] fn as_ref(&self) -> &[u8] { &self.code[..self.len()] }
}

impl AsRef<str> for CurrencyCode {
	#[inline] fn as_ref(&self) -> &str {
		unsafe {
			// SAFETY: the code is always uppercase ASCII per the construction invariant, therefore
			// valid UTF-8.
			std::str::from_utf8_unchecked(AsRef::<[u8]>::as_ref(self))
		}
	}
}

impl Display for CurrencyCode {
	#[inline] fn fmt(&self, f: &mut Formatter) -> fmt::Result { Display::fmt(AsRef::<str>::as_ref(self), f) }
}

impl Serialize for CurrencyCode {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
		<Self as AsRef<str>>::as_ref(self).serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for CurrencyCode {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: Deserializer<'de> {
		struct Visitor;

		impl<'de> serde::de::Visitor<'de> for Visitor {
			type Value = CurrencyCode;

			fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
				formatter.write_str("a currency code")
			}

			fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> where E: serde::de::Error {
				v.parse().map_err(serde::de::Error::custom)
			}
		}

		deserializer.deserialize_str(Visitor)
	}
}

/// Invalid currency code error.
///
/// Valid currency codes are 2 to 5 uppercase alpha ASCII characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	/// The currency code is too short.
	#[error("the currency code is too short")]
	TooShort,
	/// The currency code is too long.
	#[error("the currency code is too long")]
	TooLong,
	/// The currency code has an invalid character.
	#[error("invalid currency code character ({0:#04x})")]
	InvalidCharacter(u8),
}

pub mod list {
	//! [Currencies](super::CurrencyCode) constants.
	//!
	//! Only the currencies of the default matrix are defined here. Any other code can be parsed
	//! at runtime.

	/// Defines const [`super::CurrencyCode`]s and the [`DEFAULT`] array holding them in order.
	macro_rules! define_currencies {
		($($currency:ident),*) => {
			$(
				#[doc=concat!("The [", stringify!($currency), "](https://www.google.com/search?q=USD+to+", stringify!($currency), ") currency code.")]
				pub const $currency: crate::CurrencyCode = crate::CurrencyCode::from_array(*bstringify::bstringify!($currency));
			)*
			/// The length of [`DEFAULT`].
			const LEN: usize = 0 $(+ { stringify!($currency); 1 })*;
			/// The default currencies of the generated matrix, in row order.
			pub const DEFAULT: [crate::CurrencyCode; LEN] = [ $( $currency ),* ];
		};
	}

	define_currencies!(USD, EUR, GBP, JPY, CHF, CNY, BRL, KRW, INR);
}
