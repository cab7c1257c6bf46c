//! Generates a C++ header holding a matrix of FX conversion rates.
//!
//! The [`RateMatrix`] is built from one [`QuoteSource`] fetch per currency, normally the
//! [Exchange Rate API](https://www.exchangerate-api.com/) through [`ExchangeRateApi`], and is
//! rendered by [`write_header`].

#![deny(missing_docs)]

pub mod client;
pub mod currency;
pub mod error;
pub mod header;
pub mod matrix;
pub mod rates;
pub mod source;
pub mod url;

pub use client::ExchangeRateApi;
pub use currency::CurrencyCode;
pub use error::Error;
pub use header::{render_header, write_header};
pub use matrix::RateMatrix;
pub use rates::Rates;
pub use source::QuoteSource;
