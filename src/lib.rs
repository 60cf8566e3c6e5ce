//! # dc-address-parser
//!
//! Normalize and parse Washington, DC street addresses.
//!
//! Addresses typed by people arrive with abbreviations, stray punctuation,
//! number ranges and trailing notes. This crate rewrites them into one
//! canonical line and splits that line into components ready for a lookup
//! against the city's address repository.
//!
//! ## Features
//!
//! - **Normalization**: an ordered, idempotent pipeline of rewrite passes
//! - **Parsing**: house number, number suffix, street name, street type,
//!   quadrant and unit number
//! - **Lookup**: a [`Geocoder`] seam plus an async client for the DC Master
//!   Address Repository (`lookup` feature, on by default)
//! - **Batch parsing**: rayon-backed parallel parsing (`parallel` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use dc_address_parser::parse;
//!
//! let address = parse("1600 Pennsylvania ave n.w.")?;
//! assert_eq!(address.to_string(), "1600 PENNSYLVANIA AVENUE NW");
//! assert_eq!(
//!     address.to_canonical_string(true),
//!     "1600 PENNSYLVANIA AVENUE NW, WASHINGTON, DC"
//! );
//! # Ok::<(), dc_address_parser::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod address;
pub mod constants;
pub mod error;
pub mod extractor;
pub mod lookup;
pub mod normalizer;
pub mod parser;
pub mod types;

// Re-export main API
pub use address::Address;
pub use constants::CITY;
pub use error::{Error, Result};
pub use lookup::Geocoder;
#[cfg(feature = "lookup")]
pub use lookup::{Location, LookupClient, LookupConfig};
pub use normalizer::{AddressNormalizer, NormalizationPass};
pub use parser::AddressParser;
pub use types::*;

/// Parse a free-form address with the default settings.
///
/// # Errors
///
/// Returns [`Error::InvalidAddress`] naming the first required component
/// (number, street name, quadrant) that could not be found.
///
/// # Examples
///
/// ```rust
/// let address = dc_address_parser::parse("123 Main St NW")?;
/// assert_eq!(address.street_name(), "MAIN");
/// # Ok::<(), dc_address_parser::Error>(())
/// ```
pub fn parse(address: &str) -> Result<Address> {
    Address::parse(address)
}
