//! Address parsing functionality.

use crate::address::Address;
use crate::error::Result;
use crate::normalizer::AddressNormalizer;
use crate::types::AddressFields;

/// Reusable address parser carrying a configured normalizer.
#[derive(Debug, Clone, Default)]
pub struct AddressParser {
    normalizer: AddressNormalizer,
}

impl AddressParser {
    /// Create a new parser with the default normalizer.
    pub fn new() -> Self {
        Self {
            normalizer: AddressNormalizer::new(),
        }
    }

    /// Use a custom normalizer.
    pub fn with_normalizer(mut self, normalizer: AddressNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Get the normalizer used by this parser.
    pub fn normalizer(&self) -> &AddressNormalizer {
        &self.normalizer
    }

    /// Parse an address string into structured components.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidAddress`] if a required component is
    /// missing after normalization.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dc_address_parser::AddressParser;
    ///
    /// let parser = AddressParser::new();
    /// let parsed = parser.parse("123 Main St NW")?;
    /// assert_eq!(parsed.to_string(), "123 MAIN STREET NW");
    /// # Ok::<(), dc_address_parser::Error>(())
    /// ```
    pub fn parse(&self, address: &str) -> Result<Address> {
        Address::parse_with(address, &self.normalizer)
    }

    /// Parse an address given as discrete parts.
    pub fn parse_fields(&self, fields: &AddressFields) -> Result<Address> {
        self.parse(&fields.to_address_line())
    }

    /// Parse multiple addresses, keeping one result per input.
    pub fn parse_batch(&self, addresses: &[&str]) -> Vec<Result<Address>> {
        addresses.iter().map(|addr| self.parse_logged(addr)).collect()
    }

    /// Parse multiple addresses in parallel using multiple threads.
    ///
    /// Results are returned in the same order as the input. Parsing holds no
    /// shared mutable state, so every address is handled independently.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dc_address_parser::AddressParser;
    ///
    /// let parser = AddressParser::new();
    /// let addresses = vec![
    ///     "123 Main St NW",
    ///     "not an address",
    ///     "1600 Pennsylvania Ave NW",
    /// ];
    ///
    /// let results = parser.parse_batch_parallel(&addresses);
    /// assert!(results[0].is_ok());
    /// assert!(results[1].is_err());
    /// ```
    #[cfg(feature = "parallel")]
    pub fn parse_batch_parallel(&self, addresses: &[&str]) -> Vec<Result<Address>> {
        use rayon::prelude::*;

        addresses
            .par_iter()
            .map(|addr| self.parse_logged(addr))
            .collect()
    }

    /// Parse multiple addresses in parallel and return only successful results.
    ///
    /// Failed parses are dropped (and logged at `warn`).
    #[cfg(feature = "parallel")]
    pub fn parse_batch_parallel_ok(&self, addresses: &[&str]) -> Vec<Address> {
        self.parse_batch_parallel(addresses)
            .into_iter()
            .filter_map(|result| result.ok())
            .collect()
    }

    fn parse_logged(&self, address: &str) -> Result<Address> {
        let result = self.parse(address);
        if let Err(ref e) = result {
            log::warn!("skipping {address:?}: {e}");
        }
        result
    }
}
