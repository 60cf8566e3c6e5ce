//! Location lookup for parsed addresses.
//!
//! [`Geocoder`] is the seam to whatever resolves a canonical address line to a
//! location. With the `lookup` feature the crate ships [`LookupClient`], an
//! async client for the DC Master Address Repository location verifier.

use std::future::Future;

/// Resolves a canonical address line to a location.
///
/// Implementations own their error type; [`crate::Address::lookup`] passes
/// results and errors through untouched.
pub trait Geocoder {
    /// Location returned for a successful lookup
    type Location;
    /// Error returned by the lookup
    type Error;

    /// Look up a canonical address line such as `"1600 PENNSYLVANIA AVENUE NW"`.
    fn lookup(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Self::Location, Self::Error>> + Send;
}

#[cfg(feature = "lookup")]
pub use client::{DEFAULT_ENDPOINT, Location, LookupClient, LookupConfig, LookupConfigBuilder};

#[cfg(feature = "lookup")]
mod client {
    use std::future::Future;
    use std::time::Duration;

    use serde_json::{Map, Value};

    use super::Geocoder;
    use crate::error::{Error, Result};

    /// MAR location verifier endpoint.
    pub const DEFAULT_ENDPOINT: &str =
        "https://citizenatlas.dc.gov/newwebservices/locationverifier.asmx/findLocation2";

    const ENDPOINT_ENV: &str = "DC_ADDRESS_LOOKUP_ENDPOINT";
    const TIMEOUT_ENV: &str = "DC_ADDRESS_LOOKUP_TIMEOUT";

    /// Configuration for the location lookup client.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct LookupConfig {
        /// Location verifier URL
        pub endpoint: String,
        /// Request timeout
        pub timeout_seconds: u64,
        /// User agent sent with each request
        pub user_agent: String,
    }

    impl Default for LookupConfig {
        fn default() -> Self {
            Self {
                endpoint: DEFAULT_ENDPOINT.to_string(),
                timeout_seconds: 30,
                user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
                    .to_string(),
            }
        }
    }

    impl LookupConfig {
        /// Create a new configuration builder.
        ///
        /// # Examples
        ///
        /// ```rust
        /// use dc_address_parser::LookupConfig;
        ///
        /// let config = LookupConfig::builder()
        ///     .endpoint("http://localhost:8080/findLocation2")
        ///     .timeout_seconds(5)
        ///     .build();
        /// assert_eq!(config.timeout_seconds, 5);
        /// ```
        pub fn builder() -> LookupConfigBuilder {
            LookupConfigBuilder::new()
        }

        /// Defaults overridden by `DC_ADDRESS_LOOKUP_ENDPOINT` and
        /// `DC_ADDRESS_LOOKUP_TIMEOUT` (seconds).
        ///
        /// # Errors
        ///
        /// Returns a configuration error if the timeout is not a number.
        pub fn from_env() -> Result<Self> {
            Self::from_vars(|name| std::env::var(name).ok())
        }

        fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
            let mut config = Self::default();
            if let Some(endpoint) = var(ENDPOINT_ENV) {
                config.endpoint = endpoint;
            }
            if let Some(timeout) = var(TIMEOUT_ENV) {
                config.timeout_seconds = timeout.trim().parse().map_err(|e| {
                    Error::config_error(format!("{TIMEOUT_ENV}={timeout:?} is not a number: {e}"))
                })?;
            }
            Ok(config)
        }
    }

    /// Builder for LookupConfig.
    #[derive(Debug, Clone)]
    pub struct LookupConfigBuilder {
        config: LookupConfig,
    }

    impl LookupConfigBuilder {
        /// Create a new configuration builder with default values.
        pub fn new() -> Self {
            Self {
                config: LookupConfig::default(),
            }
        }

        /// Set the location verifier URL.
        pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
            self.config.endpoint = endpoint.into();
            self
        }

        /// Set the request timeout in seconds.
        pub fn timeout_seconds(mut self, seconds: u64) -> Self {
            self.config.timeout_seconds = seconds;
            self
        }

        /// Set the user agent.
        pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
            self.config.user_agent = user_agent.into();
            self
        }

        /// Build the configuration.
        pub fn build(self) -> LookupConfig {
            self.config
        }
    }

    impl Default for LookupConfigBuilder {
        fn default() -> Self {
            Self::new()
        }
    }

    /// A location record returned by the location verifier.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Location {
        address: String,
        attributes: Map<String, Value>,
    }

    impl Location {
        /// Decode a `findLocation2` JSON response for `address`.
        ///
        /// The record is read from `returnDataset.Table1`, which is either a
        /// single object or a list whose first entry is the best match.
        pub fn from_response_body(address: &str, body: &str) -> Result<Self> {
            let value: Value = serde_json::from_str(body)?;
            let table = value
                .get("returnDataset")
                .and_then(|dataset| dataset.get("Table1"));
            let record = match table {
                Some(Value::Array(rows)) => rows.first(),
                other => other,
            }
            .and_then(Value::as_object)
            .ok_or_else(|| Error::lookup_not_found(address))?;

            Ok(Self {
                address: address.to_string(),
                attributes: record.clone(),
            })
        }

        /// The canonical address that was looked up.
        pub fn address(&self) -> &str {
            &self.address
        }

        /// All attributes of the record.
        pub fn attributes(&self) -> &Map<String, Value> {
            &self.attributes
        }

        /// A single attribute.
        pub fn get(&self, key: &str) -> Option<&Value> {
            self.attributes.get(key)
        }

        /// A string attribute.
        pub fn get_str(&self, key: &str) -> Option<&str> {
            self.get(key).and_then(Value::as_str)
        }

        /// `(latitude, longitude)` when the record carries both.
        pub fn coordinates(&self) -> Option<(f64, f64)> {
            Some((self.get_f64("LATITUDE")?, self.get_f64("LONGITUDE")?))
        }

        fn get_f64(&self, key: &str) -> Option<f64> {
            match self.get(key)? {
                Value::Number(number) => number.as_f64(),
                Value::String(text) => text.trim().parse().ok(),
                _ => None,
            }
        }
    }

    /// Async client for the MAR location verifier.
    #[derive(Debug, Clone)]
    pub struct LookupClient {
        config: LookupConfig,
        http_client: reqwest::Client,
    }

    impl LookupClient {
        /// Create a client with the default configuration.
        pub fn new() -> Result<Self> {
            Self::with_config(LookupConfig::default())
        }

        /// Create a client with a custom configuration.
        ///
        /// # Errors
        ///
        /// Returns an error if the endpoint is empty or the HTTP client cannot
        /// be built.
        pub fn with_config(config: LookupConfig) -> Result<Self> {
            if config.endpoint.trim().is_empty() {
                return Err(Error::config_error("lookup endpoint is empty"));
            }
            let http_client = reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_seconds))
                .user_agent(config.user_agent.clone())
                .build()?;
            Ok(Self {
                config,
                http_client,
            })
        }

        /// Get the configuration used by this client.
        pub fn config(&self) -> &LookupConfig {
            &self.config
        }

        /// Look up a canonical address line.
        pub async fn find_location(&self, address: &str) -> Result<Location> {
            log::debug!("GET {} str={:?}", self.config.endpoint, address);
            let body = self
                .http_client
                .get(&self.config.endpoint)
                .query(&[("f", "json"), ("str", address)])
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?;
            Location::from_response_body(address, &body)
        }
    }

    impl Geocoder for LookupClient {
        type Location = Location;
        type Error = Error;

        fn lookup(&self, address: &str) -> impl Future<Output = Result<Location>> + Send {
            self.find_location(address)
        }
    }

}
