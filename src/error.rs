//! Error types and handling for dc-address-parser.

/// Result type alias for address operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for address operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required component could not be resolved from the normalized address
    #[error("{} is missing", humanize(.field))]
    InvalidAddress {
        /// Name of the first missing required field (e.g. `street_name`)
        field: &'static str,
    },

    /// HTTP errors from the location lookup service
    #[cfg(feature = "lookup")]
    #[error("HTTP error: {source}")]
    Http {
        /// Source error
        #[from]
        source: reqwest::Error,
    },

    /// The lookup response body could not be decoded
    #[cfg(feature = "lookup")]
    #[error("Decode error: {source}")]
    Decode {
        /// Source error
        #[from]
        source: serde_json::Error,
    },

    /// The lookup service returned no location for the address
    #[cfg(feature = "lookup")]
    #[error("No location found for {address}")]
    LookupNotFound {
        /// Canonical address that was looked up
        address: String,
    },

    /// Invalid lookup configuration
    #[cfg(feature = "lookup")]
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create a new invalid address error for the given field
    pub fn invalid_address(field: &'static str) -> Self {
        Self::InvalidAddress { field }
    }

    /// Name of the missing field, if this is an invalid address error
    pub fn missing_field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidAddress { field } => Some(*field),
            #[cfg(feature = "lookup")]
            _ => None,
        }
    }

    /// Create a new lookup-not-found error
    #[cfg(feature = "lookup")]
    pub fn lookup_not_found(address: impl Into<String>) -> Self {
        Self::LookupNotFound {
            address: address.into(),
        }
    }

    /// Create a new configuration error
    #[cfg(feature = "lookup")]
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

fn humanize(field: &str) -> String {
    field.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_address_message() {
        let err = Error::invalid_address("street_name");
        assert_eq!(err.to_string(), "street name is missing");
        assert_eq!(err.missing_field(), Some("street_name"));
    }

    #[test]
    fn test_single_word_field() {
        assert_eq!(Error::invalid_address("quadrant").to_string(), "quadrant is missing");
    }

    #[cfg(feature = "lookup")]
    #[test]
    fn test_missing_field_on_other_errors() {
        assert_eq!(Error::config_error("bad").missing_field(), None);
        assert_eq!(Error::lookup_not_found("1 MAIN STREET NW").missing_field(), None);
    }
}
