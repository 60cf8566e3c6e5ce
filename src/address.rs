//! The parsed address entity.

use std::fmt;

use crate::constants::CITY;
use crate::error::{Error, Result};
use crate::extractor;
use crate::lookup::Geocoder;
use crate::normalizer::AddressNormalizer;
use crate::types::{AddressFields, FieldMap, UnitNumber};

/// A Washington, DC street address parsed into canonical components.
///
/// Construction normalizes the input once, resolves every component once and
/// fails if a required component (number, street name, quadrant) cannot be
/// found. The accessors only read the resolved values.
///
/// # Examples
///
/// ```rust
/// use dc_address_parser::Address;
///
/// let address = Address::parse("1600 Pennsylvania ave n.w.")?;
/// assert_eq!(address.number(), 1600);
/// assert_eq!(address.street_name(), "PENNSYLVANIA");
/// assert_eq!(address.street_type(), "AVENUE");
/// assert_eq!(address.quadrant(), "NW");
/// assert_eq!(address.to_string(), "1600 PENNSYLVANIA AVENUE NW");
/// # Ok::<(), dc_address_parser::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Address {
    raw_address: String,
    working_address: String,
    number: u32,
    number_suffix: Option<String>,
    street_name: String,
    street_type: String,
    quadrant: String,
    unit_number: Option<UnitNumber>,
}

impl Address {
    /// Parse a free-form address with the default normalizer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddress`] naming the first missing required
    /// field, checked in the order number, street name, quadrant.
    pub fn parse(address: &str) -> Result<Self> {
        Self::parse_with(address, &AddressNormalizer::new())
    }

    /// Parse an address given as discrete parts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dc_address_parser::{Address, AddressFields};
    ///
    /// let fields = AddressFields::new()
    ///     .with_street_name("Main")
    ///     .with_number("123")
    ///     .with_street_type("st")
    ///     .with_quadrant("n.w.");
    /// let address = Address::from_fields(&fields)?;
    /// assert_eq!(address.to_string(), "123 MAIN STREET NW");
    /// # Ok::<(), dc_address_parser::Error>(())
    /// ```
    pub fn from_fields(fields: &AddressFields) -> Result<Self> {
        Self::parse(&fields.to_address_line())
    }

    /// Parse a free-form address with a specific normalizer.
    pub fn parse_with(address: &str, normalizer: &AddressNormalizer) -> Result<Self> {
        let working = normalizer.normalize(address);

        let number = extractor::resolve_number(&working);
        let number_suffix = number.and_then(|n| extractor::resolve_number_suffix(&working, n));
        let quadrant = extractor::resolve_quadrant(&working);
        let unit_number = extractor::resolve_unit_number(&working, quadrant.as_deref());
        let street_name = number.and_then(|n| {
            extractor::resolve_street_name(
                &working,
                n,
                number_suffix.as_deref(),
                unit_number.as_ref(),
                quadrant.as_deref(),
            )
        });
        let street_type = extractor::resolve_street_type(&working);

        let number = number.ok_or_else(|| invalid(address, "number"))?;
        let street_name = street_name.ok_or_else(|| invalid(address, "street_name"))?;
        let quadrant = quadrant.ok_or_else(|| invalid(address, "quadrant"))?;

        log::debug!(
            "parsed {:?}: number={} suffix={:?} street={} {} quadrant={} unit={:?}",
            address,
            number,
            number_suffix,
            street_name,
            street_type,
            quadrant,
            unit_number
        );

        Ok(Self {
            raw_address: address.to_string(),
            working_address: working,
            number,
            number_suffix,
            street_name,
            street_type,
            quadrant,
            unit_number,
        })
    }

    /// The input exactly as given.
    pub fn raw_address(&self) -> &str {
        &self.raw_address
    }

    /// The normalized text the components were resolved from.
    pub fn working_address(&self) -> &str {
        &self.working_address
    }

    /// House number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Number suffix ("1/2" or "REAR"), if any.
    pub fn number_suffix(&self) -> Option<&str> {
        self.number_suffix.as_deref()
    }

    /// Street name, e.g. "PENNSYLVANIA" or "3RD".
    pub fn street_name(&self) -> &str {
        &self.street_name
    }

    /// Street type, e.g. "AVENUE"; "STREET" when the input had none.
    pub fn street_type(&self) -> &str {
        &self.street_type
    }

    /// Quadrant: "NE", "NW", "SE" or "SW".
    pub fn quadrant(&self) -> &str {
        &self.quadrant
    }

    /// Unit number, if any.
    pub fn unit_number(&self) -> Option<&UnitNumber> {
        self.unit_number.as_ref()
    }

    /// All components plus the city label.
    pub fn to_field_map(&self) -> FieldMap {
        FieldMap {
            number: Some(self.number),
            number_suffix: self.number_suffix.clone(),
            street_name: Some(self.street_name.clone()),
            street_type: Some(self.street_type.clone()),
            quadrant: Some(self.quadrant.clone()),
            unit_number: self.unit_number.clone(),
            city: CITY.to_string(),
        }
    }

    /// Canonical one-line form, optionally followed by `", WASHINGTON, DC"`.
    pub fn to_canonical_string(&self, include_city: bool) -> String {
        self.to_field_map().join(include_city)
    }

    /// Look the canonical address (without the city) up with a geocoder.
    ///
    /// The geocoder's location and error are returned unchanged.
    pub async fn lookup<G: Geocoder>(
        &self,
        geocoder: &G,
    ) -> std::result::Result<G::Location, G::Error> {
        let canonical = self.to_canonical_string(false);
        log::debug!("looking up {canonical:?}");
        geocoder.lookup(&canonical).await
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string(false))
    }
}

impl std::str::FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&AddressFields> for Address {
    type Error = Error;

    fn try_from(fields: &AddressFields) -> Result<Self> {
        Self::from_fields(fields)
    }
}

fn invalid(address: &str, field: &'static str) -> Error {
    log::debug!("rejected {address:?}: {field} is missing");
    Error::invalid_address(field)
}
