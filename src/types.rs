//! Common types for dc-address-parser.

use std::fmt;

use crate::constants::CITY;

/// Unit designator of an address ("B" in "123B MAIN ST NW", 100 in "APT 100").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum UnitNumber {
    /// All-digit unit
    Number(u32),
    /// Unit containing letters
    Label(String),
}

impl UnitNumber {
    /// Build a unit from matched text; all-digit text becomes a number.
    pub fn from_text(text: &str) -> Self {
        let all_digits = !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit());
        match text.parse::<u32>() {
            Ok(number) if all_digits => UnitNumber::Number(number),
            _ => UnitNumber::Label(text.to_string()),
        }
    }

    /// The unit number, if it is numeric.
    pub fn as_number(&self) -> Option<u32> {
        match self {
            UnitNumber::Number(number) => Some(*number),
            UnitNumber::Label(_) => None,
        }
    }
}

impl fmt::Display for UnitNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitNumber::Number(number) => write!(f, "{number}"),
            UnitNumber::Label(label) => f.write_str(label),
        }
    }
}

impl From<u32> for UnitNumber {
    fn from(number: u32) -> Self {
        UnitNumber::Number(number)
    }
}

impl From<&str> for UnitNumber {
    fn from(label: &str) -> Self {
        UnitNumber::Label(label.to_string())
    }
}

/// Address given as discrete, unnormalized parts.
///
/// Present parts are joined with spaces in a fixed order (number, number
/// suffix, street name, street type, quadrant, unit number) and then parsed
/// like any free-form address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddressFields {
    /// House number (e.g. "1600")
    pub number: Option<String>,
    /// Number suffix (e.g. "1/2", "rear")
    pub number_suffix: Option<String>,
    /// Street name (e.g. "Pennsylvania")
    pub street_name: Option<String>,
    /// Street type, full or abbreviated (e.g. "ave")
    pub street_type: Option<String>,
    /// Quadrant (e.g. "n.w.")
    pub quadrant: Option<String>,
    /// Unit number (e.g. "B", "100")
    pub unit_number: Option<String>,
}

impl AddressFields {
    /// Create an empty set of fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the house number.
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    /// Set the number suffix.
    pub fn with_number_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.number_suffix = Some(suffix.into());
        self
    }

    /// Set the street name.
    pub fn with_street_name(mut self, street_name: impl Into<String>) -> Self {
        self.street_name = Some(street_name.into());
        self
    }

    /// Set the street type.
    pub fn with_street_type(mut self, street_type: impl Into<String>) -> Self {
        self.street_type = Some(street_type.into());
        self
    }

    /// Set the quadrant.
    pub fn with_quadrant(mut self, quadrant: impl Into<String>) -> Self {
        self.quadrant = Some(quadrant.into());
        self
    }

    /// Set the unit number.
    pub fn with_unit_number(mut self, unit: impl Into<String>) -> Self {
        self.unit_number = Some(unit.into());
        self
    }

    /// Build fields from `(key, value)` pairs such as a `HashMap<&str, &str>`.
    ///
    /// Keys use the snake_case field names; unknown keys are ignored.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut fields = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "number" => &mut fields.number,
                "number_suffix" => &mut fields.number_suffix,
                "street_name" => &mut fields.street_name,
                "street_type" => &mut fields.street_type,
                "quadrant" => &mut fields.quadrant,
                "unit_number" => &mut fields.unit_number,
                _ => continue,
            };
            *slot = Some(value.into());
        }
        fields
    }

    /// Join the present parts into a single address line.
    pub fn to_address_line(&self) -> String {
        [
            &self.number,
            &self.number_suffix,
            &self.street_name,
            &self.street_type,
            &self.quadrant,
            &self.unit_number,
        ]
        .into_iter()
        .flatten()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// All resolved components of a parsed address plus the city label.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldMap {
    /// House number
    pub number: Option<u32>,
    /// Number suffix ("1/2", "REAR")
    pub number_suffix: Option<String>,
    /// Street name
    pub street_name: Option<String>,
    /// Street type
    pub street_type: Option<String>,
    /// Quadrant
    pub quadrant: Option<String>,
    /// Unit number
    pub unit_number: Option<UnitNumber>,
    /// City and state label
    pub city: String,
}

impl FieldMap {
    /// Field names in the order they appear in [`FieldMap::entries`].
    pub const FIELD_NAMES: [&'static str; 7] = [
        "number",
        "number_suffix",
        "street_name",
        "street_type",
        "quadrant",
        "unit_number",
        "city",
    ];

    /// Ordered `(name, value)` pairs, with absent fields as `None`.
    pub fn entries(&self) -> Vec<(&'static str, Option<String>)> {
        let values = [
            self.number.map(|n| n.to_string()),
            self.number_suffix.clone(),
            self.street_name.clone(),
            self.street_type.clone(),
            self.quadrant.clone(),
            self.unit_number.as_ref().map(UnitNumber::to_string),
            Some(self.city.clone()),
        ];
        Self::FIELD_NAMES.into_iter().zip(values).collect()
    }

    /// Join the present address values with spaces, optionally followed by
    /// `", WASHINGTON, DC"`.
    pub fn join(&self, include_city: bool) -> String {
        let mut line = self
            .entries()
            .into_iter()
            .filter(|(name, _)| *name != "city")
            .filter_map(|(_, value)| value)
            .collect::<Vec<_>>()
            .join(" ");
        if include_city {
            line.push_str(", ");
            line.push_str(&self.city);
        }
        line
    }
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            number: None,
            number_suffix: None,
            street_name: None,
            street_type: None,
            quadrant: None,
            unit_number: None,
            city: CITY.to_string(),
        }
    }
}
