//! Lookup tables shared by the normalizer and the extractor.
//!
//! Each table is stored once as an ordered `(full, abbreviated)` list. The
//! abbreviation-to-full maps used for expansion are derived from it.

use std::collections::HashMap;
use std::sync::LazyLock;

/// City and state label appended to canonical addresses on request.
pub const CITY: &str = "WASHINGTON, DC";

/// Street type used when an address carries no recognizable type word.
pub const DEFAULT_STREET_TYPE: &str = "STREET";

/// Canonical street types and their postal abbreviations.
pub const STREET_TYPES: &[(&str, &str)] = &[
    ("STREET", "ST"),
    ("AVENUE", "AVE"),
    ("BOULEVARD", "BLVD"),
    ("ROAD", "RD"),
    ("PLACE", "PL"),
    ("DRIVE", "DR"),
    ("CIRCLE", "CIR"),
    ("PLAZA", "PLZ"),
    ("COURT", "CT"),
    ("ALLEY", "AL"),
    ("TERRACE", "TER"),
];

/// Compass directions and their single-letter abbreviations.
pub const DIRECTIONS: &[(&str, &str)] = &[
    ("NORTH", "N"),
    ("SOUTH", "S"),
    ("EAST", "E"),
    ("WEST", "W"),
];

/// The four quadrants of the city.
pub const QUADRANTS: &[&str] = &["NE", "NW", "SE", "SW"];

/// Abbreviated street type to canonical street type.
pub static STREET_TYPE_EXPANSIONS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| invert(STREET_TYPES));

/// Direction letter to full direction word.
pub static DIRECTION_EXPANSIONS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| invert(DIRECTIONS));

fn invert(table: &'static [(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
    table.iter().map(|&(full, abbr)| (abbr, full)).collect()
}

/// Regex alternation (`A|B|C`) over one column of a table.
pub(crate) fn alternation<'a>(words: impl IntoIterator<Item = &'a str>) -> String {
    words
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|")
}

/// Alternation over the canonical street type names.
pub(crate) fn street_type_names() -> String {
    alternation(STREET_TYPES.iter().map(|&(full, _)| full))
}
