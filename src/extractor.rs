//! Field resolvers run against a normalized address.
//!
//! Each resolver receives the fields it depends on as parameters, so the
//! order in which [`crate::Address`] calls them is the only ordering there is:
//! number, number suffix, quadrant, unit number, street name, street type.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{DEFAULT_STREET_TYPE, QUADRANTS, alternation, street_type_names};
use crate::types::UnitNumber;

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)[A-Z]*").expect("valid regex"));

static QUADRANT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b({})\b", alternation(QUADRANTS.iter().copied()))).expect("valid regex")
});

static STREET_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b({})\b", street_type_names())).expect("valid regex")
});

/// "123B" or "123-B" at the start of the address.
static ATTACHED_UNIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[-–]?([A-Z])\b").expect("valid regex"));

/// "UNIT B", "APT 100", "#100".
static MARKED_UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s(?:UNIT\s|APT\s|#)([A-Z0-9]+)(?:\s|$)").expect("valid regex")
});

const STREET_NAME_CHARS: &str = r"[A-Z0-9' ]+";

/// Leading house number.
///
/// A number too large for `u32` is treated as absent, so the address fails
/// validation with "number is missing".
pub fn resolve_number(address: &str) -> Option<u32> {
    let caps = NUMBER_RE.captures(address)?;
    caps[1].parse().ok()
}

/// A fraction ("1/2") or "REAR" directly after the house number.
pub fn resolve_number_suffix(address: &str, number: u32) -> Option<String> {
    let pattern = format!(r"(?i)^0*{number}\s(\d+/\d+|REAR)\b");
    let re = Regex::new(&pattern).ok()?;
    re.captures(address).map(|caps| caps[1].to_string())
}

/// First whole-word quadrant anywhere in the address.
pub fn resolve_quadrant(address: &str) -> Option<String> {
    QUADRANT_RE
        .captures(address)
        .map(|caps| caps[1].to_string())
}

/// Unit number; the first matching form wins.
///
/// 1. a letter attached to the house number ("123B", "123-B")
/// 2. the token after "UNIT", "APT" or "#"
/// 3. a trailing token after the quadrant ("... NW 4")
pub fn resolve_unit_number(address: &str, quadrant: Option<&str>) -> Option<UnitNumber> {
    let text = ATTACHED_UNIT_RE
        .captures(address)
        .or_else(|| MARKED_UNIT_RE.captures(address))
        .map(|caps| caps[1].to_string())
        .or_else(|| trailing_unit(address, quadrant?))?;
    Some(UnitNumber::from_text(&text))
}

fn trailing_unit(address: &str, quadrant: &str) -> Option<String> {
    let pattern = format!(r"\b{}\s([A-Z0-9]+)$", regex::escape(quadrant));
    let re = Regex::new(&pattern).ok()?;
    re.captures(address).map(|caps| caps[1].to_string())
}

/// Street name between the house number (plus any suffix or unit) and the
/// street type.
///
/// When the address carries no street type word at all, the name runs up to
/// the quadrant instead. All-digit names are ordinalized ("3" to "3RD").
pub fn resolve_street_name(
    address: &str,
    number: u32,
    number_suffix: Option<&str>,
    unit_number: Option<&UnitNumber>,
    quadrant: Option<&str>,
) -> Option<String> {
    let mut after_number = Vec::new();
    if let Some(suffix) = number_suffix {
        after_number.push(format!(r"\s{}", regex::escape(suffix)));
    }
    if let Some(unit) = unit_number {
        // Numeric units were parsed, so "UNIT 05" resolved to 5.
        let unit = match unit {
            UnitNumber::Number(number) => format!("0*{number}"),
            UnitNumber::Label(label) => regex::escape(label),
        };
        after_number.push(format!(r"\s(?:UNIT\s|APT\s|#){unit}"));
        after_number.push(format!(r"[-–]?{unit}"));
    }
    let prefix = if after_number.is_empty() {
        format!("^0*{number}")
    } else {
        format!("^0*{number}(?:{})?", after_number.join("|"))
    };

    let terminator = if STREET_TYPE_RE.is_match(address) {
        format!(r"\s(?:{})\b", street_type_names())
    } else {
        format!(r"\s{}\b", regex::escape(quadrant?))
    };

    let re = Regex::new(&format!(r"{prefix}\s({STREET_NAME_CHARS}){terminator}")).ok()?;
    let name = re.captures(address)?[1].trim().to_string();
    if name.is_empty() {
        return None;
    }

    if name.bytes().all(|b| b.is_ascii_digit()) {
        return Some(ordinalize(&name));
    }
    Some(name)
}

/// First whole-word street type, or "STREET" when there is none.
pub fn resolve_street_type(address: &str) -> String {
    STREET_TYPE_RE
        .captures(address)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| DEFAULT_STREET_TYPE.to_string())
}

/// "1" to "1ST", "12" to "12TH", "23" to "23RD".
pub fn ordinalize(digits: &str) -> String {
    let tail: u32 = digits[digits.len().saturating_sub(2)..]
        .parse()
        .unwrap_or_default();
    let suffix = match (tail % 100, tail % 10) {
        (11..=13, _) => "TH",
        (_, 1) => "ST",
        (_, 2) => "ND",
        (_, 3) => "RD",
        _ => "TH",
    };
    format!("{digits}{suffix}")
}
