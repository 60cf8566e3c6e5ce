//! Address normalization functionality.
//!
//! Normalization is an ordered list of [`NormalizationPass`]es applied to a
//! single buffer. Every pass is a pure string rewrite and the full pipeline is
//! idempotent: normalizing an already normalized address leaves it unchanged.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::constants::{
    DIRECTION_EXPANSIONS, DIRECTIONS, QUADRANTS, STREET_TYPE_EXPANSIONS, STREET_TYPES,
    alternation, street_type_names,
};

static LINE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[\r\n]\s*").expect("valid regex"));

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static APOSTROPHES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'+").expect("valid regex"));

/// "100-101", "100 – 101", "100 & 101", including chained ranges.
static DASHED_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(?:\s?[-–‐&]\s?\d+)+").expect("valid regex"));

/// "100, 200 and 300", "100, 200, and 300".
static LISTED_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+), \d+,? AND \d+").expect("valid regex"));

static DOTTED_QUADRANT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([NS])\.([EW])\.?").expect("valid regex"));

static COMMA_QUADRANT_RE: LazyLock<Regex> = LazyLock::new(|| {
    let quadrants = alternation(QUADRANTS.iter().copied());
    Regex::new(&format!(r"\s*,\s*({quadrants})\b")).expect("valid regex")
});

static STREET_TYPE_ABBR_RE: LazyLock<Regex> = LazyLock::new(|| {
    let abbreviations = alternation(STREET_TYPES.iter().map(|&(_, abbr)| abbr));
    Regex::new(&format!(r"\b(?:{abbreviations})\b")).expect("valid regex")
});

/// "REAR OF 123", also swallowing a range after the number.
static REAR_OF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^REAR OF (\d+)(?:\s?[-–‐&]\s?\d+)*").expect("valid regex")
});

static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bSPACE\b").expect("valid regex"));

static MLK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bM\.?L\.? KING\b").expect("valid regex"));

static JUNIOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bJR\.").expect("valid regex"));

static EYE_STREET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bEYE STREET\b").expect("valid regex"));

static DIRECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    let letters = alternation(DIRECTIONS.iter().map(|&(_, abbr)| abbr));
    Regex::new(&format!(r"\b({letters})(\s+|\.)")).expect("valid regex")
});

/// A street type word at the start of the remaining text ("N STREET").
static LEADING_STREET_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(?:{})\b", street_type_names())).expect("valid regex")
});

static MT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bMT\b").expect("valid regex"));

static AND_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bAND\b").expect("valid regex"));

static QUADRANT_COMMA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b(?:{}),", alternation(QUADRANTS.iter().copied()))).expect("valid regex")
});

/// A single rewrite step of the normalization pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NormalizationPass {
    /// Trim, collapse whitespace and apostrophes, turn line breaks into `;`
    Whitespace,
    /// Upper-case the whole address
    Case,
    /// Keep only the first number of a range such as "100-101"
    Ranges,
    /// "N.W." to "NW", drop a comma before the quadrant
    Quadrant,
    /// Expand abbreviated street types ("ST" to "STREET")
    StreetType,
    /// "REAR OF 123 ..." to "123 ... REAR"
    Rear,
    /// "SPACE" to "UNIT"
    Space,
    /// "M.L. KING" to "MARTIN LUTHER KING", "JR." to "JR"
    Mlk,
    /// "EYE STREET" to "I STREET"
    EyeStreet,
    /// Remove periods
    StripPunctuation,
    /// Expand single-letter directions ("N" to "NORTH")
    Directions,
    /// "MT" to "MOUNT"
    Mt,
    /// Drop trailing text after `;`, "AND" or a comma following the quadrant
    Split,
}

impl NormalizationPass {
    /// Name of the pass, used in log output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Whitespace => "whitespace",
            Self::Case => "case",
            Self::Ranges => "ranges",
            Self::Quadrant => "quadrant",
            Self::StreetType => "street_type",
            Self::Rear => "rear",
            Self::Space => "space",
            Self::Mlk => "mlk",
            Self::EyeStreet => "eye_street",
            Self::StripPunctuation => "strip_punctuation",
            Self::Directions => "directions",
            Self::Mt => "mt",
            Self::Split => "split",
        }
    }

    /// Apply this pass on its own.
    pub fn apply(&self, address: &str) -> String {
        match self {
            Self::Whitespace => normalize_whitespace(address),
            Self::Case => address.to_uppercase(),
            Self::Ranges => normalize_ranges(address),
            Self::Quadrant => normalize_quadrant(address),
            Self::StreetType => normalize_street_type(address),
            Self::Rear => normalize_rear(address),
            Self::Space => SPACE_RE.replace_all(address, "UNIT").into_owned(),
            Self::Mlk => normalize_mlk(address),
            Self::EyeStreet => EYE_STREET_RE.replace_all(address, "I STREET").into_owned(),
            Self::StripPunctuation => strip_punctuation(address),
            Self::Directions => normalize_directions(address),
            Self::Mt => MT_RE.replace_all(address, "MOUNT").into_owned(),
            Self::Split => split(address),
        }
    }
}

/// Ordered normalization pipeline with builder-style options.
#[derive(Debug, Clone)]
pub struct AddressNormalizer {
    eye_street: bool,
    strip_punctuation: bool,
}

impl AddressNormalizer {
    /// Create a new normalizer with every pass enabled.
    pub fn new() -> Self {
        Self {
            eye_street: true,
            strip_punctuation: true,
        }
    }

    /// Enable/disable the "EYE STREET" to "I STREET" pass.
    pub fn with_eye_street(mut self, enabled: bool) -> Self {
        self.eye_street = enabled;
        self
    }

    /// Enable/disable removal of periods before direction expansion.
    pub fn with_strip_punctuation(mut self, enabled: bool) -> Self {
        self.strip_punctuation = enabled;
        self
    }

    /// The active passes, in the order they run.
    pub fn passes(&self) -> Vec<NormalizationPass> {
        use NormalizationPass::*;

        let mut passes = vec![
            Whitespace, Case, Ranges, Quadrant, StreetType, Rear, Space, Mlk,
        ];
        if self.eye_street {
            passes.push(EyeStreet);
        }
        if self.strip_punctuation {
            passes.push(StripPunctuation);
        }
        passes.extend([Directions, Mt, Split]);
        passes
    }

    /// Normalize an address string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dc_address_parser::AddressNormalizer;
    ///
    /// let normalizer = AddressNormalizer::new();
    /// assert_eq!(
    ///     normalizer.normalize("1600 Pennsylvania ave n.w."),
    ///     "1600 PENNSYLVANIA AVENUE NW"
    /// );
    /// ```
    pub fn normalize(&self, input: &str) -> String {
        let passes = self.passes();
        let mut address = input.to_string();
        for (index, &pass) in passes.iter().enumerate() {
            if !apply_logged(pass, &mut address) {
                continue;
            }
            // Removing periods can expose tokens ("S.T.", "100.-101") the
            // earlier passes rewrite.
            if pass == NormalizationPass::StripPunctuation {
                for &earlier in &passes[..index] {
                    apply_logged(earlier, &mut address);
                }
            }
        }
        address
    }
}

/// Apply `pass` in place, returning whether it changed anything.
fn apply_logged(pass: NormalizationPass, address: &mut String) -> bool {
    let next = pass.apply(address);
    if next == *address {
        return false;
    }
    log::trace!("{}: {:?} -> {:?}", pass.name(), address, next);
    *address = next;
    true
}

impl Default for AddressNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_whitespace(address: &str) -> String {
    let address = address.trim_matches(|c: char| c.is_whitespace() || c == ';');
    let address = LINE_BREAK_RE.replace_all(address, ";");
    let address = WHITESPACE_RE.replace_all(&address, " ");
    APOSTROPHES_RE.replace_all(&address, "'").into_owned()
}

fn normalize_ranges(address: &str) -> String {
    let address = DASHED_RANGE_RE.replace(address, "${1}");
    LISTED_RANGE_RE.replace_all(&address, "${1}").into_owned()
}

fn normalize_quadrant(address: &str) -> String {
    let address = DOTTED_QUADRANT_RE.replace_all(address, "${1}${2}");
    COMMA_QUADRANT_RE.replace_all(&address, " ${1}").into_owned()
}

fn normalize_street_type(address: &str) -> String {
    STREET_TYPE_ABBR_RE
        .replace_all(address, |caps: &Captures<'_>| {
            let abbr = &caps[0];
            STREET_TYPE_EXPANSIONS.get(abbr).copied().unwrap_or(abbr).to_string()
        })
        .into_owned()
}

fn normalize_rear(address: &str) -> String {
    if !REAR_OF_RE.is_match(address) {
        return address.to_string();
    }
    let mut address = REAR_OF_RE.replace(address, "${1}").into_owned();
    address.push_str(" REAR");
    address
}

fn strip_punctuation(address: &str) -> String {
    let address = address.replace('.', "");
    WHITESPACE_RE.replace_all(address.trim(), " ").into_owned()
}

fn normalize_mlk(address: &str) -> String {
    let address = MLK_RE.replace_all(address, "MARTIN LUTHER KING");
    JUNIOR_RE.replace_all(&address, "JR").into_owned()
}

/// Expands "N" to "NORTH" and so on, but leaves a letter alone when it is the
/// name of the street itself ("N STREET", "E STREET").
fn normalize_directions(address: &str) -> String {
    DIRECTION_RE
        .replace_all(address, |caps: &Captures<'_>| {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            let separator = &caps[2];
            let names_street = separator.trim().is_empty()
                && LEADING_STREET_TYPE_RE.is_match(&address[whole.end..]);
            if names_street {
                return caps[0].to_string();
            }
            let letter = &caps[1];
            let full = DIRECTION_EXPANSIONS.get(letter).copied().unwrap_or(letter);
            format!("{full}{separator}")
        })
        .into_owned()
}

fn split(address: &str) -> String {
    let first_segment = address
        .split(';')
        .map(str::trim)
        .find(|segment| !segment.is_empty())
        .unwrap_or_default();

    let before_and = AND_RE
        .split(first_segment)
        .next()
        .unwrap_or_default()
        .trim();

    match QUADRANT_COMMA_RE.find(before_and) {
        // Keep the quadrant, drop the comma and everything after it.
        Some(m) => before_and[..m.end() - 1].trim().to_string(),
        None => before_and.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::NormalizationPass::*;

    fn normalize(input: &str) -> String {
        AddressNormalizer::new().normalize(input)
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(Whitespace.apply("123 main street nw "), "123 main street nw");
        assert_eq!(Whitespace.apply("123  main  street  nw"), "123 main street nw");
        assert_eq!(Whitespace.apply("123 BEN''S ALLEY"), "123 BEN'S ALLEY");
        assert_eq!(Whitespace.apply("FOO NW\n BAR"), "FOO NW;BAR");
        assert_eq!(Whitespace.apply("\t123\tmain\r\n"), "123 main");
        assert_eq!(Whitespace.apply(";; 100-101 main"), "100-101 main");
    }

    #[test]
    fn test_case() {
        assert_eq!(Case.apply("123 main street nw"), "123 MAIN STREET NW");
    }

    #[test]
    fn test_dashed_ranges() {
        assert_eq!(Ranges.apply("100-101"), "100");
        assert_eq!(Ranges.apply("100‐101"), "100");
        assert_eq!(Ranges.apply("100 – 101"), "100");
        assert_eq!(Ranges.apply("100 - 101"), "100");
        assert_eq!(Ranges.apply("100-102-104 MAIN"), "100 MAIN");
        assert_eq!(Ranges.apply("123-B MAIN"), "123-B MAIN");
    }

    #[test]
    fn test_listed_ranges() {
        assert_eq!(Ranges.apply("100 & 101"), "100");
        assert_eq!(Ranges.apply("100, 200 and 300"), "100");
        assert_eq!(Ranges.apply("100, 200, and 300"), "100");
    }

    #[test]
    fn test_quadrant() {
        assert_eq!(Quadrant.apply("N.W"), "NW");
        assert_eq!(Quadrant.apply("N.W."), "NW");
        assert_eq!(Quadrant.apply("S.E. "), "SE ");
        assert_eq!(Quadrant.apply("123 main street, NW"), "123 main street NW");
        assert_eq!(Quadrant.apply("123 main street , NW"), "123 main street NW");
        assert_eq!(Quadrant.apply("123 MAIN, NEW YORK"), "123 MAIN, NEW YORK");
    }

    #[test]
    fn test_street_type() {
        assert_eq!(StreetType.apply("123 MAIN ST NW"), "123 MAIN STREET NW");
        assert_eq!(StreetType.apply("123 OAK AVE SE"), "123 OAK AVENUE SE");
        assert_eq!(StreetType.apply("123 OAK PLZ SE"), "123 OAK PLAZA SE");
        // Whole words only.
        assert_eq!(StreetType.apply("123 STONE AVENUE NW"), "123 STONE AVENUE NW");
    }

    #[test]
    fn test_rear() {
        assert_eq!(
            Rear.apply("REAR OF 123 MAIN STREET"),
            "123 MAIN STREET REAR"
        );
        assert_eq!(Rear.apply("123 MAIN STREET"), "123 MAIN STREET");
        assert_eq!(Rear.apply("REAR OF 100-102 MAIN"), "100 MAIN REAR");
    }

    #[test]
    fn test_space() {
        assert_eq!(
            Space.apply("123 MAIN STREET SPACE B"),
            "123 MAIN STREET UNIT B"
        );
        assert_eq!(Space.apply("123 SPACEY STREET"), "123 SPACEY STREET");
    }

    #[test]
    fn test_mlk() {
        assert_eq!(
            Mlk.apply("123 M.L. KING JR. ST NW"),
            "123 MARTIN LUTHER KING JR ST NW"
        );
        assert_eq!(Mlk.apply("123 M.L KING AVENUE SE"), "123 MARTIN LUTHER KING AVENUE SE");
    }

    #[test]
    fn test_eye_street() {
        assert_eq!(EyeStreet.apply("123 EYE STREET SE"), "123 I STREET SE");
    }

    #[test]
    fn test_strip_punctuation() {
        assert_eq!(
            StripPunctuation.apply("123 N. BEN's ALLEY N.W."),
            "123 N BEN's ALLEY NW"
        );
        assert_eq!(StripPunctuation.apply("123 . MAIN ST."), "123 MAIN ST");
    }

    #[test]
    fn test_directions() {
        assert_eq!(
            Directions.apply("123 N CAPITAL STREET NW"),
            "123 NORTH CAPITAL STREET NW"
        );
        assert_eq!(
            Directions.apply("123 N. CAPITAL STREET NW"),
            "123 NORTH. CAPITAL STREET NW"
        );
        assert_eq!(Directions.apply("123 E CAPITOL STREET NE"), "123 EAST CAPITOL STREET NE");
    }

    #[test]
    fn test_direction_letter_street_is_kept() {
        assert_eq!(Directions.apply("123 N STREET NW"), "123 N STREET NW");
        assert_eq!(Directions.apply("400 E STREET SW"), "400 E STREET SW");
        assert_eq!(Directions.apply("12 N N STREET NW"), "12 NORTH N STREET NW");
    }

    #[test]
    fn test_mt() {
        assert_eq!(
            Mt.apply("123 MT PLEASANT ST NW"),
            "123 MOUNT PLEASANT ST NW"
        );
    }

    #[test]
    fn test_split() {
        assert_eq!(Split.apply("foo; bar"), "foo");
        assert_eq!(Split.apply(";;foo; bar"), "foo");
        assert_eq!(Split.apply("FOO AND BAR"), "FOO");
        assert_eq!(Split.apply("FOO NW, BAR"), "FOO NW");
        assert_eq!(Split.apply("FOO NW;BAR"), "FOO NW");
        assert_eq!(Split.apply("123 ANDOVER STREET"), "123 ANDOVER STREET");
    }

    #[test]
    fn test_full_pipeline() {
        assert_eq!(normalize("1600 Pennsylvania ave n.w."), "1600 PENNSYLVANIA AVENUE NW");
        assert_eq!(normalize("REAR OF 123 MAIN STREET NW"), "123 MAIN STREET NW REAR");
        assert_eq!(normalize("123 main street NW\n foo"), "123 MAIN STREET NW");
        assert_eq!(normalize("123 N. BEN's ALLEY N.W."), "123 NORTH BEN'S ALLEY NW");
        assert_eq!(normalize("123 N ST NW"), "123 N STREET NW");
    }

    #[test]
    fn test_optional_passes() {
        let normalizer = AddressNormalizer::new()
            .with_eye_street(false)
            .with_strip_punctuation(false);
        assert!(!normalizer.passes().contains(&EyeStreet));
        assert!(!normalizer.passes().contains(&StripPunctuation));
        assert_eq!(normalizer.normalize("123 Eye St SE"), "123 EYE STREET SE");
        assert_eq!(normalizer.passes().last(), Some(&Split));
    }

    #[test]
    fn test_stripped_periods_are_rewritten_in_one_run() {
        let cases = [
            ("123 main s.t. nw", "123 MAIN STREET NW"),
            ("123 main r.d. ne", "123 MAIN ROAD NE"),
            ("100.-101 main st nw", "100 MAIN STREET NW"),
            ("123 main st nw sp.ace 4", "123 MAIN STREET NW UNIT 4"),
            (". ;100-101 main st nw", "100 MAIN STREET NW"),
        ];
        for (input, expected) in cases {
            let once = normalize(input);
            assert_eq!(once, expected, "input: {input}");
            assert_eq!(normalize(&once), once, "input: {input}");
        }
    }

    #[test]
    fn test_idempotent_on_samples() {
        for input in [
            "1600 Pennsylvania ave n.w.",
            "REAR OF 123 MAIN STREET NW",
            "100, 101, and 102 main street nw",
            "123 M.L. King JR. ST NW",
            "123 N ST NW",
            "123 main street NW, foo",
            ";100-101 main street nw",
            "REAR OF 100-102 main st nw",
            "123 . main st nw",
            "123 m.t. pleasant s.t. n.w.",
            "123 E.YE ST SE",
        ] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input: {input}");
        }
    }
}
