//! Closed vocabularies for the document family.
//!
//! Jurisdiction labels (states and territories) with their two-letter
//! abbreviations, and the per-variant boilerplate skip-lists for running
//! headers, footers, and license text.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Jurisdiction labels and abbreviations, as printed in the guides.
pub const STATE_ABBREVS: &[(&str, &str)] = &[
    ("ALABAMA", "AL"),
    ("ALASKA", "AK"),
    ("ARIZONA", "AZ"),
    ("ARKANSAS", "AR"),
    ("CALIFORNIA", "CA"),
    ("COLORADO", "CO"),
    ("CONNECTICUT", "CT"),
    ("DELAWARE", "DE"),
    ("FLORIDA", "FL"),
    ("GEORGIA", "GA"),
    ("HAWAII", "HI"),
    ("IDAHO", "ID"),
    ("ILLINOIS", "IL"),
    ("INDIANA", "IN"),
    ("IOWA", "IA"),
    ("KANSAS", "KS"),
    ("KENTUCKY", "KY"),
    ("LOUISIANA", "LA"),
    ("MAINE", "ME"),
    ("MARYLAND", "MD"),
    ("MASSACHUSETTS", "MA"),
    ("MICHIGAN", "MI"),
    ("MINNESOTA", "MN"),
    ("MISSISSIPPI", "MS"),
    ("MISSOURI", "MO"),
    ("MONTANA", "MT"),
    ("NEBRASKA", "NE"),
    ("NEVADA", "NV"),
    ("NEW HAMPSHIRE", "NH"),
    ("NEW JERSEY", "NJ"),
    ("NEW MEXICO", "NM"),
    ("NEW YORK", "NY"),
    ("NORTH CAROLINA", "NC"),
    ("NORTH DAKOTA", "ND"),
    ("OHIO", "OH"),
    ("OKLAHOMA", "OK"),
    ("OREGON", "OR"),
    ("PENNSYLVANIA", "PA"),
    ("RHODE ISLAND", "RI"),
    ("SOUTH CAROLINA", "SC"),
    ("SOUTH DAKOTA", "SD"),
    ("TENNESSEE", "TN"),
    ("TEXAS", "TX"),
    ("UTAH", "UT"),
    ("VERMONT", "VT"),
    ("VIRGINIA", "VA"),
    ("WASHINGTON", "WA"),
    ("WEST VIRGINIA", "WV"),
    ("WISCONSIN", "WI"),
    ("WYOMING", "WY"),
    ("DISTRICT OF COLUMBIA", "DC"),
    ("PUERTO RICO", "PR"),
    ("AMERICAN SAMOA", "AS"),
    ("GUAM", "GU"),
    ("NORTHERN MARIANA ISLANDS", "MP"),
    ("VIRGIN ISLANDS", "VI"),
];

// Longest first so "NEW HAMPSHIRE" wins over "NEW" in prefix matching.
static STATES_LONGEST_FIRST: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut names: Vec<&'static str> = STATE_ABBREVS.iter().map(|(name, _)| *name).collect();
    names.sort_by_key(|name| std::cmp::Reverse(name.len()));
    names
});

static NAME_TO_ABBREV: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| STATE_ABBREVS.iter().copied().collect());

static ABBREV_TO_NAME: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    STATE_ABBREVS
        .iter()
        .map(|(name, abbrev)| (*abbrev, *name))
        .collect()
});

/// Whether `text` is exactly a jurisdiction label.
pub fn is_state(text: &str) -> bool {
    NAME_TO_ABBREV.contains_key(text)
}

/// Two-letter abbreviation for a full jurisdiction name.
pub fn abbrev_for(state: &str) -> Option<&'static str> {
    NAME_TO_ABBREV.get(state).copied()
}

/// Full jurisdiction name for a two-letter abbreviation.
pub fn state_for_abbrev(abbrev: &str) -> Option<&'static str> {
    ABBREV_TO_NAME.get(abbrev).copied()
}

/// Jurisdiction labels ordered longest first.
pub fn states_longest_first() -> &'static [&'static str] {
    &STATES_LONGEST_FIRST
}

/// Split a `STATE: remainder` line, trying longer labels first.
///
/// Returns the matched label and the trimmed text after the colon.
pub fn strip_state_prefix(line: &str) -> Option<(&'static str, &str)> {
    for state in states_longest_first() {
        if let Some(rest) = line.strip_prefix(state) {
            if let Some(rest) = rest.strip_prefix(':') {
                return Some((state, rest.trim()));
            }
        }
    }
    None
}

/// Boilerplate prefixes in the directory variant.
const DIRECTORY_BOILERPLATE: &[&str] = &[
    "Hospitals, U.S.",
    "\u{00a9} 2026",
    "Hospital, Medicare Provider",
];

/// Boilerplate substrings in the systems/networks variant.
const SYSTEMS_BOILERPLATE: &[&str] = &[
    "For explanation of codes following names",
    "Indicates Type III membership",
    "Section B",
    "\u{00a9} 2026",
    "\u{00a9}  2026",
    "Health Care Systems, Networks and Alliances",
    "Health Care Systems   B",
    "Health Care Systems Index",
    "Headquarters of Health Care Systems",
    "This document is licensed to",
    "copyrighted by the American Hospital Association",
    "Distribution or duplication is prohibited",
    "Networks and",
    "their Hospitals",
];

/// Whether a directory-variant line is running header/footer boilerplate.
pub fn directory_boilerplate(line: &str) -> bool {
    DIRECTORY_BOILERPLATE
        .iter()
        .any(|prefix| line.starts_with(prefix))
}

/// Whether a systems-variant line is boilerplate or a section page number
/// (`B4`, `B169`, ...).
pub fn systems_boilerplate(line: &str) -> bool {
    if SYSTEMS_BOILERPLATE.iter().any(|pat| line.contains(pat)) {
        return true;
    }
    is_section_page_number(line)
}

fn is_section_page_number(line: &str) -> bool {
    match line.strip_prefix('B') {
        Some(rest) => !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups_round_trip() {
        assert_eq!(abbrev_for("ILLINOIS"), Some("IL"));
        assert_eq!(state_for_abbrev("IL"), Some("ILLINOIS"));
        assert!(is_state("NEW HAMPSHIRE"));
        assert!(!is_state("New Hampshire"));
    }

    #[test]
    fn test_longest_label_wins() {
        // "NEW YORK: ..." must not match a hypothetical shorter label.
        let (state, rest) = strip_state_prefix("NEW YORK: EXAMPLE HOSPITAL (O, 10 beds)").unwrap();
        assert_eq!(state, "NEW YORK");
        assert_eq!(rest, "EXAMPLE HOSPITAL (O, 10 beds)");
    }

    #[test]
    fn test_strip_state_prefix_requires_colon() {
        assert!(strip_state_prefix("NEW YORK CITY HOSPITAL").is_none());
    }

    #[test]
    fn test_directory_boilerplate() {
        assert!(directory_boilerplate("Hospitals, U.S. / ALABAMA"));
        assert!(directory_boilerplate("\u{00a9} 2026 Example Press"));
        assert!(!directory_boilerplate("EXAMPLE HOSPITAL (010001)"));
    }

    #[test]
    fn test_systems_boilerplate() {
        assert!(systems_boilerplate("This document is licensed to John Doe"));
        assert!(systems_boilerplate("B169"));
        assert!(!systems_boilerplate("B169X"));
        assert!(!systems_boilerplate("0001: EXAMPLE HEALTH (IO)"));
    }
}
