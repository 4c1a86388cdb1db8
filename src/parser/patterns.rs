//! Compiled pattern sets, one per document variant.
//!
//! The two variants' pattern families overlap but are not identical (name
//! punctuation, anchors, skip-lists all differ slightly), so each variant
//! carries its own configuration rather than sharing a canonical grammar.

use regex::Regex;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("pattern literal compiles")
}

/// Contact-role fields and their printed marker labels, in schema order.
pub const CONTACT_ROLES: &[(&str, &str)] = &[
    ("primary_contact", "Primary Contact"),
    ("coo", "COO"),
    ("cfo", "CFO"),
    ("cmo", "CMO"),
    ("cio", "CIO"),
    ("chr", "CHR"),
    ("cno", "CNO"),
];

/// Patterns for the state/county directory variant.
#[derive(Debug)]
pub struct DirectoryPatterns {
    /// Record start: optional marker glyphs, capitalized name, then a
    /// parenthesized six-digit provider number.
    pub record_start: Regex,

    /// Record start for facilities listed without a provider number:
    /// the name must end in an institutional keyword, followed directly
    /// by a comma and a digit-led street fragment.
    pub no_id_start: Regex,

    /// Name-shaped span text for the typography record-start path,
    /// tolerating leading marker glyphs.
    pub span_name: Regex,

    /// Provider-id-shaped span text for the typography record-start path.
    pub span_id: Regex,

    /// City-county locality header.
    pub locality: Regex,

    /// ZIP with optional plus-four suffix.
    pub zip: Regex,

    /// Street address anchored after the provider number, bounded by `Zip`.
    pub address: Regex,

    /// Street address fallback for no-id records, anchored after the
    /// institutional keyword's comma.
    pub address_no_id: Regex,

    /// Telephone after the `tel.` marker, tolerating a wrapped tail.
    pub phone: Regex,

    /// Wrapped-phone repair: trailing hyphen, whitespace, digits.
    pub phone_wrap: Regex,

    /// One extractor per contact role, in [`CONTACT_ROLES`] order.
    pub contacts: Vec<(&'static str, Regex)>,

    /// Truncates a marker value at the next recognized marker keyword.
    pub marker_split: Regex,

    /// Labeled web address.
    pub web: Regex,

    /// Bare web token fallback.
    pub web_fallback: Regex,

    /// Value between `Control:` and `Service:` or end of blob.
    pub control: Regex,

    /// Value between `Service:` and `Staffed Beds:` or end of blob.
    pub service: Regex,

    pub staffed_beds: Regex,
}

impl DirectoryPatterns {
    pub fn new() -> Self {
        let contacts = CONTACT_ROLES
            .iter()
            .map(|&(field, label)| {
                // CMO values often carry an "M.D." suffix after the comma.
                let pattern = if field == "cmo" {
                    format!(r"{label}:\s*([^,\n]+(?:,\s*M\.D\.[^,\n]*)?)")
                } else {
                    format!(r"{label}:\s*([^,\n]+(?:,\s*[^,\n]+)?)")
                };
                (field, re(&pattern))
            })
            .collect();

        Self {
            record_start: re(
                r"^[★□⇑uenwW\s\t]*([A-Z][A-Za-z0-9\s\.'\-&,]+)\s*\((\d{6})\)",
            ),
            no_id_start: re(
                r"^[★□⇑uenwW\s\t]*([A-Z][A-Za-z0-9\s\.'\-&]*(?:HOSPITAL|MEDICAL CENTER|HEALTH CLINIC|INFIRMARY))\s*,\s*(\d+\s+[A-Za-z].*)$",
            ),
            span_name: re(r"^[★□⇑uenwW\s]*([A-Z][A-Za-z0-9\s\.'\-&,]*)$"),
            span_id: re(r"^\((\d{6})\)"),
            locality: re(r"^([A-Z][A-Z\s\.]+)[-—](.+\s+County)$"),
            zip: re(r"Zip\s+(\d{5}(?:-\d{4})?)"),
            address: re(r"\(\d{6}\),?\s*(.+?),?\s*Zip"),
            address_no_id: re(
                r"(?:HOSPITAL|MEDICAL CENTER|HEALTH CLINIC|INFIRMARY)\s*,\s*(.+?),?\s*Zip",
            ),
            phone: re(r"tel\.\s*([\d/\-]+(?:\s+\d+)?)"),
            phone_wrap: re(r"-\s+(\d+)"),
            contacts,
            marker_split: re(
                r"\s+(?:Primary Contact|COO|CFO|CMO|CIO|CHR|CNO|Web address|Control|Service|Staffed Beds):",
            ),
            web: re(r"Web address\s*:\s*(\S+)"),
            web_fallback: re(r"(https?://\S+|www\.\S+)"),
            control: re(r"Control:\s*(.+?)(?:\s+Service:|\s*$)"),
            service: re(r"Service:\s*(.+?)(?:\s+Staffed Beds:|\s*$)"),
            staffed_beds: re(r"Staffed Beds:\s*(\d+)"),
        }
    }
}

impl Default for DirectoryPatterns {
    fn default() -> Self {
        Self::new()
    }
}

/// Patterns for the healthcare system/network variant.
#[derive(Debug)]
pub struct SystemsPatterns {
    /// Full system header: id, name, parenthesized type code.
    pub system_header: Regex,

    /// Span-level probe for a system header's bold id span.
    pub system_id_span: Regex,

    /// Stop-check shape of a system header at line start.
    pub system_header_inline: Regex,

    /// All-capitals network organization name.
    pub network_name: Regex,

    /// Ownership/bed-count anchor, searched anywhere in a line.
    pub bed_anchor: Regex,

    /// A hospital entry whose anchor sits on the same line.
    pub hospital_entry: Regex,

    /// Splits a hospital blob at the anchor into name, ownership code,
    /// bed count, and address remainder.
    pub hospital_split: Regex,

    /// Name shape that may begin a wrapped hospital entry.
    pub hospital_name_like: Regex,

    /// Address/contact continuations that must not be mistaken for a
    /// wrapped hospital name.
    pub continuation_prefix: Regex,
    pub continuation_infix: Regex,

    /// Network member entry: capitals name, comma, digit-led address.
    pub network_record: Regex,

    /// Splits a network blob into name and address remainder.
    pub network_split: Regex,
    pub network_split_po_box: Regex,

    /// Headquarters classification line, e.g. `(Decentralized Health System)`.
    pub classification: Regex,

    /// Continuation lines of a membership summary block.
    pub summary_continuation: Regex,

    pub zip: Regex,
    pub phone: Regex,
    pub phone_wrap: Regex,

    /// Address with inline two-letter state before the `Zip` marker.
    pub addr_state_zip: Regex,

    /// Address bounded by `Zip` alone.
    pub addr_zip: Regex,

    /// Trailing two-letter state abbreviation.
    pub state_at_end: Regex,

    /// Leading phone-continuation digits at the start of contact text.
    pub leading_digits: Regex,

    pub web: Regex,
}

impl SystemsPatterns {
    pub fn new() -> Self {
        Self {
            system_header: re(r"^[w\s]*(\d{4}):\s+(.+?)\s*\(([A-Z]{2,4})\)\s*$"),
            system_id_span: re(r"\d{4}:"),
            system_header_inline: re(r"^[w\s]*\d{4}:\s+[A-Z]"),
            network_name: re(r"^[A-Z][A-Z\s\.',&\-/]+$"),
            bed_anchor: re(r"\((?:[OLCS]|PART),\s*\d+\s*beds?\)"),
            hospital_entry: re(r"^[A-Z].*\((?:[OLCS]|PART),\s*\d+\s*beds?\)"),
            hospital_split: re(r"^(.+?)\s*\(([OLCS]|PART),\s*(\d+)\s*beds?\)\s*(.*)$"),
            hospital_name_like: re(r"^[A-Z][A-Z\s\.'\-&+/]+"),
            continuation_prefix: re(r"(?i)^(Web address|Zip\s|tel\.|www\.)"),
            continuation_infix: re(r"(,\s*[A-Z]{2},\s*Zip|beds?\))"),
            network_record: re(r"^[A-Z][A-Z\s\.'\-&,+/()]+,\s*\d+"),
            network_split: re(r"^(.+?),\s*(\d+\s+.+)$"),
            network_split_po_box: re(r"^(.+?),\s*(P\s*O\s+Box.+)$"),
            classification: re(r"^\((.+?)\)\s*$"),
            summary_continuation: re(r"^(\d+\s+(hospitals|beds)|Contract|Totals)"),
            zip: re(r"Zip\s+(\d{5}(?:-\d{4})?)"),
            phone: re(r"tel\.\s*([\d/\-]+(?:\s+\d+)?)"),
            phone_wrap: re(r"-\s+(\d+)"),
            addr_state_zip: re(r"^(.+?),\s*([A-Z]{2}),\s*Zip"),
            addr_zip: re(r"^(.+?),\s*Zip"),
            state_at_end: re(r",?\s*([A-Z]{2})\s*$"),
            leading_digits: re(r"^(\d+)[,;\s]*(.*)$"),
            web: re(r"Web address\s*:\s*(\S+)"),
        }
    }
}

impl Default for SystemsPatterns {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_start_with_markers() {
        let p = DirectoryPatterns::new();
        let caps = p
            .record_start
            .captures("★ BAPTIST MEDICAL CENTER SOUTH (010023), 2105 E South Blvd")
            .unwrap();
        assert_eq!(caps.get(1).unwrap().as_str().trim(), "BAPTIST MEDICAL CENTER SOUTH");
        assert_eq!(caps.get(2).unwrap().as_str(), "010023");
    }

    #[test]
    fn test_record_start_rejects_short_id() {
        let p = DirectoryPatterns::new();
        assert!(!p.record_start.is_match("EXAMPLE HOSPITAL (1234)"));
    }

    #[test]
    fn test_no_id_start() {
        let p = DirectoryPatterns::new();
        let caps = p
            .no_id_start
            .captures("u U S AIR FORCE HOSPITAL, 301 Fisher St")
            .unwrap();
        assert!(caps.get(1).unwrap().as_str().ends_with("HOSPITAL"));
        assert_eq!(caps.get(2).unwrap().as_str(), "301 Fisher St");
    }

    #[test]
    fn test_locality_header() {
        let p = DirectoryPatterns::new();
        let caps = p.locality.captures("ALABASTER-Shelby County").unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "ALABASTER");
        assert_eq!(caps.get(2).unwrap().as_str(), "Shelby County");
    }

    #[test]
    fn test_system_header() {
        let p = SystemsPatterns::new();
        let caps = p
            .system_header
            .captures("w 0335: EXAMPLE HEALTH SYSTEM (IO)")
            .unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "0335");
        assert_eq!(caps.get(2).unwrap().as_str(), "EXAMPLE HEALTH SYSTEM");
        assert_eq!(caps.get(3).unwrap().as_str(), "IO");
    }

    #[test]
    fn test_hospital_split() {
        let p = SystemsPatterns::new();
        let caps = p
            .hospital_split
            .captures("CITY GENERAL (O, 120 beds) 100 Main St, Springfield, IL, Zip 62701")
            .unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "CITY GENERAL");
        assert_eq!(caps.get(2).unwrap().as_str(), "O");
        assert_eq!(caps.get(3).unwrap().as_str(), "120");
    }

    #[test]
    fn test_bed_anchor_part_code() {
        let p = SystemsPatterns::new();
        assert!(p.bed_anchor.is_match("SOME NAME (PART, 45 beds) rest"));
        assert!(!p.bed_anchor.is_match("SOME NAME (X, 45 beds) rest"));
    }

    #[test]
    fn test_network_record() {
        let p = SystemsPatterns::new();
        assert!(p.network_record.is_match("MERCY HOSPITAL, 1400 Locust St"));
        assert!(!p.network_record.is_match("Totals: 14 hospitals"));
    }
}
