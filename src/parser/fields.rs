//! Field extraction cascade.
//!
//! Every extractor is a pure function of the record blob: a non-match
//! leaves the field empty and never raises. Fields with known format
//! variants get an ordered fallback chain; the first success wins.
//! Labeled-marker values truncate at the next recognized marker keyword
//! so one field can never swallow the ones after it.

use regex::Regex;

use crate::model::DirectoryRecord;
use crate::parser::patterns::{DirectoryPatterns, SystemsPatterns};

/// First capture group of `re` in `blob`, trimmed.
fn capture1(re: &Regex, blob: &str) -> Option<String> {
    re.captures(blob)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Apply an ordered extractor chain; empty string when nothing matches.
fn cascade(blob: &str, extractors: &[&dyn Fn(&str) -> Option<String>]) -> String {
    extractors
        .iter()
        .find_map(|extract| extract(blob))
        .unwrap_or_default()
}

/// Populate a directory record's extracted fields from its blob.
///
/// Context and header fields (name, id, state, city, county) are set by
/// the scan before the cascade runs.
pub fn apply_directory_cascade(p: &DirectoryPatterns, blob: &str, record: &mut DirectoryRecord) {
    if let Some(zip) = capture1(&p.zip, blob) {
        record.zip_code = zip;
    }

    let has_id = record.has_provider_id();
    record.address = cascade(
        blob,
        &[
            &|b| capture1(&p.address, b),
            &|b| {
                // Facilities without a provider number anchor the address
                // at the institutional keyword's comma instead.
                if has_id {
                    None
                } else {
                    capture1(&p.address_no_id, b)
                }
            },
        ],
    )
    .trim_end_matches(',')
    .to_string();

    if let Some(phone) = capture1(&p.phone, blob) {
        record.telephone = p.phone_wrap.replace_all(&phone, "-$1").into_owned();
    }

    for (field, re) in &p.contacts {
        if let Some(value) = capture1(re, blob) {
            let value = p
                .marker_split
                .split(&value)
                .next()
                .unwrap_or("")
                .trim()
                .to_string();
            set_contact(record, field, value);
        }
    }

    record.web_address = cascade(
        blob,
        &[
            &|b| capture1(&p.web, b),
            &|b| capture1(&p.web_fallback, b),
        ],
    );

    if let Some(control) = capture1(&p.control, blob) {
        record.control = control;
    }
    if let Some(services) = capture1(&p.service, blob) {
        record.services = services;
    }
    if let Some(beds) = capture1(&p.staffed_beds, blob) {
        record.staffed_beds = beds;
    }
}

fn set_contact(record: &mut DirectoryRecord, field: &str, value: String) {
    match field {
        "primary_contact" => record.primary_contact = value,
        "coo" => record.coo = value,
        "cfo" => record.cfo = value,
        "cmo" => record.cmo = value,
        "cio" => record.cio = value,
        "chr" => record.chr = value,
        "cno" => record.cno = value,
        _ => {}
    }
}

/// Parsed tail of a member hospital line, after the name anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressParts {
    pub address: String,
    pub city: String,
    pub state_abbrev: String,
    pub zip: String,
    pub telephone: String,
    pub contact: String,
    pub web_address: String,
}

/// Parse address, zip, telephone, contact, and web from the remainder of
/// a member hospital blob.
pub fn parse_address_tail(p: &SystemsPatterns, remainder: &str) -> AddressParts {
    let mut parts = AddressParts::default();

    if let Some(zip) = capture1(&p.zip, remainder) {
        parts.zip = zip;
    }

    if let Some(caps) = p.addr_state_zip.captures(remainder) {
        parts.state_abbrev = caps[2].to_string();
        let addr = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
        split_city(addr, &mut parts);
    } else if let Some(caps) = p.addr_zip.captures(remainder) {
        let addr_text = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
        if let Some(state_caps) = p.state_at_end.captures(addr_text) {
            parts.state_abbrev = state_caps[1].to_string();
            let whole = state_caps.get(0).map(|m| m.start()).unwrap_or(addr_text.len());
            split_city(addr_text[..whole].trim(), &mut parts);
        } else {
            parts.address = addr_text.to_string();
        }
    }

    if let Some(caps) = p.phone.captures(remainder) {
        let phone = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        parts.telephone = p.phone_wrap.replace_all(phone, "-$1").into_owned();

        let whole_end = caps.get(0).map(|m| m.end()).unwrap_or(remainder.len());
        let mut after_tel = remainder[whole_end..]
            .trim_start_matches([',', ';', ' '])
            .to_string();

        // A phone that still ends with a hyphen was wrapped with its
        // continuation digits on the far side of punctuation.
        if parts.telephone.ends_with('-') {
            if let Some(digit_caps) = p.leading_digits.captures(&after_tel) {
                parts.telephone.push_str(&digit_caps[1]);
                after_tel = digit_caps[2].trim_start_matches([',', ';', ' ']).to_string();
            }
        }

        let contact_text = match p.web.find(&after_tel) {
            Some(m) => &after_tel[..m.start()],
            None => after_tel.as_str(),
        };
        parts.contact = contact_text.trim().trim_end_matches('.').to_string();
    }

    if let Some(web) = capture1(&p.web, remainder) {
        parts.web_address = web;
    }

    parts
}

fn split_city(addr: &str, parts: &mut AddressParts) {
    let addr = addr.trim_end_matches(',').trim();
    match addr.rsplit_once(',') {
        Some((street, city)) => {
            parts.address = street.trim().to_string();
            parts.city = city.trim().to_string();
        }
        None => parts.address = addr.to_string(),
    }
}

/// Parsed headquarters block of a system or network header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headquarters {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub telephone: String,
    pub ceo: String,
    pub classification: String,
}

/// Parse the accumulated headquarters text that follows a system or
/// network header line. The classification line is recognized by the
/// scanner and set separately.
pub fn parse_headquarters_text(p: &SystemsPatterns, block_text: &str) -> Headquarters {
    let mut hq = Headquarters::default();
    let block_text = block_text.trim();

    if let Some(zip) = capture1(&p.zip, block_text) {
        hq.zip = zip;
    }

    if let Some(caps) = p.phone.captures(block_text) {
        let phone = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        hq.telephone = p.phone_wrap.replace_all(phone, "-$1").into_owned();

        let whole_end = caps.get(0).map(|m| m.end()).unwrap_or(block_text.len());
        let ceo = block_text[whole_end..].trim_start_matches([',', ';', ' ']);
        hq.ceo = ceo.trim().trim_end_matches('.').to_string();
    }

    let addr_part = match block_text.split_once("Zip") {
        Some((before, _)) => before.trim(),
        None => "",
    };
    if !addr_part.is_empty() {
        if let Some(caps) = p.state_at_end.captures(addr_part) {
            hq.state = caps[1].to_string();
            let start = caps.get(0).map(|m| m.start()).unwrap_or(addr_part.len());
            let before_state = addr_part[..start].trim();
            match before_state.rsplit_once(',') {
                Some((street, city)) => {
                    hq.address = street.trim().to_string();
                    hq.city = city.trim().to_string();
                }
                None => hq.address = before_state.to_string(),
            }
        }
    }

    hq
}
