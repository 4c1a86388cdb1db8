//! System/network-variant extraction pipeline.
//!
//! Pages are classified by their running header, reconstructed into the
//! line stream, and scanned twice: system sections are parsed against the
//! ownership/bed-count anchor, network sections against the comma-address
//! anchor. Each member row repeats its owning header's parsed
//! headquarters block.

use log::{debug, warn};

use crate::error::Result;
use crate::model::SystemRecord;
use crate::parser::assembler::{assemble, try_extend_header};
use crate::parser::backend::{PageContent, PageSource};
use crate::parser::context::ContextTracker;
use crate::parser::fields::{self, Headquarters};
use crate::parser::layout::{normalize_text, Line, LineStream};
use crate::parser::options::ExtractOptions;
use crate::parser::patterns::SystemsPatterns;
use crate::parser::vocab;

/// Page classes in a systems/networks document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Systems,
    Networks,
    Index,
    Skip,
}

/// Classify a page by its running header.
///
/// Index pages are recognized by their body text; content pages by the
/// running header in the top 50 points. Pages carrying the section mark
/// but no recognizable running header default to systems.
pub fn classify_page(page: &PageContent) -> PageKind {
    let text = page.full_text();
    if text.contains("Health Care Systems Index")
        || text.contains("Headquarters of Health Care Systems")
    {
        return PageKind::Index;
    }

    for block in &page.blocks {
        for line in &block.lines {
            if line.y() < 50.0 {
                let line_text: String = line.spans.iter().map(|s| s.text.as_str()).collect();
                let line_text = normalize_text(&line_text);
                let trimmed = line_text.trim();
                if trimmed.starts_with("Networks /") {
                    return PageKind::Networks;
                }
                if trimmed.starts_with("Systems /") {
                    return PageKind::Systems;
                }
            }
        }
    }

    if text.contains("Section B") {
        PageKind::Systems
    } else {
        PageKind::Skip
    }
}

/// A detected system or network header.
#[derive(Debug, Clone)]
struct SectionHeader {
    name: String,
    id: String,
    type_code: String,
    section: &'static str,
    line_idx: usize,
    /// First stream line after the header, past any wrapped header lines.
    body_start: usize,
}

/// Minimum size of a system header's bold id span.
const SYSTEM_HEADER_SIZE: f32 = 7.7;

/// Bold size band of a network organization name.
const NETWORK_NAME_SIZE: std::ops::RangeInclusive<f32> = 6.0..=6.5;

/// How far back a network header looks for its section's state header.
const STATE_LOOKBACK: usize = 30;

/// Parser for the healthcare system/network variant.
pub struct SystemsParser {
    options: ExtractOptions,
    patterns: SystemsPatterns,
}

impl SystemsParser {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            options,
            patterns: SystemsPatterns::new(),
        }
    }

    /// Run the pipeline over a page source.
    pub fn extract<S: PageSource>(&self, source: &S) -> Result<Vec<SystemRecord>> {
        let mut stream = LineStream::new();
        let mut kinds: Vec<PageKind> = Vec::new();

        for page in source.pages() {
            let kind = classify_page(page);
            if matches!(kind, PageKind::Index | PageKind::Skip) {
                debug!("page {} classified {:?}, dropped", page.number, kind);
                continue;
            }
            stream.push_page(page, self.options.column_split, vocab::systems_boilerplate);
            kinds.resize(stream.len(), kind);
        }
        debug!("reconstructed {} lines", stream.len());

        let headers = self.find_headers(&stream.lines, &kinds);
        let mut records = self.parse_systems(&stream.lines, &headers);
        records.extend(self.parse_networks(&stream.lines, &headers));
        Ok(records)
    }

    /// Locate system and network headers in the reconstructed stream.
    fn find_headers(&self, lines: &[Line], kinds: &[PageKind]) -> Vec<SectionHeader> {
        let p = &self.patterns;
        let mut headers = Vec::new();

        let mut i = 0;
        while i < lines.len() {
            let line = &lines[i];
            if line.skip {
                i += 1;
                continue;
            }

            match kinds[i] {
                PageKind::Systems => {
                    let has_id_span = line.spans.iter().any(|s| {
                        s.bold
                            && s.font_size >= SYSTEM_HEADER_SIZE
                            && p.system_id_span.is_match(&s.text)
                    });
                    if has_id_span {
                        // Long names wrap onto further bold lines before
                        // the parenthesized type code appears.
                        let extended = try_extend_header(
                            lines,
                            i,
                            self.options.max_lookahead,
                            &p.system_header,
                            |l| {
                                l.spans
                                    .iter()
                                    .any(|s| s.bold && s.font_size >= SYSTEM_HEADER_SIZE)
                            },
                        );
                        match extended {
                            Some((merged, consumed)) => {
                                if let Some(caps) = p.system_header.captures(&merged) {
                                    debug!("system header {} at line {}", &caps[1], i);
                                    headers.push(SectionHeader {
                                        id: caps[1].to_string(),
                                        name: caps[2].trim().to_string(),
                                        type_code: caps[3].to_string(),
                                        section: "Systems",
                                        line_idx: i,
                                        body_start: i + consumed + 1,
                                    });
                                    i += consumed + 1;
                                    continue;
                                }
                            }
                            None => {
                                warn!("header-shaped line {} never completed a type code", i);
                            }
                        }
                    }
                }
                PageKind::Networks => {
                    if self.is_network_header(line) {
                        debug!("network header '{}' at line {}", line.trimmed(), i);
                        headers.push(SectionHeader {
                            name: line.trimmed().to_string(),
                            id: String::new(),
                            type_code: "NET".to_string(),
                            section: "Networks",
                            line_idx: i,
                            body_start: i + 1,
                        });
                    }
                }
                _ => {}
            }
            i += 1;
        }
        headers
    }

    fn is_network_header(&self, line: &Line) -> bool {
        let first = match line.spans.iter().find(|s| !s.text.trim().is_empty()) {
            Some(span) => span,
            None => return false,
        };
        if !first.bold || !NETWORK_NAME_SIZE.contains(&first.font_size) {
            return false;
        }

        let text = line.trimmed();
        self.patterns.network_name.is_match(text)
            && !vocab::is_state(text)
            && text.len() > 3
            && !text.chars().take(20).any(|c| c == ',')
            && !text.chars().any(|c| c.is_ascii_digit())
            && !text.contains("Zip")
            && !text.contains("tel.")
    }

    // ------------------------------------------------------------------
    // Systems section
    // ------------------------------------------------------------------

    fn parse_systems(&self, lines: &[Line], headers: &[SectionHeader]) -> Vec<SystemRecord> {
        let p = &self.patterns;
        let mut records = Vec::new();
        let system_headers: Vec<&SectionHeader> = headers
            .iter()
            .filter(|h| h.section == "Systems")
            .collect();

        for (hi, hdr) in system_headers.iter().enumerate() {
            let end = system_headers
                .get(hi + 1)
                .map(|h| h.line_idx)
                .unwrap_or(lines.len());

            let (mut hq, mut i) = self.parse_headquarters(lines, hdr.body_start, end);

            let mut tracker: ContextTracker<String, String> = ContextTracker::new();
            tracker.set_top(hdr.name.clone());

            while i < end {
                let line = &lines[i];
                if line.skip {
                    i += 1;
                    continue;
                }
                let text = line.trimmed();

                // Membership summary blocks carry totals, not members.
                if is_summary_start(text) {
                    i += 1;
                    while i < end && p.summary_continuation.is_match(lines[i].trimmed()) {
                        i += 1;
                    }
                    continue;
                }

                // A classification line that trails the headquarters block.
                if let Some(classification) = self.classification_of(text) {
                    if hq.classification.is_empty() {
                        hq.classification = classification;
                    }
                    i += 1;
                    continue;
                }

                // State-prefixed member line: `ILLINOIS: NAME (O, n beds) ...`
                if let Some((state, after)) = vocab::strip_state_prefix(text) {
                    tracker.set_sub(state.to_string());
                    if after.is_empty() {
                        i += 1;
                        continue;
                    }
                    let header_end = if p.bed_anchor.is_match(after) {
                        i
                    } else {
                        self.wrapped_anchor_end(lines, i).unwrap_or(i)
                    };
                    let assembled = self.assemble_member(lines, i, end, header_end);
                    let blob = assembled
                        .blob
                        .strip_prefix(state)
                        .and_then(|rest| rest.strip_prefix(':'))
                        .unwrap_or(&assembled.blob)
                        .trim()
                        .to_string();
                    self.push_hospital(&mut records, hdr, &hq, &tracker, &blob);
                    i = assembled.next;
                    continue;
                }

                // Member line with the anchor on this line or wrapped onto
                // the next one or two.
                if starts_uppercase(text) && !p.system_header_inline.is_match(text) {
                    if let Some(header_end) = self.wrapped_anchor_end(lines, i) {
                        let assembled = self.assemble_member(lines, i, end, header_end);
                        self.push_hospital(&mut records, hdr, &hq, &tracker, &assembled.blob);
                        i = assembled.next;
                        continue;
                    }
                }

                i += 1;
            }
        }
        records
    }

    /// Scan the headquarters address block that follows a system header.
    ///
    /// Returns the parsed block and the index of the first member line.
    fn parse_headquarters(&self, lines: &[Line], start: usize, end: usize) -> (Headquarters, usize) {
        let p = &self.patterns;
        let mut block = String::new();
        let mut classification = String::new();

        let mut i = start;
        while i < end {
            let line = &lines[i];
            if line.skip {
                i += 1;
                continue;
            }
            let text = line.trimmed();

            if let Some(value) = self.classification_of(text) {
                classification = value;
                i += 1;
                break;
            }
            if vocab::strip_state_prefix(text).is_some() {
                break;
            }
            if p.hospital_entry.is_match(text) {
                break;
            }
            if starts_uppercase(text) && self.wrapped_anchor_end(lines, i).is_some() {
                break;
            }

            if !block.is_empty() {
                block.push(' ');
            }
            block.push_str(text);
            i += 1;
        }

        let mut hq = fields::parse_headquarters_text(p, &block);
        hq.classification = classification;
        (hq, i)
    }

    /// Classification text when the line is a parenthesized system note.
    fn classification_of(&self, text: &str) -> Option<String> {
        let caps = self.patterns.classification.captures(text)?;
        let value = caps[1].to_string();
        if value.contains("System") || value.contains("Health") {
            Some(value)
        } else {
            None
        }
    }

    /// Offset of the line completing a member's bed-count anchor, when the
    /// anchor sits on this line or wraps onto the next one or two.
    fn wrapped_anchor_end(&self, lines: &[Line], i: usize) -> Option<usize> {
        let p = &self.patterns;
        let accept = |l: &Line| {
            let t = l.trimmed();
            !(vocab::strip_state_prefix(t).is_some()
                || p.system_header_inline.is_match(t)
                || is_summary_start(t)
                || p.hospital_entry.is_match(t))
        };
        try_extend_header(lines, i, 2, &p.bed_anchor, accept)
            .map(|(_, consumed)| i + consumed)
    }

    /// Assemble a member blob; stop checks begin after `header_end`.
    fn assemble_member(
        &self,
        lines: &[Line],
        start: usize,
        end: usize,
        header_end: usize,
    ) -> crate::parser::assembler::Assembled {
        let p = &self.patterns;
        assemble(
            lines,
            start,
            end,
            |idx, l| {
                let t = l.trimmed();
                idx > header_end
                    && (vocab::strip_state_prefix(t).is_some()
                        || is_summary_start(t)
                        || self.classification_of(t).is_some()
                        || p.system_header_inline.is_match(t))
            },
            |idx, l| {
                let t = l.trimmed();
                idx > header_end
                    && (p.hospital_entry.is_match(t)
                        || self.is_wrapped_hospital_start(lines, idx))
            },
        )
    }

    /// Whether the line at `idx` begins the next member entry with its
    /// anchor wrapped onto a following line.
    fn is_wrapped_hospital_start(&self, lines: &[Line], idx: usize) -> bool {
        let p = &self.patterns;
        let text = lines[idx].trimmed();
        if !p.hospital_name_like.is_match(text) {
            return false;
        }
        // Address and contact continuations are never entry names.
        if p.continuation_prefix.is_match(text)
            || p.continuation_infix.is_match(text)
            || text.starts_with(|c: char| c.is_ascii_digit())
        {
            return false;
        }
        try_extend_header(lines, idx, 2, &p.bed_anchor, |_| true).is_some()
    }

    fn push_hospital(
        &self,
        records: &mut Vec<SystemRecord>,
        hdr: &SectionHeader,
        hq: &Headquarters,
        tracker: &ContextTracker<String, String>,
        blob: &str,
    ) {
        let p = &self.patterns;
        let caps = match p.hospital_split.captures(blob) {
            Some(caps) => caps,
            None => {
                debug!("member blob without anchor dropped: '{:.60}'", blob);
                return;
            }
        };
        let name = caps[1].trim().to_string();
        if name.is_empty() {
            return;
        }
        let tail = fields::parse_address_tail(p, caps.get(4).map(|m| m.as_str()).unwrap_or(""));
        let record = build_record(
            hdr,
            hq,
            tracker.sub().map(|s| s.as_str()),
            name,
            caps[2].to_string(),
            caps[3].to_string(),
            tail,
        );
        records.push(record);
    }

    // ------------------------------------------------------------------
    // Networks section
    // ------------------------------------------------------------------

    fn parse_networks(&self, lines: &[Line], headers: &[SectionHeader]) -> Vec<SystemRecord> {
        let p = &self.patterns;
        let mut records = Vec::new();
        let net_headers: Vec<&SectionHeader> = headers
            .iter()
            .filter(|h| h.section == "Networks")
            .collect();

        for (ni, hdr) in net_headers.iter().enumerate() {
            let end = net_headers
                .get(ni + 1)
                .map(|h| h.line_idx)
                .unwrap_or(lines.len());

            // The headquarters block ends on the line carrying the phone.
            let mut block = String::new();
            let mut i = hdr.body_start;
            while i < end {
                let line = &lines[i];
                if line.skip {
                    i += 1;
                    continue;
                }
                let text = line.trimmed();
                if !block.is_empty() {
                    block.push(' ');
                }
                block.push_str(text);
                i += 1;
                if text.contains("tel.") {
                    break;
                }
            }
            let hq = fields::parse_headquarters_text(p, &block);

            let mut tracker: ContextTracker<String, String> = ContextTracker::new();
            tracker.set_top(hdr.name.clone());
            // The section's state header usually precedes the network name.
            let lookback_floor = hdr.line_idx.saturating_sub(STATE_LOOKBACK);
            for j in (lookback_floor..hdr.line_idx).rev() {
                if vocab::is_state(lines[j].trimmed()) {
                    tracker.set_sub(lines[j].trimmed().to_string());
                    break;
                }
            }

            while i < end {
                let line = &lines[i];
                if line.skip {
                    i += 1;
                    continue;
                }
                let text = line.trimmed();

                if vocab::is_state(text) {
                    tracker.set_sub(text.to_string());
                    i += 1;
                    continue;
                }

                if p.network_record.is_match(text) {
                    let assembled = assemble(
                        lines,
                        i,
                        end,
                        |idx, l| idx > i && vocab::is_state(l.trimmed()),
                        |idx, l| idx > i && p.network_record.is_match(l.trimmed()),
                    );
                    self.push_network_member(&mut records, hdr, &hq, &tracker, &assembled.blob);
                    i = assembled.next;
                    continue;
                }

                i += 1;
            }
        }
        records
    }

    fn push_network_member(
        &self,
        records: &mut Vec<SystemRecord>,
        hdr: &SectionHeader,
        hq: &Headquarters,
        tracker: &ContextTracker<String, String>,
        blob: &str,
    ) {
        let p = &self.patterns;

        let (name, remainder) = match p
            .network_split
            .captures(blob)
            .or_else(|| p.network_split_po_box.captures(blob))
        {
            Some(caps) => (
                caps[1].trim().to_string(),
                caps.get(2).map(|m| m.as_str().trim().to_string()),
            ),
            // Member listings omit the ownership parenthetical; an entry
            // with no digit-led address keeps its whole text as the name.
            None => (blob.trim().to_string(), None),
        };
        if name.is_empty() {
            return;
        }

        let tail = remainder
            .map(|r| fields::parse_address_tail(p, &r))
            .unwrap_or_default();
        let record = build_record(
            hdr,
            hq,
            tracker.sub().map(|s| s.as_str()),
            name,
            String::new(),
            String::new(),
            tail,
        );
        records.push(record);
    }
}

fn starts_uppercase(text: &str) -> bool {
    text.starts_with(|c: char| c.is_ascii_uppercase())
}

fn is_summary_start(text: &str) -> bool {
    text.starts_with("Owned, leased, sponsored:")
        || text.starts_with("Contract-managed:")
        || text.starts_with("Totals:")
}

/// Merge header metadata, headquarters block, state context, and parsed
/// member fields into one record.
fn build_record(
    hdr: &SectionHeader,
    hq: &Headquarters,
    state_ctx: Option<&str>,
    hospital_name: String,
    ownership_type: String,
    staffed_beds: String,
    tail: fields::AddressParts,
) -> SystemRecord {
    let mut state = state_ctx.unwrap_or("").to_string();
    let mut state_abbrev = state_ctx
        .and_then(vocab::abbrev_for)
        .unwrap_or("")
        .to_string();
    if !tail.state_abbrev.is_empty() {
        state_abbrev = tail.state_abbrev;
    }
    // The only inference the builder performs: abbreviation to full name.
    if state.is_empty() && !state_abbrev.is_empty() {
        state = vocab::state_for_abbrev(&state_abbrev)
            .unwrap_or("")
            .to_string();
    }

    SystemRecord {
        healthcare_system: hdr.name.clone(),
        system_id: hdr.id.clone(),
        system_type: hdr.type_code.clone(),
        system_classification: hq.classification.clone(),
        system_address: hq.address.clone(),
        system_city: hq.city.clone(),
        system_state: hq.state.clone(),
        system_zip: hq.zip.clone(),
        system_telephone: hq.telephone.clone(),
        system_ceo: hq.ceo.clone(),
        section: hdr.section.to_string(),
        hospital_name,
        ownership_type,
        staffed_beds,
        address: tail.address,
        city: tail.city,
        state,
        state_abbrev,
        zip_code: tail.zip,
        telephone: tail.telephone,
        contact: tail.contact,
        web_address: tail.web_address,
    }
}
