//! Directory-variant extraction pipeline.
//!
//! Single synchronous pass: pages are reconstructed into the line stream,
//! then one scan classifies boundaries, threads the context tracker,
//! assembles record blobs, and runs the field cascade on each.

use log::{debug, warn};

use crate::error::Result;
use crate::model::DirectoryRecord;
use crate::parser::assembler::{assemble, try_extend_header};
use crate::parser::backend::PageSource;
use crate::parser::boundary::{Boundary, BoundaryDetector, RecordStart};
use crate::parser::context::{ContextTracker, Locality};
use crate::parser::fields;
use crate::parser::layout::LineStream;
use crate::parser::options::ExtractOptions;
use crate::parser::patterns::DirectoryPatterns;
use crate::parser::vocab;

/// Parser for the state/county directory variant.
pub struct DirectoryParser {
    options: ExtractOptions,
    patterns: DirectoryPatterns,
    detector: BoundaryDetector,
}

impl DirectoryParser {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            options,
            patterns: DirectoryPatterns::new(),
            detector: BoundaryDetector::directory(),
        }
    }

    /// Run the pipeline over a page source.
    pub fn extract<S: PageSource>(&self, source: &S) -> Result<Vec<DirectoryRecord>> {
        let mut stream = LineStream::new();
        for page in source.pages() {
            stream.push_page(page, self.options.column_split, vocab::directory_boilerplate);
        }
        debug!("reconstructed {} lines", stream.len());
        Ok(self.scan(&stream))
    }

    /// Scan the reconstructed stream into records.
    pub fn scan(&self, stream: &LineStream) -> Vec<DirectoryRecord> {
        let lines = &stream.lines;
        let mut tracker: ContextTracker<String, Locality> = ContextTracker::new();
        let mut records = Vec::new();

        let mut i = 0;
        while i < lines.len() {
            let line = &lines[i];
            if line.skip {
                i += 1;
                continue;
            }

            match self.detector.classify(line) {
                Some(Boundary::State(state)) => {
                    debug!("state header '{}' at line {}", state, i);
                    tracker.set_top(state);
                    i += 1;
                }
                Some(Boundary::Locality(locality)) => {
                    tracker.set_sub(locality);
                    i += 1;
                }
                Some(Boundary::RecordStart(start)) => {
                    let (start, header_end) = self.resolve_wrapped_id(lines, i, start);

                    let assembled = assemble(
                        lines,
                        i,
                        lines.len(),
                        |idx, l| {
                            idx > header_end
                                && matches!(
                                    self.detector.classify(l),
                                    Some(Boundary::State(_) | Boundary::Locality(_))
                                )
                        },
                        |idx, l| {
                            idx > header_end
                                && matches!(
                                    self.detector.classify(l),
                                    Some(Boundary::RecordStart(_))
                                )
                        },
                    );

                    records.push(self.build_record(&start, &assembled.blob, &tracker));
                    i = assembled.next;
                }
                None => i += 1,
            }
        }

        records
    }

    /// Second pass for records detected without an id: a wrapped
    /// continuation may complete an id-bearing start within the lookahead
    /// bound, and the id-bearing reading wins.
    fn resolve_wrapped_id(
        &self,
        lines: &[crate::parser::layout::Line],
        i: usize,
        start: RecordStart,
    ) -> (RecordStart, usize) {
        if !start.id.is_empty() {
            return (start, i);
        }

        let extended = try_extend_header(
            lines,
            i,
            self.options.max_lookahead,
            &self.patterns.record_start,
            |l| {
                !matches!(
                    self.detector.classify(l),
                    Some(Boundary::State(_) | Boundary::Locality(_))
                )
            },
        );

        match extended {
            Some((merged, consumed)) => {
                if let Some(caps) = self.patterns.record_start.captures(&merged) {
                    let upgraded = RecordStart {
                        name: caps[1].trim().trim_end_matches(',').to_string(),
                        id: caps[2].to_string(),
                    };
                    debug!(
                        "no-id start at line {} upgraded to id {} over {} wrapped lines",
                        i, upgraded.id, consumed
                    );
                    return (upgraded, i + consumed);
                }
                (start, i)
            }
            None => (start, i),
        }
    }

    fn build_record(
        &self,
        start: &RecordStart,
        blob: &str,
        tracker: &ContextTracker<String, Locality>,
    ) -> DirectoryRecord {
        let (state, locality) = tracker.snapshot();
        let locality = locality.unwrap_or_default();

        let mut record = DirectoryRecord {
            name: start.name.clone(),
            medicare_provider_number: start.id.clone(),
            state: state.unwrap_or_default(),
            city: locality.city,
            county: locality.county,
            ..Default::default()
        };

        fields::apply_directory_cascade(&self.patterns, blob, &mut record);

        if record.address.is_empty() && record.zip_code.is_empty() {
            warn!(
                "record '{}' emitted with partial data only (no address, no zip)",
                record.name
            );
        } else {
            debug!("record '{}' ({})", record.name, record.medicare_provider_number);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::layout::{Line, Span};

    fn line(text: &str) -> Line {
        Line::from_spans(
            vec![Span {
                text: text.to_string(),
                bold: false,
                font_size: 8.0,
                x: 0.0,
                y: 0.0,
            }],
            0.0,
            0.0,
            1,
        )
    }

    fn stream(texts: &[&str]) -> LineStream {
        LineStream {
            lines: texts.iter().map(|t| line(t)).collect(),
        }
    }

    fn parser() -> DirectoryParser {
        DirectoryParser::new(ExtractOptions::new())
    }

    #[test]
    fn test_context_attached_to_records() {
        let stream = stream(&[
            "ALABAMA",
            "ALABASTER-Shelby County",
            "SHELBY BAPTIST MEDICAL CENTER (010112), 1000 First St N, Zip 35007, tel. 205/555-0100",
            "ALASKA",
            "ANCHORAGE-Anchorage Borough",
            "ALASKA REGIONAL HOSPITAL (020001), 2801 DeBarr Rd, Zip 99508, tel. 907/555-0162",
        ]);
        let records = parser().scan(&stream);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].state, "ALABAMA");
        assert_eq!(records[0].county, "Shelby County");
        assert_eq!(records[1].state, "ALASKA");
        assert_eq!(records[1].city, "ANCHORAGE");
    }

    #[test]
    fn test_state_change_resets_locality() {
        let stream = stream(&[
            "ALABAMA",
            "ALABASTER-Shelby County",
            "ALASKA",
            "ALASKA REGIONAL HOSPITAL (020001), 2801 DeBarr Rd, Zip 99508",
        ]);
        let records = parser().scan(&stream);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].state, "ALASKA");
        assert_eq!(records[0].city, "");
        assert_eq!(records[0].county, "");
    }

    #[test]
    fn test_blob_spans_multiple_lines() {
        let stream = stream(&[
            "ALABAMA",
            "SHELBY BAPTIST MEDICAL CENTER (010112), 1000 First St N,",
            "Zip 35007-9105, tel. 205/555-0100 Control: Voluntary nonprofit",
            "Service: General medical Staffed Beds: 242",
        ]);
        let records = parser().scan(&stream);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].zip_code, "35007-9105");
        assert_eq!(records[0].control, "Voluntary nonprofit");
        assert_eq!(records[0].staffed_beds, "242");
    }

    #[test]
    fn test_wrapped_id_upgrades_no_id_start() {
        let stream = stream(&[
            "DISTRICT OF COLUMBIA",
            "NATIONAL NAVAL MEDICAL CENTER, 8901 Rockville",
            "Pike (090012), Zip 20889, tel. 301/555-0140",
            "NEXT GENERAL HOSPITAL (090020), 1 Elm St, Zip 20001",
        ]);
        let records = parser().scan(&stream);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].medicare_provider_number, "090012");
        assert_eq!(records[0].zip_code, "20889");
        assert_eq!(records[1].medicare_provider_number, "090020");
    }

    #[test]
    fn test_no_id_record_kept_when_no_wrapped_id() {
        let stream = stream(&[
            "DISTRICT OF COLUMBIA",
            "U S AIR FORCE HOSPITAL, 301 Fisher St, Zip 20332, tel. 202/555-0177",
        ]);
        let records = parser().scan(&stream);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "U S AIR FORCE HOSPITAL");
        assert_eq!(records[0].medicare_provider_number, "");
        assert_eq!(records[0].address, "301 Fisher St");
    }
}
