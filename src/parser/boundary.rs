//! Line boundary detection for the directory variant.
//!
//! Classifies each stream line as a state header, a city-county locality
//! header, a record start, or ordinary continuation text. Record starts
//! are recognized by two independent strategies behind one interface: a
//! typography classifier reading span weight, preferred when font metadata
//! is present, and a shape classifier over the line text as fallback.

use crate::parser::context::Locality;
use crate::parser::layout::Line;
use crate::parser::patterns::DirectoryPatterns;
use crate::parser::vocab;

/// A detected boundary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Boundary {
    /// Top-level jurisdiction header; resets all lower frames.
    State(String),
    /// City-county header; leaves the state frame untouched.
    Locality(Locality),
    /// Start of a new record.
    RecordStart(RecordStart),
}

/// Name and identifier pulled from a record-start line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStart {
    pub name: String,
    /// Six-digit provider number; empty when the facility is listed
    /// without one.
    pub id: String,
}

/// One classification strategy.
pub trait LineClassifier {
    fn classify(&self, line: &Line) -> Option<Boundary>;
}

/// Record-start detection from span typography: an early bold name span
/// immediately followed by a bold parenthesized-id span.
pub struct TypographyClassifier {
    patterns: DirectoryPatterns,
}

impl TypographyClassifier {
    pub fn new() -> Self {
        Self {
            patterns: DirectoryPatterns::new(),
        }
    }
}

impl Default for TypographyClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LineClassifier for TypographyClassifier {
    fn classify(&self, line: &Line) -> Option<Boundary> {
        if line.spans.len() < 2 {
            return None;
        }

        // The name span must appear early: at most a marker-glyph span
        // may precede it.
        for (i, span) in line.spans.iter().enumerate().take(3) {
            if span.text.trim().is_empty() {
                continue;
            }
            if !span.bold {
                continue;
            }
            let name_caps = match self.patterns.span_name.captures(span.text.trim()) {
                Some(caps) => caps,
                None => continue,
            };
            let name = name_caps
                .get(1)
                .map(|m| m.as_str().trim().trim_end_matches(','))
                .unwrap_or("");
            if name.is_empty() {
                continue;
            }

            let next = line.spans.get(i + 1)?;
            if !next.bold {
                return None;
            }
            let id_caps = self.patterns.span_id.captures(next.text.trim())?;

            if vocab::is_state(name) {
                return None;
            }
            // A trailing cross-reference means this is a pointer to a
            // record listed elsewhere, not a record.
            let trailing: String = line.spans[i + 2..]
                .iter()
                .map(|s| s.text.as_str())
                .collect();
            if trailing.trim_start().starts_with("See ") {
                return None;
            }

            return Some(Boundary::RecordStart(RecordStart {
                name: name.to_string(),
                id: id_caps[1].to_string(),
            }));
        }
        None
    }
}

/// Header and record-start detection from line text shape alone; the
/// fallback when per-span font metadata is unavailable or inconclusive.
pub struct ShapeClassifier {
    patterns: DirectoryPatterns,
}

impl ShapeClassifier {
    pub fn new() -> Self {
        Self {
            patterns: DirectoryPatterns::new(),
        }
    }
}

impl Default for ShapeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LineClassifier for ShapeClassifier {
    fn classify(&self, line: &Line) -> Option<Boundary> {
        let text = line.trimmed();

        if vocab::is_state(text) {
            return Some(Boundary::State(text.to_string()));
        }

        if let Some(caps) = self.patterns.locality.captures(text) {
            return Some(Boundary::Locality(Locality {
                city: caps[1].trim().to_string(),
                county: caps[2].trim().to_string(),
            }));
        }

        if let Some(caps) = self.patterns.record_start.captures(text) {
            let name = caps[1].trim().trim_end_matches(',').to_string();
            if vocab::is_state(&name) {
                return None;
            }
            let trailing = &text[caps.get(0).map(|m| m.end()).unwrap_or(0)..];
            if trailing.trim_start().starts_with("See ") {
                return None;
            }
            return Some(Boundary::RecordStart(RecordStart {
                name,
                id: caps[2].to_string(),
            }));
        }

        if let Some(caps) = self.patterns.no_id_start.captures(text) {
            let name = caps[1].trim().to_string();
            if !vocab::is_state(&name) {
                return Some(Boundary::RecordStart(RecordStart {
                    name,
                    id: String::new(),
                }));
            }
        }

        None
    }
}

/// Ordered strategy list; the first classifier to answer wins.
pub struct BoundaryDetector {
    classifiers: Vec<Box<dyn LineClassifier>>,
}

impl BoundaryDetector {
    /// Detector for the directory variant: typography preferred, shape
    /// fallback.
    pub fn directory() -> Self {
        Self {
            classifiers: vec![
                Box::new(TypographyClassifier::new()),
                Box::new(ShapeClassifier::new()),
            ],
        }
    }

    /// Classify a line; boilerplate-flagged lines never classify.
    pub fn classify(&self, line: &Line) -> Option<Boundary> {
        if line.skip {
            return None;
        }
        self.classifiers
            .iter()
            .find_map(|classifier| classifier.classify(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::layout::Span;

    fn span(text: &str, bold: bool) -> Span {
        Span {
            text: text.to_string(),
            bold,
            font_size: 8.0,
            x: 0.0,
            y: 0.0,
        }
    }

    fn text_line(text: &str) -> Line {
        Line::from_spans(vec![span(text, false)], 0.0, 0.0, 1)
    }

    #[test]
    fn test_state_header() {
        let detector = BoundaryDetector::directory();
        assert_eq!(
            detector.classify(&text_line("ALABAMA")),
            Some(Boundary::State("ALABAMA".to_string()))
        );
    }

    #[test]
    fn test_locality_header() {
        let detector = BoundaryDetector::directory();
        match detector.classify(&text_line("ALABASTER-Shelby County")) {
            Some(Boundary::Locality(loc)) => {
                assert_eq!(loc.city, "ALABASTER");
                assert_eq!(loc.county, "Shelby County");
            }
            other => panic!("expected locality, got {:?}", other),
        }
    }

    #[test]
    fn test_shape_record_start() {
        let detector = BoundaryDetector::directory();
        match detector.classify(&text_line("★ SHELBY BAPTIST MEDICAL CENTER (010112), 1000 First St")) {
            Some(Boundary::RecordStart(start)) => {
                assert_eq!(start.name, "SHELBY BAPTIST MEDICAL CENTER");
                assert_eq!(start.id, "010112");
            }
            other => panic!("expected record start, got {:?}", other),
        }
    }

    #[test]
    fn test_typography_record_start() {
        let line = Line::from_spans(
            vec![
                span("SHELBY BAPTIST MEDICAL CENTER ", true),
                span("(010112)", true),
                span(", 1000 First St N", false),
            ],
            0.0,
            0.0,
            1,
        );
        let detector = BoundaryDetector::directory();
        match detector.classify(&line) {
            Some(Boundary::RecordStart(start)) => {
                assert_eq!(start.name, "SHELBY BAPTIST MEDICAL CENTER");
                assert_eq!(start.id, "010112");
            }
            other => panic!("expected record start, got {:?}", other),
        }
    }

    #[test]
    fn test_typography_requires_bold_id_span() {
        let line = Line::from_spans(
            vec![
                span("SHELBY BAPTIST MEDICAL CENTER ", true),
                span("(010112)", false),
            ],
            0.0,
            0.0,
            1,
        );
        let classifier = TypographyClassifier::new();
        assert!(classifier.classify(&line).is_none());
    }

    #[test]
    fn test_cross_reference_rejected() {
        let detector = BoundaryDetector::directory();
        let line = text_line("EASTERN HEALTH CAMPUS (010399) See MAIN MEDICAL CENTER");
        assert!(detector.classify(&line).is_none());
    }

    #[test]
    fn test_no_id_record_start() {
        let detector = BoundaryDetector::directory();
        match detector.classify(&text_line("U S AIR FORCE HOSPITAL, 301 Fisher St")) {
            Some(Boundary::RecordStart(start)) => {
                assert_eq!(start.name, "U S AIR FORCE HOSPITAL");
                assert_eq!(start.id, "");
            }
            other => panic!("expected record start, got {:?}", other),
        }
    }

    #[test]
    fn test_skip_line_never_classifies() {
        let detector = BoundaryDetector::directory();
        let mut line = text_line("ALABAMA");
        line.skip = true;
        assert!(detector.classify(&line).is_none());
    }

    #[test]
    fn test_plain_text_is_none() {
        let detector = BoundaryDetector::directory();
        assert!(detector
            .classify(&text_line("Zip 35007, tel. 205/555-0100"))
            .is_none());
    }
}
