//! Page source abstraction layer.
//!
//! Provides a trait-based interface over the page/text/font extraction
//! primitive, isolating the concrete dump format from the segmentation
//! logic. The raw types mirror the extractor's per-page dictionary output:
//! pages contain text blocks, blocks contain lines, lines contain spans.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Bit set in a span's font flags when the face is bold.
pub const FLAG_BOLD: u32 = 1 << 4;

/// A text run with font and position metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSpan {
    /// The text content.
    pub text: String,

    /// Font face name (e.g., "Helvetica-Bold").
    #[serde(default)]
    pub font: String,

    /// Font size in points.
    #[serde(default)]
    pub size: f32,

    /// Font style flags from the extractor.
    #[serde(default)]
    pub flags: u32,

    /// Bounding box as (x0, y0, x1, y1).
    #[serde(default)]
    pub bbox: [f32; 4],
}

impl RawSpan {
    /// Whether the span is set in a bold face, by flag or by face name.
    pub fn is_bold(&self) -> bool {
        self.flags & FLAG_BOLD != 0 || self.font.contains("Bold")
    }
}

/// A baseline of spans inside a text block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLine {
    /// Bounding box as (x0, y0, x1, y1).
    #[serde(default)]
    pub bbox: [f32; 4],

    /// Spans in print order.
    pub spans: Vec<RawSpan>,
}

impl RawLine {
    /// Left edge of the line.
    pub fn x(&self) -> f32 {
        self.bbox[0]
    }

    /// Top edge of the line.
    pub fn y(&self) -> f32 {
        self.bbox[1]
    }
}

/// A text block: one or more lines grouped by the extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlock {
    pub lines: Vec<RawLine>,
}

/// One page of extracted content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    /// Page number (1-indexed).
    #[serde(default)]
    pub number: u32,

    /// Page width in points.
    pub width: f32,

    /// Page height in points.
    #[serde(default)]
    pub height: f32,

    /// Text blocks on the page.
    #[serde(default)]
    pub blocks: Vec<TextBlock>,
}

impl PageContent {
    /// Concatenated text of every span on the page, newline-joined per line.
    pub fn full_text(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            for line in &block.lines {
                for span in &line.spans {
                    out.push_str(&span.text);
                }
                out.push('\n');
            }
        }
        out
    }
}

/// A complete page dump.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageDump {
    pub pages: Vec<PageContent>,
}

/// Abstract interface for page access.
///
/// Implementations own a fully materialized dump; load and validation
/// errors surface at construction, so enumeration is infallible.
pub trait PageSource {
    /// All pages in document order.
    fn pages(&self) -> &[PageContent];
}

/// Concrete [`PageSource`] backed by a JSON page dump.
pub struct JsonSource {
    dump: PageDump,
}

impl JsonSource {
    /// Load from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let dump: PageDump = serde_json::from_slice(data)?;
        Self::validate(dump)
    }

    /// Load from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let dump: PageDump = serde_json::from_reader(reader)?;
        Self::validate(dump)
    }

    /// Wrap an already-deserialized dump.
    pub fn from_dump(dump: PageDump) -> Result<Self> {
        Self::validate(dump)
    }

    fn validate(dump: PageDump) -> Result<Self> {
        for (i, page) in dump.pages.iter().enumerate() {
            if page.width <= 0.0 {
                return Err(Error::Source(format!(
                    "page {} has non-positive width {}",
                    i + 1,
                    page.width
                )));
            }
        }
        Ok(Self { dump })
    }

    /// Number of pages in the dump.
    pub fn page_count(&self) -> usize {
        self.dump.pages.len()
    }
}

impl PageSource for JsonSource {
    fn pages(&self) -> &[PageContent] {
        &self.dump.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, flags: u32, font: &str) -> RawSpan {
        RawSpan {
            text: text.to_string(),
            font: font.to_string(),
            size: 8.0,
            flags,
            bbox: [0.0; 4],
        }
    }

    #[test]
    fn test_span_bold_by_flag() {
        assert!(span("X", FLAG_BOLD, "Helvetica").is_bold());
        assert!(!span("X", 0, "Helvetica").is_bold());
    }

    #[test]
    fn test_span_bold_by_face_name() {
        assert!(span("X", 0, "Times-Bold").is_bold());
    }

    #[test]
    fn test_json_source_rejects_bad_width() {
        let dump = PageDump {
            pages: vec![PageContent {
                number: 1,
                width: 0.0,
                height: 792.0,
                blocks: vec![],
            }],
        };
        assert!(JsonSource::from_dump(dump).is_err());
    }

    #[test]
    fn test_json_source_from_bytes() {
        let json = r#"{"pages":[{"number":1,"width":612.0,"height":792.0,"blocks":[]}]}"#;
        let source = JsonSource::from_bytes(json.as_bytes()).unwrap();
        assert_eq!(source.page_count(), 1);
        assert_eq!(source.pages()[0].width, 612.0);
    }

    #[test]
    fn test_json_source_rejects_garbage() {
        assert!(JsonSource::from_bytes(b"not json").is_err());
    }
}
