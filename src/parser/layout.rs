//! Reading-order reconstruction.
//!
//! Rebuilds a single linear line stream from a two-column page layout:
//! lines are bucketed at half page width, each bucket sorted by vertical
//! position, and the left column emitted before the right. The printed
//! document's right column is a separate reading continuation, never an
//! interleaved one.

use unicode_normalization::UnicodeNormalization;

use crate::parser::backend::PageContent;

/// A text run with the metadata the boundary detector needs.
#[derive(Debug, Clone)]
pub struct Span {
    /// The text content, normalized.
    pub text: String,
    /// Whether the span is set in a bold face.
    pub bold: bool,
    /// Font size in points.
    pub font_size: f32,
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
}

/// A line in the reconstructed stream.
#[derive(Debug, Clone)]
pub struct Line {
    /// Spans in print order.
    pub spans: Vec<Span>,
    /// Leftmost X position.
    pub x: f32,
    /// Y position.
    pub y: f32,
    /// Page the line came from (1-indexed).
    pub page: u32,
    /// Concatenated, normalized text of all spans.
    pub text: String,
    /// Matched the boilerplate skip-list: kept in the stream for index
    /// continuity but excluded from boundary and field detection.
    pub skip: bool,
}

impl Line {
    /// Build a line from spans, concatenating and normalizing their text.
    pub fn from_spans(spans: Vec<Span>, x: f32, y: f32, page: u32) -> Self {
        let raw: String = spans.iter().map(|s| s.text.as_str()).collect();
        let text = normalize_text(&raw);
        Self {
            spans,
            x,
            y,
            page,
            text,
            skip: false,
        }
    }

    /// Trimmed line text.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Whether every span carrying visible text is bold.
    pub fn is_bold(&self) -> bool {
        let mut any = false;
        for span in &self.spans {
            if span.text.trim().is_empty() {
                continue;
            }
            if !span.bold {
                return false;
            }
            any = true;
        }
        any
    }

    /// Whether the line contains a parenthesized six-digit provider id.
    pub fn has_provider_id(&self) -> bool {
        let bytes = self.text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'(' {
                let digits = bytes[i + 1..]
                    .iter()
                    .take_while(|b| b.is_ascii_digit())
                    .count();
                if digits == 6 && bytes.get(i + 7) == Some(&b')') {
                    return true;
                }
            }
            i += 1;
        }
        false
    }
}

/// Normalize extracted text for pattern matching.
///
/// NFC composition, then the typographic characters the extractor emits are
/// folded to their ASCII forms: en/em dashes to hyphens, curly quotes to
/// straight ones, non-breaking spaces to regular spaces.
pub fn normalize_text(text: &str) -> String {
    text.nfc()
        .map(|c| match c {
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201c}' | '\u{201d}' => '"',
            '\u{00a0}' => ' ',
            other => other,
        })
        .collect()
}

/// The full ordered line sequence across all pages.
///
/// Invariant: the global index is monotonically increasing in
/// (page, reading-order-within-page); no line from page N+1 precedes any
/// line from page N.
#[derive(Debug, Default)]
pub struct LineStream {
    pub lines: Vec<Line>,
}

impl LineStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines in the stream.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Reconstruct one page and append its lines in reading order.
    ///
    /// `split` is the fraction of the page width dividing the columns.
    /// `skip` flags boilerplate lines; flagged lines are still bucketed so
    /// downstream indices stay continuous.
    pub fn push_page<F>(&mut self, page: &PageContent, split: f32, skip: F)
    where
        F: Fn(&str) -> bool,
    {
        let col_split = page.width * split;
        let mut left: Vec<Line> = Vec::new();
        let mut right: Vec<Line> = Vec::new();

        for block in &page.blocks {
            for raw_line in &block.lines {
                let spans: Vec<Span> = raw_line
                    .spans
                    .iter()
                    .map(|s| Span {
                        text: normalize_text(&s.text),
                        bold: s.is_bold(),
                        font_size: s.size,
                        x: s.bbox[0],
                        y: s.bbox[1],
                    })
                    .collect();

                let mut line = Line::from_spans(spans, raw_line.x(), raw_line.y(), page.number);
                if line.trimmed().is_empty() {
                    continue;
                }
                line.skip = skip(line.trimmed());

                if line.x < col_split {
                    left.push(line);
                } else {
                    right.push(line);
                }
            }
        }

        sort_by_y(&mut left);
        sort_by_y(&mut right);
        self.lines.extend(left);
        self.lines.extend(right);
    }
}

fn sort_by_y(lines: &mut [Line]) {
    lines.sort_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal));
}
