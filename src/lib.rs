//! # guidex
//!
//! Structured record extraction from two-column, directory-style
//! healthcare guides.
//!
//! The library consumes a page dump (per-page text blocks of lines of
//! spans, each with font and position metadata), reconstructs human
//! reading order across the two-column layout, segments the stream into
//! nested, context-carrying records, and extracts a fixed field schema
//! from each record through a cascade of pattern heuristics.
//!
//! ## Quick Start
//!
//! ```no_run
//! use guidex::{extract_file, ExtractOptions};
//!
//! fn main() -> guidex::Result<()> {
//!     let records = extract_file("pages.json", ExtractOptions::new().directory())?;
//!     println!("{} records", records.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Document variants
//!
//! - **Directory**: state and city-county headers over facility entries
//!   carrying six-digit provider numbers.
//! - **Systems**: healthcare system and network sections whose member
//!   hospitals nest under a headquarters block.
//!
//! Extraction is best-effort and never fails a record: a field whose
//! pattern does not match stays empty, and a record detected with partial
//! data is still emitted.

pub mod error;
pub mod model;
pub mod parser;
pub mod render;

pub use error::{Error, Result};
pub use model::{DirectoryRecord, RecordSet, SystemRecord};
pub use parser::{
    DirectoryParser, DocumentVariant, ExtractOptions, JsonSource, PageDump, PageSource,
    SystemsParser,
};
pub use render::{to_csv, to_json, JsonFormat};

use std::path::Path;

/// Extract records from a page dump file.
///
/// # Example
///
/// ```no_run
/// use guidex::{extract_file, ExtractOptions};
///
/// let records = extract_file("pages.json", ExtractOptions::new().systems()).unwrap();
/// println!("{} records", records.len());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<RecordSet> {
    let source = JsonSource::open(path)?;
    extract_source(&source, options)
}

/// Extract records from page dump bytes.
pub fn extract_bytes(data: &[u8], options: ExtractOptions) -> Result<RecordSet> {
    let source = JsonSource::from_bytes(data)?;
    extract_source(&source, options)
}

/// Extract records from any page source.
pub fn extract_source<S: PageSource>(source: &S, options: ExtractOptions) -> Result<RecordSet> {
    match options.variant {
        DocumentVariant::Directory => {
            let records = DirectoryParser::new(options).extract(source)?;
            Ok(RecordSet::Directory(records))
        }
        DocumentVariant::Systems => {
            let records = SystemsParser::new(options).extract(source)?;
            Ok(RecordSet::Systems(records))
        }
    }
}

/// Builder for configuring and running an extraction.
///
/// # Example
///
/// ```no_run
/// use guidex::Guidex;
///
/// let csv = Guidex::new()
///     .systems()
///     .extract("pages.json")?
///     .to_csv()?;
/// # Ok::<(), guidex::Error>(())
/// ```
pub struct Guidex {
    options: ExtractOptions,
}

impl Guidex {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: ExtractOptions::default(),
        }
    }

    /// Extract the directory variant.
    pub fn directory(mut self) -> Self {
        self.options = self.options.directory();
        self
    }

    /// Extract the systems/networks variant.
    pub fn systems(mut self) -> Self {
        self.options = self.options.systems();
        self
    }

    /// Set the wrapped-header lookahead bound.
    pub fn with_max_lookahead(mut self, lines: usize) -> Self {
        self.options = self.options.with_max_lookahead(lines);
        self
    }

    /// Set the column split fraction.
    pub fn with_column_split(mut self, split: f32) -> Self {
        self.options = self.options.with_column_split(split);
        self
    }

    /// Run the extraction over a page dump file.
    pub fn extract<P: AsRef<Path>>(self, path: P) -> Result<GuidexResult> {
        let records = extract_file(path, self.options)?;
        Ok(GuidexResult { records })
    }

    /// Run the extraction over page dump bytes.
    pub fn extract_bytes(self, data: &[u8]) -> Result<GuidexResult> {
        let records = extract_bytes(data, self.options)?;
        Ok(GuidexResult { records })
    }
}

impl Default for Guidex {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of an extraction run.
pub struct GuidexResult {
    /// The extracted records.
    pub records: RecordSet,
}

impl GuidexResult {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the extraction produced no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize to CSV in schema column order.
    pub fn to_csv(&self) -> Result<String> {
        match &self.records {
            RecordSet::Directory(records) => render::to_csv(records),
            RecordSet::Systems(records) => render::to_csv(records),
        }
    }

    /// Serialize to a JSON list of key/value records.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        match &self.records {
            RecordSet::Directory(records) => render::to_json(records, format),
            RecordSet::Systems(records) => render::to_json(records, format),
        }
    }

    /// Access the record set.
    pub fn records(&self) -> &RecordSet {
        &self.records
    }
}
