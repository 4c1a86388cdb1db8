//! Extraction pipeline: page source, reading-order reconstruction,
//! boundary detection, context tracking, record assembly, field cascade.

mod assembler;
mod backend;
mod boundary;
mod context;
mod directory;
mod fields;
mod layout;
mod options;
mod patterns;
mod systems;
mod vocab;

pub use assembler::{assemble, try_extend_header, Assembled};
pub use backend::{
    JsonSource, PageContent, PageDump, PageSource, RawLine, RawSpan, TextBlock, FLAG_BOLD,
};
pub use boundary::{
    Boundary, BoundaryDetector, LineClassifier, RecordStart, ShapeClassifier, TypographyClassifier,
};
pub use context::{ContextTracker, Locality};
pub use directory::DirectoryParser;
pub use fields::{AddressParts, Headquarters};
pub use layout::{normalize_text, Line, LineStream, Span};
pub use options::{DocumentVariant, ExtractOptions};
pub use patterns::{DirectoryPatterns, SystemsPatterns};
pub use systems::{classify_page, PageKind, SystemsParser};
