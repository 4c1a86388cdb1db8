//! Rendering module for serializing extracted records.
//!
//! Both renderings are lossless re-encodings of the in-memory record
//! list: CSV rows in schema column order, and JSON as a list of
//! key/value records.

mod csv;
mod json;

pub use self::csv::to_csv;
pub use self::json::{to_json, JsonFormat};
