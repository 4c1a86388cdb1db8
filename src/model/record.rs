//! Directory-variant record type.

use serde::{Deserialize, Serialize};

/// One facility entry from a state/county directory document.
///
/// Field declaration order is the CSV column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRecord {
    /// Facility name as printed, without leading marker glyphs.
    pub name: String,

    /// Six-digit Medicare provider number; empty for government or
    /// military facilities listed without one.
    pub medicare_provider_number: String,

    /// Street address between the provider number and the Zip marker.
    pub address: String,

    /// City from the nearest preceding locality header.
    pub city: String,

    /// County from the nearest preceding locality header.
    pub county: String,

    /// Full state name from the nearest preceding state header.
    pub state: String,

    /// Five-digit ZIP, optionally with a hyphenated plus-four suffix.
    pub zip_code: String,

    /// Telephone as printed (digits, slashes, hyphens).
    pub telephone: String,

    pub primary_contact: String,
    pub coo: String,
    pub cfo: String,
    pub cmo: String,
    pub cio: String,
    pub chr: String,
    pub cno: String,

    /// Web address token, if any.
    pub web_address: String,

    /// Control/ownership descriptor (e.g., "Voluntary nonprofit").
    pub control: String,

    /// Service descriptor (e.g., "General medical and surgical").
    pub services: String,

    /// Staffed bed count, digits only.
    pub staffed_beds: String,
}

impl DirectoryRecord {
    /// Whether this record carries an explicit provider number.
    pub fn has_provider_id(&self) -> bool {
        !self.medicare_provider_number.is_empty()
    }
}
