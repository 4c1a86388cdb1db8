//! System/network-variant record type.

use serde::{Deserialize, Serialize};

/// One hospital entry nested under a healthcare system or network header.
///
/// The `system_*` fields repeat the owning header's parsed address block on
/// every member row, so each row is self-contained in tabular output. Field
/// declaration order is the CSV column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemRecord {
    /// Owning system or network name.
    pub healthcare_system: String,

    /// Four-digit system identifier; empty for networks.
    pub system_id: String,

    /// Short type code from the header (e.g., "IO", "NP", "NET").
    pub system_type: String,

    /// Classification text (e.g., "Decentralized Health System").
    pub system_classification: String,

    pub system_address: String,
    pub system_city: String,
    pub system_state: String,
    pub system_zip: String,
    pub system_telephone: String,

    /// Chief executive name following the headquarters telephone.
    pub system_ceo: String,

    /// Section tag: "Systems" or "Networks".
    pub section: String,

    /// Member hospital name.
    pub hospital_name: String,

    /// Ownership code: O, L, C, S, or PART. Empty for network members.
    pub ownership_type: String,

    /// Staffed bed count from the ownership anchor, digits only.
    pub staffed_beds: String,

    pub address: String,
    pub city: String,

    /// Full state name, derived from the abbreviation when absent.
    pub state: String,

    /// Two-letter state abbreviation.
    pub state_abbrev: String,

    pub zip_code: String,
    pub telephone: String,

    /// Contact text between the telephone and the web address.
    pub contact: String,

    pub web_address: String,
}

impl SystemRecord {
    /// Whether this record came from the Networks section.
    pub fn is_network(&self) -> bool {
        self.section == "Networks"
    }
}
