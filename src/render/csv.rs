//! CSV rendering for extracted records.

use serde::Serialize;

use crate::error::{Error, Result};

/// Serialize records to CSV with a header row.
///
/// Column order is the record struct's field declaration order. An empty
/// record list yields an empty string.
pub fn to_csv<T: Serialize>(records: &[T]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Render(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DirectoryRecord;

    #[test]
    fn test_header_row_matches_schema_order() {
        let records = vec![DirectoryRecord {
            name: "EXAMPLE HOSPITAL".to_string(),
            medicare_provider_number: "010001".to_string(),
            ..Default::default()
        }];
        let csv_text = to_csv(&records).unwrap();
        let header = csv_text.lines().next().unwrap();
        assert!(header.starts_with("name,medicare_provider_number,address,city,county,state"));
        assert!(header.ends_with("control,services,staffed_beds"));
    }

    #[test]
    fn test_quoting_of_embedded_commas() {
        let records = vec![DirectoryRecord {
            name: "EXAMPLE HOSPITAL".to_string(),
            primary_contact: "Jane Roe, Administrator".to_string(),
            ..Default::default()
        }];
        let csv_text = to_csv(&records).unwrap();
        assert!(csv_text.contains("\"Jane Roe, Administrator\""));
    }

    #[test]
    fn test_empty_record_list() {
        let records: Vec<DirectoryRecord> = Vec::new();
        assert_eq!(to_csv(&records).unwrap(), "");
    }
}
