//! Integration tests for the directory-variant pipeline.

use guidex::parser::{JsonSource, PageContent, PageDump, RawLine, RawSpan, TextBlock};
use guidex::{extract_bytes, extract_source, ExtractOptions, JsonFormat, RecordSet};

fn span(text: &str, bold: bool, x: f32, y: f32) -> RawSpan {
    RawSpan {
        text: text.to_string(),
        font: if bold { "Times-Bold" } else { "Times-Roman" }.to_string(),
        size: 6.8,
        flags: if bold { 1 << 4 } else { 0 },
        bbox: [x, y, x + 150.0, y + 7.0],
    }
}

fn line(text: &str, x: f32, y: f32) -> RawLine {
    RawLine {
        bbox: [x, y, x + 150.0, y + 7.0],
        spans: vec![span(text, false, x, y)],
    }
}

fn page(number: u32, lines: Vec<RawLine>) -> PageContent {
    PageContent {
        number,
        width: 612.0,
        height: 792.0,
        blocks: vec![TextBlock { lines }],
    }
}

fn source(pages: Vec<PageContent>) -> JsonSource {
    JsonSource::from_dump(PageDump { pages }).unwrap()
}

fn directory_records(set: RecordSet) -> Vec<guidex::DirectoryRecord> {
    match set {
        RecordSet::Directory(records) => records,
        RecordSet::Systems(_) => panic!("expected directory records"),
    }
}

/// The two-column scenario: headers and a record start in the left
/// column, the record's continuation at the top of the right column.
#[test]
fn test_two_column_record_reassembly() {
    let dump_page = page(
        1,
        vec![
            line("ALABAMA", 40.0, 60.0),
            line("ALABASTER-Shelby County", 40.0, 80.0),
            line(
                "SHELBY BAPTIST MEDICAL CENTER (010112), 1000 First",
                40.0,
                100.0,
            ),
            // Right column, vertically above the left column's content.
            line("St N, Zip 12345-6789 tel. 555-0100", 340.0, 50.0),
        ],
    );

    let records = directory_records(
        extract_source(&source(vec![dump_page]), ExtractOptions::new().directory()).unwrap(),
    );

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.name, "SHELBY BAPTIST MEDICAL CENTER");
    assert_eq!(record.medicare_provider_number, "010112");
    assert_eq!(record.state, "ALABAMA");
    assert_eq!(record.city, "ALABASTER");
    assert_eq!(record.county, "Shelby County");
    assert_eq!(record.zip_code, "12345-6789");
    assert_eq!(record.telephone, "555-0100");
}

#[test]
fn test_typography_detected_record() {
    let dump_page = page(
        1,
        vec![
            line("ALABAMA", 40.0, 60.0),
            RawLine {
                bbox: [40.0, 80.0, 300.0, 87.0],
                spans: vec![
                    span("CENTRAL INFIRMARY ", true, 40.0, 80.0),
                    span("(010005)", true, 140.0, 80.0),
                    span(", 2451 University Ave, Zip 36604", false, 190.0, 80.0),
                ],
            },
        ],
    );

    let records = directory_records(
        extract_source(&source(vec![dump_page]), ExtractOptions::new().directory()).unwrap(),
    );

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "CENTRAL INFIRMARY");
    assert_eq!(records[0].medicare_provider_number, "010005");
    assert_eq!(records[0].zip_code, "36604");
}

#[test]
fn test_boilerplate_lines_do_not_break_records() {
    let dump_page = page(
        1,
        vec![
            line("ALABAMA", 40.0, 60.0),
            line("EXAMPLE HOSPITAL (010001), 100 Main St,", 40.0, 80.0),
            line("Hospitals, U.S. / ALABAMA", 40.0, 100.0),
            line("\u{00a9} 2026 Example Press", 40.0, 120.0),
            line("Zip 35007, tel. 205/555-0100", 40.0, 140.0),
        ],
    );

    let records = directory_records(
        extract_source(&source(vec![dump_page]), ExtractOptions::new().directory()).unwrap(),
    );

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].zip_code, "35007");
    assert_eq!(records[0].telephone, "205/555-0100");
}

#[test]
fn test_records_follow_page_order() {
    let page1 = page(
        1,
        vec![
            line("ALABAMA", 40.0, 60.0),
            line("FIRST HOSPITAL (010001), 1 Main St, Zip 35007", 40.0, 80.0),
        ],
    );
    let page2 = page(
        2,
        vec![line(
            "SECOND HOSPITAL (010002), 2 Oak St, Zip 35010",
            40.0,
            40.0,
        )],
    );

    let records = directory_records(
        extract_source(&source(vec![page1, page2]), ExtractOptions::new().directory()).unwrap(),
    );

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "FIRST HOSPITAL");
    assert_eq!(records[1].name, "SECOND HOSPITAL");
    // Context carries across the page boundary.
    assert_eq!(records[1].state, "ALABAMA");
}

#[test]
fn test_idempotence() {
    let dump = serde_json::to_vec(&PageDump {
        pages: vec![page(
            1,
            vec![
                line("ALABAMA", 40.0, 60.0),
                line(
                    "EXAMPLE HOSPITAL (010001), 100 Main St, Zip 35007, tel. 205/555-0100",
                    40.0,
                    80.0,
                ),
            ],
        )],
    })
    .unwrap();

    let first = extract_bytes(&dump, ExtractOptions::new().directory()).unwrap();
    let second = extract_bytes(&dump, ExtractOptions::new().directory()).unwrap();
    assert_eq!(first, second);

    let first_json = match &first {
        RecordSet::Directory(r) => guidex::to_json(r, JsonFormat::Pretty).unwrap(),
        _ => unreachable!(),
    };
    let second_json = match &second {
        RecordSet::Directory(r) => guidex::to_json(r, JsonFormat::Pretty).unwrap(),
        _ => unreachable!(),
    };
    assert_eq!(first_json, second_json);
}

#[test]
fn test_zero_records_is_not_an_error() {
    let dump_page = page(
        1,
        vec![
            line("Some narrative text without any entries", 40.0, 60.0),
            line("More narrative text", 40.0, 80.0),
        ],
    );

    let records =
        extract_source(&source(vec![dump_page]), ExtractOptions::new().directory()).unwrap();
    assert!(records.is_empty());
}
