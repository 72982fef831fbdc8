//! Boundary Tests for edroads
//!
//! 空のドキュメント、空の行、特殊なセル内容などの境界条件を検証します。

use std::io::Cursor;

use edroads::{clean_text, CleanMode, Column, ConverterBuilder, EdRoadsError};

fn extract(xml: &str) -> Result<edroads::Table, EdRoadsError> {
    let converter = ConverterBuilder::new().build().unwrap();
    converter.extract_reader("boundary.xml", Cursor::new(xml.to_string()))
}

#[test]
fn test_workbook_without_worksheets() {
    let table = extract("<Workbook/>").unwrap();
    assert!(table.is_empty());
}

#[test]
fn test_table_without_rows() {
    let table = extract("<Workbook><Worksheet><Table></Table></Worksheet></Workbook>").unwrap();
    assert!(table.is_empty());
}

#[test]
fn test_empty_row_is_kept_as_blank_record() {
    let table = extract("<Workbook><Worksheet><Table><Row/></Table></Worksheet></Workbook>").unwrap();
    assert_eq!(table.len(), 1);
    assert!(table.records()[0].fields().iter().all(String::is_empty));
}

#[test]
fn test_prefixed_element_names() {
    let xml = r#"<ss:Workbook xmlns:ss="urn:schemas-microsoft-com:office:spreadsheet">
<ss:Worksheet><ss:Table><ss:Row><ss:Cell ss:Index="1"><ss:Data>F ROAD</ss:Data></ss:Cell></ss:Row></ss:Table></ss:Worksheet>
</ss:Workbook>"#;
    let table = extract(xml).unwrap();
    assert_eq!(table.records()[0].get(Column::Name), "F ROAD");
}

#[test]
fn test_whitespace_only_description() {
    let xml = r#"<Workbook><Worksheet><Table><Row><Cell ss:Index="4"><Data>   </Data></Cell></Row></Table></Worksheet></Workbook>"#;
    let table = extract(xml).unwrap();
    assert_eq!(table.records()[0].get(Column::NoticeDescription), "");
}

#[test]
fn test_header_detection_uses_cell_text_verbatim() {
    // 1列目は完全クリーニングされないため、空白付きの"Name"は見出しとして扱われない
    let xml = r#"<Workbook><Worksheet><Table><Row><Cell ss:Index="1"><Data> Name</Data></Cell></Row></Table></Worksheet></Workbook>"#;
    let table = extract(xml).unwrap();
    assert_eq!(table.len(), 1);
}

#[test]
fn test_non_ascii_text_passes_through() {
    let xml = r#"<Workbook><Worksheet><Table><Row><Cell ss:Index="4"><Data>Café  Rd — ÉCOLE</Data></Cell></Row></Table></Worksheet></Workbook>"#;
    let table = extract(xml).unwrap();
    assert_eq!(
        table.records()[0].get(Column::NoticeDescription),
        "Café Rd — ÉCOLE"
    );
}

#[test]
fn test_invalid_utf8_is_parse_error() {
    let mut bytes = b"<Workbook><Worksheet><Table><Row><Cell ss:Index=\"1\"><Data>".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe]);
    bytes.extend_from_slice(b"</Data></Cell></Row></Table></Worksheet></Workbook>");

    let converter = ConverterBuilder::new().build().unwrap();
    let result = converter.extract_reader("binary.xml", Cursor::new(bytes));
    assert!(matches!(result, Err(EdRoadsError::Parse { .. })));
}

#[test]
fn test_empty_string_cleaning() {
    assert_eq!(clean_text("", CleanMode::Full), "");
    assert_eq!(clean_text("", CleanMode::Artifacts), "");
    assert_eq!(clean_text("&#10", CleanMode::Full), "");
}

#[test]
fn test_artifact_with_semicolon_leaves_semicolon() {
    assert_eq!(clean_text("a&#10;b", CleanMode::Artifacts), "a;b");
}
