//! Output Format Module
//!
//! 変換結果のCSV出力を提供するモジュール。

mod csv;

pub use csv::CsvFormatter;

use crate::error::EdRoadsError;
use crate::types::Table;
use std::io::Write;

/// テーブルをCSV形式で書き出す
///
/// 見出し行と、レコードごとに1行を出力します。
///
/// # 使用例
///
/// ```rust
/// use edroads::{write_csv, Column, Record, Table};
///
/// let mut record = Record::new();
/// record.set(Column::Name, "ABBEY LANE".to_string());
/// let mut table = Table::new();
/// table.push(record);
///
/// let mut out = Vec::new();
/// write_csv(&table, &mut out).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "\"Name\",\"Locality\",\"Street Adoption Status\",\"Property Notice Description\"\n\
///      \"ABBEY LANE\",\"\",\"\",\"\"\n"
/// );
/// ```
pub fn write_csv<W: Write>(table: &Table, writer: &mut W) -> Result<(), EdRoadsError> {
    CsvFormatter.render(table, writer)
}
