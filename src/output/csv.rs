//! CSV Formatter Implementation
//!
//! 固定ヘッダー付きのCSV出力の実装。

use crate::api::Column;
use crate::error::EdRoadsError;
use crate::types::Table;
use std::io::Write;

/// CSV形式のフォーマッター
///
/// 各フィールドをダブルクォートで囲み、カンマで区切って出力します。
/// フィールド内のダブルクォートやカンマはエスケープしません（既存の
/// 下流処理が依存している出力形式をそのまま維持します）。
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn render<W: Write>(&self, table: &Table, writer: &mut W) -> Result<(), EdRoadsError> {
        let headers = Column::ALL.map(Column::header);
        write_quoted_line(writer, &headers)?;

        for record in table {
            write_quoted_line(writer, record.fields())?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// フィールドを`"a","b",...`形式の1行として出力
fn write_quoted_line<W: Write, S: AsRef<str>>(
    writer: &mut W,
    fields: &[S],
) -> Result<(), EdRoadsError> {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            write!(writer, ",")?;
        }
        write!(writer, "\"{}\"", field.as_ref())?;
    }
    writeln!(writer)?;
    Ok(())
}
