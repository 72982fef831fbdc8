//! Row Extractor Module
//!
//! 生の行データを4列固定の`Record`に変換し、`Table`に蓄積するモジュール。

use std::path::Path;

use tracing::{debug, warn};

use crate::api::Column;
use crate::cleaner::clean_cell;
use crate::types::{RawRow, Record, Table};

/// 行を`Record`に変換する
///
/// 各セルの`ss:Index`（1始まり）で列を決定し、列に応じたモードでテキストを
/// クリーニングして格納します。同じ列のセルが複数ある場合は後のセルが優先されます。
/// 列インデックスがない、数値でない、または1〜4の範囲外のセルはスキップされます。
pub(crate) fn record_from_row(path: &Path, row: &RawRow) -> Record {
    let mut record = Record::new();

    for cell in &row.cells {
        let Some(column) = cell.column_index().and_then(Column::from_cell_index) else {
            warn!(
                path = %path.display(),
                row = row.number,
                index = ?cell.index,
                "skipping cell with invalid column index"
            );
            continue;
        };

        record.set(column, clean_cell(&cell.text, column));
    }

    record
}

/// 行を順に変換してテーブルに追加する
///
/// # 戻り値
///
/// テーブルに追加されたレコード数（見出し行は含まない）
pub(crate) fn extract_rows(path: &Path, rows: &[RawRow], table: &mut Table) -> usize {
    let mut kept = 0;

    for row in rows {
        if table.push(record_from_row(path, row)) {
            kept += 1;
        } else {
            debug!(path = %path.display(), row = row.number, "discarded header row");
        }
    }

    kept
}
