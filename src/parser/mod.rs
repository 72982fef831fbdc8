//! Parser Module
//!
//! SpreadsheetMLドキュメントの読み込みと、行データの抽出。
//! ストリーミング処理で行とセルを取り出し、固定4列のレコードに変換します。

mod extract;
mod workbook;

pub(crate) use extract::extract_rows;
pub(crate) use workbook::WorkbookParser;
