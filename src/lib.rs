//! edroads - Edinburgh Council road-adoption spreadsheet to CSV converter
//!
//! PDFから変換されたSpreadsheetML（XML Spreadsheet 2003）形式の道路移管記録を
//! 読み込み、既知の変換アーティファクトを修正した上で、4列固定のCSVに変換します。
//!
//! # 処理の流れ
//!
//! 1. 各入力ファイルを読み込み、`Workbook/Worksheet/Table/Row/Cell`を走査
//! 2. セルの`ss:Index`で4つの固定列（名前・地域・移管状況・通知の説明）に割り当て
//! 3. テキストをクリーニング（説明列のみ完全な規則を適用）
//! 4. 見出し行（1列目が`"Name"`）を除いてCSVを出力
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use edroads::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     // 引数の順に全ファイルを処理し、CSVを標準出力へ
//!     converter.convert_paths(&["roads-1.xml", "roads-2.xml"], std::io::stdout())?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Inspect Records
//!
//! ```rust,no_run
//! use edroads::{Column, ConverterBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!     let table = converter.extract_paths(&["roads.xml"])?;
//!
//!     for record in &table {
//!         println!("{}: {}", record.get(Column::Name), record.get(Column::NoticeDescription));
//!     }
//!
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod cleaner;
mod error;
mod output;
mod parser;
mod security;
mod types;

// 公開API
pub use api::{CleanMode, Column};
pub use builder::{Converter, ConverterBuilder};
pub use cleaner::{clean_cell, clean_text};
pub use error::EdRoadsError;
pub use output::{write_csv, CsvFormatter};
pub use types::{Record, Table};
