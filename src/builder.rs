//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::EdRoadsError;
use crate::parser::{extract_rows, WorkbookParser};
use crate::security::SecurityConfig;
use crate::types::Table;

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone, Default)]
pub(crate) struct ConversionConfig {
    /// 入力サイズなどのリソース制限
    pub security: SecurityConfig,
}

/// Fluent Builder APIを提供する構造体
///
/// 変換規則そのものは固定で、設定できるのはリソース制限のみです。
///
/// # 使用例
///
/// ```rust,no_run
/// use edroads::ConverterBuilder;
///
/// # fn main() -> Result<(), edroads::EdRoadsError> {
/// let converter = ConverterBuilder::new()
///     .with_max_input_size(8 * 1024 * 1024)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 入力ファイルの最大サイズ: 64MB
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// 入力ファイル1つあたりの最大サイズ（バイト）を指定する
    ///
    /// 上限を超えるファイルは`EdRoadsError::SecurityViolation`で拒否されます。
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.security.max_input_file_size = bytes;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Converter)` - 設定が有効な場合
    /// * `Err(EdRoadsError::Config)` - 最大サイズが0の場合
    pub fn build(self) -> Result<Converter, EdRoadsError> {
        if self.config.security.max_input_file_size == 0 {
            return Err(EdRoadsError::Config(
                "Invalid max input size: must be greater than 0".to_string(),
            ));
        }

        Ok(Converter::new(self.config))
    }
}

/// 変換処理のファサード
///
/// SpreadsheetMLファイルを読み込み、クリーニング済みの`Table`を構築し、
/// CSVとして出力します。入力は引数の順に1つずつ処理され、いずれかの入力で
/// エラーが発生した場合はバッチ全体が中断されます。
///
/// # 使用例
///
/// ```rust,no_run
/// use edroads::ConverterBuilder;
///
/// # fn main() -> Result<(), edroads::EdRoadsError> {
/// let converter = ConverterBuilder::new().build()?;
/// converter.convert_paths(&["roads-a.xml", "roads-b.xml"], std::io::stdout())?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// 全入力ファイルからテーブルを構築する
    ///
    /// # 引数
    ///
    /// * `paths` - 入力ファイルのパス（この順に処理）
    ///
    /// # 戻り値
    ///
    /// * `Ok(Table)` - 全ファイルのレコード（見出し行を除く）
    /// * `Err(EdRoadsError)` - いずれかのファイルでエラーが発生した場合
    pub fn extract_paths<I, P>(&self, paths: I) -> Result<Table, EdRoadsError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut table = Table::new();
        let mut files = 0usize;

        for path in paths {
            let path = path.as_ref();
            let parser = WorkbookParser::open(path, &self.config.security)?;
            self.extract_into(&parser, &mut table)?;
            files += 1;
        }

        info!(files, records = table.len(), "extracted road records");
        Ok(table)
    }

    /// リーダーからテーブルを構築する
    ///
    /// # 引数
    ///
    /// * `source` - エラーメッセージとログに使用する入力名
    /// * `reader` - SpreadsheetMLドキュメントのリーダー
    pub fn extract_reader<R: Read>(
        &self,
        source: impl Into<PathBuf>,
        reader: R,
    ) -> Result<Table, EdRoadsError> {
        let source = source.into();
        let content = self
            .config
            .security
            .read_limited(reader)
            .map_err(|e| EdRoadsError::FileAccess {
                path: source.clone(),
                source: e,
            })?;
        self.config.security.check_input_size(content.len())?;

        let parser = WorkbookParser::from_bytes(source, content);
        let mut table = Table::new();
        self.extract_into(&parser, &mut table)?;
        Ok(table)
    }

    /// 全入力ファイルを変換し、CSVを書き出す
    ///
    /// 出力は全入力の変換が成功した後にのみ書き込まれます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(usize)` - 書き出したレコード数（見出しを除く）
    /// * `Err(EdRoadsError)` - エラーが発生した場合（出力には何も書き込まれない）
    pub fn convert_paths<I, P, W>(&self, paths: I, output: W) -> Result<usize, EdRoadsError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
        W: Write,
    {
        let table = self.extract_paths(paths)?;
        self.write_table(&table, output)?;
        Ok(table.len())
    }

    /// 全入力ファイルを変換し、CSV文字列として返す
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use edroads::ConverterBuilder;
    ///
    /// # fn main() -> Result<(), edroads::EdRoadsError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let csv = converter.convert_to_string(&["roads.xml"])?;
    /// print!("{}", csv);
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert_to_string<I, P>(&self, paths: I) -> Result<String, EdRoadsError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut buffer = Vec::new();
        self.convert_paths(paths, &mut buffer)?;

        let result = String::from_utf8(buffer).map_err(|e| {
            EdRoadsError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        Ok(result)
    }

    /// テーブルをCSVとして書き出す
    pub fn write_table<W: Write>(&self, table: &Table, mut output: W) -> Result<(), EdRoadsError> {
        let mut writer = BufWriter::new(&mut output);
        crate::output::write_csv(table, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn extract_into(&self, parser: &WorkbookParser, table: &mut Table) -> Result<(), EdRoadsError> {
        let rows = parser.parse_rows()?;
        let kept = extract_rows(parser.path(), &rows, table);

        debug!(
            path = %parser.path().display(),
            rows = rows.len(),
            records = kept,
            "extracted workbook"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<Workbook xmlns:ss="urn:schemas-microsoft-com:office:spreadsheet">
<Worksheet ss:Name="Roads"><Table>
<Row><Cell ss:Index="1"><Data>Name</Data></Cell><Cell ss:Index="2"><Data>Locality</Data></Cell></Row>
<Row><Cell ss:Index="1"><Data>ABBEY LANE</Data></Cell><Cell ss:Index="4"><Data>southa road</Data></Cell></Row>
</Table></Worksheet>
</Workbook>"#;

    #[test]
    fn test_converter_builder_new() {
        let builder = ConverterBuilder::new();
        assert_eq!(builder.config.security, SecurityConfig::default());
    }

    #[test]
    fn test_with_max_input_size() {
        let builder = ConverterBuilder::new().with_max_input_size(1024);
        assert_eq!(builder.config.security.max_input_file_size, 1024);
    }

    #[test]
    fn test_build_with_zero_max_input_size() {
        match ConverterBuilder::new().with_max_input_size(0).build() {
            Err(EdRoadsError::Config(msg)) => assert!(msg.contains("max input size")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_reader() {
        let converter = ConverterBuilder::new().build().unwrap();
        let table = converter
            .extract_reader("sample.xml", Cursor::new(SAMPLE))
            .unwrap();

        assert_eq!(table.len(), 1);
        let record = &table.records()[0];
        assert_eq!(record.fields()[0], "ABBEY LANE");
        assert_eq!(record.fields()[3], "south a road");
    }

    #[test]
    fn test_extract_reader_respects_size_limit() {
        let converter = ConverterBuilder::new()
            .with_max_input_size(10)
            .build()
            .unwrap();
        let result = converter.extract_reader("sample.xml", Cursor::new(SAMPLE));
        assert!(matches!(result, Err(EdRoadsError::SecurityViolation(_))));
    }

    #[test]
    fn test_extract_paths_with_no_inputs() {
        let converter = ConverterBuilder::new().build().unwrap();
        let table = converter.extract_paths(Vec::<PathBuf>::new()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_convert_to_string_with_missing_file() {
        let converter = ConverterBuilder::new().build().unwrap();
        let result = converter.convert_to_string(["does-not-exist.xml"]);
        assert!(matches!(result, Err(EdRoadsError::FileAccess { .. })));
    }

    #[test]
    fn test_write_table() {
        let converter = ConverterBuilder::new().build().unwrap();
        let table = converter
            .extract_reader("sample.xml", Cursor::new(SAMPLE))
            .unwrap();

        let mut out = Vec::new();
        converter.write_table(&table, &mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.ends_with("\"ABBEY LANE\",\"\",\"\",\"south a road\"\n"));
    }
}
