//! Workbook Parser Module
//!
//! SpreadsheetML（XML Spreadsheet 2003）ドキュメントの読み込み。
//! `quick-xml`のストリーミング処理で`Workbook/Worksheet/Table/Row/Cell`を走査し、
//! 行とセルの生データを抽出します。

use std::fmt::Display;
use std::fs::File;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use quick_xml::escape::{unescape, EscapeError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use tracing::debug;

use crate::error::EdRoadsError;
use crate::security::SecurityConfig;
use crate::types::{RawCell, RawRow};

/// ルートから行要素までのパス（ローカル名）
const ROW_PATH: [&[u8]; 4] = [b"Workbook", b"Worksheet", b"Table", b"Row"];

/// セル要素のローカル名
const CELL_ELEMENT: &[u8] = b"Cell";

/// 列インデックス属性のローカル名（`ss:Index`）
const INDEX_ATTRIBUTE: &[u8] = b"Index";

/// 改行の文字参照（`&#10;`、`&#xA;`、`&#x0a;`など）
static LINE_BREAK_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#(?:0*10|[xX]0*[aA]);").expect("line break pattern is valid"));

/// セルテキスト内で保持する改行参照の表記
const LINE_BREAK_LITERAL: &str = "&#10;";

/// ワークブックパーサー
///
/// 入力ファイル1つ分の内容を保持します。ファイルハンドルは`open`の中で
/// 読み込み完了と同時に閉じられ、解析はメモリ上のバイト列に対して行われます。
pub(crate) struct WorkbookParser {
    /// 入力パス（エラーメッセージとログに使用）
    path: PathBuf,
    /// ドキュメントの内容
    content: Vec<u8>,
}

impl WorkbookParser {
    /// ファイルを開き、内容を読み込む
    ///
    /// # 引数
    ///
    /// * `path` - 入力ファイルのパス
    /// * `security` - 入力サイズの上限
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - 読み込みに成功した場合
    /// * `Err(EdRoadsError::FileAccess)` - ファイルを開けない、または読み込めない場合
    /// * `Err(EdRoadsError::SecurityViolation)` - サイズ上限を超えた場合
    pub fn open(path: &Path, security: &SecurityConfig) -> Result<Self, EdRoadsError> {
        let content = {
            let file = File::open(path).map_err(|source| EdRoadsError::FileAccess {
                path: path.to_path_buf(),
                source,
            })?;
            security
                .read_limited(file)
                .map_err(|source| EdRoadsError::FileAccess {
                    path: path.to_path_buf(),
                    source,
                })?
        };
        security.check_input_size(content.len())?;

        debug!(path = %path.display(), bytes = content.len(), "loaded workbook");

        Ok(Self::from_bytes(path, content))
    }

    /// メモリ上のバイト列からパーサーを生成する
    pub fn from_bytes(path: impl Into<PathBuf>, content: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            content,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 行を抽出する
    ///
    /// `Workbook/Worksheet/Table/Row`に一致する行要素のみを対象とし、
    /// 各行の直下の`Cell`要素を収集します。要素名はローカル名で比較するため、
    /// `ss:`接頭辞の有無は問いません。
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<RawRow>)` - ドキュメント順の行
    /// * `Err(EdRoadsError::Parse)` - XMLが整形式でない、またはルート要素が`Workbook`でない場合
    pub fn parse_rows(&self) -> Result<Vec<RawRow>, EdRoadsError> {
        let mut reader = Reader::from_reader(self.content.as_slice());
        reader.trim_text(false);
        reader.check_end_names(true);

        let mut buf = Vec::new();
        let mut stack: Vec<Vec<u8>> = Vec::new();
        let mut rows: Vec<RawRow> = Vec::new();
        let mut current_row: Option<RawRow> = None;
        let mut current_cell: Option<RawCell> = None;
        let mut seen_root = false;

        loop {
            let position = reader.buffer_position();
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| self.parse_error(position, e))?;

            match event {
                Event::Start(e) => {
                    self.check_root(&stack, &e, &mut seen_root, position)?;
                    stack.push(e.local_name().as_ref().to_vec());

                    if is_row_path(&stack) {
                        current_row = Some(RawRow {
                            number: rows.len() + 1,
                            cells: Vec::new(),
                        });
                    } else if current_row.is_some() && is_cell_path(&stack) {
                        current_cell = Some(RawCell {
                            index: self.index_attribute(&e, position)?,
                            text: String::new(),
                        });
                    }
                }
                Event::Empty(e) => {
                    self.check_root(&stack, &e, &mut seen_root, position)?;
                    stack.push(e.local_name().as_ref().to_vec());

                    if is_row_path(&stack) {
                        rows.push(RawRow {
                            number: rows.len() + 1,
                            cells: Vec::new(),
                        });
                    } else if is_cell_path(&stack) {
                        if let Some(row) = current_row.as_mut() {
                            row.cells.push(RawCell {
                                index: self.index_attribute(&e, position)?,
                                text: String::new(),
                            });
                        }
                    }

                    stack.pop();
                }
                Event::End(_) => {
                    if is_cell_path(&stack) {
                        if let (Some(row), Some(cell)) = (current_row.as_mut(), current_cell.take())
                        {
                            row.cells.push(cell);
                        }
                    } else if is_row_path(&stack) {
                        if let Some(row) = current_row.take() {
                            rows.push(row);
                        }
                    }
                    stack.pop();
                }
                Event::Text(t) => {
                    if let Some(cell) = current_cell.as_mut() {
                        let raw = std::str::from_utf8(&t)
                            .map_err(|e| self.parse_error(position, e))?;
                        let text =
                            unescape_cell_text(raw).map_err(|e| self.parse_error(position, e))?;
                        cell.text.push_str(&text);
                    }
                }
                Event::CData(c) => {
                    if let Some(cell) = current_cell.as_mut() {
                        let bytes = c.into_inner();
                        let text = std::str::from_utf8(&bytes)
                            .map_err(|e| self.parse_error(position, e))?;
                        cell.text.push_str(text);
                    }
                }
                Event::Eof => break,
                _ => {}
            }

            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(self.parse_error(
                reader.buffer_position(),
                format!(
                    "unexpected end of file: <{}> is not closed",
                    String::from_utf8_lossy(open)
                ),
            ));
        }

        if !seen_root {
            return Err(self.parse_error(0, "document has no root element"));
        }

        debug!(path = %self.path.display(), rows = rows.len(), "parsed workbook rows");

        Ok(rows)
    }

    /// ルート要素の検証
    ///
    /// ルート要素は1つだけで、ローカル名が`Workbook`でなければなりません。
    fn check_root(
        &self,
        stack: &[Vec<u8>],
        element: &BytesStart<'_>,
        seen_root: &mut bool,
        position: usize,
    ) -> Result<(), EdRoadsError> {
        if !stack.is_empty() {
            return Ok(());
        }

        if *seen_root {
            return Err(self.parse_error(position, "multiple root elements"));
        }
        *seen_root = true;

        let name = element.local_name();
        if !name.as_ref().eq_ignore_ascii_case(ROW_PATH[0]) {
            return Err(self.parse_error(
                position,
                format!(
                    "root element is <{}>, expected <Workbook>",
                    String::from_utf8_lossy(name.as_ref())
                ),
            ));
        }

        Ok(())
    }

    /// `ss:Index`属性の値を取得（未加工）
    fn index_attribute(
        &self,
        element: &BytesStart<'_>,
        position: usize,
    ) -> Result<Option<String>, EdRoadsError> {
        for attr in element.attributes() {
            let attr = attr.map_err(|e| self.parse_error(position, e))?;
            if attr
                .key
                .local_name()
                .as_ref()
                .eq_ignore_ascii_case(INDEX_ATTRIBUTE)
            {
                let value = attr
                    .unescape_value()
                    .map_err(|e| self.parse_error(position, e))?;
                return Ok(Some(value.into_owned()));
            }
        }
        Ok(None)
    }

    fn parse_error(&self, position: usize, message: impl Display) -> EdRoadsError {
        EdRoadsError::Parse {
            path: self.path.clone(),
            position,
            message: message.to_string(),
        }
    }
}

/// テキストノードのエンティティを展開する
///
/// 改行の文字参照だけは展開せず`&#10;`として残します。
/// 後段のクリーナーが`&#10`を取り除くため、改行参照がCSVの行を分割することはありません。
fn unescape_cell_text(raw: &str) -> Result<String, EscapeError> {
    let mut text = String::with_capacity(raw.len());
    let mut last = 0;
    for found in LINE_BREAK_REFERENCE.find_iter(raw) {
        text.push_str(&unescape(&raw[last..found.start()])?);
        text.push_str(LINE_BREAK_LITERAL);
        last = found.end();
    }
    text.push_str(&unescape(&raw[last..])?);
    Ok(text)
}

/// 要素スタックが行要素を指しているか
fn is_row_path(stack: &[Vec<u8>]) -> bool {
    stack.len() == ROW_PATH.len()
        && stack
            .iter()
            .zip(ROW_PATH.iter())
            .all(|(name, expected)| name.eq_ignore_ascii_case(expected))
}

/// 要素スタックが行の直下のセル要素を指しているか
fn is_cell_path(stack: &[Vec<u8>]) -> bool {
    match stack.split_last() {
        Some((last, parents)) => {
            last.eq_ignore_ascii_case(CELL_ELEMENT) && is_row_path(parents)
        }
        None => false,
    }
}
