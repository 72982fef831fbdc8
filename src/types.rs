//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use crate::api::Column;

/// 見出し行を識別するための1列目の値
pub(crate) const HEADER_NAME: &str = "Name";

/// パーサーから抽出された生のセルデータ
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawCell {
    /// `ss:Index`属性の値（未加工）。属性がない場合は`None`
    pub index: Option<String>,

    /// 子孫テキストノードを連結したテキスト（マークアップは無視）
    pub text: String,
}

impl RawCell {
    /// 1始まりの列インデックスを数値として取得
    ///
    /// 属性がない、または数値でない場合は`None`を返します。
    pub fn column_index(&self) -> Option<u32> {
        self.index.as_deref()?.trim().parse().ok()
    }
}

/// パーサーから抽出された生の行データ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawRow {
    /// ドキュメント内での行番号（1始まり）
    pub number: usize,

    /// 行の直下にあるセル（ドキュメント順）
    pub cells: Vec<RawCell>,
}

/// 出力CSVの1行
///
/// 4つの固定フィールドを持ち、未設定のフィールドは空文字列です。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: [String; Column::COUNT],
}

impl Record {
    /// すべてのフィールドが空のレコードを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// フィールド配列からレコードを生成
    pub fn from_fields(fields: [String; Column::COUNT]) -> Self {
        Self { fields }
    }

    /// 指定列の値を取得
    pub fn get(&self, column: Column) -> &str {
        &self.fields[column.index()]
    }

    /// 指定列の値を設定（既存の値は上書き）
    pub fn set(&mut self, column: Column, value: String) {
        self.fields[column.index()] = value;
    }

    /// 全フィールド（列順）
    pub fn fields(&self) -> &[String; Column::COUNT] {
        &self.fields
    }

    /// 見出し行（1列目が`"Name"`）かどうか
    pub fn is_header(&self) -> bool {
        self.get(Column::Name) == HEADER_NAME
    }
}

/// 全入力ファイルから蓄積されたレコードの順序付きコレクション
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    /// 空のテーブルを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// レコードを追加する
    ///
    /// 見出し行は破棄されます。
    ///
    /// # 戻り値
    ///
    /// * `true` - レコードが追加された場合
    /// * `false` - 見出し行として破棄された場合
    pub fn push(&mut self, record: Record) -> bool {
        if record.is_header() {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl IntoIterator for Table {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
