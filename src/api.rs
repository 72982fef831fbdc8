//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// 出力CSVの固定列
///
/// 列の識別は位置のみで行われ、名前で検索されることはありません。
/// 入力のセルは1始まりの`ss:Index`属性でいずれかの列に割り当てられます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// 道路名（1列目）
    Name,

    /// 地域（2列目）
    Locality,

    /// 道路移管状況（3列目）
    AdoptionStatus,

    /// 物件通知の説明（4列目）
    ///
    /// PDFから変換された自由記述テキストで、完全なクリーニング規則が適用されます。
    NoticeDescription,
}

impl Column {
    /// すべての列（出力順）
    pub const ALL: [Column; 4] = [
        Column::Name,
        Column::Locality,
        Column::AdoptionStatus,
        Column::NoticeDescription,
    ];

    /// 列数
    pub const COUNT: usize = 4;

    /// 0始まりの列インデックス
    pub fn index(self) -> usize {
        match self {
            Column::Name => 0,
            Column::Locality => 1,
            Column::AdoptionStatus => 2,
            Column::NoticeDescription => 3,
        }
    }

    /// 1始まりのセルインデックス（`ss:Index`）から列を取得
    ///
    /// # 戻り値
    ///
    /// * `Some(Column)` - 1〜4の場合
    /// * `None` - 範囲外の場合
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use edroads::Column;
    ///
    /// assert_eq!(Column::from_cell_index(1), Some(Column::Name));
    /// assert_eq!(Column::from_cell_index(4), Some(Column::NoticeDescription));
    /// assert_eq!(Column::from_cell_index(0), None);
    /// assert_eq!(Column::from_cell_index(5), None);
    /// ```
    pub fn from_cell_index(index: u32) -> Option<Self> {
        let zero_based = usize::try_from(index.checked_sub(1)?).ok()?;
        Self::ALL.get(zero_based).copied()
    }

    /// CSVヘッダーに出力する列名
    pub fn header(self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Locality => "Locality",
            Column::AdoptionStatus => "Street Adoption Status",
            Column::NoticeDescription => "Property Notice Description",
        }
    }

    /// 自由記述（説明）列かどうか
    pub fn is_description(self) -> bool {
        self == Column::NoticeDescription
    }

    /// この列に適用するクリーニングモード
    pub fn clean_mode(self) -> CleanMode {
        if self.is_description() {
            CleanMode::Full
        } else {
            CleanMode::Artifacts
        }
    }
}

/// テキストクリーニングのモード
///
/// ```rust
/// use edroads::{clean_text, CleanMode};
///
/// assert_eq!(clean_text("&#10middle", CleanMode::Artifacts), "middle");
/// assert_eq!(clean_text("southa road", CleanMode::Full), "south a road");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanMode {
    /// 変換アーティファクト（`&#10`）の除去のみ
    Artifacts,

    /// アーティファクト除去に加え、空白・単語境界・誤字の修正を行う
    Full,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_index_roundtrip() {
        for (i, column) in Column::ALL.iter().enumerate() {
            assert_eq!(column.index(), i);
            assert_eq!(Column::from_cell_index(i as u32 + 1), Some(*column));
        }
    }

    #[test]
    fn test_from_cell_index_out_of_range() {
        assert_eq!(Column::from_cell_index(0), None);
        assert_eq!(Column::from_cell_index(5), None);
        assert_eq!(Column::from_cell_index(u32::MAX), None);
    }

    #[test]
    fn test_headers() {
        let headers: Vec<&str> = Column::ALL.iter().map(|c| c.header()).collect();
        assert_eq!(
            headers,
            vec![
                "Name",
                "Locality",
                "Street Adoption Status",
                "Property Notice Description"
            ]
        );
    }

    #[test]
    fn test_only_description_is_fully_cleaned() {
        assert_eq!(Column::NoticeDescription.clean_mode(), CleanMode::Full);
        assert_eq!(Column::Name.clean_mode(), CleanMode::Artifacts);
        assert_eq!(Column::Locality.clean_mode(), CleanMode::Artifacts);
        assert_eq!(Column::AdoptionStatus.clean_mode(), CleanMode::Artifacts);
    }
}
