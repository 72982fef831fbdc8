//! Security Module
//!
//! 入力処理時のリソース制限を実装するモジュール。

use std::io::Read;

use crate::error::EdRoadsError;

/// 入力ファイルの最大サイズのデフォルト値（64MB）
pub(crate) const DEFAULT_MAX_INPUT_FILE_SIZE: u64 = 67_108_864;

/// セキュリティ設定
///
/// ファイル処理時のセキュリティ制限を定義します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 64MB (67_108_864 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: DEFAULT_MAX_INPUT_FILE_SIZE,
        }
    }
}

impl SecurityConfig {
    /// 上限を超えない範囲で入力をすべて読み込む
    ///
    /// 上限を1バイトでも超える入力は読み切らずに拒否します。
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<u8>)` - 読み込んだバイト列
    /// * `Err(io::Error)` - 読み込みに失敗した場合
    ///
    /// 上限超過の判定は`check_input_size`で行います。
    pub fn read_limited<R: Read>(&self, reader: R) -> std::io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        reader
            .take(self.max_input_file_size.saturating_add(1))
            .read_to_end(&mut buffer)?;
        Ok(buffer)
    }

    /// 読み込んだサイズが上限を超えているかを検証
    pub fn check_input_size(&self, bytes_read: usize) -> Result<(), EdRoadsError> {
        if bytes_read as u64 > self.max_input_file_size {
            return Err(EdRoadsError::SecurityViolation(format!(
                "Input file size exceeds maximum: more than {} bytes",
                self.max_input_file_size
            )));
        }
        Ok(())
    }
}
