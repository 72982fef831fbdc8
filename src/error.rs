//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use std::path::PathBuf;
use thiserror::Error;

/// edroadsクレート全体で使用するエラー型
///
/// 入力ファイルの読み込み、SpreadsheetMLの解析、CSV出力中に発生する
/// すべてのエラーを統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - `FileAccess`: 入力パスを開けない、または読み込めない
/// - `Parse`: 入力が整形式のXMLではない、または想定するスキーマではない
/// - `Io`: 出力の書き込みに失敗した
/// - `Config`: ビルダー設定の検証に失敗した
/// - `SecurityViolation`: 入力サイズの上限を超えた
///
/// いずれのエラーもバッチ全体を中断します（部分的なCSVは出力されません）。
///
/// # 使用例
///
/// ```rust,no_run
/// use edroads::{ConverterBuilder, EdRoadsError};
///
/// let converter = ConverterBuilder::new().build().unwrap();
/// match converter.extract_paths(&["missing.xml"]) {
///     Err(EdRoadsError::FileAccess { path, .. }) => {
///         eprintln!("cannot open {}", path.display());
///     }
///     _ => {}
/// }
/// ```
#[derive(Error, Debug)]
pub enum EdRoadsError {
    /// 入力ファイルを開けない、または読み込めないエラー
    #[error("Cannot access '{}': {source}", .path.display())]
    FileAccess {
        /// 対象の入力パス
        path: PathBuf,
        /// 元のI/Oエラー
        #[source]
        source: std::io::Error,
    },

    /// SpreadsheetMLの解析エラー
    ///
    /// XMLが整形式でない（タグの不一致、閉じられていない要素、
    /// 不正なエンティティ、不正なUTF-8など）場合や、ルート要素が
    /// 存在しない場合に発生します。
    #[error("Failed to parse '{}' at byte {position}: {message}", .path.display())]
    Parse {
        /// 対象の入力パス
        path: PathBuf,
        /// エラー発生位置（バイトオフセット）
        position: usize,
        /// エラーの詳細メッセージ
        message: String,
    },

    /// 出力中に発生したI/Oエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。
    ///
    /// ```rust,no_run
    /// use edroads::{ConverterBuilder, EdRoadsError};
    ///
    /// let result = ConverterBuilder::new().with_max_input_size(0).build();
    /// if let Err(EdRoadsError::Config(msg)) = result {
    ///     println!("設定エラー: {}", msg);
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルサイズが上限を超えた場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_file_access_error_display() {
        let error = EdRoadsError::FileAccess {
            path: PathBuf::from("roads/missing.xml"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file"),
        };

        let msg = error.to_string();
        assert!(msg.starts_with("Cannot access"));
        assert!(msg.contains("roads/missing.xml"));
        assert!(msg.contains("No such file"));
    }

    #[test]
    fn test_file_access_error_source() {
        use std::error::Error as _;

        let error = EdRoadsError::FileAccess {
            path: PathBuf::from("a.xml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let source = error.source().expect("source should be kept");
        assert_eq!(source.to_string(), "denied");
    }

    #[test]
    fn test_parse_error_display() {
        let error = EdRoadsError::Parse {
            path: PathBuf::from("broken.xml"),
            position: 42,
            message: "unexpected end of file".to_string(),
        };

        let msg = error.to_string();
        assert!(msg.contains("Failed to parse"));
        assert!(msg.contains("broken.xml"));
        assert!(msg.contains("42"));
        assert!(msg.contains("unexpected end of file"));
    }

    #[test]
    fn test_io_error_conversion_with_question_mark() {
        fn write_something() -> Result<(), EdRoadsError> {
            let written: Result<(), io::Error> =
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
            written?;
            Ok(())
        }

        match write_something() {
            Err(EdRoadsError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    // エラーメッセージのフォーマット確認
    #[test]
    fn test_all_error_formats() {
        let io_err: EdRoadsError = io::Error::other("test io").into();
        assert!(io_err.to_string().starts_with("IO error"));

        let config_err = EdRoadsError::Config("test config".to_string());
        assert!(config_err.to_string().starts_with("Configuration error"));

        let security_err = EdRoadsError::SecurityViolation("too big".to_string());
        assert!(security_err.to_string().starts_with("Security violation"));
    }
}
