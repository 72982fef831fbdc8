//! Text Cleaner Module
//!
//! セルテキストのクリーニング処理を提供するモジュール。
//!
//! PDF→スプレッドシート変換で生じる既知のアーティファクト（空白の欠落、
//! 単語の融合、誤字）を、順序の決まった置換規則の列で修正します。
//! 規則の順序は出力に影響するため、変更してはいけません。

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::api::{CleanMode, Column};

/// 上流のXMLパーサーが改行エンティティから残す断片（`;`なし）
const NEWLINE_ENTITY_ARTIFACT: &str = "&#10";

/// 前後の単語と融合しやすいキーワード（この順序で適用）
const RAMMED_WORDS: [&str; 18] = [
    "PRIVATE", "AVENUE", "COTTAGES", "PLACE", "CLOSE", "WALK", "DRIVE", "BRAE", "COURT", "RIGG",
    "LANE", "GROVE", "GLEBE", "GATE", "GREEN", "PARKWAY", "STREET", "extending",
];

/// 大文字小文字を正規化する接続語（この順序で適用）
const RECASE_WORDS: [&str; 3] = ["from", "at", "to"];

/// 既知の誤字と修正後の文字列（この順序で適用）
const TYPO_WORDS: [(&str, &str); 5] = [
    ("acul-de-sac", "a cul-de-sac"),
    ("cul-de sac", "cul-de-sac"),
    ("wardsthen", "wards then"),
    ("wardsto", "wards to"),
    ("southa", "south a"),
];

/// 正規表現による置換規則
struct RegexRule {
    pattern: Regex,
    replacement: String,
}

impl RegexRule {
    fn new(pattern: &str, replacement: impl Into<String>) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("cleaning rule pattern must compile"),
            replacement: replacement.into(),
        }
    }

    fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(text, self.replacement.as_str())
    }
}

/// 完全クリーニングで、トリム後に適用する正規表現規則（適用順）
///
/// `\s`、`\w`、`\b`はASCIIのみを対象とします。
static FULL_RULES: Lazy<Vec<RegexRule>> = Lazy::new(|| {
    let mut rules = vec![
        // 空白の連続を1つにまとめる
        RegexRule::new(r"(?-u:\s){2,}", " "),
        // 小文字/数字の直後の大文字（"roadName" -> "road Name"）
        RegexRule::new(r"([a-z0-9])([A-Z])", "${1} ${2}"),
        // 句読点の直後の単語文字（"end.The" -> "end. The"）
        RegexRule::new(r"([.,])((?-u:\w))", "${1} ${2}"),
        // 大文字に融合した From/Part/Not
        RegexRule::new(r"([A-Z])From", "${1} from"),
        RegexRule::new(r"([A-Z])Part", "${1} part"),
        RegexRule::new(r"([A-Z])Not", "${1} not"),
    ];

    for word in RAMMED_WORDS {
        rules.push(RegexRule::new(
            &format!(r"((?-u:\w))({}(?-u:\b))", word),
            "${1} ${2}",
        ));
        rules.push(RegexRule::new(
            &format!(r"(?-u:\b)({})((?-u:\w))", word),
            "${1} ${2}",
        ));
    }

    for word in RECASE_WORDS {
        rules.push(RegexRule::new(
            &format!(r"(?i-u) {} ", word),
            format!(" {} ", word),
        ));
    }

    rules
});

/// テキストをクリーニングする
///
/// # 引数
///
/// * `text` - セルのテキスト内容
/// * `mode` - クリーニングモード
///
/// # 処理内容
///
/// 常に`&#10`断片を除去します。`CleanMode::Full`の場合はさらに以下を順に適用します。
///
/// 1. 前後の空白を除去
/// 2. 連続する空白を1つにまとめる
/// 3. 小文字/数字の直後の大文字の前に空白を挿入（`roadName` → `road Name`）
/// 4. `.`と`,`の直後の単語文字の前に空白を挿入（`end.The` → `end. The`）
/// 5. 大文字に融合した`From`/`Part`/`Not`を分離して小文字化（`LANEFrom` → `LANE from`）
/// 6. 融合キーワード（`RAMMED_WORDS`）の前後に空白を挿入
/// 7. 接続語（from/at/to）を小文字に正規化
/// 8. 既知の誤字（`TYPO_WORDS`）を修正
///
/// # 使用例
///
/// ```rust
/// use edroads::{clean_text, CleanMode};
///
/// assert_eq!(
///     clean_text("roadEndsThenContinues", CleanMode::Full),
///     "road Ends Then Continues"
/// );
/// ```
pub fn clean_text(text: &str, mode: CleanMode) -> String {
    let text = text.replace(NEWLINE_ENTITY_ARTIFACT, "");

    match mode {
        CleanMode::Artifacts => text,
        CleanMode::Full => clean_free_text(&text),
    }
}

/// 列に応じたモードでセルテキストをクリーニングする
pub fn clean_cell(text: &str, column: Column) -> String {
    clean_text(text, column.clean_mode())
}

fn clean_free_text(text: &str) -> String {
    let mut text = trim_whitespace(text).to_string();

    for rule in FULL_RULES.iter() {
        text = rule.apply(&text).into_owned();
    }

    for (bad, good) in TYPO_WORDS {
        if text.contains(bad) {
            text = text.replace(bad, good);
        }
    }

    text
}

/// 前後のASCII空白とNULを除去
fn trim_whitespace(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b' || c == '\0')
}
