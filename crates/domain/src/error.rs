//! # ドメイン層エラー定義
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `InvalidId` | 404 Not Found | パスの ID が整数として解釈できない |

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error)]
pub enum DomainError {
    /// ID として解釈できない文字列
    ///
    /// 符号・空白を含むもの、`i64` の範囲を超えるものも含む。
    #[error("不正な ID です: {0:?}")]
    InvalidId(String),
}
