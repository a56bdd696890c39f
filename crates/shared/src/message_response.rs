//! # メッセージレスポンス
//!
//! 書き込み系 API の完了通知とエラー通知で共通に使う `{ "message": ... }` 形式。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// フィールド名 → エラー理由の一覧
///
/// キー順を安定させるため `BTreeMap` を使う。
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// `{ "message": "...", "errors": { ... } }` 形式のレスポンスボディ
///
/// `errors` はバリデーションエラー時のみ出力する。
///
/// ```
/// use edgar_data_shared::MessageResponse;
///
/// let response = MessageResponse::new("Data deleted successfully");
/// assert_eq!(response.message, "Data deleted successfully");
/// assert!(response.errors.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors:  Option<FieldErrors>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors:  None,
        }
    }

    /// フィールド単位のエラー詳細付きレスポンスを作成する
    pub fn with_errors(message: impl Into<String>, errors: FieldErrors) -> Self {
        Self {
            message: message.into(),
            errors:  Some(errors),
        }
    }
}
