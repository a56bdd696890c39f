//! # 更新リクエストの入力スキーマ
//!
//! `PUT /api/data/{id}` のボディを検証し、[`CompanyFilingUpdate`] に変換する。
//!
//! ## ルール
//!
//! | 条件 | 理由 |
//! |------|------|
//! | JSON として解釈できない | `invalid JSON`（キー: `body`） |
//! | トップレベルがオブジェクトでない | `must be of dict type`（キー: `body`） |
//! | 4 フィールド以外のキー | `unknown field` |
//! | 値が `null` | `null value not allowed` |
//! | 値が文字列以外 | `must be of string type` |
//!
//! 違反はすべて収集してから返す。1 件でも違反があれば書き込みは行わない。

use std::{collections::BTreeMap, fmt};

use serde_json::{Map, Value};

use super::CompanyFilingUpdate;

/// 更新可能なフィールド名
pub const UPDATABLE_FIELDS: [&str; 4] = ["filings", "descr", "filed_effective", "file_film_number"];

/// ボディ全体に対するエラーのキー
pub const BODY_FIELD: &str = "body";

const INVALID_JSON: &str = "invalid JSON";
const MUST_BE_DICT: &str = "must be of dict type";
const MUST_BE_STRING: &str = "must be of string type";
const NULL_NOT_ALLOWED: &str = "null value not allowed";
const UNKNOWN_FIELD: &str = "unknown field";

/// フィールド名 → 違反理由の一覧（キー順で安定）
pub type FieldErrorMap = BTreeMap<String, Vec<String>>;

/// フィールドごとのバリデーションエラー
///
/// キーはフィールド名、値はそのフィールドの違反理由の一覧。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: FieldErrorMap,
}

impl ValidationErrors {
    fn single(field: &str, reason: &str) -> Self {
        let mut errors = Self::default();
        errors.add(field, reason);
        errors
    }

    fn add(&mut self, field: &str, reason: &str) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(reason.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// 指定フィールドの違反理由を取得する
    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.errors.get(name).map(Vec::as_slice)
    }

    pub fn as_map(&self) -> &FieldErrorMap {
        &self.errors
    }

    pub fn into_map(self) -> FieldErrorMap {
        self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, reasons) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: {}", reasons.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// 生のリクエストボディを検証する
pub fn validate_update(body: &[u8]) -> Result<CompanyFilingUpdate, ValidationErrors> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|_| ValidationErrors::single(BODY_FIELD, INVALID_JSON))?;
    validate_update_value(&value)
}

/// パース済みの JSON 値を検証する
pub fn validate_update_value(value: &Value) -> Result<CompanyFilingUpdate, ValidationErrors> {
    let Value::Object(map) = value else {
        return Err(ValidationErrors::single(BODY_FIELD, MUST_BE_DICT));
    };

    let mut errors = ValidationErrors::default();

    for key in map.keys() {
        if !UPDATABLE_FIELDS.contains(&key.as_str()) {
            errors.add(key, UNKNOWN_FIELD);
        }
    }

    let update = CompanyFilingUpdate {
        filings:          string_field(map, "filings", &mut errors),
        descr:            string_field(map, "descr", &mut errors),
        filed_effective:  string_field(map, "filed_effective", &mut errors),
        file_film_number: string_field(map, "file_film_number", &mut errors),
    };

    if errors.is_empty() {
        Ok(update)
    } else {
        Err(errors)
    }
}

fn string_field(
    map: &Map<String, Value>,
    name: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match map.get(name)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => {
            errors.add(name, NULL_NOT_ALLOWED);
            None
        }
        _ => {
            errors.add(name, MUST_BE_STRING);
            None
        }
    }
}
