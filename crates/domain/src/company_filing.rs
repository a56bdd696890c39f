//! # 企業ファイリングデータ
//!
//! `edgar_company_data` テーブルの 1 行を表すレコードと、その識別子、
//! PUT で上書きされる 4 フィールドを定義する。
//!
//! ## ライフサイクル
//!
//! - 作成: このサービスの外部で行われる（API は提供しない）
//! - 参照: `GET /api/data/` と `GET /api/data/{id}`
//! - 更新: `PUT /api/data/{id}`（4 フィールドを常にまとめて上書き）
//! - 削除: `DELETE /api/data/{id}`

mod validation;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use self::validation::{
    BODY_FIELD,
    FieldErrorMap,
    UPDATABLE_FIELDS,
    ValidationErrors,
    validate_update,
    validate_update_value,
};
use crate::DomainError;

/// 企業ファイリングデータの ID
///
/// ストアが採番する整数の主キー。一度作成されたら変わらない。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
#[display("{_0}")]
pub struct CompanyFilingId(i64);

impl CompanyFilingId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// パスセグメントからの変換
///
/// ASCII 数字のみで構成され、`i64` に収まる文字列だけを受け付ける。
/// `+1`、`-1`、` 1` などは拒否する。
impl FromStr for CompanyFilingId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidId(s.to_string()));
        }
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| DomainError::InvalidId(s.to_string()))
    }
}

/// 企業ファイリングデータ（テーブルの 1 行）
///
/// 既知の 5 カラムは型付きで保持し、それ以外のカラムは
/// `extra_columns` にカラム名をキーとしてそのまま保持する。
/// JSON には既知カラム → 追加カラムの順で 1 つのオブジェクトとして出力される。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyFilingRecord {
    pub id:               CompanyFilingId,
    pub filings:          Option<String>,
    pub descr:            Option<String>,
    pub filed_effective:  Option<String>,
    pub file_film_number: Option<String>,
    #[serde(flatten)]
    pub extra_columns:    Map<String, Value>,
}

impl CompanyFilingRecord {
    /// 既知カラムのみのレコードを作成する
    pub fn new(id: CompanyFilingId, fields: CompanyFilingUpdate) -> Self {
        Self {
            id,
            filings: fields.filings,
            descr: fields.descr,
            filed_effective: fields.filed_effective,
            file_film_number: fields.file_film_number,
            extra_columns: Map::new(),
        }
    }

    /// 4 フィールドを上書きする
    ///
    /// 未指定（`None`）のフィールドも `None` で上書きされる。既存値とのマージはしない。
    pub fn apply(&mut self, update: CompanyFilingUpdate) {
        self.filings = update.filings;
        self.descr = update.descr;
        self.filed_effective = update.filed_effective;
        self.file_film_number = update.file_film_number;
    }
}

/// PUT で書き込まれる 4 フィールド
///
/// リクエストボディに含まれなかったフィールドは `None` となり、
/// ストアには NULL として書き込まれる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyFilingUpdate {
    pub filings:          Option<String>,
    pub descr:            Option<String>,
    pub filed_effective:  Option<String>,
    pub file_film_number: Option<String>,
}
