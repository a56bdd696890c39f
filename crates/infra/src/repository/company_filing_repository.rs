//! # CompanyFilingRepository
//!
//! `edgar_company_data` テーブルへのアクセスを担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **ステートメントは 4 種類のみ**: 一覧、ID 指定取得、削除、4 フィールド更新
//! - **`SELECT *`**: テーブルに存在する全カラムを返す。既知の 5 カラム以外は
//!   カラムの型に応じて JSON 値へデコードし、`extra_columns` に格納する
//! - **影響行数は返すだけ**: 存在しない ID への更新・削除もエラーにしない。
//!   判断は呼び出し側に委ねる

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use edgar_data_domain::company_filing::{
    CompanyFilingId,
    CompanyFilingRecord,
    CompanyFilingUpdate,
};
use serde_json::{Map, Value};
use sqlx::{
    Column,
    MySqlPool,
    Row,
    TypeInfo,
    mysql::{MySqlColumn, MySqlRow},
};

use crate::error::InfraError;

const SELECT_ALL: &str = "SELECT * FROM edgar_company_data";
const SELECT_BY_ID: &str = "SELECT * FROM edgar_company_data WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM edgar_company_data WHERE id = ?";
const UPDATE_BY_ID: &str = "UPDATE edgar_company_data SET filings = ?, descr = ?, filed_effective = ?, file_film_number = ? WHERE id = ?";

/// 企業ファイリングデータのリポジトリトレイト
#[async_trait]
pub trait CompanyFilingRepository: Send + Sync {
    /// 全レコードを取得する（テーブルが空なら空の Vec）
    async fn find_all(&self) -> Result<Vec<CompanyFilingRecord>, InfraError>;

    /// ID でレコードを検索する
    async fn find_by_id(
        &self,
        id: CompanyFilingId,
    ) -> Result<Option<CompanyFilingRecord>, InfraError>;

    /// 4 フィールドを上書きし、影響行数を返す
    ///
    /// `None` のフィールドは NULL で上書きされる。
    async fn update(
        &self,
        id: CompanyFilingId,
        update: &CompanyFilingUpdate,
    ) -> Result<u64, InfraError>;

    /// レコードを削除し、影響行数を返す
    async fn delete(&self, id: CompanyFilingId) -> Result<u64, InfraError>;
}

/// MySQL 実装の CompanyFilingRepository
#[derive(Debug, Clone)]
pub struct MySqlCompanyFilingRepository {
    pool: MySqlPool,
}

impl MySqlCompanyFilingRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyFilingRepository for MySqlCompanyFilingRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<CompanyFilingRecord>, InfraError> {
        let rows = sqlx::query(SELECT_ALL).fetch_all(&self.pool).await?;

        rows.iter().map(decode_record).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(
        &self,
        id: CompanyFilingId,
    ) -> Result<Option<CompanyFilingRecord>, InfraError> {
        let row = sqlx::query(SELECT_BY_ID)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(decode_record).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update(
        &self,
        id: CompanyFilingId,
        update: &CompanyFilingUpdate,
    ) -> Result<u64, InfraError> {
        let result = sqlx::query(UPDATE_BY_ID)
            .bind(update.filings.as_deref())
            .bind(update.descr.as_deref())
            .bind(update.filed_effective.as_deref())
            .bind(update.file_film_number.as_deref())
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: CompanyFilingId) -> Result<u64, InfraError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

// =============================================================================
// 行のデコード
// =============================================================================

/// 1 行を [`CompanyFilingRecord`] に変換する
fn decode_record(row: &MySqlRow) -> Result<CompanyFilingRecord, InfraError> {
    let mut id = None;
    let mut filings = None;
    let mut descr = None;
    let mut filed_effective = None;
    let mut file_film_number = None;
    let mut extra_columns = Map::new();

    for column in row.columns() {
        let value = column_value(row, column)?;
        match column.name() {
            "id" => id = value.as_i64().map(CompanyFilingId::new),
            "filings" => filings = into_text(value),
            "descr" => descr = into_text(value),
            "filed_effective" => filed_effective = into_text(value),
            "file_film_number" => file_film_number = into_text(value),
            other => {
                extra_columns.insert(other.to_string(), value);
            }
        }
    }

    let id = id.ok_or_else(|| InfraError::unexpected("整数の id カラムがありません"))?;

    Ok(CompanyFilingRecord {
        id,
        filings,
        descr,
        filed_effective,
        file_film_number,
        extra_columns,
    })
}

/// 既知の文字列カラムの値を取り出す
///
/// 文字列以外の型で定義されている場合は JSON 表現を文字列として使う。
fn into_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// カラムの型に応じて値を JSON に変換する
///
/// DECIMAL や ENUM など専用の分岐がない型は文字列として読み、
/// UTF-8 として解釈できないバイナリは置換文字を含む文字列にする。
fn column_value(row: &MySqlRow, column: &MySqlColumn) -> Result<Value, sqlx::Error> {
    let index = column.ordinal();

    let value = match column.type_info().name() {
        "BOOLEAN" => row.try_get::<Option<bool>, _>(index)?.map(Value::from),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
            row.try_get::<Option<i64>, _>(index)?.map(Value::from)
        }
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" => row.try_get::<Option<u64>, _>(index)?.map(Value::from),
        "YEAR" => row.try_get_unchecked::<Option<u16>, _>(index)?.map(Value::from),
        "FLOAT" => row
            .try_get::<Option<f32>, _>(index)?
            .map(|v| Value::from(f64::from(v))),
        "DOUBLE" => row.try_get::<Option<f64>, _>(index)?.map(Value::from),
        "DATE" => null_if_undecodable(column.name(), row.try_get::<Option<NaiveDate>, _>(index))
            .map(|v| Value::from(v.to_string())),
        "DATETIME" => null_if_undecodable(column.name(), row.try_get::<Option<NaiveDateTime>, _>(index))
            .map(|v| Value::from(v.to_string())),
        "TIMESTAMP" => null_if_undecodable(column.name(), row.try_get::<Option<DateTime<Utc>>, _>(index))
            .map(|v| Value::from(v.to_rfc3339())),
        "TIME" => row
            .try_get::<Option<NaiveTime>, _>(index)?
            .map(|v| Value::from(v.to_string())),
        _ => text_or_bytes(row, index)?,
    };

    Ok(value.unwrap_or(Value::Null))
}

/// 日付型として解釈できない値（`0000-00-00` など）を NULL として扱う
///
/// ゼロ日付は chrono の型で表現できないため、1 行のデコード失敗で
/// 一覧全体がエラーにならないようにする。
fn null_if_undecodable<T>(
    column: &str,
    decoded: Result<Option<T>, sqlx::Error>,
) -> Option<T> {
    match decoded {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(column, error = %e, "日付として解釈できない値を null にします");
            None
        }
    }
}

fn text_or_bytes(row: &MySqlRow, index: usize) -> Result<Option<Value>, sqlx::Error> {
    if let Ok(text) = row.try_get_unchecked::<Option<String>, _>(index) {
        return Ok(text.map(Value::from));
    }

    let bytes = row.try_get_unchecked::<Option<Vec<u8>>, _>(index)?;
    Ok(bytes.map(|b| Value::from(String::from_utf8_lossy(&b).into_owned())))
}
