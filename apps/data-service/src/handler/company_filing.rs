//! # 企業ファイリングデータハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /api/data/` - 全レコード
//! - `GET /api/data/{id}` - ID 指定で 1 件
//! - `PUT /api/data/{id}` - 4 フィールドを上書き
//! - `DELETE /api/data/{id}` - 削除
//!
//! `{id}` が非負の整数として解釈できない場合はルート不一致として 404 を返す。

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State, rejection::PathRejection},
};
use edgar_data_domain::company_filing::{CompanyFilingId, CompanyFilingRecord, validate_update};
use edgar_data_shared::MessageResponse;

use crate::{error::ApiError, usecase::CompanyFilingUseCaseImpl};

/// 企業ファイリング API の共有状態
pub struct CompanyFilingState {
    pub usecase: CompanyFilingUseCaseImpl,
}

/// パスセグメントを ID に変換する
///
/// パーセントデコード後に UTF-8 として解釈できないセグメントも、
/// 整数でないセグメントと同じくルート不一致として扱う。
fn parse_id(path: Result<Path<String>, PathRejection>) -> Result<CompanyFilingId, ApiError> {
    let Path(raw) = path.map_err(|_| ApiError::RouteNotFound)?;
    let id: CompanyFilingId = raw.parse().map_err(|_| ApiError::RouteNotFound)?;
    tracing::Span::current().record("id", id.as_i64());
    Ok(id)
}

/// GET /api/data/
#[tracing::instrument(skip_all)]
pub async fn list_company_filings(
    State(state): State<Arc<CompanyFilingState>>,
) -> Result<Json<Vec<CompanyFilingRecord>>, ApiError> {
    let records = state.usecase.list().await?;
    Ok(Json(records))
}

/// GET /api/data/{id}
///
/// ## レスポンス
///
/// - `200 OK`: レコード（全カラム）
/// - `404 Not Found`: レコードが存在しない
/// - `500 Internal Server Error`: ストアエラー
#[tracing::instrument(skip_all, fields(id = tracing::field::Empty))]
pub async fn get_company_filing(
    State(state): State<Arc<CompanyFilingState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<CompanyFilingRecord>, ApiError> {
    let id = parse_id(path)?;
    let record = state.usecase.get(id).await?;
    Ok(Json(record))
}

/// PUT /api/data/{id}
///
/// ボディは JSON オブジェクトとして検証し、失敗した場合はストアを呼ばずに 400 を返す。
/// ボディにないフィールドは NULL で上書きされる。
#[tracing::instrument(skip_all, fields(id = tracing::field::Empty))]
pub async fn update_company_filing(
    State(state): State<Arc<CompanyFilingState>>,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(path)?;
    let update = validate_update(&body)?;

    state.usecase.update(id, update).await?;
    Ok(Json(MessageResponse::new("Data updated successfully")))
}

/// DELETE /api/data/{id}
#[tracing::instrument(skip_all, fields(id = tracing::field::Empty))]
pub async fn delete_company_filing(
    State(state): State<Arc<CompanyFilingState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(path)?;

    state.usecase.delete(id).await?;
    Ok(Json(MessageResponse::new("Data deleted successfully")))
}
