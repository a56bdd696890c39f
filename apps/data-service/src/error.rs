//! # Data Service エラー定義
//!
//! Data Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! クライアントに返すメッセージは操作ごとの固定文言のみで、
//! ドライバのエラー文言はログにだけ出力する。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use edgar_data_domain::company_filing::ValidationErrors;
use edgar_data_infra::InfraError;
use edgar_data_shared::MessageResponse;
use thiserror::Error;

/// ストアに対する操作の種類
///
/// 500 レスポンスの文言を決めるために使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum StoreOperation {
    #[display("fetch")]
    Fetch,
    #[display("update")]
    Update,
    #[display("delete")]
    Delete,
}

impl StoreOperation {
    /// クライアントに返すメッセージ
    pub fn client_message(self) -> &'static str {
        match self {
            StoreOperation::Fetch => "Error fetching data",
            StoreOperation::Update => "Error updating data",
            StoreOperation::Delete => "Error deleting data",
        }
    }
}

/// Data Service で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// 更新リクエストのボディが不正
    #[error("入力が不正です: {0}")]
    Validation(#[from] ValidationErrors),

    /// 指定 ID のレコードが存在しない
    #[error("データが見つかりません")]
    NotFound,

    /// ルートに一致しない（ID が整数でない場合を含む）
    #[error("ルートが見つかりません")]
    RouteNotFound,

    /// ストアの呼び出しに失敗した
    #[error("ストアの{operation}に失敗しました: {source}")]
    Store {
        operation: StoreOperation,
        #[source]
        source:    InfraError,
    },
}

impl ApiError {
    pub fn store(operation: StoreOperation, source: InfraError) -> Self {
        Self::Store { operation, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(errors) => {
                tracing::warn!(%errors, "更新リクエストのバリデーションに失敗しました");
                MessageResponse::with_errors("Invalid input", errors.into_map())
            }
            ApiError::NotFound => MessageResponse::new("Data not found"),
            ApiError::RouteNotFound => MessageResponse::new("Not Found"),
            ApiError::Store { operation, source } => {
                tracing::debug!(%operation, span_trace = %source.span_trace(), "ストアエラーの発生箇所");
                MessageResponse::new(operation.client_message())
            }
        };

        (status, Json(body)).into_response()
    }
}
