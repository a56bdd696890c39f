//! # ヘルスチェック・ルーティング補助ハンドラ
//!
//! ## エンドポイント
//!
//! ```text
//! GET /            -> "Hello, World!"
//! GET /api/data    -> 308 /api/data/
//! その他           -> 404 {"message": "Not Found"}
//! ```

use axum::response::Redirect;

use crate::error::ApiError;

/// GET /
///
/// 稼働確認用。ストアには触れない。
pub async fn hello() -> &'static str {
    "Hello, World!"
}

/// 末尾スラッシュなしのコレクション URL を正規の URL へ転送する
pub async fn redirect_to_collection() -> Redirect {
    Redirect::permanent("/api/data/")
}

/// どのルートにも一致しないリクエスト
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
