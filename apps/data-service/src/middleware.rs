//! # レスポンスステータスのログ出力
//!
//! 2xx 以外のレスポンスについて、ステータスコードと標準の理由句を
//! 構造化フィールド（`status`, `reason`）としてログに出力する。
//!
//! フォールバックの 404 や axum が返す 405 もここで拾えるよう、
//! ハンドラではなくミドルウェアで記録する。
//!
//! | ステータス | レベル |
//! |-----------|--------|
//! | 5xx | ERROR |
//! | 4xx | INFO |
//! | 1xx / 3xx | DEBUG |

use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};

/// 2xx 以外のレスポンスを記録する
pub async fn log_error_status(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    let code = status.as_u16();
    let reason = reason_phrase(status);
    if status.is_server_error() {
        tracing::error!(status = code, reason, %method, %path, "サーバーエラーを返しました");
    } else if status.is_client_error() {
        tracing::info!(status = code, reason, %method, %path, "クライアントエラーを返しました");
    } else if !status.is_success() {
        tracing::debug!(status = code, reason, %method, %path, "2xx 以外のレスポンスを返しました");
    }

    response
}

/// ステータスコードの理由句（未定義のコードは "Unknown Status"）
pub fn reason_phrase(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown Status")
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use axum::{Router, body::Body, http::Request, middleware::from_fn, routing::get};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tower::ServiceExt;

    use super::*;
    use crate::test_utils::{CapturedEvent, setup_capture};

    /// `status` フィールドを持つイベントだけを取り出す
    fn status_events(events: &Mutex<Vec<CapturedEvent>>) -> Vec<CapturedEvent> {
        events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.field("status").is_some())
            .cloned()
            .collect()
    }

    fn app() -> Router {
        Router::new()
            .route("/ok", get(|| async { StatusCode::OK }))
            .route("/moved", get(|| async { StatusCode::PERMANENT_REDIRECT }))
            .route("/broken", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .fallback(|| async { StatusCode::NOT_FOUND })
            .layer(from_fn(log_error_status))
    }

    async fn call(uri: &str) -> StatusCode {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[rstest]
    #[case(StatusCode::NOT_FOUND, "Not Found")]
    #[case(StatusCode::BAD_REQUEST, "Bad Request")]
    #[case(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")]
    fn test_理由句は標準の文言になる(#[case] status: StatusCode, #[case] expected: &str) {
        assert_eq!(reason_phrase(status), expected);
    }

    #[test]
    fn test_未定義のステータスコードはunknown_statusになる() {
        let status = StatusCode::from_u16(599).unwrap();
        assert_eq!(reason_phrase(status), "Unknown Status");
    }

    #[rstest]
    #[case("/missing", tracing::Level::INFO, "404", "Not Found")]
    #[case("/broken", tracing::Level::ERROR, "500", "Internal Server Error")]
    #[case("/moved", tracing::Level::DEBUG, "308", "Permanent Redirect")]
    #[tokio::test]
    async fn test_2xx以外のレスポンスはステータスと理由句を1件記録する(
        #[case] uri: &str,
        #[case] level: tracing::Level,
        #[case] status: &str,
        #[case] reason: &str,
    ) {
        let (_guard, events) = setup_capture();

        call(uri).await;

        let events = status_events(&events);
        assert_eq!(events.len(), 1, "{events:?}");
        assert_eq!(events[0].level, level);
        assert_eq!(events[0].field("status"), Some(status));
        assert_eq!(events[0].field("reason"), Some(reason));
        assert_eq!(events[0].field("path"), Some(uri));
    }

    #[tokio::test]
    async fn test_2xxのレスポンスは記録しない() {
        let (_guard, events) = setup_capture();

        let status = call("/ok").await;

        assert_eq!(status, StatusCode::OK);
        assert!(status_events(&events).is_empty());
    }

    #[tokio::test]
    async fn test_ミドルウェアはレスポンスをそのまま返す() {
        assert_eq!(call("/broken").await, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(call("/missing").await, StatusCode::NOT_FOUND);
    }
}
