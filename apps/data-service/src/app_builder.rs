//! # Data Service アプリケーション構築
//!
//! State の初期化とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::{sync::Arc, time::Duration};

use axum::{Router, middleware::from_fn, routing::get};
use edgar_data_infra::repository::CompanyFilingRepository;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        CompanyFilingState,
        delete_company_filing,
        get_company_filing,
        hello,
        list_company_filings,
        not_found,
        redirect_to_collection,
        update_company_filing,
    },
    middleware::log_error_status,
    usecase::CompanyFilingUseCaseImpl,
};

/// リポジトリを受け取り、ルーターを組み立てる
///
/// `store_timeout` は 1 リクエストあたりのストア呼び出しの待機上限。
pub fn build_app(repository: Arc<dyn CompanyFilingRepository>, store_timeout: Duration) -> Router {
    let company_filing_state = Arc::new(CompanyFilingState {
        usecase: CompanyFilingUseCaseImpl::new(repository, store_timeout),
    });

    Router::new()
        .route("/", get(hello))
        .route("/api/data", get(redirect_to_collection))
        .route("/api/data/", get(list_company_filings))
        .route(
            "/api/data/{id}",
            get(get_company_filing)
                .put(update_company_filing)
                .delete(delete_company_filing),
        )
        .with_state(company_filing_state)
        .fallback(not_found)
        // 下に書いたものが外側
        .layer(from_fn(log_error_status))
        .layer(TraceLayer::new_for_http())
}
