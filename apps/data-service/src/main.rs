//! # Data Service サーバー
//!
//! `edgar_company_data` テーブルを HTTP で公開するサービス。
//!
//! ## エンドポイント
//!
//! | メソッド | パス | 内容 |
//! |----------|------|------|
//! | GET | `/` | `Hello, World!` |
//! | GET | `/api/data/` | 全レコード |
//! | GET | `/api/data/{id}` | 1 件取得 |
//! | PUT | `/api/data/{id}` | 4 フィールドを上書き |
//! | DELETE | `/api/data/{id}` | 削除 |
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `DATA_SERVICE_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `DATA_SERVICE_PORT` | No | ポート番号（デフォルト: `5000`） |
//! | `DATABASE_URL` | No | MySQL 接続 URL。設定時は `DB_*` より優先 |
//! | `DB_HOST` / `DB_USER` / `DB_NAME` | **Yes**（URL 未設定時） | 接続先 |
//! | `DB_PORT` / `DB_PASSWORD` / `DB_SSL_MODE` | No | 接続先の補足 |
//! | `DB_MAX_CONNECTIONS` / `DB_ACQUIRE_TIMEOUT_SECS` | No | 接続プール |
//! | `STORE_TIMEOUT_SECS` | No | ストア呼び出しの待機上限（デフォルト: 10 秒） |
//! | `LOG_FORMAT` / `LOG_FILE` / `RUST_LOG` | No | ログ出力 |
//!
//! ## 起動方法
//!
//! ```bash
//! DB_HOST=localhost DB_USER=edgar DB_NAME=edgar cargo run -p edgar-data-service
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use edgar_data_infra::{db, repository::MySqlCompanyFilingRepository};
use edgar_data_service::{app_builder::build_app, config::DataServiceConfig};
use edgar_data_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("data-service");
    let service_name = tracing_config.service_name.clone();
    init_tracing(tracing_config).context("ログ出力の初期化に失敗しました")?;
    let _tracing_guard = tracing::info_span!("app", service = %service_name).entered();

    let config = DataServiceConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Data Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let pool = match db::create_pool(&config.database, &config.pool).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "データベースに接続できませんでした");
            return Err(anyhow::anyhow!("データベース接続に失敗しました: {e}"));
        }
    };
    tracing::info!("データベースに接続しました");

    let repository = Arc::new(MySqlCompanyFilingRepository::new(pool.clone()));
    let app = build_app(repository, config.store_timeout);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("アドレスのパースに失敗しました: {}:{}", config.host, config.port))?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Data Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Data Service サーバーを停止しました");

    Ok(())
}

/// Ctrl-C または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl-C ハンドラを登録できませんでした");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM ハンドラを登録できませんでした");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("シャットダウンを開始します");
}
