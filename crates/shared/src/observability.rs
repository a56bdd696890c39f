//! # Observability 基盤
//!
//! トレーシング初期化とログ出力形式の設定を提供する。
//! 環境変数 `LOG_FORMAT` による JSON / Pretty 出力の切り替えと、
//! `LOG_FILE` による追記専用ログファイルへの同時出力に対応する。

use std::path::PathBuf;

/// ログ出力形式
///
/// 環境変数 `LOG_FORMAT` で切り替える。
/// 値が未設定または不正な場合は [`Pretty`](LogFormat::Pretty) にフォールバックする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON 形式（本番環境向け）
    Json,
    /// 人間が読みやすい形式（開発環境向け）
    #[default]
    Pretty,
}

impl LogFormat {
    /// 文字列からログ形式をパースする
    ///
    /// 不正な値の場合は [`Pretty`](LogFormat::Pretty) にフォールバックし、
    /// stderr に警告を出力する。
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            other => {
                eprintln!("WARNING: unknown LOG_FORMAT={other:?}, falling back to pretty");
                Self::Pretty
            }
        }
    }

    /// 環境変数 `LOG_FORMAT` から読み取る
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT") {
            Ok(val) => Self::parse(&val),
            Err(_) => Self::default(),
        }
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// サービス名（起動時のルートスパンに出力）
    pub service_name: String,
    /// ログ出力形式
    pub log_format:   LogFormat,
    /// 追記先ログファイル（未設定なら stdout のみ）
    pub log_file:     Option<PathBuf>,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
            log_file: None,
        }
    }

    /// ログファイルを追加で出力先に指定する
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// 環境変数から設定を読み取る
    ///
    /// `LOG_FORMAT` で出力形式、`LOG_FILE` で追記先ファイルを決定する。
    /// `LOG_FILE` が空文字列の場合は未設定として扱う。
    pub fn from_env(service_name: impl Into<String>) -> Self {
        let config = Self::new(service_name, LogFormat::from_env());
        match std::env::var("LOG_FILE") {
            Ok(path) if !path.trim().is_empty() => config.with_log_file(path),
            _ => config,
        }
    }
}

/// トレーシングを初期化する
///
/// `RUST_LOG` 環境変数でログレベルを制御可能。
/// 未設定の場合は `"info,edgar_data=debug"` をデフォルトとする。
///
/// `log_file` が指定されている場合、同じイベントを ANSI エスケープなしで
/// ファイルへ追記する。ファイルを開けない場合はエラーを返す。
///
/// `ErrorLayer` を登録するため、`SpanTrace::capture()` はこの初期化以降に
/// 生成されたエラーでスパン情報を保持する。
#[cfg(feature = "observability")]
pub fn init_tracing(config: TracingConfig) -> std::io::Result<()> {
    use std::{fs::OpenOptions, sync::Mutex};

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,edgar_data=debug".into());

    let file_layer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(fmt_layer(config.log_format, Mutex::new(file), false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_error::ErrorLayer::default())
        .with(fmt_layer(config.log_format, std::io::stdout, true))
        .with(file_layer)
        .init();

    Ok(())
}

#[cfg(feature = "observability")]
fn fmt_layer<S, W>(
    format: LogFormat,
    writer: W,
    ansi: bool,
) -> Box<dyn tracing_subscriber::Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    W: for<'w> tracing_subscriber::fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    use tracing_subscriber::Layer as _;

    match format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed(),
    }
}
