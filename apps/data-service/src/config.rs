//! # Data Service 設定
//!
//! 環境変数から Data Service サーバーの設定を読み込む。
//!
//! データベースの接続先は `DATABASE_URL`（URL 一括指定）か、
//! `DB_HOST` / `DB_USER` / `DB_NAME` などの個別指定のどちらかで与える。
//! 両方ある場合は `DATABASE_URL` を優先する。

use std::{env, time::Duration};

use edgar_data_infra::db::{ConnectTarget, PoolSettings};
use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("{name} の値が不正です: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Data Service サーバーの設定
#[derive(Debug, Clone)]
pub struct DataServiceConfig {
    /// バインドアドレス
    pub host:          String,
    /// ポート番号
    pub port:          u16,
    /// データベース接続先
    pub database:      ConnectTarget,
    /// 接続プール設定
    pub pool:          PoolSettings,
    /// 1 リクエストあたりのストア呼び出しの待機上限
    pub store_timeout: Duration,
}

impl DataServiceConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 空文字列は未設定として扱う（`DB_PASSWORD` を除く）。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database = match var("DATABASE_URL") {
            Some(url) => ConnectTarget::Url(url),
            None => ConnectTarget::Parts {
                host:     var("DB_HOST").ok_or(ConfigError::Missing("DB_HOST"))?,
                port:     parse_or("DB_PORT", var("DB_PORT"), 3306)?,
                user:     var("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?,
                password: lookup("DB_PASSWORD").unwrap_or_default(),
                database: var("DB_NAME").ok_or(ConfigError::Missing("DB_NAME"))?,
                ssl_mode: match var("DB_SSL_MODE") {
                    Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                        name: "DB_SSL_MODE",
                        value,
                    })?,
                    None => Default::default(),
                },
            },
        };

        let max_connections: u32 = parse_or("DB_MAX_CONNECTIONS", var("DB_MAX_CONNECTIONS"), 10)?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                name:  "DB_MAX_CONNECTIONS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            host: var("DATA_SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("DATA_SERVICE_PORT", var("DATA_SERVICE_PORT"), 5000)?,
            database,
            pool: PoolSettings {
                max_connections,
                acquire_timeout: Duration::from_secs(parse_or(
                    "DB_ACQUIRE_TIMEOUT_SECS",
                    var("DB_ACQUIRE_TIMEOUT_SECS"),
                    5,
                )?),
            },
            store_timeout: Duration::from_secs(parse_or(
                "STORE_TIMEOUT_SECS",
                var("STORE_TIMEOUT_SECS"),
                10,
            )?),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
