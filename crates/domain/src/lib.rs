//! # EDGAR Data ドメイン層
//!
//! 企業ファイリングデータ（`edgar_company_data` テーブルの 1 行）の
//! ドメインモデルと、更新リクエストの入力スキーマを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! data-service → infra → domain
//!       ↘                  ↑
//!         ─────────────────
//! ```
//!
//! ドメイン層はインフラ層（DB、HTTP）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`company_filing`] - レコード、ID、更新内容、更新スキーマ検証
//! - [`error`] - ドメイン層で発生するエラーの定義
//!
//! ## 使用例
//!
//! ```rust
//! use edgar_data_domain::company_filing::{CompanyFilingId, validate_update};
//!
//! let id: CompanyFilingId = "42".parse().unwrap();
//! assert_eq!(id.as_i64(), 42);
//!
//! let update = validate_update(br#"{"filings": "10-K"}"#).unwrap();
//! assert_eq!(update.filings.as_deref(), Some("10-K"));
//! assert!(update.descr.is_none());
//! ```

pub mod company_filing;
pub mod error;

pub use error::DomainError;
