//! # リポジトリ実装
//!
//! - **トレイトで抽象化**: ハンドラ・ユースケースのテストではインメモリ実装に差し替える
//! - **パラメータバインド**: 値は常に `?` プレースホルダへバインドし、SQL 文字列に埋め込まない

pub mod company_filing_repository;

pub use company_filing_repository::{CompanyFilingRepository, MySqlCompanyFilingRepository};
