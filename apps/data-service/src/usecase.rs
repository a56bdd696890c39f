//! # ユースケース層
//!
//! ハンドラとリポジトリの間で、ストア呼び出しのタイムアウトと
//! エラー文脈の付与を担当する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリを `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは入力の抽出と検証だけを行う

pub mod company_filing;

pub use company_filing::CompanyFilingUseCaseImpl;
