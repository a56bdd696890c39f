//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供

pub mod company_filing;
pub mod health;

pub use company_filing::{
    CompanyFilingState,
    delete_company_filing,
    get_company_filing,
    list_company_filings,
    update_company_filing,
};
pub use health::{hello, not_found, redirect_to_collection};
