//! # Data Service ライブラリ
//!
//! ルーター構築・ハンドラ・ユースケースを公開する。
//! `main.rs` はインフラ初期化とサーバー起動に集中し、
//! テストはこのライブラリ経由でルーターを組み立てる。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod usecase;

#[cfg(test)]
mod test_utils;
