//! # Faultline インフラ層
//!
//! 永続化層との接続と、永続化層の失敗の分類を担当する。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理とマイグレーション
//! - **リポジトリ実装**: PostgreSQL 実装とインメモリ実装
//! - **失敗の橋渡し**: [`InfraError`] を [`Failure`](faultline_domain::Failure) に変換する
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリトレイトと実装

pub mod db;
pub mod error;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
