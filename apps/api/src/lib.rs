//! # Faultline API
//!
//! HTTP API のエラー正規化レイヤーと、それを使うサンプルのユーザー API。
//!
//! ## エラーパイプライン
//!
//! ```text
//! ハンドラ / エクストラクタ / パニック / 未定義ルート
//!        ↓ ApiError(Failure)
//! classify（faultline_domain）
//!        ↓ DomainError
//! render（RenderContext + ErrorReporter）
//!        ↓
//! {code, message, stack?}
//! ```
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - ルーターとレイヤー構成
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - ハンドラが返す [`ApiError`](error::ApiError)
//! - [`extract`] - 検証付きエクストラクタ
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`middleware`] - レンダリングとパニック捕捉
//! - [`render`] - 実行環境に応じたエラーレスポンスの生成
//! - [`usecase`] - ユースケース層
//!
//! ## 依存関係
//!
//! - `faultline_domain`: 失敗の分類、ユーザーエンティティ
//! - `faultline_infra`: リポジトリ、永続化層の失敗
//! - `faultline_shared`: レスポンス形式、実行環境、トレーシング初期化

pub mod app_builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod middleware;
pub mod render;
pub mod usecase;
