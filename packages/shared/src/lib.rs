//! # Faultline 共有ユーティリティ
//!
//! このクレートは、Faultline
//! プロジェクト全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, api）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum への依存は持たない（HTTP レスポンスへの変換は api の責務）

pub mod api_response;
pub mod environment;
pub mod error_body;
pub mod health;
pub mod observability;

pub use api_response::ApiResponse;
pub use environment::{Environment, RenderContext};
pub use error_body::ErrorBody;
pub use health::HealthResponse;
