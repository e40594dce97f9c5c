//! # ヘルスチェックハンドラ
//!
//! ```text
//! GET /health
//! ```
//!
//! ```json
//! { "status": "healthy", "version": "0.1.0" }
//! ```

use axum::Json;
use faultline_shared::HealthResponse;

/// ヘルスチェックエンドポイント
///
/// 依存サービスへの接続は確認せず、アプリケーション自体の起動状態のみを返す。
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}
