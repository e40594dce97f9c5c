//! # ルーティングのフォールバックハンドラ
//!
//! axum が生成する 404 / 405 を、operational なエラーとしてエラーパイプラインに流す。

use axum::http::StatusCode;
use faultline_domain::DomainError;

use crate::error::ApiError;

/// どのルートにも一致しないリクエストを 404 の operational エラーにする
pub async fn not_found() -> ApiError {
    DomainError::not_found("Not found").into()
}

/// パスは一致したがメソッドが許可されていないリクエストを 405 にする
///
/// メッセージは標準理由句（`Method Not Allowed`）。
pub async fn method_not_allowed() -> ApiError {
    DomainError::new(StatusCode::METHOD_NOT_ALLOWED, "").into()
}
