//! # API エラーハンドリング
//!
//! ハンドラやエクストラクタから返される失敗を、HTTP レスポンスに変換する。
//!
//! ## エラーの流れ
//!
//! ```text
//! DomainError / RawFailure / InfraError / anyhow::Error
//!        ↓ From
//! ApiError(Failure)
//!        ↓ IntoResponse（classify → 本番向けの仮レスポンス + 拡張に DomainError）
//! render_failures ミドルウェア
//!        ↓ render（RenderContext に従って最終レスポンスを生成）
//! HTTP レスポンス {code, message, stack?}
//! ```
//!
//! `IntoResponse` は実行環境を受け取れないため、ここでは分類までを行い、
//! 環境に応じた整形は [`render_failures`](crate::middleware::render_failures) に委ねる。
//! ミドルウェアを経由しない場合でも、仮レスポンスは本番向けの安全な形になっている。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use faultline_api::error::ApiError;
//! use faultline_domain::DomainError;
//!
//! async fn handler() -> Result<Json<Data>, ApiError> {
//!     let data = repository.find().await?;  // InfraError → ApiError
//!     let data = data.ok_or_else(|| DomainError::not_found("Data not found"))?;
//!     Ok(Json(data))
//! }
//! ```

use axum::response::{IntoResponse, Response};
use faultline_domain::{DomainError, Failure, RawFailure, classify};
use faultline_infra::InfraError;
use faultline_shared::RenderContext;

use crate::render::compose;

/// ハンドラから返される失敗
///
/// 発生源を問わず、タグ付きの [`Failure`] として保持する。
#[derive(Debug)]
pub struct ApiError(Failure);

impl ApiError {
    pub fn into_failure(self) -> Failure {
        self.0
    }
}

/// 分類済みでまだ整形されていないエラー
///
/// [`ApiError`] のレスポンス拡張として格納され、
/// [`render_failures`](crate::middleware::render_failures) が取り出す。
#[derive(Debug, Clone)]
pub(crate) struct UnrenderedError(pub(crate) DomainError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = classify(self.0);
        let mut response = compose(&error, RenderContext::production()).into_response();
        response.extensions_mut().insert(UnrenderedError(error));
        response
    }
}

// ===== From 実装 =====

impl From<Failure> for ApiError {
    fn from(failure: Failure) -> Self {
        Self(failure)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error.into())
    }
}

impl From<RawFailure> for ApiError {
    fn from(raw: RawFailure) -> Self {
        Self(raw.into())
    }
}

impl From<InfraError> for ApiError {
    fn from(error: InfraError) -> Self {
        Self(error.into())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        let source: &(dyn std::error::Error + 'static) = error.as_ref();
        Self(RawFailure::from_error(source).into())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use http::StatusCode;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;

    async fn into_parts(error: ApiError) -> (StatusCode, Value, Option<UnrenderedError>) {
        let response = error.into_response();
        let status = response.status();
        let pending = response.extensions().get::<UnrenderedError>().cloned();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap(), pending)
    }

    #[tokio::test]
    async fn test_operationalエラーは本番向けの形でそのまま返る() {
        let (status, body, pending) =
            into_parts(DomainError::conflict("resource already exists").into()).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, json!({"code": 409, "message": "resource already exists"}));
        assert_eq!(pending.unwrap().0.message(), "resource already exists");
    }

    #[tokio::test]
    async fn test_未分類の失敗は仮レスポンスで隠蔽され拡張に分類結果が残る() {
        let (status, body, pending) = into_parts(RawFailure::runtime("X is undefined").into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"code": 500, "message": "Internal Server Error"}));

        let error = pending.unwrap().0;
        assert_eq!(error.message(), "X is undefined");
        assert!(!error.is_operational());
    }

    #[tokio::test]
    async fn test_infra_errorは既知のリクエストエラーなら400に分類される() {
        let (_, _, pending) = into_parts(InfraError::unique_violation("User", "email").into()).await;

        let error = pending.unwrap().0;
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert!(!error.is_operational());
    }

    #[tokio::test]
    async fn test_anyhowエラーは原因の連鎖をスタックに含む() {
        let io = std::io::Error::other("disk full");
        let error = anyhow::Error::new(io).context("failed to write report");

        let (status, _, pending) = into_parts(error.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let error = pending.unwrap().0;
        assert_eq!(error.message(), "failed to write report");
        let stack = error.stack().unwrap();
        assert!(stack.contains("Caused by: disk full"), "スタック: {stack}");
    }
}
