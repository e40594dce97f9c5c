//! # リクエスト検証付きエクストラクタ
//!
//! axum 標準のエクストラクタを包み、リジェクションを [`ApiError`] として返す。
//! これにより、フレームワークが生成する失敗もエラーパイプラインを通る。
//!
//! - [`ValidatedJson`]: JSON ボディのデシリアライズと `validator` による検証
//! - [`PathParam`]: パスパラメータの抽出
//!
//! リジェクションはステータスを持つ [`RawFailure`]（非 operational。本番では 500 に隠蔽される）になる。
//! 検証に失敗した場合は operational な 400 [`DomainError`] になり、
//! メッセージはフィールド名順に `"field: message"` を `", "` で連結したもの。

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{StatusCode, request::Parts},
};
use faultline_domain::{DomainError, RawFailure};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::ApiError;

/// 検証済みの JSON ボディ
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| rejected(rejection.status(), rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| DomainError::bad_request(validation_message(&errors)))?;

        Ok(Self(value))
    }
}

/// リジェクションを [`ApiError`] として返すパスパラメータ
#[derive(Debug, Clone)]
pub struct PathParam<T>(pub T);

impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| rejected(rejection.status(), rejection.body_text()))?;

        Ok(Self(value))
    }
}

/// axum のリジェクションを未分類の失敗にする
fn rejected(status: StatusCode, body_text: String) -> RawFailure {
    RawFailure::runtime(body_text).with_status(status.as_u16())
}

/// 検証エラーを 1 行のメッセージにまとめる
fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let detail = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                format!("{field}: {detail}")
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}
