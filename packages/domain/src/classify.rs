//! # エラー分類器
//!
//! あらゆる失敗を [`DomainError`] に正規化する。
//!
//! ## ステータスの決定順
//!
//! 1. 明示的なステータス（4xx / 5xx のみ有効）
//! 2. 既知の永続化エラーなら 400 Bad Request
//! 3. それ以外は 500 Internal Server Error
//!
//! 明示的なステータスは既知の永続化エラーであっても優先する。
//! 4xx / 5xx 以外の値は「ステータスなし」として扱う。
//!
//! ## メッセージ
//!
//! 空でないメッセージがあればそれを使い、なければステータスの標準理由句を使う。
//!
//! 合成したエラーは常に `is_operational = false`。

use http::StatusCode;

use crate::{
    error::DomainError,
    failure::{Failure, RawFailure},
};

/// 失敗を [`DomainError`] に正規化する
///
/// 既に [`DomainError`] であればそのまま返す（冪等）。
/// 副作用はなく、この関数自体が失敗することはない。
pub fn classify(failure: impl Into<Failure>) -> DomainError {
    match failure.into() {
        Failure::Domain(error) => error,
        Failure::Unclassified(raw) => {
            let status = resolve_status(&raw);
            let message = raw.message().unwrap_or_default().to_string();
            DomainError::defect(status, message, raw.into_stack())
        }
    }
}

fn resolve_status(raw: &RawFailure) -> StatusCode {
    let explicit = raw
        .status()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .filter(|status| status.is_client_error() || status.is_server_error());

    match explicit {
        Some(status) => status,
        None if raw.is_known_persistence() => StatusCode::BAD_REQUEST,
        None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
