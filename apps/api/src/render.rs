//! # エラーレスポンスのレンダリング
//!
//! 正規化済みの [`DomainError`] を、実行環境に応じたレスポンスに変換する。
//!
//! ## ルール
//!
//! | 実行環境 | operational | ステータス | message | stack | ログ |
//! |----------|-------------|------------|---------|-------|------|
//! | production | true | そのまま | そのまま | なし | なし |
//! | production | false | 500 | `Internal Server Error` | なし | なし |
//! | development | true | そのまま | そのまま | あり | 1 回 |
//! | development | false | そのまま | そのまま | あり | 1 回 |
//!
//! ボディの `code` は常にステータス行と同じ値になる。
//!
//! ## ロギング
//!
//! development ではエラーを [`ErrorReporter`] に 1 回だけ渡す。
//! production ではレンダラーはログを出さない（リクエスト単位の記録は `TraceLayer` が担う）。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use faultline_domain::{DomainError, reason_phrase};
use faultline_shared::{ErrorBody, RenderContext};

/// エラーの報告先
///
/// development でのみ呼ばれる。テストでは記録用の実装に差し替える。
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &DomainError);
}

/// `tracing` にエラーを出力する報告先
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, error: &DomainError) {
        tracing::error!(
            error.status = error.status().as_u16(),
            error.operational = error.is_operational(),
            error.stack = %error.stack_or_summary(),
            "{}",
            error.message()
        );
    }
}

/// レンダリング結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedError {
    pub status: StatusCode,
    pub body:   ErrorBody,
}

impl IntoResponse for RenderedError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// エラーをレスポンスに変換する
///
/// development ではレスポンスの生成前に `reporter` へ 1 回だけ報告する。
pub fn render(error: DomainError, ctx: RenderContext, reporter: &dyn ErrorReporter) -> RenderedError {
    if ctx.mode.is_development() {
        reporter.report(&error);
    }
    compose(&error, ctx)
}

/// 報告を伴わずにレスポンスの形だけを決める
pub(crate) fn compose(error: &DomainError, ctx: RenderContext) -> RenderedError {
    if ctx.mode.is_development() {
        let status = error.status();
        return RenderedError {
            status,
            body: ErrorBody::new(status.as_u16(), error.message())
                .with_stack(error.stack_or_summary()),
        };
    }

    let status = if error.is_operational() {
        error.status()
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    let message = if error.is_operational() {
        error.message()
    } else {
        reason_phrase(StatusCode::INTERNAL_SERVER_ERROR)
    };

    RenderedError {
        status,
        body: ErrorBody::new(status.as_u16(), message),
    }
}
