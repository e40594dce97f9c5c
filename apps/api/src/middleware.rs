//! # エラーパイプラインのミドルウェア
//!
//! - [`render_failures`]: [`ApiError`] が残した分類結果を、実行環境に応じて整形し直す
//! - [`handle_panic`]: ハンドラのパニックを実行時エラーとして扱う
//!
//! ## レイヤー構成
//!
//! ```text
//! TraceLayer
//!   └── render_failures   ← UnrenderedError を取り出して render
//!         └── CatchPanicLayer(handle_panic)
//!               └── Router（ハンドラ / fallback）
//! ```

use std::{any::Any, sync::Arc};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use faultline_domain::RawFailure;
use faultline_shared::RenderContext;

use crate::{
    error::{ApiError, UnrenderedError},
    render::{ErrorReporter, render},
};

/// レンダリングミドルウェアの状態
#[derive(Clone)]
pub struct RenderState {
    pub context:  RenderContext,
    pub reporter: Arc<dyn ErrorReporter>,
}

impl RenderState {
    pub fn new(context: RenderContext, reporter: Arc<dyn ErrorReporter>) -> Self {
        Self { context, reporter }
    }
}

/// 失敗レスポンスを実行環境に応じて整形する
///
/// 分類結果を持たないレスポンスはそのまま返す。
pub async fn render_failures(
    State(state): State<RenderState>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<UnrenderedError>() {
        Some(UnrenderedError(error)) => {
            render(error, state.context, state.reporter.as_ref()).into_response()
        }
        None => response,
    }
}

/// パニックを実行時エラーに変換する
///
/// `CatchPanicLayer::custom` に渡す。パニックのメッセージがそのままエラーメッセージになる。
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "handler panicked".to_string()
    };

    tracing::debug!(panic.message = %message, "ハンドラでパニックが発生しました");
    ApiError::from(RawFailure::runtime(message)).into_response()
}
