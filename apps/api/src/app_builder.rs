//! # アプリケーション構築
//!
//! ルーター定義とエラーパイプラインのレイヤー構成を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{
    handler::{
        UserState,
        create_user,
        delete_user,
        get_user,
        health_check,
        method_not_allowed,
        not_found,
    },
    middleware::{RenderState, handle_panic, render_failures},
};

/// ルーターを構築する
pub fn build_app(user_state: Arc<UserState>, render_state: RenderState) -> Router {
    let routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/users", post(create_user))
        .route("/v1/users/{id}", get(get_user).delete(delete_user))
        .with_state(user_state);

    with_error_pipeline(routes, render_state)
}

/// 任意のルーターにエラーパイプラインを適用する
///
/// 未定義ルートの 404、未許可メソッドの 405、パニックの捕捉、実行環境に応じた整形を追加する。
/// 405 のフォールバックは登録済みのルートにのみ効くため、ルート定義の後に呼ぶ。
pub fn with_error_pipeline(routes: Router, render_state: RenderState) -> Router {
    routes
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(from_fn_with_state(render_state, render_failures))
        .layer(TraceLayer::new_for_http())
}
