//! # Faultline API サーバー
//!
//! エラーパイプラインを備えたサンプルのユーザー API を起動する。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `API_PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `APP_ENV` | No | `development` / `production`（デフォルト: `production`） |
//! | `DATABASE_URL` | No | PostgreSQL 接続 URL。未設定ならインメモリで動作する |
//! | `LOG_FORMAT` | No | `json` / `pretty` |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（スタックトレースをレスポンスに含める）
//! APP_ENV=development cargo run -p faultline-api
//!
//! # 本番環境
//! DATABASE_URL=postgres://... cargo run -p faultline-api --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use faultline_api::{
    app_builder::build_app,
    config::ApiConfig,
    handler::UserState,
    middleware::RenderState,
    render::TracingErrorReporter,
    usecase::UserUseCaseImpl,
};
use faultline_infra::{
    db,
    repository::{InMemoryUserRepository, PostgresUserRepository, UserRepository},
};
use faultline_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(&TracingConfig::from_env("faultline-api"));
    let _tracing_guard = tracing::info_span!("app", service = "faultline-api").entered();

    let config = ApiConfig::from_env().expect("設定の読み込みに失敗しました");
    tracing::info!(environment = %config.environment, "API サーバーを起動します: {}", config.bind_addr());

    let user_repository: Arc<dyn UserRepository> = match &config.database_url {
        Some(url) => {
            let pool = db::create_pool(url)
                .await
                .expect("データベース接続に失敗しました");
            db::run_migrations(&pool)
                .await
                .expect("マイグレーションの実行に失敗しました");
            tracing::info!("データベースに接続しました");
            Arc::new(PostgresUserRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL が未設定のため、インメモリリポジトリで起動します");
            Arc::new(InMemoryUserRepository::new())
        }
    };

    let user_state = Arc::new(UserState {
        usecase: UserUseCaseImpl::new(user_repository),
    });
    let render_state = RenderState::new(config.render_context(), Arc::new(TracingErrorReporter));

    let app = build_app(user_state, render_state);

    let addr: SocketAddr = config
        .bind_addr()
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("API サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
