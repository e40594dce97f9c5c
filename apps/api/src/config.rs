//! # アプリケーション設定
//!
//! 環境変数からアプリケーション設定を読み込む。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `API_HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `API_PORT` | No | `3000` | ポート番号 |
//! | `APP_ENV` | No | `production` | 実行環境（development/production） |
//! | `DATABASE_URL` | No | - | PostgreSQL 接続 URL。未設定ならインメモリで動作する |
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use faultline_api::config::ApiConfig;
//!
//! dotenvy::dotenv().ok();
//!
//! let config = ApiConfig::from_env().expect("設定の読み込みに失敗しました");
//! println!("サーバー: {}:{}", config.host, config.port);
//! ```

use std::env;

use faultline_shared::{Environment, RenderContext, environment::APP_ENV_VAR};
use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API_PORT が不正です: {0}")]
    InvalidPort(String),

    #[error("APP_ENV が不正です（development または production）: {0}")]
    InvalidEnvironment(String),
}

/// API サーバーの設定
///
/// アプリケーション起動時に一度だけ構築する。
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// 実行環境
    pub environment:  Environment,
    /// PostgreSQL 接続 URL
    pub database_url: Option<String>,
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を読み込む
    ///
    /// 空文字列の値は未設定として扱う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match get("API_PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(value.clone()))?,
            None => 3000,
        };

        let app_env = get(APP_ENV_VAR);
        let environment = Environment::resolve(app_env.as_deref().map(str::trim))
            .map_err(|_| ConfigError::InvalidEnvironment(app_env.unwrap_or_default()))?;

        Ok(Self {
            host: get("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            environment,
            database_url: get("DATABASE_URL"),
        })
    }

    /// レンダラーに渡すコンテキスト
    pub fn render_context(&self) -> RenderContext {
        RenderContext::new(self.environment)
    }

    /// バインドアドレス（`host:port`）
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
