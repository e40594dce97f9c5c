//! # 実行環境とレンダリングコンテキスト
//!
//! エラーレスポンスの形を決める実行環境（development / production）を定義する。
//!
//! ## 設計判断
//!
//! - 環境は起動時に一度だけ環境変数 `APP_ENV` から読み取る
//! - レンダラーはグローバル設定を参照せず、[`RenderContext`] を引数で受け取る
//! - 未設定の場合は [`Production`](Environment::Production) とする
//!   （スタックトレースを出さない側に倒す）
//! - 不正な値は設定エラーとして起動を止める

use strum::{Display, EnumString};

/// 実行環境を指定する環境変数名
pub const APP_ENV_VAR: &str = "APP_ENV";

/// 実行環境
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    /// 開発環境: スタックトレースをレスポンスに含め、エラーをログに出す
    Development,
    /// 本番環境: 予期しないエラーの詳細を隠蔽する
    #[default]
    Production,
}

impl Environment {
    /// `APP_ENV` の値（未設定なら `None`）から実行環境を決める
    ///
    /// 未設定の場合は [`Production`](Environment::Production) を返す。
    /// `development` / `production` 以外の値はエラー。
    pub fn resolve(value: Option<&str>) -> Result<Self, strum::ParseError> {
        value.map_or(Ok(Self::default()), str::parse)
    }

    pub fn is_development(self) -> bool {
        self == Self::Development
    }
}

/// レンダリング時に参照する環境情報
///
/// エラーレスポンスの生成に必要なのは実行環境のみ。
/// リクエストごとにコピーして渡す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderContext {
    pub mode: Environment,
}

impl RenderContext {
    pub fn new(mode: Environment) -> Self {
        Self { mode }
    }

    pub fn development() -> Self {
        Self::new(Environment::Development)
    }

    pub fn production() -> Self {
        Self::new(Environment::Production)
    }
}
