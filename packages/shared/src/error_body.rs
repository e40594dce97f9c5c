//! # エラーレスポンスボディ
//!
//! 全エンドポイントで共通のエラーレスポンス形式を提供する。
//!
//! ```text
//! { "code": <integer>, "message": <string>, "stack"?: <string> }
//! ```
//!
//! ## 設計
//!
//! - `ErrorBody` は出力専用の純粋なデータ構造（`Serialize` のみ）
//! - axum の `IntoResponse` 変換は api クレートの責務（shared に axum 依存を入れない）
//! - `stack` は development 環境でのみ設定される。`None` の場合はフィールドごと出力しない

use serde::Serialize;

/// エラーレスポンスボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// HTTP ステータスコード（ステータス行と同じ値）
    pub code:    u16,
    /// クライアントに見せるメッセージ
    pub message: String,
    /// 診断用のトレース（development のみ）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack:   Option<String>,
}

impl ErrorBody {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            stack: None,
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}
