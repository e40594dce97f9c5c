//! # 正規化済みエラー
//!
//! リクエスト処理の失敗を表現する唯一の正規形 [`DomainError`] を定義する。
//!
//! ## 不変条件
//!
//! - `status` は常に 4xx / 5xx の HTTP ステータス
//! - `message` は空にならない（空の場合はステータスの標準理由句で補う）
//!
//! ## operational と defect
//!
//! | 種別 | `is_operational` | 生成元 | production での扱い |
//! |------|------------------|--------|---------------------|
//! | operational | `true` | ビジネスロジックが意図的に送出 | そのまま返す |
//! | defect | `false` | 分類器が [`RawFailure`](crate::RawFailure) から合成 | 500 に置き換える |
//!
//! ## スタック
//!
//! 生成時点の [`SpanTrace`] を文字列化して保持する。
//! `tracing_error::ErrorLayer` が登録されていない場合やスパン外では `None` になる。

use http::StatusCode;
use thiserror::Error;
use tracing_error::SpanTrace;

/// ステータスコードの標準理由句を返す
///
/// 理由句が定義されていないコードは `"Unknown Error"` とする。
pub fn reason_phrase(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown Error")
}

/// 現在のスパン経路を文字列として捕捉する
///
/// スパンが 1 つもない場合は `None`。
pub(crate) fn capture_stack() -> Option<String> {
    let rendered = SpanTrace::capture().to_string();
    (!rendered.trim().is_empty()).then_some(rendered)
}

/// 正規化済みのエラー
///
/// レンダラーはこの型だけを受け取る。
/// 生成後にフィールドを書き換える手段は [`with_stack`](Self::with_stack) のみ。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DomainError {
    status:         StatusCode,
    message:        String,
    is_operational: bool,
    stack:          Option<String>,
}

impl DomainError {
    /// operational なエラーを作成する
    ///
    /// ビジネスロジックが意図的に送出するエラー。
    /// 4xx / 5xx 以外のステータスは 500 に丸める。
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self::build(status, message.into(), true, capture_stack())
    }

    /// defect（予期しないエラー）を作成する
    ///
    /// 通常は [`classify`](crate::classify) が使う。
    pub fn defect(status: StatusCode, message: impl Into<String>, stack: Option<String>) -> Self {
        Self::build(status, message.into(), false, stack)
    }

    fn build(status: StatusCode, message: String, is_operational: bool, stack: Option<String>) -> Self {
        let status = if status.is_client_error() || status.is_server_error() {
            status
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let message = if message.trim().is_empty() {
            reason_phrase(status).to_string()
        } else {
            message
        };

        Self {
            status,
            message,
            is_operational,
            stack,
        }
    }

    /// 400 Bad Request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 409 Conflict
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// スタックを差し替える
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_operational(&self) -> bool {
        self.is_operational
    }

    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    /// 空でないスタックを返す
    ///
    /// スタックを持たない場合は `"<status>: <message>"` の 1 行で代用する。
    pub fn stack_or_summary(&self) -> String {
        match self.stack.as_deref() {
            Some(stack) if !stack.trim().is_empty() => stack.to_string(),
            _ => format!("{}: {}", self.status, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    /// テスト用に ErrorLayer 付き subscriber を設定する
    fn with_error_layer(f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
        let _guard = tracing::subscriber::set_default(subscriber);
        f();
    }

    #[test]
    fn test_newはoperationalなエラーを作る() {
        let error = DomainError::new(StatusCode::CONFLICT, "resource already exists");

        assert_eq!(error.status(), StatusCode::CONFLICT);
        assert_eq!(error.message(), "resource already exists");
        assert!(error.is_operational());
    }

    #[test]
    fn test_defectは非operationalなエラーを作る() {
        let error = DomainError::defect(
            StatusCode::INTERNAL_SERVER_ERROR,
            "X is undefined",
            Some("trace".to_string()),
        );

        assert!(!error.is_operational());
        assert_eq!(error.stack(), Some("trace"));
    }

    #[rstest]
    #[case(StatusCode::NOT_FOUND, "Not Found")]
    #[case(StatusCode::CONFLICT, "Conflict")]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")]
    fn test_空メッセージは標準理由句で補われる(
        #[case] status: StatusCode,
        #[case] expected: &str,
    ) {
        assert_eq!(DomainError::new(status, "").message(), expected);
        assert_eq!(DomainError::new(status, "   ").message(), expected);
    }

    #[rstest]
    #[case(StatusCode::OK)]
    #[case(StatusCode::CREATED)]
    #[case(StatusCode::MOVED_PERMANENTLY)]
    fn test_エラー以外のステータスは500に丸められる(#[case] status: StatusCode) {
        let error = DomainError::new(status, "");

        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message(), "Internal Server Error");
    }

    #[test]
    fn test_便利コンストラクタのステータスが正しい() {
        assert_eq!(DomainError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(DomainError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(DomainError::conflict("x").status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_displayはメッセージのみを出力する() {
        let error = DomainError::not_found("User not found");
        assert_eq!(error.to_string(), "User not found");
    }

    #[test]
    fn test_スパン内で生成するとスタックにスパン名が含まれる() {
        with_error_layer(|| {
            let span = tracing::info_span!("create_user");
            let _enter = span.enter();

            let error = DomainError::conflict("resource already exists");

            let stack = error.stack().expect("スタックが捕捉されること");
            assert!(stack.contains("create_user"), "スタック: {stack}");
        });
    }

    #[test]
    fn test_スパン外ではスタックを持たない() {
        let error = DomainError::conflict("resource already exists");
        assert_eq!(error.stack(), None);
    }

    #[test]
    fn test_stack_or_summary_スタックがなければ要約を返す() {
        let error = DomainError::conflict("resource already exists");
        assert_eq!(
            error.stack_or_summary(),
            "409 Conflict: resource already exists"
        );
    }

    #[test]
    fn test_stack_or_summary_スタックがあればそのまま返す() {
        let error = DomainError::conflict("dup").with_stack("0: faultline::create_user");
        assert_eq!(error.stack_or_summary(), "0: faultline::create_user");
    }

    #[test]
    fn test_reason_phraseは未定義コードでフォールバックする() {
        let status = StatusCode::from_u16(599).unwrap();
        assert_eq!(reason_phrase(status), "Unknown Error");
    }
}
