//! # インフラ層エラー定義
//!
//! 永続化層との通信で発生するエラーを表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別
//!
//! `From<sqlx::Error>` や convenience constructor でエラーを生成すると、
//! その時点のスパン情報が自動的にキャプチャされる。
//!
//! ## 既知のリクエストエラー
//!
//! [`is_known_request_error`](InfraError::is_known_request_error) が `true` の
//! エラーは、クエリや制約に対する違反（＝リクエスト内容に起因する失敗）を表す。
//! [`Failure`] へ変換すると [`FailureOrigin::KnownPersistence`] が付き、
//! 分類器は 400 Bad Request を割り当てる。
//! 接続断やプールのタイムアウトなどは通常の実行時エラー（500）として扱う。

use std::fmt;

use derive_more::Display;
use faultline_domain::{Failure, FailureOrigin, RawFailure};
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// エラー種別（[`InfraErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// データベースエラー
    ///
    /// SQL クエリの実行失敗、接続エラー、制約違反など。
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    /// 一意制約違反
    ///
    /// インメモリ実装など、sqlx を経由しない永続化で検出した重複。
    #[error("一意制約違反: {entity}.{field}")]
    UniqueViolation {
        /// エンティティ名（例: "User"）
        entity: String,
        /// 重複したフィールド名
        field:  String,
    },

    /// 予期しないエラー
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

// ===== InfraError のメソッド =====

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// クエリや制約への違反として既知のエラーか
    pub fn is_known_request_error(&self) -> bool {
        match &self.kind {
            InfraErrorKind::Database(source) => matches!(
                source,
                sqlx::Error::Database(_)
                    | sqlx::Error::RowNotFound
                    | sqlx::Error::TypeNotFound { .. }
                    | sqlx::Error::ColumnIndexOutOfBounds { .. }
                    | sqlx::Error::ColumnNotFound(_)
                    | sqlx::Error::ColumnDecode { .. }
            ),
            InfraErrorKind::UniqueViolation { .. } => true,
            InfraErrorKind::Unexpected(_) => false,
        }
    }

    /// 一意制約違反か（DB が報告したものを含む）
    pub fn is_unique_violation(&self) -> bool {
        match &self.kind {
            InfraErrorKind::UniqueViolation { .. } => true,
            InfraErrorKind::Database(sqlx::Error::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }

    // ===== Convenience constructors =====

    /// 一意制約違反エラーを生成する
    pub fn unique_violation(entity: impl Into<String>, field: impl Into<String>) -> Self {
        Self::from_kind(InfraErrorKind::UniqueViolation {
            entity: entity.into(),
            field:  field.into(),
        })
    }

    /// 予期しないエラーを生成する
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::from_kind(InfraErrorKind::Unexpected(msg.into()))
    }

    fn from_kind(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        Self::from_kind(InfraErrorKind::Database(source))
    }
}

// ===== Failure への変換 =====

impl From<InfraError> for Failure {
    /// 未分類の失敗として引き渡す
    ///
    /// メッセージは表示文字列、スタックはエラー生成時の SpanTrace。
    fn from(error: InfraError) -> Self {
        let origin = if error.is_known_request_error() {
            FailureOrigin::KnownPersistence
        } else {
            FailureOrigin::Runtime
        };

        let mut raw = RawFailure::default()
            .with_message(error.to_string())
            .with_origin(origin);

        let trace = error.span_trace().to_string();
        if !trace.trim().is_empty() {
            raw = raw.with_stack(trace);
        }

        Failure::Unclassified(raw)
    }
}

#[cfg(test)]
mod tests {
    use faultline_domain::classify;
    use http::StatusCode;
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

    // ===== SpanTrace のテスト =====

    #[test]
    fn test_from_sqlx_errorでspan_traceがキャプチャされる() {
        with_error_layer(|| {
            let span = tracing::info_span!("test_repo", user_id = "U-001");
            let _enter = span.enter();

            let err: InfraError = sqlx::Error::RowNotFound.into();

            assert!(matches!(err.kind(), InfraErrorKind::Database(_)));
            let trace_str = format!("{}", err.span_trace());
            assert!(
                trace_str.contains("test_repo"),
                "SpanTrace がスパン名を含むこと: {trace_str}",
            );
        });
    }

    #[test]
    fn test_unique_violationでspan_traceがキャプチャされる() {
        with_error_layer(|| {
            let span = tracing::info_span!("test_insert");
            let _enter = span.enter();

            let err = InfraError::unique_violation("User", "email");

            assert!(matches!(
                err.kind(),
                InfraErrorKind::UniqueViolation { entity, field }
                    if entity == "User" && field == "email"
            ));
            assert!(format!("{}", err.span_trace()).contains("test_insert"));
        });
    }

    // ===== 既知のリクエストエラー判定 =====

    #[rstest]
    #[case(InfraError::from(sqlx::Error::RowNotFound), true)]
    #[case(InfraError::from(sqlx::Error::ColumnNotFound("email".into())), true)]
    #[case(InfraError::unique_violation("User", "email"), true)]
    #[case(InfraError::from(sqlx::Error::PoolTimedOut), false)]
    #[case(InfraError::from(sqlx::Error::PoolClosed), false)]
    #[case(InfraError::unexpected("broken row"), false)]
    fn test_is_known_request_error(#[case] err: InfraError, #[case] expected: bool) {
        assert_eq!(err.is_known_request_error(), expected);
    }

    #[test]
    fn test_is_unique_violation() {
        assert!(InfraError::unique_violation("User", "email").is_unique_violation());
        assert!(!InfraError::unexpected("broken row").is_unique_violation());
        assert!(!InfraError::from(sqlx::Error::RowNotFound).is_unique_violation());
    }

    // ===== Display / source =====

    #[test]
    fn test_displayがinfra_error_kindのメッセージを出力する() {
        let err = InfraError::unique_violation("User", "email");
        assert_eq!(format!("{err}"), "一意制約違反: User.email");
    }

    #[test]
    fn test_sourceがinfra_error_kindに委譲する() {
        use std::error::Error;

        let err: InfraError = sqlx::Error::RowNotFound.into();
        assert!(err.source().is_some());
    }

    // ===== Failure への変換 =====

    #[test]
    fn test_既知のリクエストエラーは400の非operationalに分類される() {
        let failure: Failure = InfraError::unique_violation("User", "email").into();
        let error = classify(failure);

        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.message(), "一意制約違反: User.email");
        assert!(!error.is_operational());
    }

    #[test]
    fn test_接続系のエラーは500に分類される() {
        let failure: Failure = InfraError::from(sqlx::Error::PoolTimedOut).into();
        let error = classify(failure);

        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!error.is_operational());
    }

    #[test]
    fn test_変換時にspan_traceがスタックとして引き継がれる() {
        with_error_layer(|| {
            let err = {
                let span = tracing::info_span!("find_user");
                let _enter = span.enter();
                InfraError::unexpected("broken row")
            };

            let Failure::Unclassified(raw) = Failure::from(err) else {
                panic!("Unclassified になること");
            };
            let stack = raw.stack().expect("スタックが設定されること");
            assert!(stack.contains("find_user"), "スタック: {stack}");
        });
    }

    #[test]
    fn test_スパン外で生成したエラーはスタックを持たない() {
        let Failure::Unclassified(raw) = Failure::from(InfraError::unexpected("x")) else {
            panic!("Unclassified になること");
        };
        assert_eq!(raw.stack(), None);
    }
}
