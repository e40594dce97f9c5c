//! # 正規化前の失敗
//!
//! リクエスト処理中に送出されうる失敗を、送出時点でタグ付けする。
//!
//! - [`Failure::Domain`]: 正規化済みの [`DomainError`]
//! - [`Failure::Unclassified`]: それ以外の [`RawFailure`]
//!
//! 実行時の型判定を行わず、どちらの経路で送出されたかを型で区別する。

use derive_more::From;

use crate::error::{DomainError, capture_stack};

/// 失敗の発生源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureOrigin {
    /// 任意の実行時エラー（ステータス情報を持たない）
    #[default]
    Runtime,
    /// 永続化層が報告した既知のリクエストエラー（制約違反・クエリ違反など）
    KnownPersistence,
}

/// 正規化前の失敗
///
/// 明示的なステータス・メッセージ・スタックはいずれも任意。
/// 不正な値を持っていても [`classify`](crate::classify) は失敗しない。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawFailure {
    status:  Option<u16>,
    message: Option<String>,
    origin:  FailureOrigin,
    stack:   Option<String>,
}

impl RawFailure {
    /// 実行時エラーを作成する（現在のスパン経路をスタックとして捕捉）
    pub fn runtime(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            stack: capture_stack(),
            ..Self::default()
        }
    }

    /// 永続化層の既知リクエストエラーを作成する
    pub fn known_persistence(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            origin: FailureOrigin::KnownPersistence,
            stack: capture_stack(),
            ..Self::default()
        }
    }

    /// 任意の `std::error::Error` から実行時エラーを作成する
    ///
    /// `source()` の連鎖を `Caused by:` 行としてスタックに残す。
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        let mut lines = vec![error.to_string()];
        let mut source = error.source();
        while let Some(cause) = source {
            lines.push(format!("Caused by: {cause}"));
            source = cause.source();
        }
        if let Some(trace) = capture_stack() {
            lines.push(trace);
        }

        Self {
            message: Some(error.to_string()),
            stack: Some(lines.join("\n")),
            ..Self::default()
        }
    }

    /// 明示的な HTTP ステータスを付与する
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_origin(mut self, origin: FailureOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn origin(&self) -> FailureOrigin {
        self.origin
    }

    pub fn is_known_persistence(&self) -> bool {
        self.origin == FailureOrigin::KnownPersistence
    }

    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    pub(crate) fn into_stack(self) -> Option<String> {
        self.stack
    }
}

/// パイプラインを流れる失敗
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum Failure {
    /// ビジネスロジックが送出した正規化済みエラー
    Domain(DomainError),
    /// 分類器による正規化が必要な失敗
    Unclassified(RawFailure),
}
