//! # Faultline ドメイン層
//!
//! 失敗の正規化を担うドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! リクエスト処理中に発生する失敗は、発生した時点で次のどちらかとしてタグ付けされる:
//!
//! - [`Failure::Domain`]: ビジネスロジックが意図的に送出した [`DomainError`]
//! - [`Failure::Unclassified`]: それ以外の [`RawFailure`]（DB エラー、実行時エラー等）
//!
//! [`classify`] がこれを [`DomainError`] に正規化する。
//! 環境（development / production）に依存しない処理はここで完結させ、
//! レスポンスの形を決める処理は api 層のレンダラーに委ねる。
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//!   ↘     ↘
//!     shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`error`] - 正規化済みエラー [`DomainError`]
//! - [`failure`] - 正規化前の失敗 [`RawFailure`] と [`Failure`]
//! - [`classify`](mod@classify) - 分類器
//! - [`user`] - サンプルサービスのユーザーエンティティ
//!
//! ## 使用例
//!
//! ```rust
//! use faultline_domain::{DomainError, RawFailure, classify};
//! use http::StatusCode;
//!
//! // 業務エラーはそのまま通過する
//! let conflict = DomainError::conflict("resource already exists");
//! assert_eq!(classify(conflict.clone()), conflict);
//!
//! // 予期しないエラーは 500 の非 operational エラーになる
//! let error = classify(RawFailure::runtime("X is undefined"));
//! assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
//! assert!(!error.is_operational());
//! ```

pub mod classify;
pub mod error;
pub mod failure;
pub mod user;

pub use classify::classify;
pub use error::{DomainError, reason_phrase};
pub use failure::{Failure, FailureOrigin, RawFailure};
