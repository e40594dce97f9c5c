//! # ユースケース層
//!
//! サンプルサービスのビジネスロジックを実装する。
//!
//! - リポジトリは `Arc<dyn Trait>` で外部から注入する
//! - 失敗は [`Failure`](faultline_domain::Failure) として返し、分類はエラーパイプラインに任せる

pub mod user;

pub use user::{CreateUserInput, UserUseCaseImpl};
