//! # リポジトリ
//!
//! ドメインエンティティの永続化を担当するリポジトリのトレイトと実装。
//!
//! - PostgreSQL 実装: `DATABASE_URL` が設定されている場合に使用
//! - インメモリ実装: ローカル起動とテストで使用

pub mod in_memory_user_repository;
pub mod user_repository;

pub use in_memory_user_repository::InMemoryUserRepository;
pub use user_repository::{PostgresUserRepository, UserRepository};
