//! # UserRepository
//!
//! ユーザー情報の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **実行時クエリ**: `sqlx::query_as` を使い、ビルド時の DB 接続を不要にする
//! - **制約はDBに任せる**: email の一意性は `users_email_key` 制約で担保し、
//!   違反は `sqlx::Error::Database` としてそのまま返す（既知のリクエストエラー）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use faultline_domain::user::{Email, User, UserId, UserName};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザーを保存する
    ///
    /// email が重複している場合は一意制約違反のエラーを返す。
    async fn insert(&self, user: &User) -> Result<(), InfraError>;

    /// ID でユーザーを検索
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError>;

    /// メールアドレスでユーザーを検索
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError>;

    /// ユーザーを削除する
    ///
    /// # 戻り値
    ///
    /// - `Ok(true)`: 削除した
    /// - `Ok(false)`: 該当ユーザーが存在しない
    async fn delete(&self, id: &UserId) -> Result<bool, InfraError>;
}

type UserRow = (Uuid, String, String, DateTime<Utc>);

fn user_from_row((id, name, email, created_at): UserRow) -> Result<User, InfraError> {
    Ok(User::from_db(
        UserId::from_uuid(id),
        UserName::new(name).map_err(|e| InfraError::unexpected(e.to_string()))?,
        Email::new(email).map_err(|e| InfraError::unexpected(e.to_string()))?,
        created_at,
    ))
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[tracing::instrument(skip_all, fields(user_id = %user.id()))]
    async fn insert(&self, user: &User) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.name().as_str())
        .bind(user.email().as_str())
        .bind(user.created_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, fields(user_id = %id))]
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(user_from_row).transpose()
    }

    #[tracing::instrument(skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(user_from_row).transpose()
    }

    #[tracing::instrument(skip_all, fields(user_id = %id))]
    async fn delete(&self, id: &UserId) -> Result<bool, InfraError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
