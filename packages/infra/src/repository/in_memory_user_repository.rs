//! # インメモリ UserRepository
//!
//! `DATABASE_URL` 未設定時のローカル起動と、ユースケース・ハンドラのテストで使用する。
//! email の一意性は PostgreSQL 実装と同様にリポジトリ側でも検査し、
//! 違反時は [`InfraError::unique_violation`] を返す。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use faultline_domain::user::{Email, User, UserId};
use tokio::sync::RwLock;

use crate::{error::InfraError, repository::UserRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[tracing::instrument(skip_all, fields(user_id = %user.id()))]
    async fn insert(&self, user: &User) -> Result<(), InfraError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email() == user.email()) {
            return Err(InfraError::unique_violation("User", "email"));
        }

        users.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email() == email)
            .cloned())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, InfraError> {
        Ok(self.users.write().await.remove(id).is_some())
    }
}
