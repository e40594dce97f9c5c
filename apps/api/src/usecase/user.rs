//! ユーザー管理ユースケース

use std::sync::Arc;

use chrono::Utc;
use faultline_domain::{
    DomainError,
    Failure,
    user::{Email, User, UserId, UserName},
};
use faultline_infra::repository::UserRepository;

/// ユーザー作成の入力
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub name:  String,
    pub email: String,
}

/// ユーザー管理ユースケース
pub struct UserUseCaseImpl {
    user_repository: Arc<dyn UserRepository>,
}

impl UserUseCaseImpl {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// ユーザーを作成する
    ///
    /// メールアドレスが登録済みの場合は 409 Conflict を返す。
    /// 検索と保存の間に同じメールアドレスが登録された場合も、保存時の一意制約違反を 409 にする。
    #[tracing::instrument(skip_all)]
    pub async fn create_user(&self, input: CreateUserInput) -> Result<User, Failure> {
        let name = UserName::new(input.name)?;
        let email = Email::new(input.email)?;

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(DomainError::conflict("resource already exists").into());
        }

        let user = User::new(name, email, Utc::now());
        self.user_repository
            .insert(&user)
            .await
            .map_err(|e| -> Failure {
                if e.is_unique_violation() {
                    DomainError::conflict("resource already exists").into()
                } else {
                    e.into()
                }
            })?;

        tracing::info!(user_id = %user.id(), "ユーザーを作成しました");
        Ok(user)
    }

    /// ユーザーを取得する
    #[tracing::instrument(skip_all, fields(user_id = %id))]
    pub async fn get_user(&self, id: &UserId) -> Result<User, Failure> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found").into())
    }

    /// ユーザーを削除する
    #[tracing::instrument(skip_all, fields(user_id = %id))]
    pub async fn delete_user(&self, id: &UserId) -> Result<(), Failure> {
        if self.user_repository.delete(id).await? {
            Ok(())
        } else {
            Err(DomainError::not_found("User not found").into())
        }
    }
}
