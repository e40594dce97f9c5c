//! # ユーザー
//!
//! サンプルサービスで扱うユーザーエンティティと値オブジェクトを定義する。
//!
//! 値オブジェクトの生成に失敗した場合は 400 の operational な
//! [`DomainError`] を返す。

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::DomainError;

/// ユーザー ID（一意識別子）
///
/// UUID v7 を使用し、生成順にソート可能。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct UserId(Uuid);

impl UserId {
    /// 新しいユーザー ID を生成する
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// 既存の UUID からユーザー ID を作成する
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// パスパラメータなどの文字列からユーザー ID を作成する
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| DomainError::bad_request(format!("invalid user id: {value}")))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// メールアドレス（値オブジェクト）
///
/// 比較のため小文字に正規化して保持する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - `local@domain` の形式
    /// - 最大 255 文字
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_lowercase();

        if value.is_empty() {
            return Err(DomainError::bad_request("email is required"));
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::bad_request("email must be a valid email"));
        };

        if local.is_empty() || domain.is_empty() {
            return Err(DomainError::bad_request("email must be a valid email"));
        }

        if value.len() > 255 {
            return Err(DomainError::bad_request(
                "email must be at most 255 characters",
            ));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// ユーザー名（値オブジェクト）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct UserName(String);

impl UserName {
    /// ユーザー名を作成する（前後の空白は除去、1〜100 文字）
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::bad_request("name is required"));
        }

        if value.chars().count() > 100 {
            return Err(DomainError::bad_request(
                "name must be at most 100 characters",
            ));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// ユーザーエンティティ
///
/// # 不変条件
///
/// - `email` はシステム内で一意（永続化層の一意制約でも担保）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id:         UserId,
    name:       UserName,
    email:      Email,
    created_at: DateTime<Utc>,
}

impl User {
    /// 新規ユーザーを作成する
    pub fn new(name: UserName, email: Email, now: DateTime<Utc>) -> Self {
        Self {
            id: UserId::new(),
            name,
            email,
            created_at: now,
        }
    }

    /// 永続化層から復元する
    pub fn from_db(id: UserId, name: UserName, email: Email, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            email,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
