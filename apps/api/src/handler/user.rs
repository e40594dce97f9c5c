//! # ユーザーハンドラ
//!
//! エラーパイプラインを通るサンプルのユーザー API。
//!
//! ## エンドポイント
//!
//! - `POST /v1/users` - ユーザーを作成（201）
//! - `GET /v1/users/{id}` - ユーザーを取得
//! - `DELETE /v1/users/{id}` - ユーザーを削除（204）

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use faultline_domain::user::{User, UserId};
use faultline_shared::ApiResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::ApiError,
    extract::{PathParam, ValidatedJson},
    usecase::{CreateUserInput, UserUseCaseImpl},
};

/// ユーザー API の共有状態
pub struct UserState {
    pub usecase: UserUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// ユーザー作成リクエスト
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub name:  String,
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
}

/// ユーザー情報レスポンス
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id:         Uuid,
    pub name:       String,
    pub email:      String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id:         *user.id().as_uuid(),
            name:       user.name().as_str().to_string(),
            email:      user.email().as_str().to_string(),
            created_at: user.created_at(),
        }
    }
}

// --- ハンドラ ---

/// POST /v1/users
pub async fn create_user(
    State(state): State<Arc<UserState>>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .usecase
        .create_user(CreateUserInput {
            name:  req.name,
            email: req.email,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(UserResponse::from(&user))),
    ))
}

/// GET /v1/users/{id}
pub async fn get_user(
    State(state): State<Arc<UserState>>,
    PathParam(id): PathParam<String>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let id = UserId::parse(&id)?;
    let user = state.usecase.get_user(&id).await?;

    Ok(Json(ApiResponse::new(UserResponse::from(&user))))
}

/// DELETE /v1/users/{id}
pub async fn delete_user(
    State(state): State<Arc<UserState>>,
    PathParam(id): PathParam<String>,
) -> Result<StatusCode, ApiError> {
    let id = UserId::parse(&id)?;
    state.usecase.delete_user(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        routing::{get, post},
    };
    use faultline_infra::repository::InMemoryUserRepository;
    use http::{Request, header};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        let state = Arc::new(UserState {
            usecase: UserUseCaseImpl::new(Arc::new(InMemoryUserRepository::new())),
        });
        Router::new()
            .route("/v1/users", post(create_user))
            .route("/v1/users/{id}", get(get_user).delete(delete_user))
            .with_state(state)
    }

    fn post_json(body: Value) -> Request<Body> {
        Request::post("/v1/users")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_create_userは201とdataを返す() {
        let response = app()
            .oneshot(post_json(json!({"name": "Alice", "email": "alice@example.com"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["data"]["name"], "Alice");
        assert_eq!(body["data"]["email"], "alice@example.com");
    }

    #[tokio::test]
    async fn test_作成したユーザーを取得して削除できる() {
        let app = app();
        let created = body_json(
            app.clone()
                .oneshot(post_json(json!({"name": "Alice", "email": "alice@example.com"})))
                .await
                .unwrap(),
        )
        .await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let get_response = app
            .clone()
            .oneshot(
                Request::get(format!("/v1/users/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(get_response.status(), StatusCode::OK);
        assert_eq!(body_json(get_response).await, created);

        let delete_response = app
            .oneshot(
                Request::delete(format!("/v1/users/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(delete_response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_不正なidはミドルウェアなしでも本番向けの400を返す() {
        let response = app()
            .oneshot(
                Request::get("/v1/users/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"code": 400, "message": "invalid user id: not-a-uuid"})
        );
    }
}
