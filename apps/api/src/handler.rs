//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックはユースケース層に委譲
//! - 失敗は [`ApiError`](crate::error::ApiError) で返し、整形はエラーパイプラインに任せる
//!
//! ## モジュール構成
//!
//! ```text
//! handler.rs          # 親モジュール（re-export）
//! └── handler/
//!     ├── fallback.rs # 未定義ルート / 未許可メソッド
//!     ├── health.rs   # ヘルスチェック
//!     └── user.rs     # ユーザー API
//! ```

pub mod fallback;
pub mod health;
pub mod user;

pub use fallback::{method_not_allowed, not_found};
pub use health::health_check;
pub use user::{UserState, create_user, delete_user, get_user};
