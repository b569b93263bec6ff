//! 开通服务路由模块

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// 创建租户数据库开通路由
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/addon/provision", post(handlers::provision))
        .route("/api/addon/deprovision", post(handlers::deprovision))
        .route("/api/addon/test", post(handlers::test))
        .route("/api/health", get(handlers::health_check))
}
