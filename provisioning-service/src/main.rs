//! PostgreSQL 租户数据库开通服务
//!
//! 为托管平台提供租户级数据库生命周期管理：
//! - Provision：创建登录用户与数据库并授权
//! - Deprovision：删除数据库与登录用户
//! - Test：完整执行一次创建与删除，用于验证管理员凭据

mod handlers;
mod oplog;
mod postgres;
mod reporter;
mod routes;
mod service;
mod state;
mod workflow;

use anyhow::Context;
use axum::{middleware, routing::get, Json, Router};
use common::config::AppConfig;
use common::middleware::request_id::request_id_middleware;
use state::AppState;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;

pub(crate) const SERVICE_NAME: &str = "provisioning-service";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "租户数据库开通服务 API",
        version = "0.1.0",
        description = "PostgreSQL 租户数据库开通/回收微服务"
    ),
    paths(
        handlers::provision,
        handlers::deprovision,
        handlers::test,
        handlers::health_check,
    ),
    components(schemas(
        common::models::AddonRequest,
        common::models::AddonManifest,
        common::models::AddonProperty,
        common::models::OperationResult,
        handlers::HealthResponse,
    )),
    tags(
        (name = "addon", description = "租户数据库开通端点"),
        (name = "health", description = "健康检查端点")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志追踪
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // 加载配置
    let config = AppConfig::load_with_service(SERVICE_NAME);

    let state = AppState::new(config.clone());
    let app = create_router(state);

    // 启动服务
    let addr = format!("{}:{}", config.host, config.port);
    info!(
        service = SERVICE_NAME,
        address = %addr,
        connect_timeout_secs = config.connect_timeout_secs,
        "启动服务"
    );

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server terminated")?;
    Ok(())
}

pub(crate) fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::router())
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
