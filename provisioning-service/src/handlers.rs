//! Handler模块
//!
//! Operation failures are reported inside `data` with HTTP 200; only a
//! malformed request body is rejected with 400. Each operation runs on its
//! own task and finishes even if the client disconnects.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use common::middleware::RequestId;
use common::models::{AddonRequest, OperationKind, OperationResult};
use common::response::ApiResponse;

use crate::state::AppState;
use crate::SERVICE_NAME;

/// 开通租户数据库
#[utoipa::path(
    post,
    path = "/api/addon/provision",
    tag = "addon",
    request_body = AddonRequest,
    responses(
        (status = 200, description = "开通结果", body = ApiResponse<OperationResult>),
        (status = 400, description = "请求体无效")
    )
)]
pub async fn provision(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<AddonRequest>, JsonRejection>,
) -> Response {
    dispatch(OperationKind::Provision, state, request_id, payload).await
}

/// 回收租户数据库
#[utoipa::path(
    post,
    path = "/api/addon/deprovision",
    tag = "addon",
    request_body = AddonRequest,
    responses(
        (status = 200, description = "回收结果", body = ApiResponse<OperationResult>),
        (status = 400, description = "请求体无效")
    )
)]
pub async fn deprovision(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<AddonRequest>, JsonRejection>,
) -> Response {
    dispatch(OperationKind::Deprovision, state, request_id, payload).await
}

/// 测试管理员凭据（创建后立即删除）
#[utoipa::path(
    post,
    path = "/api/addon/test",
    tag = "addon",
    request_body = AddonRequest,
    responses(
        (status = 200, description = "测试结果", body = ApiResponse<OperationResult>),
        (status = 400, description = "请求体无效")
    )
)]
pub async fn test(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<AddonRequest>, JsonRejection>,
) -> Response {
    dispatch(OperationKind::Test, state, request_id, payload).await
}

async fn dispatch(
    kind: OperationKind,
    state: AppState,
    request_id: RequestId,
    payload: Result<Json<AddonRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            tracing::warn!(operation = %kind, error = %rejection.body_text(), "rejected request body");
            let body = ApiResponse::err("INVALID_REQUEST", rejection.body_text())
                .with_request_id(request_id.as_str());
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };

    // Own task: a client that hangs up must not cut the statement sequence
    // short or skip closing the admin session.
    let service = state.service.clone();
    let manifest = req.manifest;
    let handle = tokio::spawn(async move {
        match kind {
            OperationKind::Provision => service.provision(&manifest).await,
            OperationKind::Deprovision => service.deprovision(&manifest).await,
            OperationKind::Test => service.test(&manifest).await,
        }
    });
    let result = match handle.await {
        Ok(result) => result,
        Err(err) => {
            tracing::error!(operation = %kind, error = %err, "provisioning task did not complete");
            OperationResult::failure(format!("{kind} did not complete: {err}"))
        }
    };

    Json(ApiResponse::ok_with_service(result, SERVICE_NAME).with_request_id(request_id.as_str()))
        .into_response()
}

/// 健康检查端点
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "服务运行正常", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: state.config.service_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

/// 健康检查响应
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// 服务状态
    pub status: String,
    /// 服务名称
    pub service: String,
    /// 服务版本
    pub version: String,
    /// 当前时间戳
    pub timestamp: DateTime<Utc>,
}
