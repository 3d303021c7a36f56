//! Admin console handlers. Everything except the session route requires [`AdminSession`].

use actix_web::{HttpResponse, web};
use serde::Serialize;
use uuid::Uuid;

use quill_core::domain::{ContentStats, Post, PostDraft, Subscriber};
use quill_core::services::{AdminConsole, save_draft};
use quill_shared::ApiResponse;
use quill_shared::dto::{DeleteAllParams, DeletedResponse, LoginRequest, SessionResponse};

use crate::middleware::auth::AdminSession;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Serialize)]
pub struct DashboardResponse {
    pub posts: Vec<Post>,
    pub subscribers: Vec<Subscriber>,
    pub stats: ContentStats,
}

/// POST /api/admin/session
pub async fn open_session(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    state.gate.check(&body.password)?;

    let token = state
        .tokens
        .issue_token()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    tracing::info!("Admin session opened");

    Ok(HttpResponse::Ok().json(ApiResponse::ok(SessionResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: u64::try_from(state.tokens.expiration_seconds()).unwrap_or(0),
    })))
}

/// GET /api/admin/dashboard
///
/// Seeds the sample content when the store is empty.
pub async fn dashboard(state: web::Data<AppState>, _session: AdminSession) -> HttpResponse {
    let console = AdminConsole::open(state.store.clone(), state.assist.clone()).await;

    HttpResponse::Ok().json(ApiResponse::ok(DashboardResponse {
        posts: console.posts().to_vec(),
        subscribers: console.subscribers().to_vec(),
        stats: console.stats(),
    }))
}

/// PUT /api/admin/posts
pub async fn save_post(
    state: web::Data<AppState>,
    _session: AdminSession,
    body: web::Json<PostDraft>,
) -> AppResult<HttpResponse> {
    let post = save_draft(&state.store, &state.assist, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// DELETE /api/admin/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    _session: AdminSession,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.store.delete_post(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/admin/posts?confirm=true
pub async fn delete_all_posts(
    state: web::Data<AppState>,
    _session: AdminSession,
    params: web::Query<DeleteAllParams>,
) -> AppResult<HttpResponse> {
    if !params.confirm {
        return Err(AppError::BadRequest(
            "Deleting all posts requires confirm=true".to_string(),
        ));
    }

    let deleted = state.store.delete_all_posts().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(DeletedResponse { deleted })))
}

/// GET /api/admin/subscribers
pub async fn list_subscribers(state: web::Data<AppState>, _session: AdminSession) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(state.store.list_subscribers().await))
}
