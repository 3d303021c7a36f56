//! Writing assistant handlers.

use actix_web::{HttpResponse, web};

use quill_shared::ApiResponse;
use quill_shared::dto::{AssistRequest, AssistResponse};

use crate::middleware::auth::AdminSession;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/admin/assist/summary
pub async fn summarize(
    state: web::Data<AppState>,
    _session: AdminSession,
    body: web::Json<AssistRequest>,
) -> AppResult<HttpResponse> {
    let summary = state.assist.summarize(&body.content).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(AssistResponse {
        text: summary,
        assisted: true,
    })))
}

/// POST /api/admin/assist/grammar
///
/// Never fails on assistant errors; the original text comes back unassisted.
pub async fn fix_grammar(
    state: web::Data<AppState>,
    _session: AdminSession,
    body: web::Json<AssistRequest>,
) -> HttpResponse {
    let content = body.into_inner().content;

    let response = match state.assist.fix_grammar(&content).await {
        Ok(text) => ApiResponse::ok(AssistResponse {
            text,
            assisted: true,
        }),
        Err(e) => {
            tracing::warn!(error = %e, "Grammar fix failed, returning original text");
            ApiResponse::ok_with_message(
                AssistResponse {
                    text: content,
                    assisted: false,
                },
                e.to_string(),
            )
        }
    };

    HttpResponse::Ok().json(response)
}
