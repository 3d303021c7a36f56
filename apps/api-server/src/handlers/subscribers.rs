//! Newsletter subscription handler.

use actix_web::{HttpResponse, web};

use quill_core::services::SubscribeOutcome;
use quill_shared::ApiResponse;
use quill_shared::dto::{SubscribeRequest, SubscribeResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/subscribers
///
/// Subscribing an address twice is a success.
pub async fn subscribe(
    state: web::Data<AppState>,
    body: web::Json<SubscribeRequest>,
) -> AppResult<HttpResponse> {
    let outcome = state.store.add_subscriber(&body.email).await?;

    let response = match outcome {
        SubscribeOutcome::Created => ApiResponse::ok_with_message(
            SubscribeResponse {
                subscribed: true,
                already_subscribed: false,
            },
            "Subscribed",
        ),
        SubscribeOutcome::AlreadySubscribed => ApiResponse::ok_with_message(
            SubscribeResponse {
                subscribed: true,
                already_subscribed: true,
            },
            "Already subscribed",
        ),
    };

    Ok(HttpResponse::Created().json(response))
}
