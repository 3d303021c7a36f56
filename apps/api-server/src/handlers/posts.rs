//! Public catalog handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::{CatalogQuery, CategoryFilter};
use quill_shared::ApiResponse;
use quill_shared::dto::{CatalogParams, CategoryOption};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/posts?category=&q=
pub async fn list_posts(
    state: web::Data<AppState>,
    params: web::Query<CatalogParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let category: CategoryFilter = params.category.as_deref().unwrap_or_default().parse()?;
    let query = CatalogQuery::new(category, params.q.unwrap_or_default());

    let posts = state.catalog.browse(&query).await;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/home
pub async fn home(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(state.catalog.home().await))
}

/// GET /api/categories
pub async fn categories() -> HttpResponse {
    let options: Vec<CategoryOption> = CategoryFilter::choices()
        .into_iter()
        .map(|filter| CategoryOption {
            value: match filter {
                CategoryFilter::All => "all".to_string(),
                CategoryFilter::Only(category) => category.as_str().to_string(),
            },
            label: filter.label().to_string(),
        })
        .collect();

    HttpResponse::Ok().json(ApiResponse::ok(options))
}

/// GET /api/posts/{slug}
pub async fn post_detail(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = slug.into_inner();
    let detail = state
        .detail
        .load(&slug)
        .await
        .ok_or_else(|| AppError::NotFound(format!("No post with slug '{slug}'")))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(detail)))
}
