//! HTTP handlers and route configuration.

mod admin;
mod assist;
mod health;
mod posts;
mod subscribers;


use actix_web::web;

use crate::middleware::rate_limit::RateLimitMiddleware;
use crate::state::AppState;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/home", web::get().to(posts::home))
            .route("/categories", web::get().to(posts::categories))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("/{slug}", web::get().to(posts::post_detail)),
            )
            .service(
                web::resource("/subscribers")
                    .wrap(
                        RateLimitMiddleware::new(state.subscribe_limiter.clone())
                            .trust_forwarded(state.trust_forwarded_for),
                    )
                    .route(web::post().to(subscribers::subscribe)),
            )
            // Admin routes
            .service(
                web::scope("/admin")
                    .route("/session", web::post().to(admin::open_session))
                    .route("/dashboard", web::get().to(admin::dashboard))
                    .route("/subscribers", web::get().to(admin::list_subscribers))
                    .service(
                        web::resource("/posts")
                            .route(web::put().to(admin::save_post))
                            .route(web::delete().to(admin::delete_all_posts)),
                    )
                    .route("/posts/{id}", web::delete().to(admin::delete_post))
                    .route("/assist/summary", web::post().to(assist::summarize))
                    .route("/assist/grammar", web::post().to(assist::fix_grammar)),
            ),
    );
}
