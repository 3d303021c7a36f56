//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::domain::AdminGate;
use quill_core::ports::{Cache, PostRepository, RateLimiter, SubscriberRepository, TokenService};
use quill_core::services::{CatalogView, ContentStore, PostDetailView, TextAssist};
use quill_infra::{
    InMemoryCache, InMemoryPostRepository, InMemorySubscriberRepository, JwtConfig,
    JwtTokenService,
};

use crate::config::{AppConfig, AssistConfig, SubscribeLimitConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ContentStore>,
    pub catalog: Arc<CatalogView>,
    pub detail: Arc<PostDetailView>,
    pub assist: TextAssist,
    pub gate: AdminGate,
    pub tokens: Arc<dyn TokenService>,
    pub subscribe_limiter: Option<Arc<dyn RateLimiter>>,
    /// Key the subscribe limiter on forwarding headers instead of the peer address.
    pub trust_forwarded_for: bool,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let (posts, subscribers) = build_repositories(config).await;

        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
            secret: config.session.secret.clone(),
            expiration_hours: config.session.ttl_hours,
            ..JwtConfig::default()
        }));

        let state = Self {
            trust_forwarded_for: config.subscribe_limit.trust_proxy,
            ..Self::from_parts(
                ContentStore::new(posts, subscribers),
                build_assist(&config.assist),
                AdminGate::new(config.admin_password.clone()),
                tokens,
                build_subscribe_limiter(&config.subscribe_limit),
            )
        };

        tracing::info!(
            assist_available = state.assist.is_available(),
            rate_limited = state.subscribe_limiter.is_some(),
            "Application state initialized"
        );
        state
    }

    pub fn from_parts(
        store: ContentStore,
        assist: TextAssist,
        gate: AdminGate,
        tokens: Arc<dyn TokenService>,
        subscribe_limiter: Option<Arc<dyn RateLimiter>>,
    ) -> Self {
        let store = Arc::new(store);
        let cache: Arc<dyn Cache> = Arc::new(InMemoryCache::new());

        Self {
            catalog: Arc::new(CatalogView::new(store.clone())),
            detail: Arc::new(PostDetailView::new(store.clone()).with_cache(cache)),
            store,
            assist,
            gate,
            tokens,
            subscribe_limiter,
            trust_forwarded_for: false,
        }
    }
}

type Repositories = (Arc<dyn PostRepository>, Arc<dyn SubscriberRepository>);

fn in_memory_repositories() -> Repositories {
    (
        Arc::new(InMemoryPostRepository::new()),
        Arc::new(InMemorySubscriberRepository::new()),
    )
}

#[cfg(feature = "postgres")]
async fn build_repositories(config: &AppConfig) -> Repositories {
    use quill_infra::{PostgresPostRepository, PostgresSubscriberRepository};

    let Some(db_config) = &config.database else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return in_memory_repositories();
    };

    match quill_infra::connect(db_config).await {
        Ok(conn) => (
            Arc::new(PostgresPostRepository::new(conn.clone())),
            Arc::new(PostgresSubscriberRepository::new(conn)),
        ),
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            in_memory_repositories()
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn build_repositories(_config: &AppConfig) -> Repositories {
    tracing::info!("Running without postgres feature - using in-memory repositories");
    in_memory_repositories()
}

#[cfg(feature = "ai")]
fn build_assist(config: &AssistConfig) -> TextAssist {
    use quill_infra::{GeminiConfig, GeminiTextGenerator};

    let Some(api_key) = &config.api_key else {
        tracing::warn!("GEMINI_API_KEY not set. Writing assistant disabled.");
        return TextAssist::disabled();
    };

    let gemini = GeminiConfig {
        api_key: api_key.clone(),
        base_url: config.base_url.clone(),
        timeout: config.timeout,
    };
    match GeminiTextGenerator::new(gemini) {
        Ok(generator) => TextAssist::new(Arc::new(generator), config.model.clone()),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build Gemini client. Writing assistant disabled.");
            TextAssist::disabled()
        }
    }
}

#[cfg(not(feature = "ai"))]
fn build_assist(_config: &AssistConfig) -> TextAssist {
    tracing::info!("Running without ai feature - writing assistant disabled");
    TextAssist::disabled()
}

#[cfg(feature = "rate-limit")]
fn build_subscribe_limiter(config: &SubscribeLimitConfig) -> Option<Arc<dyn RateLimiter>> {
    use quill_infra::{InMemoryRateLimiter, RateLimitConfig};

    match InMemoryRateLimiter::new(RateLimitConfig {
        max_requests: config.max_requests,
        window: config.window,
    }) {
        Ok(limiter) => Some(Arc::new(limiter)),
        Err(e) => {
            tracing::error!(error = %e, "Invalid subscribe rate limit. Rate limiting disabled.");
            None
        }
    }
}

#[cfg(not(feature = "rate-limit"))]
fn build_subscribe_limiter(_config: &SubscribeLimitConfig) -> Option<Arc<dyn RateLimiter>> {
    None
}
