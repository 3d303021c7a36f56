//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod cache;
mod rate_limit;
mod repository;
mod text_generation;

pub use auth::{AuthError, SessionClaims, TokenService};
pub use cache::{Cache, CacheError, content_key};
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use repository::{BaseRepository, PostRepository, SubscriberRepository};
pub use text_generation::TextGenerator;
