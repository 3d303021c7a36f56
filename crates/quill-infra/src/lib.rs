//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the row store, cache, session token, rate limiting
//! and text generation adapters.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory only
//! - `postgres` - PostgreSQL row store via SeaORM
//! - `auth` - JWT admin sessions
//! - `rate-limit` - Rate limiting via governor
//! - `ai` - Gemini text generation via reqwest

pub mod cache;
pub mod database;

#[cfg(feature = "ai")]
pub mod assist;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

// Re-exports - In-Memory
pub use cache::InMemoryCache;
pub use database::{DatabaseConfig, InMemoryPostRepository, InMemorySubscriberRepository};

#[cfg(feature = "postgres")]
pub use database::{PostgresPostRepository, PostgresSubscriberRepository, connect};

#[cfg(feature = "ai")]
pub use assist::{GeminiConfig, GeminiTextGenerator};

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
