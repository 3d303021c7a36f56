//! Domain entities - the core business objects and the pure rules over them.

pub mod catalog;
pub mod seed;
pub mod session;
pub mod text;

mod post;
mod subscriber;

pub use catalog::{CatalogQuery, CategoryFilter, ContentStats, HomeFeed};
pub use post::{Post, PostCategory, PostDraft};
pub use session::{AdminGate, SessionState, Theme};
pub use subscriber::{EmailAddress, Subscriber};
pub use text::TocEntry;
