//! # Quill Core
//!
//! The domain layer of the Quill blog backend.
//! This crate contains the post/subscriber model, the derivation rules
//! (slugs, reading time, summaries, table of contents), the ports the
//! infrastructure must implement, and the services built on top of them.
//! It carries zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{AssistError, DomainError, RepoError};
