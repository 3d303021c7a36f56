//! # Quill Shared
//!
//! Wire types shared by the API server and its clients.
//! Kept free of server-side dependencies so a frontend can compile it too.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
