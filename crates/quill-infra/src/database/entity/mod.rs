//! SeaORM entities for the `posts` and `subscribers` tables.

pub mod post;
pub mod subscriber;
