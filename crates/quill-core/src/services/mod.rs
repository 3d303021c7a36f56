//! Application services - orchestrate the ports into the blog's use cases.

pub mod admin;
pub mod catalog;
pub mod content_store;
pub mod detail;
pub mod editor;
pub mod text_assist;

pub use admin::{AdminConsole, AdminError, ConsoleState, PendingSave, SaveOutcome, ViewMode};
pub use catalog::CatalogView;
pub use content_store::{ContentStore, SubscribeOutcome};
pub use detail::{PostDetail, PostDetailView};
pub use editor::{finalize_draft, placeholder_image, save_draft};
pub use text_assist::{DEFAULT_MODEL, TextAssist};
