//! AdminConsole - the create/edit/delete workflow as an explicit state machine.
//!
//! ```text
//! Viewing --create_new / edit--> Editing --save / cancel--> Viewing
//! Viewing --request_delete--> ConfirmingDelete --confirm / abort--> Viewing
//! ```
//!
//! Saving is split into [`AdminConsole::begin_save`], [`PendingSave::run`] and
//! [`AdminConsole::finish_save`] so the console can keep serving while a save is
//! in flight. Every transition out of a draft bumps the edit epoch; a save that
//! completes under an older epoch is discarded.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use super::content_store::ContentStore;
use super::editor;
use super::text_assist::TextAssist;
use crate::domain::{ContentStats, Post, PostDraft, Subscriber};
use crate::error::{AssistError, DomainError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleState {
    Viewing,
    Editing,
    ConfirmingDelete(Uuid),
}

impl fmt::Display for ConsoleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Viewing => f.write_str("viewing"),
            Self::Editing => f.write_str("editing"),
            Self::ConfirmingDelete(id) => write!(f, "confirming delete of {id}"),
        }
    }
}

/// Which list the console shows while viewing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Posts,
    Subscribers,
}

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Cannot {action} while {state}")]
    InvalidState {
        action: &'static str,
        state: ConsoleState,
    },

    #[error("No post with id {0}")]
    UnknownPost(Uuid),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Store operation failed: {0}")]
    Store(String),

    #[error("Text assist unavailable: {0}")]
    Assist(#[from] AssistError),

    #[error("Save completed after its draft was closed")]
    Stale,
}

impl From<DomainError> for AdminError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AdminError::Validation(msg),
            other => AdminError::Store(other.to_string()),
        }
    }
}

pub struct AdminConsole {
    store: Arc<ContentStore>,
    assist: TextAssist,
    state: ConsoleState,
    view: ViewMode,
    posts: Vec<Post>,
    subscribers: Vec<Subscriber>,
    draft: Option<PostDraft>,
    epoch: u64,
}

impl AdminConsole {
    /// Enter `Viewing` for the first time, seeding the sample set into an empty store.
    pub async fn open(store: Arc<ContentStore>, assist: TextAssist) -> Self {
        let posts = store.list_posts_seeding_if_empty().await;
        let subscribers = store.list_subscribers().await;
        tracing::debug!(posts = posts.len(), subscribers = subscribers.len(), "Admin console opened");

        Self {
            store,
            assist,
            state: ConsoleState::Viewing,
            view: ViewMode::default(),
            posts,
            subscribers,
            draft: None,
            epoch: 0,
        }
    }

    /// Re-fetch posts and subscribers from the store.
    pub async fn refresh(&mut self) {
        self.posts = self.store.list_posts().await;
        self.subscribers = self.store.list_subscribers().await;
    }

    pub fn state(&self) -> ConsoleState {
        self.state
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn subscribers(&self) -> &[Subscriber] {
        &self.subscribers
    }

    pub fn draft(&self) -> Option<&PostDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut PostDraft> {
        self.draft.as_mut()
    }

    pub fn stats(&self) -> ContentStats {
        ContentStats::compute(&self.posts, self.subscribers.len())
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) -> Result<(), AdminError> {
        self.expect_state(ConsoleState::Viewing, "switch views")?;
        self.view = mode;
        Ok(())
    }

    /// Start a blank draft.
    pub fn create_new(&mut self) -> Result<(), AdminError> {
        self.expect_state(ConsoleState::Viewing, "create a post")?;
        self.open_draft(PostDraft::new());
        Ok(())
    }

    /// Start a draft copied from the listed post `id`.
    pub fn edit(&mut self, id: Uuid) -> Result<(), AdminError> {
        self.expect_state(ConsoleState::Viewing, "edit a post")?;
        let post = self
            .posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(AdminError::UnknownPost(id))?;
        self.open_draft(post.into());
        Ok(())
    }

    /// Discard the draft without touching the store.
    pub fn cancel(&mut self) -> Result<(), AdminError> {
        self.expect_state(ConsoleState::Editing, "cancel")?;
        self.close_draft();
        Ok(())
    }

    /// Validate the draft and detach a save of it.
    ///
    /// Validation failures are reported here, before any store call.
    pub fn begin_save(&self) -> Result<PendingSave, AdminError> {
        self.expect_state(ConsoleState::Editing, "save")?;
        let draft = self
            .draft
            .clone()
            .ok_or_else(|| AdminError::Validation("no draft is open".to_string()))?;
        draft.validate()?;

        Ok(PendingSave {
            epoch: self.epoch,
            draft,
            store: self.store.clone(),
            assist: self.assist.clone(),
        })
    }

    /// Apply the result of a [`PendingSave`].
    ///
    /// On failure the console stays in `Editing` with the draft intact. On
    /// success the list is re-fetched and the console returns to `Viewing`.
    pub async fn finish_save(&mut self, outcome: SaveOutcome) -> Result<Post, AdminError> {
        if self.state != ConsoleState::Editing || outcome.epoch != self.epoch {
            tracing::warn!(
                save_epoch = outcome.epoch,
                current_epoch = self.epoch,
                "Discarding result of a save whose draft is no longer open"
            );
            return Err(AdminError::Stale);
        }

        let post = outcome.result?;
        self.close_draft();
        self.posts = self.store.list_posts().await;
        Ok(post)
    }

    /// Save the draft and wait for the result.
    pub async fn save(&mut self) -> Result<Post, AdminError> {
        let pending = self.begin_save()?;
        let outcome = pending.run().await;
        self.finish_save(outcome).await
    }

    /// Replace the draft content with a grammar-corrected version.
    ///
    /// The original content is kept when the assist fails.
    pub async fn fix_grammar(&mut self) -> Result<(), AdminError> {
        self.expect_state(ConsoleState::Editing, "fix grammar")?;
        let Some(draft) = self.draft.as_mut() else {
            return Ok(());
        };

        match self.assist.fix_grammar(&draft.content).await {
            Ok(fixed) => {
                draft.content = fixed;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Grammar fix failed, keeping original content");
                Err(e.into())
            }
        }
    }

    /// Fill the draft summary from the assist. The current summary is kept on failure.
    pub async fn suggest_summary(&mut self) -> Result<(), AdminError> {
        self.expect_state(ConsoleState::Editing, "suggest a summary")?;
        let Some(draft) = self.draft.as_mut() else {
            return Ok(());
        };

        match self.assist.summarize(&draft.content).await {
            Ok(summary) => {
                draft.summary = summary;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Summary suggestion failed");
                Err(e.into())
            }
        }
    }

    pub fn request_delete(&mut self, id: Uuid) -> Result<(), AdminError> {
        self.expect_state(ConsoleState::Viewing, "delete a post")?;
        self.state = ConsoleState::ConfirmingDelete(id);
        Ok(())
    }

    pub fn abort_delete(&mut self) -> Result<(), AdminError> {
        self.pending_delete("abort a delete")?;
        self.state = ConsoleState::Viewing;
        Ok(())
    }

    /// Delete the post awaiting confirmation.
    ///
    /// Success removes it from the local list without a re-fetch. Failure
    /// leaves the outcome ambiguous, so the list is re-fetched instead.
    pub async fn confirm_delete(&mut self) -> Result<(), AdminError> {
        let id = self.pending_delete("confirm a delete")?;
        self.state = ConsoleState::Viewing;

        match self.store.delete_post(id).await {
            Ok(()) => {
                self.posts.retain(|p| p.id != id);
                Ok(())
            }
            Err(e) => {
                self.posts = self.store.list_posts().await;
                Err(e.into())
            }
        }
    }

    /// Delete every post. Requires `confirmed`.
    pub async fn delete_all(&mut self, confirmed: bool) -> Result<u64, AdminError> {
        self.expect_state(ConsoleState::Viewing, "delete all posts")?;
        if !confirmed {
            return Err(AdminError::Validation(
                "deleting all posts requires explicit confirmation".to_string(),
            ));
        }

        match self.store.delete_all_posts().await {
            Ok(removed) => {
                self.posts.clear();
                Ok(removed)
            }
            Err(e) => {
                self.posts = self.store.list_posts().await;
                Err(e.into())
            }
        }
    }

    fn open_draft(&mut self, draft: PostDraft) {
        self.epoch += 1;
        self.draft = Some(draft);
        self.state = ConsoleState::Editing;
    }

    fn close_draft(&mut self) {
        self.epoch += 1;
        self.draft = None;
        self.state = ConsoleState::Viewing;
    }

    fn expect_state(&self, expected: ConsoleState, action: &'static str) -> Result<(), AdminError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(AdminError::InvalidState {
                action,
                state: self.state,
            })
        }
    }

    fn pending_delete(&self, action: &'static str) -> Result<Uuid, AdminError> {
        match self.state {
            ConsoleState::ConfirmingDelete(id) => Ok(id),
            state => Err(AdminError::InvalidState { action, state }),
        }
    }
}

/// A detached save of one draft, tagged with the epoch it was started under.
pub struct PendingSave {
    epoch: u64,
    draft: PostDraft,
    store: Arc<ContentStore>,
    assist: TextAssist,
}

impl PendingSave {
    pub fn post_id(&self) -> Uuid {
        self.draft.id
    }

    pub async fn run(self) -> SaveOutcome {
        let result = editor::save_draft(&self.store, &self.assist, self.draft).await;
        SaveOutcome {
            epoch: self.epoch,
            result,
        }
    }
}

#[derive(Debug)]
pub struct SaveOutcome {
    epoch: u64,
    result: Result<Post, DomainError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostCategory;
    use crate::testing::{FakePosts, FakeSubscribers, ScriptedGenerator, post};

    struct Harness {
        posts: Arc<FakePosts>,
        store: Arc<ContentStore>,
    }

    fn harness() -> Harness {
        let posts = Arc::new(FakePosts::default());
        let store = Arc::new(ContentStore::new(
            posts.clone(),
            Arc::new(FakeSubscribers::default()),
        ));
        Harness { posts, store }
    }

    async fn open(h: &Harness) -> AdminConsole {
        AdminConsole::open(h.store.clone(), TextAssist::disabled()).await
    }

    fn fill(console: &mut AdminConsole, title: &str, content: &str) {
        let draft = console.draft_mut().unwrap();
        draft.title = title.into();
        draft.content = content.into();
    }

    #[tokio::test]
    async fn test_first_open_seeds_empty_store() {
        let h = harness();
        let console = open(&h).await;

        assert_eq!(console.state(), ConsoleState::Viewing);
        assert_eq!(console.posts().len(), 7);
        assert_eq!(h.posts.len(), 7);
    }

    #[tokio::test]
    async fn test_first_open_survives_seed_failure() {
        let h = harness();
        h.posts.fail_writes(true);
        let console = open(&h).await;

        assert_eq!(console.state(), ConsoleState::Viewing);
        assert!(console.posts().is_empty());
    }

    #[tokio::test]
    async fn test_existing_posts_are_not_reseeded() {
        let h = harness();
        h.store.save_post(post("Mine", PostCategory::Article)).await.unwrap();
        let console = open(&h).await;
        assert_eq!(console.posts().len(), 1);
    }

    #[tokio::test]
    async fn test_create_new_opens_blank_draft() {
        let h = harness();
        let mut console = open(&h).await;
        console.create_new().unwrap();

        let draft = console.draft().unwrap();
        assert_eq!(console.state(), ConsoleState::Editing);
        assert!(draft.title.is_empty() && draft.content.is_empty());
        assert_eq!(draft.category, PostCategory::Article);
        assert!(console.posts().iter().all(|p| p.id != draft.id));
    }

    #[tokio::test]
    async fn test_save_rejects_empty_content_and_keeps_editing() {
        let h = harness();
        let mut console = open(&h).await;
        let before = console.posts().to_vec();
        let calls = h.posts.save_calls();

        console.create_new().unwrap();
        fill(&mut console, "Only a title", "");

        let err = console.save().await.unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
        assert_eq!(console.state(), ConsoleState::Editing);
        assert_eq!(console.posts(), before.as_slice());
        assert_eq!(h.posts.save_calls(), calls);
    }

    #[tokio::test]
    async fn test_save_persists_and_returns_to_viewing() {
        let h = harness();
        let mut console = open(&h).await;
        console.create_new().unwrap();
        fill(&mut console, "Merhaba Dünya!", "Selam");

        let saved = console.save().await.unwrap();
        assert_eq!(saved.slug, "merhaba-dunya");
        assert_eq!(console.state(), ConsoleState::Viewing);
        assert!(console.draft().is_none());
        assert_eq!(console.posts().len(), 8);
        assert!(h.store.get_post_by_slug("merhaba-dunya").await.is_some());
    }

    #[tokio::test]
    async fn test_store_failure_keeps_draft() {
        let h = harness();
        let mut console = open(&h).await;
        console.create_new().unwrap();
        fill(&mut console, "Unlucky", "Body");
        h.posts.fail_writes(true);

        let err = console.save().await.unwrap_err();
        assert!(matches!(err, AdminError::Store(_)));
        assert_eq!(console.state(), ConsoleState::Editing);
        assert_eq!(console.draft().unwrap().title, "Unlucky");
    }

    #[tokio::test]
    async fn test_edit_preserves_date_and_id() {
        let h = harness();
        let mut console = open(&h).await;
        let target = console.posts()[3].clone();

        console.edit(target.id).unwrap();
        console.draft_mut().unwrap().title = "Retitled".into();
        let saved = console.save().await.unwrap();

        assert_eq!(saved.id, target.id);
        assert_eq!(saved.date, target.date);
        assert_eq!(saved.slug, target.slug);
        assert_eq!(console.posts().len(), 7);
    }

    #[tokio::test]
    async fn test_edit_unknown_post_fails() {
        let h = harness();
        let mut console = open(&h).await;
        let err = console.edit(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AdminError::UnknownPost(_)));
        assert_eq!(console.state(), ConsoleState::Viewing);
    }

    #[tokio::test]
    async fn test_save_resolving_after_cancel_is_discarded() {
        let h = harness();
        let mut console = open(&h).await;
        console.create_new().unwrap();
        fill(&mut console, "Late", "Body");

        let pending = console.begin_save().unwrap();
        let id = pending.post_id();
        console.cancel().unwrap();
        let outcome = pending.run().await;

        let err = console.finish_save(outcome).await.unwrap_err();
        assert!(matches!(err, AdminError::Stale));
        assert_eq!(console.state(), ConsoleState::Viewing);
        assert!(console.posts().iter().all(|p| p.id != id));
    }

    #[tokio::test]
    async fn test_stale_save_does_not_close_newer_draft() {
        let h = harness();
        let mut console = open(&h).await;
        console.create_new().unwrap();
        fill(&mut console, "First", "Body");
        let pending = console.begin_save().unwrap();

        console.cancel().unwrap();
        console.create_new().unwrap();
        fill(&mut console, "Second", "Body");

        let err = console.finish_save(pending.run().await).await.unwrap_err();
        assert!(matches!(err, AdminError::Stale));
        assert_eq!(console.state(), ConsoleState::Editing);
        assert_eq!(console.draft().unwrap().title, "Second");
    }

    #[tokio::test]
    async fn test_delete_flow() {
        let h = harness();
        let mut console = open(&h).await;
        let target = console.posts()[0].id;

        console.request_delete(target).unwrap();
        assert_eq!(console.state(), ConsoleState::ConfirmingDelete(target));
        console.abort_delete().unwrap();
        assert_eq!(h.posts.len(), 7);

        console.request_delete(target).unwrap();
        console.confirm_delete().await.unwrap();
        assert_eq!(console.state(), ConsoleState::Viewing);
        assert_eq!(console.posts().len(), 6);
        assert!(console.posts().iter().all(|p| p.id != target));
        assert_eq!(h.posts.len(), 6);
    }

    #[tokio::test]
    async fn test_confirm_without_request_is_invalid() {
        let h = harness();
        let mut console = open(&h).await;
        let err = console.confirm_delete().await.unwrap_err();
        assert!(matches!(err, AdminError::InvalidState { .. }));
    }

    #[tokio::test]
    async fn test_delete_all_requires_confirmation() {
        let h = harness();
        let mut console = open(&h).await;

        let err = console.delete_all(false).await.unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
        assert_eq!(h.posts.len(), 7);

        assert_eq!(console.delete_all(true).await.unwrap(), 7);
        assert!(console.posts().is_empty());
        assert_eq!(h.posts.len(), 0);
    }

    #[tokio::test]
    async fn test_fix_grammar_keeps_original_on_failure() {
        let h = harness();
        let generator = Arc::new(ScriptedGenerator::replying(vec![
            Err(AssistError::Upstream("quota".into())),
            Ok("Fixed body.".into()),
        ]));
        let mut console =
            AdminConsole::open(h.store.clone(), TextAssist::new(generator, "m")).await;
        console.create_new().unwrap();
        fill(&mut console, "T", "fixd body");

        let err = console.fix_grammar().await.unwrap_err();
        assert!(matches!(err, AdminError::Assist(_)));
        assert_eq!(console.draft().unwrap().content, "fixd body");

        console.fix_grammar().await.unwrap();
        assert_eq!(console.draft().unwrap().content, "Fixed body.");
    }

    #[tokio::test]
    async fn test_suggest_summary_without_assist() {
        let h = harness();
        let mut console = open(&h).await;
        console.create_new().unwrap();
        fill(&mut console, "T", "Body");
        console.draft_mut().unwrap().summary = "Mine".into();

        let err = console.suggest_summary().await.unwrap_err();
        assert!(matches!(err, AdminError::Assist(AssistError::Unavailable)));
        assert_eq!(console.draft().unwrap().summary, "Mine");
    }

    #[tokio::test]
    async fn test_stats_and_view_mode() {
        let h = harness();
        h.store.add_subscriber("a@example.com").await.unwrap();
        let mut console = open(&h).await;

        let stats = console.stats();
        assert_eq!(stats.total_posts, 7);
        assert_eq!(stats.featured_posts, 3);
        assert_eq!(stats.categories, 3);
        assert_eq!(stats.subscribers, 1);
        assert!(stats.total_words > 0);

        console.set_view_mode(ViewMode::Subscribers).unwrap();
        assert_eq!(console.view_mode(), ViewMode::Subscribers);

        console.create_new().unwrap();
        assert!(console.set_view_mode(ViewMode::Posts).is_err());
    }
}
