//! Test doubles for the ports, with fault injection.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{EmailAddress, Post, PostCategory, Subscriber, text};
use crate::error::{AssistError, RepoError};
use crate::ports::{BaseRepository, PostRepository, SubscriberRepository, TextGenerator};

pub fn post(title: &str, category: PostCategory) -> Post {
    let now = Utc::now();
    let content = format!("# {title}\n\nSome content about {title}.");
    Post {
        id: Uuid::new_v4(),
        title: title.to_string(),
        slug: text::derive_slug(title),
        summary: format!("About {title}"),
        reading_time_minutes: text::estimate_reading_time(&content),
        content,
        image: None,
        category,
        tags: Vec::new(),
        date: now,
        updated_at: now,
        is_featured: false,
    }
}

#[derive(Default)]
pub struct FakePosts {
    rows: Mutex<Vec<Post>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    saves: AtomicUsize,
}

impl FakePosts {
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn save_calls(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn read_guard(&self) -> Result<(), RepoError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            Err(RepoError::Connection("store offline".into()))
        } else {
            Ok(())
        }
    }

    fn write_guard(&self) -> Result<(), RepoError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(RepoError::Connection("store offline".into()))
        } else {
            Ok(())
        }
    }

    fn upsert(rows: &mut Vec<Post>, post: Post) -> Result<(), RepoError> {
        if rows.iter().any(|p| p.slug == post.slug && p.id != post.id) {
            return Err(RepoError::Constraint(format!("slug {} taken", post.slug)));
        }
        match rows.iter_mut().find(|p| p.id == post.id) {
            Some(existing) => *existing = post,
            None => rows.push(post),
        }
        Ok(())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for FakePosts {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        self.read_guard()?;
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.write_guard()?;
        Self::upsert(&mut self.rows.lock().unwrap(), entity.clone())?;
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.write_guard()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        if rows.len() == before {
            Err(RepoError::NotFound)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PostRepository for FakePosts {
    async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError> {
        self.read_guard()?;
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        self.read_guard()?;
        Ok(self.rows.lock().unwrap().iter().find(|p| p.slug == slug).cloned())
    }

    async fn save_many(&self, posts: Vec<Post>) -> Result<(), RepoError> {
        self.write_guard()?;
        let mut rows = self.rows.lock().unwrap();
        for post in posts {
            Self::upsert(&mut rows, post)?;
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        self.write_guard()?;
        let mut rows = self.rows.lock().unwrap();
        let removed = rows.len() as u64;
        rows.clear();
        Ok(removed)
    }

    async fn ping(&self) -> Result<(), RepoError> {
        self.read_guard()
    }
}

#[derive(Default)]
pub struct FakeSubscribers {
    rows: Mutex<Vec<Subscriber>>,
    fail_reads: AtomicBool,
}

impl FakeSubscribers {
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl SubscriberRepository for FakeSubscribers {
    async fn list_newest_first(&self) -> Result<Vec<Subscriber>, RepoError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(RepoError::Connection("store offline".into()));
        }
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert(&self, email: &EmailAddress) -> Result<Subscriber, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|s| s.email == email.as_str()) {
            return Err(RepoError::Constraint("duplicate key value".into()));
        }
        let subscriber = Subscriber {
            id: Uuid::new_v4(),
            email: email.as_str().to_string(),
            created_at: Utc::now(),
        };
        rows.push(subscriber.clone());
        Ok(subscriber)
    }
}

/// Replies from a queue; an exhausted queue fails upstream.
#[derive(Default)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, AssistError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn replying(replies: Vec<Result<String, AssistError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _model: &str, prompt: &str) -> Result<String, AssistError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AssistError::Upstream("no scripted reply".into())))
    }
}
