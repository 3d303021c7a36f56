//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use uuid::Uuid;

use quill_core::domain::{EmailAddress, Post, Subscriber};
use quill_core::error::RepoError;
use quill_core::ports::{PostRepository, SubscriberRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::subscriber::{self, Entity as SubscriberEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL subscriber repository.
pub type PostgresSubscriberRepository = PostgresBaseRepository<SubscriberEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError> {
        let rows = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        tracing::debug!(slug = %slug, "Finding post by slug");

        let row = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Into::into))
    }

    async fn save_many(&self, posts: Vec<Post>) -> Result<(), RepoError> {
        if posts.is_empty() {
            return Ok(());
        }

        let models = posts.into_iter().map(post::ActiveModel::from);
        PostEntity::insert_many(models)
            .on_conflict(Self::upsert_on_conflict())
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        // The nil id is never issued, so this matches every row.
        let result = PostEntity::delete_many()
            .filter(post::Column::Id.ne(Uuid::nil()))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }

    async fn ping(&self) -> Result<(), RepoError> {
        PostEntity::find()
            .select_only()
            .column(post::Column::Id)
            .limit(1)
            .into_tuple::<Uuid>()
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }
}

#[async_trait]
impl SubscriberRepository for PostgresSubscriberRepository {
    async fn list_newest_first(&self) -> Result<Vec<Subscriber>, RepoError> {
        let rows = SubscriberEntity::find()
            .order_by_desc(subscriber::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, email: &EmailAddress) -> Result<Subscriber, RepoError> {
        tracing::debug!(email = %email.masked(), "Inserting subscriber");

        let model = subscriber::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.as_str().to_string()),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        Ok(model.into())
    }
}
