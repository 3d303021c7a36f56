//! Post entity for SeaORM.

use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::{Post, PostCategory};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub summary: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub image: Option<String>,
    pub category: String,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub tags: Option<Json>,
    pub is_featured: Option<bool>,
    pub reading_time_minutes: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
///
/// Nullable columns fall back to empty/zero values and a missing
/// `updated_at` reads as the current instant.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        let tags = model
            .tags
            .and_then(|json| serde_json::from_value::<Vec<String>>(json).ok())
            .unwrap_or_default();

        Self {
            id: model.id,
            title: model.title,
            slug: model.slug,
            summary: model.summary,
            content: model.content,
            image: model.image,
            category: PostCategory::from_stored(&model.category),
            tags,
            date: model.created_at.into(),
            updated_at: model.updated_at.map(Into::into).unwrap_or_else(Utc::now),
            is_featured: model.is_featured.unwrap_or(false),
            reading_time_minutes: model
                .reading_time_minutes
                .and_then(|m| u32::try_from(m).ok())
                .unwrap_or(0),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            slug: Set(post.slug),
            summary: Set(post.summary),
            content: Set(post.content),
            image: Set(post.image),
            category: Set(post.category.as_str().to_string()),
            tags: Set(Some(Json::from(post.tags))),
            is_featured: Set(Some(post.is_featured)),
            reading_time_minutes: Set(Some(
                i32::try_from(post.reading_time_minutes).unwrap_or(i32::MAX),
            )),
            created_at: Set(post.date.into()),
            updated_at: Set(Some(post.updated_at.into())),
        }
    }
}
