use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_posts_table::Posts;

const INDEX_NAME: &str = "idx_posts_created_at";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Posts::Table)
                    .name(INDEX_NAME)
                    .col(Posts::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().table(Posts::Table).name(INDEX_NAME).to_owned())
            .await
    }
}
