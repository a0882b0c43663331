use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 一覧は論理削除済みを除外し、作成日時順に並べる
        manager
            .create_index(
                Index::create()
                    .name("idx-todos-deleted_at-created_at")
                    .table(Todos::Table)
                    .col(Todos::DeletedAt)
                    .col(Todos::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx-todos-deleted_at-created_at")
                    .table(Todos::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Todos {
    Table,
    CreatedAt,
    DeletedAt,
}
