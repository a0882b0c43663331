use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // status と completed_date は常に一緒に更新する (entities::todo を参照)。
        // 日時は DATETIME。MySQL の TIMESTAMP は 2038 年までしか入らない。
        manager
            .create_table(
                Table::create()
                    .table(Todos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Todos::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Todos::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Todos::Content).text().not_null())
                    .col(ColumnDef::new(Todos::DueDate).date_time().null())
                    .col(ColumnDef::new(Todos::CompletedDate).date_time().null())
                    .col(
                        ColumnDef::new(Todos::Status)
                            .string_len(8)
                            .not_null()
                            .default("undone"),
                    )
                    .col(
                        ColumnDef::new(Todos::CreatedAt)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Todos::DeletedAt).date_time().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Todos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Todos {
    Table,
    Id,
    Title,
    Content,
    DueDate,
    CompletedDate,
    Status,
    CreatedAt,
    DeletedAt,
}
