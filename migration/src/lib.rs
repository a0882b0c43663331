pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_todos_table;
mod m20240102_000001_add_todos_created_at_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_todos_table::Migration),
            Box::new(m20240102_000001_add_todos_created_at_index::Migration),
        ]
    }
}
