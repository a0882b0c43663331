use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use crate::config::DatabaseConfig;

/// データベース接続をセットアップします。
/// Database::connect は接続プールを自動的に作成します。
pub async fn set_up_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options.sqlx_logging(false);

    if config.is_in_memory_sqlite() {
        options.max_connections(1).min_connections(1);
    }

    Database::connect(options).await
}

/// テスト用: インメモリSQLiteに接続してマイグレーションを適用します。
#[cfg(test)]
pub async fn set_up_test_db() -> DatabaseConnection {
    use migration::{Migrator, MigratorTrait};

    let db = set_up_db(&DatabaseConfig::new("sqlite::memory:"))
        .await
        .expect("in-memory sqlite");
    Migrator::up(&db, None).await.expect("migrations");
    db
}
