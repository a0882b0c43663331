use std::env;

/// データベース接続設定。
/// Djangoの `settings.py` の `DATABASES` に相当します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// 環境変数から設定を読み込みます。
    /// `DATABASE_URL` があればそれを優先し、なければ `MYSQL_*` の4つから組み立てます。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            return Ok(Self::new(url));
        }

        let var = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));
        let user = var("MYSQL_USER")?;
        let password = var("MYSQL_PASSWORD")?;
        let host = var("MYSQL_HOST")?;
        let database = var("MYSQL_DATABASE")?;

        // ユーザー名とパスワードに `@` `/` `:` などが含まれてもURLが壊れないようにする
        Ok(Self::new(format!(
            "mysql://{}:{}@{}/{}",
            urlencoding::encode(&user),
            urlencoding::encode(&password),
            host,
            database
        )))
    }

    /// インメモリSQLiteは接続ごとに別DBになるため、プールを1本に固定する必要がある
    pub fn is_in_memory_sqlite(&self) -> bool {
        self.url.starts_with("sqlite::memory:") || self.url.contains("mode=memory")
    }
}
