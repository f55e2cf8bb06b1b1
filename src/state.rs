use crate::auth::store::{AccountStore, PgAccountStore};
use crate::config::AppConfig;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub accounts: Arc<dyn AccountStore>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await?;

        let accounts = Arc::new(PgAccountStore::new(db.clone())) as Arc<dyn AccountStore>;

        Ok(Self {
            db,
            config,
            accounts,
        })
    }
}
