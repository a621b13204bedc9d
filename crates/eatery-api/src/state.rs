//! Application state wiring the restaurant service to its SQLite adapter.
//!
//! The service is generic over the repository port; AppState pins it to the
//! concrete infra implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use eatery_core::service::restaurant::RestaurantService;
use eatery_infra::config::database_path;
use eatery_infra::sqlite::pool::{DatabasePool, database_url};
use eatery_infra::sqlite::restaurant::SqliteRestaurantRepository;
use eatery_types::config::GlobalConfig;

/// Restaurant service pinned to the SQLite repository.
pub type ConcreteRestaurantService = RestaurantService<SqliteRestaurantRepository>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub restaurant_service: Arc<ConcreteRestaurantService>,
    pub database_path: PathBuf,
}

impl AppState {
    /// Initialize the application state: create the data dir, open the DB,
    /// run migrations, wire the service.
    pub async fn init(data_dir: &Path, config: &GlobalConfig) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(data_dir).await?;

        let database_path = database_path(data_dir, config);
        let db_pool = DatabasePool::new(&database_url(&database_path)).await?;

        tracing::debug!(path = %database_path.display(), "Opened restaurant database");

        let repo = SqliteRestaurantRepository::new(db_pool);

        Ok(Self {
            restaurant_service: Arc::new(RestaurantService::new(repo)),
            database_path,
        })
    }
}
