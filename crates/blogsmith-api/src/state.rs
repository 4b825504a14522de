//! Application state wiring all services together.
//!
//! AppState holds the concrete service instance used by the REST handlers.
//! The service is generic over repository/provider traits, but AppState pins
//! it to the concrete infra implementations. The database pool lives here
//! too -- constructed once, injected everywhere, never ambient.

use std::sync::Arc;

use secrecy::ExposeSecret;

use blogsmith_core::generation::PostGenerator;
use blogsmith_core::service::post::PostService;
use blogsmith_infra::config::Settings;
use blogsmith_infra::llm::OpenAiCompatibleProvider;
use blogsmith_infra::sqlite::pool::DatabasePool;
use blogsmith_infra::sqlite::post::SqlitePostRepository;
use blogsmith_infra::sqlite::user::SqliteUserRepository;

/// Concrete type alias for the service generics pinned to infra
/// implementations.
pub type ConcretePostService =
    PostService<SqliteUserRepository, SqlitePostRepository, OpenAiCompatibleProvider>;

/// Shared application state holding the post service and database pool.
#[derive(Clone)]
pub struct AppState {
    pub post_service: Arc<ConcretePostService>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to the DB, build the
    /// completion provider, wire the service.
    pub async fn init(settings: Settings) -> anyhow::Result<Self> {
        // The managed data dir must exist before SQLite opens a file in it;
        // a caller-supplied database URL manages its own location.
        if let Some(data_dir) = settings.managed_data_dir() {
            tokio::fs::create_dir_all(data_dir).await?;
        }

        let db_pool = DatabasePool::new(&settings.database_url).await?;

        let provider = match settings.openai_base_url.as_deref() {
            Some(base_url) => OpenAiCompatibleProvider::with_base_url(
                settings.openai_api_key.expose_secret(),
                &settings.model,
                base_url,
            ),
            None => OpenAiCompatibleProvider::openai(
                settings.openai_api_key.expose_secret(),
                &settings.model,
            ),
        };

        let post_service = PostService::new(
            SqliteUserRepository::new(db_pool.clone()),
            SqlitePostRepository::new(db_pool.clone()),
            PostGenerator::new(provider, settings.model.clone()),
        );

        Ok(Self {
            post_service: Arc::new(post_service),
            db_pool,
        })
    }
}
