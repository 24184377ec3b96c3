use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{draft, embed, entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{db, importer, utils};

use db::redis::create_redis_connection;
use errors::AppError;
use importer::mock_parser::MockPortfolioParser;
use repositories::{memory::InMemoryProfileRepo, profile::ProfileRepository, redis_profile::RedisProfileRepo};
use use_cases::{draft_session::DraftHandler, profile::ProfileHandler};

pub type SharedProfileRepo = Arc<dyn ProfileRepository>;
pub type AppProfileHandler = ProfileHandler<SharedProfileRepo, MockPortfolioParser>;
pub type AppDraftHandler = DraftHandler<SharedProfileRepo, MockPortfolioParser>;

pub struct AppState {
    pub profile_handler: Arc<AppProfileHandler>,
    pub draft_handler: AppDraftHandler,
    pub public_base_url: String,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, profile_repo: SharedProfileRepo) -> Self {
        let profile_handler = Arc::new(ProfileHandler::new(profile_repo, MockPortfolioParser::new()));
        let draft_handler = DraftHandler::new(
            profile_handler.clone(),
            config.draft_history_limit,
            config.draft_ttl(),
        );

        AppState {
            profile_handler,
            draft_handler,
            public_base_url: config.public_base_url.clone(),
        }
    }

    /// Picks the Redis store when `redis_url` is configured, otherwise keeps
    /// profiles in process memory. Also starts the idle-draft sweep.
    pub async fn from_config(config: &settings::AppConfig) -> Result<Self, AppError> {
        let profile_repo: SharedProfileRepo = match config.redis_url.as_deref() {
            Some(url) => {
                let conn = create_redis_connection(url).await?;
                Arc::new(RedisProfileRepo::new(conn))
            }
            None => {
                tracing::warn!("No redis_url configured; profiles are kept in memory only");
                Arc::new(InMemoryProfileRepo::new())
            }
        };

        tracing::info!(backend = profile_repo.backend(), "Profile storage ready");

        let state = Self::new(config, profile_repo);
        state.draft_handler.spawn_eviction(constants::DRAFT_SWEEP_INTERVAL);
        Ok(state)
    }
}
