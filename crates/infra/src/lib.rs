mod config;
mod repos;
mod services;
mod system;
mod user_locks;

pub use config::Config;
pub use repos::{IDayIndexRepo, InMemoryDayIndexRepo, PostgresDayIndexRepo, Repos};
pub use services::{
    BackendError, IGreetingService, ITriggerBackend, InMemoryGreetingService,
    InMemoryTriggerBackend, RegisteredTrigger, Services, WebhookGreetingService,
    WebhookTriggerBackend,
};
pub use system::{ISys, RealSys};
pub use user_locks::UserLockRegistry;

use std::sync::Arc;

#[derive(Clone)]
pub struct BirthdayContext {
    pub repos: Repos,
    pub services: Services,
    pub config: Config,
    pub user_locks: Arc<UserLockRegistry>,
    pub sys: Arc<dyn ISys>,
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> BirthdayContext {
    let config = Config::new();
    let repos = match &config.database_url {
        Some(connection_string) => Repos::create_postgres(connection_string)
            .await
            .expect("Postgres credentials must be set and valid"),
        None => Repos::create_inmemory(),
    };
    let services = Services::from_config(&config);

    BirthdayContext {
        repos,
        services,
        config,
        user_locks: Arc::new(UserLockRegistry::default()),
        sys: Arc::new(RealSys {}),
    }
}
