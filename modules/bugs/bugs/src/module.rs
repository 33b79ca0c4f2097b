use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use bugs_sdk::BugsClientV1;

use crate::api::rest::routes;
use crate::config::BugsConfig;
use crate::domain::password::PasswordPolicy;
use crate::domain::ports::CredentialHasher;
use crate::domain::service::{AppServices, ServiceConfig};
use crate::infra::crypto::Argon2Hasher;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{
    OrmBugsRepository, OrmCommentsRepository, OrmTokensRepository, OrmUsersRepository,
};
use crate::local_client::BugsLocalClient;

/// Type alias for the concrete `AppServices` type used with ORM repositories.
/// This lives in the composition root (module.rs) to avoid infra dependencies in domain.
pub type ConcreteAppServices = AppServices<
    OrmUsersRepository,
    OrmTokensRepository,
    OrmBugsRepository,
    OrmCommentsRepository,
>;

/// Composition root of the bugs module: database handle, services and client.
#[derive(Clone)]
pub struct BugsModule {
    db: DatabaseConnection,
    services: ConcreteAppServices,
    client: Arc<dyn BugsClientV1>,
}

impl BugsModule {
    /// Wire repositories, services and the local client over `db`.
    pub fn new(db: DatabaseConnection, cfg: &BugsConfig) -> anyhow::Result<Self> {
        info!("Initializing bugs module");
        debug!(
            "Loaded bugs config: min_password_length={}, token_bytes={}",
            cfg.password.min_length, cfg.token_bytes
        );

        let hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2Hasher::from_config(&cfg.hashing)?);

        let service_config = ServiceConfig {
            password_policy: PasswordPolicy::from_config(&cfg.password),
            token_bytes: cfg.token_bytes,
        };

        let services = AppServices::new(
            OrmUsersRepository::new(),
            OrmTokensRepository::new(),
            OrmBugsRepository::new(),
            OrmCommentsRepository::new(),
            db.clone(),
            hasher,
            service_config,
        );

        let client: Arc<dyn BugsClientV1> = Arc::new(BugsLocalClient::new(services.clone()));

        Ok(Self {
            db,
            services,
            client,
        })
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        info!("Running bugs database migrations");
        Migrator::up(&self.db, None).await?;
        info!("Bugs database migrations completed successfully");
        Ok(())
    }

    #[must_use]
    pub fn services(&self) -> &ConcreteAppServices {
        &self.services
    }

    /// In-process client for other components.
    #[must_use]
    pub fn client(&self) -> Arc<dyn BugsClientV1> {
        Arc::clone(&self.client)
    }

    /// REST routes of the module, with authentication applied where required.
    pub fn router(&self) -> axum::Router {
        info!("Registering bugs REST routes");
        routes::register_routes(axum::Router::new(), self.services.clone())
    }
}
