mod config;
mod mail;
mod repos;
mod system;

pub use config::{Config, ReminderConfig, SmtpConfig};
pub use mail::{DeliveryQueue, EmailMessage, IMailer, InMemoryMailer, SmtpMailer};
use repos::Repos;
pub use repos::{ISentNotificationRepo, ISubscriptionRepo, IWorkItemRepo};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::info;

#[derive(Clone)]
pub struct ClassmateContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl ClassmateContext {
    fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }

    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        Self {
            repos,
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> ClassmateContext {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    match std::env::var(PSQL_CONNECTION_STRING) {
        Ok(connection_string) => {
            info!("{} env var was provided. Going to use postgres.", PSQL_CONNECTION_STRING);
            ClassmateContext::create(ContextParams {
                postgres_connection_string: connection_string,
            })
            .await
        }
        Err(_) => {
            info!(
                "{} env var was not provided. Going to use inmemory infra.",
                PSQL_CONNECTION_STRING
            );
            ClassmateContext::create_inmemory()
        }
    }
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let connection_string =
        std::env::var("DATABASE_URL").expect("DATABASE_URL env var to be present.");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&connection_string)
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
