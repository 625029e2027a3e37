mod sent_notification;
mod subscription;
mod work;

pub use sent_notification::{
    ISentNotificationRepo, InMemorySentNotificationRepo, PostgresSentNotificationRepo,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use subscription::{ISubscriptionRepo, InMemorySubscriptionRepo, PostgresSubscriptionRepo};
pub use work::{IWorkItemRepo, InMemoryWorkItemRepo, PostgresWorkItemRepo};

#[derive(Clone)]
pub struct Repos {
    pub work_items: Arc<dyn IWorkItemRepo>,
    pub subscriptions: Arc<dyn ISubscriptionRepo>,
    pub sent_notifications: Arc<dyn ISentNotificationRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;

        Ok(Self {
            work_items: Arc::new(PostgresWorkItemRepo::new(pool.clone())),
            subscriptions: Arc::new(PostgresSubscriptionRepo::new(pool.clone())),
            sent_notifications: Arc::new(PostgresSentNotificationRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            work_items: Arc::new(InMemoryWorkItemRepo::new()),
            subscriptions: Arc::new(InMemorySubscriptionRepo::new()),
            sent_notifications: Arc::new(InMemorySentNotificationRepo::new()),
        }
    }
}
