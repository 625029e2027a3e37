mod inmemory;
mod postgres;

use classmate_reminders_domain::{NotificationWindow, SubjectFollow, Subscription};
pub use inmemory::InMemorySubscriptionRepo;
pub use postgres::PostgresSubscriptionRepo;

#[async_trait::async_trait]
pub trait ISubscriptionRepo: Send + Sync {
    async fn insert(&self, subscription: &Subscription) -> anyhow::Result<()>;
    async fn insert_follow(&self, follow: &SubjectFollow) -> anyhow::Result<()>;
    async fn find(&self, email: &str) -> Option<Subscription>;
    /// Emails that should be notified about work in the given subject and
    /// window: subscription active, window preference enabled and an active
    /// follow on the subject (exact name match). De-duplicated.
    async fn find_subscribers(
        &self,
        subject_name: &str,
        window: NotificationWindow,
    ) -> anyhow::Result<Vec<String>>;
}
