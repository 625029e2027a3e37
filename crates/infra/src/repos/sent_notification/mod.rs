mod inmemory;
mod postgres;

use classmate_reminders_domain::{NotificationWindow, SentNotification};
pub use inmemory::InMemorySentNotificationRepo;
pub use postgres::PostgresSentNotificationRepo;

/// The dedup ledger. Purely additive: rows are never updated or deleted by
/// the engine.
#[async_trait::async_trait]
pub trait ISentNotificationRepo: Send + Sync {
    /// Records that a reminder was dispatched. Returns `false` when a row
    /// with the same `(email, work_id, window)` key already exists, in
    /// which case nothing is written.
    async fn insert(&self, notification: &SentNotification) -> anyhow::Result<bool>;
    async fn exists(
        &self,
        email: &str,
        work_id: i64,
        window: NotificationWindow,
    ) -> anyhow::Result<bool>;
}
