mod inmemory;
mod postgres;

use chrono::NaiveDate;
use classmate_reminders_domain::WorkItem;
pub use inmemory::InMemoryWorkItemRepo;
pub use postgres::PostgresWorkItemRepo;

/// Read surface over the organizer's graded-work and assignment tables.
/// The reminder engine only reads snapshots at scan time; `insert` exists
/// for the surrounding CRUD layer and for seeding tests.
#[async_trait::async_trait]
pub trait IWorkItemRepo: Send + Sync {
    async fn insert(&self, item: &WorkItem) -> anyhow::Result<()>;
    /// Graded work whose effective date (due-date override if present,
    /// otherwise the primary date) falls on the given calendar day
    async fn list_graded_work_due_on(&self, date: NaiveDate) -> anyhow::Result<Vec<WorkItem>>;
    /// Same as `list_graded_work_due_on` but for assignments
    async fn list_assignments_due_on(&self, date: NaiveDate) -> anyhow::Result<Vec<WorkItem>>;
}
