use super::IWorkItemRepo;
use chrono::NaiveDate;
use classmate_reminders_domain::{WorkItem, WorkKind};
use sqlx::{FromRow, PgPool};

pub struct PostgresWorkItemRepo {
    pool: PgPool,
}

impl PostgresWorkItemRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Display label of assignments, which carry no type column of their own
const ASSIGNMENT_LABEL: &str = "Homework";

#[derive(Debug, FromRow)]
struct GradedWorkRaw {
    id: i64,
    subject: String,
    #[sqlx(rename = "type")]
    work_type: String,
    date: String,
    due_date: Option<String>,
    description: Option<String>,
}

impl Into<WorkItem> for GradedWorkRaw {
    fn into(self) -> WorkItem {
        WorkItem {
            id: self.id,
            kind: WorkKind::GradedWork,
            subject: self.subject,
            date: self.date,
            due_date: self.due_date,
            label: self.work_type,
            description: self.description,
        }
    }
}

#[derive(Debug, FromRow)]
struct AssignmentRaw {
    id: i64,
    subject: String,
    date: String,
    due_date: Option<String>,
    description: Option<String>,
}

impl Into<WorkItem> for AssignmentRaw {
    fn into(self) -> WorkItem {
        WorkItem {
            id: self.id,
            kind: WorkKind::Assignment,
            subject: self.subject,
            date: self.date,
            due_date: self.due_date,
            label: ASSIGNMENT_LABEL.to_string(),
            description: self.description,
        }
    }
}

#[async_trait::async_trait]
impl IWorkItemRepo for PostgresWorkItemRepo {
    async fn insert(&self, item: &WorkItem) -> anyhow::Result<()> {
        match item.kind {
            WorkKind::GradedWork => {
                sqlx::query(
                    r#"
                    INSERT INTO tests
                    (id, subject, type, date, due_date, description)
                    VALUES($1, $2, $3, $4, $5, $6)
                    "#,
                )
                .bind(item.id)
                .bind(&item.subject)
                .bind(&item.label)
                .bind(&item.date)
                .bind(&item.due_date)
                .bind(&item.description)
                .execute(&self.pool)
                .await?;
            }
            WorkKind::Assignment => {
                sqlx::query(
                    r#"
                    INSERT INTO homework
                    (id, subject, date, due_date, description)
                    VALUES($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(item.id)
                .bind(&item.subject)
                .bind(&item.date)
                .bind(&item.due_date)
                .bind(&item.description)
                .execute(&self.pool)
                .await?;
            }
        }
        Ok(())
    }

    async fn list_graded_work_due_on(&self, date: NaiveDate) -> anyhow::Result<Vec<WorkItem>> {
        // Dates are stored as text. Comparing on the leading date component
        // keeps rows with a trailing time part and never errors on
        // malformed values the way a cast would.
        let rows: Vec<GradedWorkRaw> = sqlx::query_as(
            r#"
            SELECT id, subject, type, date, due_date, description
            FROM tests
            WHERE left(coalesce(due_date, date), 10) = $1
            ORDER BY id
            "#,
        )
        .bind(date.format("%Y-%m-%d").to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| row.into()).collect())
    }

    async fn list_assignments_due_on(&self, date: NaiveDate) -> anyhow::Result<Vec<WorkItem>> {
        let rows: Vec<AssignmentRaw> = sqlx::query_as(
            r#"
            SELECT id, subject, date, due_date, description
            FROM homework
            WHERE left(coalesce(due_date, date), 10) = $1
            ORDER BY id
            "#,
        )
        .bind(date.format("%Y-%m-%d").to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| row.into()).collect())
    }
}
