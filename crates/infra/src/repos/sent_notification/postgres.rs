use super::ISentNotificationRepo;
use classmate_reminders_domain::{NotificationWindow, SentNotification};
use sqlx::PgPool;

pub struct PostgresSentNotificationRepo {
    pool: PgPool,
}

impl PostgresSentNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ISentNotificationRepo for PostgresSentNotificationRepo {
    async fn insert(&self, notification: &SentNotification) -> anyhow::Result<bool> {
        // The unique constraint is the idempotency guarantee. A concurrent
        // writer losing the race is reported as a duplicate, not an error.
        let res = sqlx::query(
            r#"
            INSERT INTO sent_notifications
            (user_email, work_id, work_type, notification_type, sent_date)
            VALUES($1, $2, $3, $4, $5)
            ON CONFLICT (user_email, work_id, notification_type) DO NOTHING
            "#,
        )
        .bind(&notification.user_email)
        .bind(notification.work_id)
        .bind(notification.work_kind.as_str())
        .bind(notification.window.as_str())
        .bind(notification.sent_at)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }

    async fn exists(
        &self,
        email: &str,
        work_id: i64,
        window: NotificationWindow,
    ) -> anyhow::Result<bool> {
        let exists = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM sent_notifications
                WHERE user_email = $1
                AND work_id = $2
                AND notification_type = $3
            )
            "#,
        )
        .bind(email)
        .bind(work_id)
        .bind(window.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
