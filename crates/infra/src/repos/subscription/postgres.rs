use super::ISubscriptionRepo;
use chrono::{DateTime, Utc};
use classmate_reminders_domain::{NotificationWindow, SubjectFollow, Subscription};
use sqlx::{FromRow, PgPool};
use tracing::error;

pub struct PostgresSubscriptionRepo {
    pool: PgPool,
}

impl PostgresSubscriptionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SubscriptionRaw {
    email: String,
    notify_1_day: bool,
    notify_3_days: bool,
    is_active: bool,
    created_date: DateTime<Utc>,
}

impl Into<Subscription> for SubscriptionRaw {
    fn into(self) -> Subscription {
        Subscription {
            email: self.email,
            notify_1_day: self.notify_1_day,
            notify_3_days: self.notify_3_days,
            active: self.is_active,
            created: self.created_date,
        }
    }
}

#[async_trait::async_trait]
impl ISubscriptionRepo for PostgresSubscriptionRepo {
    async fn insert(&self, subscription: &Subscription) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO email_subscriptions
            (email, notify_1_day, notify_3_days, is_active, created_date)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&subscription.email)
        .bind(subscription.notify_1_day)
        .bind(subscription.notify_3_days)
        .bind(subscription.active)
        .bind(subscription.created)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_follow(&self, follow: &SubjectFollow) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO email_subject_subscriptions
            (email, subject_name, is_active)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(&follow.email)
        .bind(&follow.subject_name)
        .bind(follow.active)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, email: &str) -> Option<Subscription> {
        let row: Option<SubscriptionRaw> = sqlx::query_as(
            r#"
            SELECT email, notify_1_day, notify_3_days, is_active, created_date
            FROM email_subscriptions
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!("Find subscription for email: {} failed. DB returned error: {:?}", email, e);
            None
        });

        row.map(|row| row.into())
    }

    async fn find_subscribers(
        &self,
        subject_name: &str,
        window: NotificationWindow,
    ) -> anyhow::Result<Vec<String>> {
        let emails = sqlx::query_scalar(
            r#"
            SELECT DISTINCT es.email
            FROM email_subscriptions es
            JOIN email_subject_subscriptions ess ON es.email = ess.email
            WHERE ess.subject_name = $1
            AND ess.is_active = TRUE
            AND es.is_active = TRUE
            AND ((es.notify_1_day = TRUE AND $2 = 1) OR (es.notify_3_days = TRUE AND $2 = 3))
            ORDER BY es.email
            "#,
        )
        .bind(subject_name)
        .bind(window.days_before())
        .fetch_all(&self.pool)
        .await?;

        Ok(emails)
    }
}
