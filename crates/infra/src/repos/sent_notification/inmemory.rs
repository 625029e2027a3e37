use super::ISentNotificationRepo;
use classmate_reminders_domain::{NotificationWindow, SentNotification};
use std::sync::Mutex;

pub struct InMemorySentNotificationRepo {
    notifications: Mutex<Vec<SentNotification>>,
}

impl InMemorySentNotificationRepo {
    pub fn new() -> Self {
        Self {
            notifications: Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl ISentNotificationRepo for InMemorySentNotificationRepo {
    async fn insert(&self, notification: &SentNotification) -> anyhow::Result<bool> {
        let mut notifications = self.notifications.lock().unwrap();
        let duplicate = notifications.iter().any(|n| {
            n.user_email == notification.user_email
                && n.work_id == notification.work_id
                && n.window == notification.window
        });
        if duplicate {
            return Ok(false);
        }
        notifications.push(notification.clone());
        Ok(true)
    }

    async fn exists(
        &self,
        email: &str,
        work_id: i64,
        window: NotificationWindow,
    ) -> anyhow::Result<bool> {
        Ok(self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .any(|n| n.user_email == email && n.work_id == work_id && n.window == window))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Utc;
    use classmate_reminders_domain::WorkKind;

    fn row(email: &str, work_id: i64, window: NotificationWindow) -> SentNotification {
        SentNotification::new(email, work_id, WorkKind::GradedWork, window, Utc::now())
    }

    #[tokio::test]
    async fn second_insert_with_the_same_key_is_a_noop() {
        let repo = InMemorySentNotificationRepo::new();

        assert!(repo
            .insert(&row("a@x.com", 1, NotificationWindow::OneDay))
            .await
            .unwrap());
        assert!(!repo
            .insert(&row("a@x.com", 1, NotificationWindow::OneDay))
            .await
            .unwrap());

        assert!(repo
            .exists("a@x.com", 1, NotificationWindow::OneDay)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn key_distinguishes_email_work_and_window() {
        let repo = InMemorySentNotificationRepo::new();
        repo.insert(&row("a@x.com", 1, NotificationWindow::OneDay))
            .await
            .unwrap();

        assert!(repo
            .insert(&row("b@x.com", 1, NotificationWindow::OneDay))
            .await
            .unwrap());
        assert!(repo
            .insert(&row("a@x.com", 2, NotificationWindow::OneDay))
            .await
            .unwrap());
        assert!(repo
            .insert(&row("a@x.com", 1, NotificationWindow::ThreeDays))
            .await
            .unwrap());
    }
}
