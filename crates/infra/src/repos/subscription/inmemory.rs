use super::ISubscriptionRepo;
use classmate_reminders_domain::{NotificationWindow, SubjectFollow, Subscription};
use std::sync::Mutex;

pub struct InMemorySubscriptionRepo {
    subscriptions: Mutex<Vec<Subscription>>,
    follows: Mutex<Vec<SubjectFollow>>,
}

impl InMemorySubscriptionRepo {
    pub fn new() -> Self {
        Self {
            subscriptions: Mutex::new(vec![]),
            follows: Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl ISubscriptionRepo for InMemorySubscriptionRepo {
    async fn insert(&self, subscription: &Subscription) -> anyhow::Result<()> {
        self.subscriptions.lock().unwrap().push(subscription.clone());
        Ok(())
    }

    async fn insert_follow(&self, follow: &SubjectFollow) -> anyhow::Result<()> {
        self.follows.lock().unwrap().push(follow.clone());
        Ok(())
    }

    async fn find(&self, email: &str) -> Option<Subscription> {
        self.subscriptions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.email == email)
            .cloned()
    }

    async fn find_subscribers(
        &self,
        subject_name: &str,
        window: NotificationWindow,
    ) -> anyhow::Result<Vec<String>> {
        let follows = self.follows.lock().unwrap();
        let subscriptions = self.subscriptions.lock().unwrap();

        let mut emails: Vec<String> = subscriptions
            .iter()
            .filter(|sub| sub.active && sub.wants(window))
            .filter(|sub| {
                follows
                    .iter()
                    .any(|f| f.active && f.email == sub.email && f.subject_name == subject_name)
            })
            .map(|sub| sub.email.clone())
            .collect();

        // A subscriber matched through multiple rows is still one recipient
        emails.sort();
        emails.dedup();
        Ok(emails)
    }
}
