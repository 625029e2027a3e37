use crate::notification::NotificationWindow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reminder subscriber, identified by a lower-cased email address.
///
/// The two day-offset preferences are independent: a subscriber may enable
/// neither, either, or both. Deactivated subscriptions are kept around as a
/// soft delete and excluded from resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub email: String,
    pub notify_1_day: bool,
    pub notify_3_days: bool,
    pub active: bool,
    pub created: DateTime<Utc>,
}

impl Subscription {
    pub fn new(email: &str, created: DateTime<Utc>) -> Self {
        Self {
            email: email.to_lowercase(),
            notify_1_day: true,
            notify_3_days: true,
            active: true,
            created,
        }
    }

    /// Whether this subscription opted in to reminders for the given window
    pub fn wants(&self, window: NotificationWindow) -> bool {
        match window {
            NotificationWindow::OneDay => self.notify_1_day,
            NotificationWindow::ThreeDays => self.notify_3_days,
        }
    }
}

/// A subject a subscriber follows. Follows can be deactivated per subject
/// without touching the subscription's global preferences.
///
/// Subjects are identified by display name, so matching against work items
/// is by exact string equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectFollow {
    pub email: String,
    pub subject_name: String,
    pub active: bool,
}

impl SubjectFollow {
    pub fn new(email: &str, subject_name: &str) -> Self {
        Self {
            email: email.to_lowercase(),
            subject_name: subject_name.to_string(),
            active: true,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn new_subscription_defaults_to_both_windows() {
        let sub = Subscription::new("A@X.com", Utc::now());
        assert_eq!(sub.email, "a@x.com");
        assert!(sub.active);
        assert!(sub.wants(NotificationWindow::OneDay));
        assert!(sub.wants(NotificationWindow::ThreeDays));
    }

    #[test]
    fn window_preferences_are_independent() {
        let mut sub = Subscription::new("a@x.com", Utc::now());
        sub.notify_1_day = false;
        assert!(!sub.wants(NotificationWindow::OneDay));
        assert!(sub.wants(NotificationWindow::ThreeDays));
    }

    #[test]
    fn follow_keeps_subject_name_case() {
        let follow = SubjectFollow::new("A@X.com", "Math");
        assert_eq!(follow.email, "a@x.com");
        assert_eq!(follow.subject_name, "Math");
    }
}
