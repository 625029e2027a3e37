use crate::work::WorkKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// The lookahead bucket a reminder belongs to. An item is reminded about
/// at most once per window, and the 1-day and 3-day target dates are
/// always distinct, so one scan classifies an item into at most one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationWindow {
    OneDay,
    ThreeDays,
}

impl NotificationWindow {
    pub const ALL: [NotificationWindow; 2] = [Self::OneDay, Self::ThreeDays];

    /// Number of calendar days between the scan day and the target date
    pub fn days_before(&self) -> i64 {
        match self {
            Self::OneDay => 1,
            Self::ThreeDays => 3,
        }
    }

    /// The value stored in the `notification_type` column of the ledger
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneDay => "due_in_1_day",
            Self::ThreeDays => "due_in_3_days",
        }
    }
}

impl Display for NotificationWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidNotificationWindowError {
    #[error("`{0}` is not a valid notification window")]
    Malformed(String),
}

impl FromStr for NotificationWindow {
    type Err = InvalidNotificationWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "due_in_1_day" => Ok(Self::OneDay),
            "due_in_3_days" => Ok(Self::ThreeDays),
            _ => Err(InvalidNotificationWindowError::Malformed(s.to_string())),
        }
    }
}

/// A row of the dedup ledger. Its presence means "this exact reminder has
/// already been dispatched, do not send it again". Rows are written the
/// moment a send is handed to the delivery queue and are never updated or
/// deleted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentNotification {
    pub user_email: String,
    pub work_id: i64,
    /// Stored for operator visibility. Not part of the uniqueness key.
    pub work_kind: WorkKind,
    pub window: NotificationWindow,
    pub sent_at: DateTime<Utc>,
}

impl SentNotification {
    pub fn new(
        user_email: &str,
        work_id: i64,
        work_kind: WorkKind,
        window: NotificationWindow,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_email: user_email.to_lowercase(),
            work_id,
            work_kind,
            window,
            sent_at,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn window_day_offsets() {
        assert_eq!(NotificationWindow::OneDay.days_before(), 1);
        assert_eq!(NotificationWindow::ThreeDays.days_before(), 3);
    }

    #[test]
    fn window_roundtrips_through_ledger_representation() {
        for window in NotificationWindow::ALL.iter() {
            assert_eq!(window.as_str().parse::<NotificationWindow>().unwrap(), *window);
        }
        assert!("due_in_2_days".parse::<NotificationWindow>().is_err());
    }

    #[test]
    fn ledger_row_lowercases_email() {
        let row = SentNotification::new(
            "A@X.com",
            42,
            WorkKind::GradedWork,
            NotificationWindow::OneDay,
            Utc::now(),
        );
        assert_eq!(row.user_email, "a@x.com");
    }
}
