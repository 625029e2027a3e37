use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// The two kinds of due work the organizer tracks. They live in separate
/// tables in the backing store but are unified for notification purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkKind {
    GradedWork,
    Assignment,
}

impl WorkKind {
    /// The value stored in the `work_type` column of the ledger
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GradedWork => "test",
            Self::Assignment => "homework",
        }
    }
}

impl Display for WorkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum MalformedDateError {
    #[error("work item {kind}/{id} has a malformed date: `{value}`")]
    Unparsable {
        kind: WorkKind,
        id: i64,
        value: String,
    },
}

/// A snapshot of a graded-work entry or an assignment, read from the
/// organizer's CRUD layer. The reminder engine never mutates these.
///
/// Dates are carried as the stored text (`YYYY-MM-DD`, sometimes with a
/// trailing time component) because the store persists them that way and a
/// single malformed row must never abort a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Unique within its `WorkKind`, not across kinds
    pub id: i64,
    pub kind: WorkKind,
    /// Subject display name. Matching against subject follows is by exact
    /// string equality.
    pub subject: String,
    /// Primary date of the item
    pub date: String,
    /// Optional explicit due-date override
    pub due_date: Option<String>,
    /// Graded-work type or assignment title, display only
    pub label: String,
    pub description: Option<String>,
}

impl WorkItem {
    /// The raw date used for "days until due" arithmetic: the due-date
    /// override if present, otherwise the primary date.
    pub fn effective_date_str(&self) -> &str {
        self.due_date.as_deref().unwrap_or(&self.date)
    }

    /// Parses the date component of the effective date. The time-of-day
    /// part, if any, is ignored for day-offset matching.
    pub fn effective_date(&self) -> Result<NaiveDate, MalformedDateError> {
        let raw = self.effective_date_str();
        let date_part = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| {
            MalformedDateError::Unparsable {
                kind: self.kind,
                id: self.id,
                value: raw.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn work_item(date: &str, due_date: Option<&str>) -> WorkItem {
        WorkItem {
            id: 1,
            kind: WorkKind::GradedWork,
            subject: "Math".into(),
            date: date.into(),
            due_date: due_date.map(|d| d.into()),
            label: "Exam".into(),
            description: None,
        }
    }

    #[test]
    fn parses_primary_date() {
        let item = work_item("2025-02-01", None);
        assert_eq!(
            item.effective_date().unwrap(),
            NaiveDate::from_ymd(2025, 2, 1)
        );
    }

    #[test]
    fn due_date_override_takes_precedence() {
        let item = work_item("2025-02-01", Some("2025-02-05"));
        assert_eq!(
            item.effective_date().unwrap(),
            NaiveDate::from_ymd(2025, 2, 5)
        );
    }

    #[test]
    fn ignores_time_of_day_component() {
        let item = work_item("2025-02-01 23:59", None);
        assert_eq!(
            item.effective_date().unwrap(),
            NaiveDate::from_ymd(2025, 2, 1)
        );
    }

    #[test]
    fn rejects_malformed_date() {
        for bad in ["", "soon", "01/02/2025", "2025-13-40"].iter() {
            assert!(work_item(bad, None).effective_date().is_err());
        }
    }

    #[test]
    fn malformed_override_is_an_error_even_with_valid_primary_date() {
        let item = work_item("2025-02-01", Some("soon"));
        assert!(item.effective_date().is_err());
    }
}
