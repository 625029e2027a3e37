use crate::shared::usecase::UseCase;
use chrono::{Duration, NaiveDate};
use classmate_reminders_domain::{NotificationWindow, WorkItem};
use classmate_reminders_infra::ClassmateContext;
use tracing::warn;

/// Computes which work items are due exactly 1 or exactly 3 calendar days
/// after `today`. Read-only: safe to run repeatedly without side effects.
#[derive(Debug)]
pub struct ScanDueWorkUseCase {
    /// The calendar day the scan is relative to
    pub today: NaiveDate,
}

/// One reminder-worthy finding. The 1-day and 3-day target dates are
/// distinct, so an item appears in at most one window per scan.
#[derive(Debug, Clone, PartialEq)]
pub struct DueWork {
    pub item: WorkItem,
    pub window: NotificationWindow,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ScanDueWorkUseCase {
    type Response = Vec<DueWork>;

    type Error = UseCaseError;

    const NAME: &'static str = "ScanDueWork";

    async fn execute(&mut self, ctx: &ClassmateContext) -> Result<Self::Response, Self::Error> {
        let mut due = Vec::new();

        for window in NotificationWindow::ALL.iter() {
            let target = self.today + Duration::days(window.days_before());

            let mut items = ctx
                .repos
                .work_items
                .list_graded_work_due_on(target)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            items.extend(
                ctx.repos
                    .work_items
                    .list_assignments_due_on(target)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?,
            );

            for item in items {
                match item.effective_date() {
                    Ok(date) if date == target => due.push(DueWork {
                        item,
                        window: *window,
                    }),
                    // The repository matched on the raw text but the full
                    // date does not land on the target day
                    Ok(_) => continue,
                    Err(e) => warn!("Skipping work item during scan: {}", e),
                }
            }
        }

        Ok(due)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use classmate_reminders_domain::WorkKind;
    use classmate_reminders_infra::setup_context;

    fn work_item(id: i64, kind: WorkKind, date: &str) -> WorkItem {
        WorkItem {
            id,
            kind,
            subject: "Math".into(),
            date: date.into(),
            due_date: None,
            label: "Exam".into(),
            description: None,
        }
    }

    #[actix_web::main]
    #[test]
    async fn classifies_items_into_the_correct_window() {
        let ctx = setup_context().await;
        let repo = &ctx.repos.work_items;
        repo.insert(&work_item(1, WorkKind::GradedWork, "2025-01-11"))
            .await
            .unwrap();
        repo.insert(&work_item(2, WorkKind::Assignment, "2025-01-13"))
            .await
            .unwrap();
        repo.insert(&work_item(3, WorkKind::GradedWork, "2025-01-12"))
            .await
            .unwrap();

        let usecase = ScanDueWorkUseCase {
            today: NaiveDate::from_ymd(2025, 1, 10),
        };
        let due = execute(usecase, &ctx).await.unwrap();

        assert_eq!(due.len(), 2);
        assert_eq!(due[0].item.id, 1);
        assert_eq!(due[0].window, NotificationWindow::OneDay);
        assert_eq!(due[1].item.id, 2);
        assert_eq!(due[1].window, NotificationWindow::ThreeDays);
    }

    #[actix_web::main]
    #[test]
    async fn uses_due_date_override_over_primary_date() {
        let ctx = setup_context().await;
        let mut item = work_item(1, WorkKind::GradedWork, "2025-02-01");
        item.due_date = Some("2025-02-05".into());
        ctx.repos.work_items.insert(&item).await.unwrap();

        // One day before the override
        let usecase = ScanDueWorkUseCase {
            today: NaiveDate::from_ymd(2025, 2, 4),
        };
        let due = execute(usecase, &ctx).await.unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].window, NotificationWindow::OneDay);

        // One day before the primary date: the override wins, nothing due
        let usecase = ScanDueWorkUseCase {
            today: NaiveDate::from_ymd(2025, 1, 31),
        };
        let due = execute(usecase, &ctx).await.unwrap();
        assert!(due.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn a_malformed_date_does_not_abort_the_scan() {
        let ctx = setup_context().await;
        for id in 1..=10 {
            let date = if id == 5 { "not-a-date" } else { "2025-01-11" };
            ctx.repos
                .work_items
                .insert(&work_item(id, WorkKind::GradedWork, date))
                .await
                .unwrap();
        }

        let usecase = ScanDueWorkUseCase {
            today: NaiveDate::from_ymd(2025, 1, 10),
        };
        let due = execute(usecase, &ctx).await.unwrap();

        let ids: Vec<i64> = due.iter().map(|d| d.item.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 6, 7, 8, 9, 10]);
    }

    #[actix_web::main]
    #[test]
    async fn time_of_day_is_ignored_for_day_offset_matching() {
        let ctx = setup_context().await;
        ctx.repos
            .work_items
            .insert(&work_item(1, WorkKind::GradedWork, "2025-01-11 23:59"))
            .await
            .unwrap();

        let usecase = ScanDueWorkUseCase {
            today: NaiveDate::from_ymd(2025, 1, 10),
        };
        let due = execute(usecase, &ctx).await.unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].window, NotificationWindow::OneDay);
    }
}
