use super::IWorkItemRepo;
use chrono::NaiveDate;
use classmate_reminders_domain::{WorkItem, WorkKind};
use std::sync::Mutex;

pub struct InMemoryWorkItemRepo {
    work_items: Mutex<Vec<WorkItem>>,
}

impl InMemoryWorkItemRepo {
    pub fn new() -> Self {
        Self {
            work_items: Mutex::new(vec![]),
        }
    }

    fn list_due_on(&self, kind: WorkKind, date: NaiveDate) -> Vec<WorkItem> {
        self.work_items
            .lock()
            .unwrap()
            .iter()
            .filter(|item| item.kind == kind && item.effective_date().ok() == Some(date))
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl IWorkItemRepo for InMemoryWorkItemRepo {
    async fn insert(&self, item: &WorkItem) -> anyhow::Result<()> {
        self.work_items.lock().unwrap().push(item.clone());
        Ok(())
    }

    async fn list_graded_work_due_on(&self, date: NaiveDate) -> anyhow::Result<Vec<WorkItem>> {
        Ok(self.list_due_on(WorkKind::GradedWork, date))
    }

    async fn list_assignments_due_on(&self, date: NaiveDate) -> anyhow::Result<Vec<WorkItem>> {
        Ok(self.list_due_on(WorkKind::Assignment, date))
    }
}
