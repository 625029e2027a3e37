use super::scan_due_work::{self, ScanDueWorkUseCase};
use crate::error::ClassmateError;
use crate::shared::auth::protect_admin_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::NaiveDate;
use classmate_reminders_domain::{ReminderEmail, SentNotification};
use classmate_reminders_infra::{ClassmateContext, DeliveryQueue, EmailMessage};
use serde::Serialize;

pub async fn trigger_scan_admin_controller(
    http_req: HttpRequest,
    ctx: web::Data<ClassmateContext>,
    queue: web::Data<DeliveryQueue>,
) -> Result<HttpResponse, ClassmateError> {
    protect_admin_route(&http_req, &ctx)?;

    let today = ctx
        .sys
        .now()
        .with_timezone(&ctx.config.reminder.timezone)
        .naive_local()
        .date();
    let usecase = SendDueWorkRemindersUseCase {
        today,
        queue: queue.get_ref().clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|report| HttpResponse::Ok().json(APIResponse::new(report)))
        .map_err(ClassmateError::from)
}

#[derive(Debug, Serialize)]
pub struct APIResponse {
    pub report: ScanReport,
}

impl APIResponse {
    pub fn new(report: ScanReport) -> Self {
        Self { report }
    }
}

/// Runs one full reminder pass: scan for due work, resolve subscribers,
/// record ledger rows and hand emails to the delivery queue. Idempotent
/// for a given calendar day through the dedup ledger, so the daily trigger
/// and the manual trigger can race without double-sending.
#[derive(Debug)]
pub struct SendDueWorkRemindersUseCase {
    pub today: NaiveDate,
    pub queue: DeliveryQueue,
}

/// What one reminder pass did. Only dispatching is reported here: whether
/// the delivery worker could actually send is a matter for the logs.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct ScanReport {
    /// (item, window) pairs the scan classified as due
    pub items_found: usize,
    /// Emails handed to the delivery queue
    pub emails_enqueued: usize,
    /// Reminders skipped because their ledger row already existed
    pub emails_suppressed: usize,
    /// Emails the queue would not accept
    pub sends_rejected: usize,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<scan_due_work::UseCaseError> for UseCaseError {
    fn from(e: scan_due_work::UseCaseError) -> Self {
        match e {
            scan_due_work::UseCaseError::StorageError => Self::StorageError,
        }
    }
}

impl From<UseCaseError> for ClassmateError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendDueWorkRemindersUseCase {
    type Response = ScanReport;

    type Error = UseCaseError;

    const NAME: &'static str = "SendDueWorkReminders";

    async fn execute(&mut self, ctx: &ClassmateContext) -> Result<Self::Response, Self::Error> {
        let due = execute(ScanDueWorkUseCase { today: self.today }, ctx)
            .await
            .map_err(UseCaseError::from)?;

        let mut report = ScanReport {
            items_found: due.len(),
            ..Default::default()
        };

        for finding in due {
            let recipients = ctx
                .repos
                .subscriptions
                .find_subscribers(&finding.item.subject, finding.window)
                .await
                .map_err(|_| UseCaseError::StorageError)?;

            for recipient in recipients {
                let already_sent = ctx
                    .repos
                    .sent_notifications
                    .exists(&recipient, finding.item.id, finding.window)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
                if already_sent {
                    report.emails_suppressed += 1;
                    continue;
                }

                // The ledger row is written at dispatch time, before the
                // send outcome is known
                let row = SentNotification::new(
                    &recipient,
                    finding.item.id,
                    finding.item.kind,
                    finding.window,
                    ctx.sys.now(),
                );
                let inserted = ctx
                    .repos
                    .sent_notifications
                    .insert(&row)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
                if !inserted {
                    // A concurrent pass dispatched this reminder first
                    report.emails_suppressed += 1;
                    continue;
                }

                let rendered = ReminderEmail::for_work(&finding.item, finding.window);
                let accepted = self.queue.enqueue(EmailMessage {
                    to: recipient,
                    subject: rendered.subject,
                    html_body: rendered.html_body,
                });
                if accepted {
                    report.emails_enqueued += 1;
                } else {
                    report.sends_rejected += 1;
                }
            }
        }

        Ok(report)
    }
}
