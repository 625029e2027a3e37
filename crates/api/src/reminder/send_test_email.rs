use crate::error::ClassmateError;
use crate::shared::auth::protect_admin_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use classmate_reminders_infra::{ClassmateContext, DeliveryQueue, EmailMessage};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RequestBody {
    pub to: String,
}

pub async fn send_test_email_admin_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<ClassmateContext>,
    queue: web::Data<DeliveryQueue>,
) -> Result<HttpResponse, ClassmateError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = SendTestEmailUseCase {
        to: body.0.to,
        queue: queue.get_ref().clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse { enqueued: res }))
        .map_err(ClassmateError::from)
}

#[derive(Debug, Serialize)]
pub struct APIResponse {
    pub enqueued: bool,
}

/// Pushes a diagnostic email through the same queue and transport the
/// reminder pass uses, so an operator can verify the SMTP setup end to end
/// without waiting for real due work.
#[derive(Debug)]
pub struct SendTestEmailUseCase {
    pub to: String,
    pub queue: DeliveryQueue,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    QueueUnavailable,
}

impl From<UseCaseError> for ClassmateError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::QueueUnavailable => {
                Self::ServiceUnavailable("The delivery queue did not accept the email".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendTestEmailUseCase {
    type Response = bool;

    type Error = UseCaseError;

    const NAME: &'static str = "SendTestEmail";

    async fn execute(&mut self, _ctx: &ClassmateContext) -> Result<Self::Response, Self::Error> {
        let accepted = self.queue.enqueue(EmailMessage {
            to: self.to.clone(),
            subject: "📧 Test email".into(),
            html_body: "<h2>It works!</h2><p>Your email delivery setup is functional.</p>"
                .to_string(),
        });
        if accepted {
            Ok(true)
        } else {
            Err(UseCaseError::QueueUnavailable)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use classmate_reminders_infra::{setup_context, IMailer, InMemoryMailer};
    use std::sync::Arc;

    #[actix_web::main]
    #[test]
    async fn test_email_goes_through_the_shared_pipeline() {
        let ctx = setup_context().await;
        let mailer = Arc::new(InMemoryMailer::new());
        let queue = DeliveryQueue::start(mailer.clone() as Arc<dyn IMailer>);

        let usecase = SendTestEmailUseCase {
            to: "ops@x.com".into(),
            queue: queue.clone(),
        };
        assert!(execute(usecase, &ctx).await.unwrap());

        queue.stop().await;
        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "ops@x.com");
        assert!(sent[0].subject.contains("Test email"));
    }

    #[actix_web::main]
    #[test]
    async fn reports_unavailable_when_the_queue_is_stopped() {
        let ctx = setup_context().await;
        let mailer = Arc::new(InMemoryMailer::new());
        let queue = DeliveryQueue::start(mailer.clone() as Arc<dyn IMailer>);
        queue.stop().await;

        let usecase = SendTestEmailUseCase {
            to: "ops@x.com".into(),
            queue,
        };
        assert_eq!(
            execute(usecase, &ctx).await.unwrap_err(),
            UseCaseError::QueueUnavailable
        );
    }
}
