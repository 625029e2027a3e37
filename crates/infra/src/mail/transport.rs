use crate::config::SmtpConfig;
use lettre::message::{MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{error, info, warn};

/// How long one SMTP connect/command attempt may take
const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// An email ready to go on the wire
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Synchronous-per-message mail sender. One attempt per message, no retry;
/// failures are logged and reported as `false`, never raised.
#[async_trait::async_trait]
pub trait IMailer: Send + Sync {
    async fn send(&self, email: &EmailMessage) -> bool;
}

/// Sends over SMTP submission with STARTTLS. When the configuration has no
/// credentials the transport is disabled and every send reports a failure.
pub struct SmtpMailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Self {
        let transport = match (&config.username, &config.password) {
            (Some(username), Some(password)) => {
                match AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.server) {
                    Ok(builder) => Some(
                        builder
                            .port(config.port)
                            .credentials(Credentials::new(username.clone(), password.clone()))
                            .timeout(Some(SMTP_TIMEOUT))
                            .build(),
                    ),
                    Err(e) => {
                        error!("Invalid SMTP relay: {}. Error: {:?}", config.server, e);
                        None
                    }
                }
            }
            _ => {
                warn!("SMTP credentials are not set. Mailer is disabled.");
                None
            }
        };

        Self {
            transport,
            from: config.from.clone(),
        }
    }
}

#[async_trait::async_trait]
impl IMailer for SmtpMailer {
    async fn send(&self, email: &EmailMessage) -> bool {
        let transport = match &self.transport {
            Some(transport) => transport,
            None => {
                warn!("Email to {} dropped, mailer is disabled", email.to);
                return false;
            }
        };

        let from = match self.from.parse() {
            Ok(mailbox) => mailbox,
            Err(e) => {
                error!("Invalid from address: {}. Error: {:?}", self.from, e);
                return false;
            }
        };
        let to = match email.to.parse() {
            Ok(mailbox) => mailbox,
            Err(e) => {
                error!("Invalid recipient address: {}. Error: {:?}", email.to, e);
                return false;
            }
        };

        let message = match Message::builder()
            .from(from)
            .to(to)
            .subject(&email.subject)
            .multipart(MultiPart::mixed().singlepart(SinglePart::html(email.html_body.clone())))
        {
            Ok(message) => message,
            Err(e) => {
                error!("Could not assemble email to {}. Error: {:?}", email.to, e);
                return false;
            }
        };

        match transport.send(message).await {
            Ok(_) => {
                info!("Email sent to: {}", email.to);
                true
            }
            Err(e) => {
                error!("Error sending email to {}: {:?}", email.to, e);
                false
            }
        }
    }
}

/// Records sent emails instead of talking to a provider. Used when testing
/// the delivery pipeline and when no real SMTP setup is available.
pub struct InMemoryMailer {
    sent: Mutex<Vec<EmailMessage>>,
    fail: bool,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            fail: false,
        }
    }

    /// A mailer where every send fails, for exercising failure handling
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IMailer for InMemoryMailer {
    async fn send(&self, email: &EmailMessage) -> bool {
        if self.fail {
            error!("Error sending email to {}: in-memory mailer set to fail", email.to);
            return false;
        }
        self.sent.lock().unwrap().push(email.clone());
        true
    }
}
