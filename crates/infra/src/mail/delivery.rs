use super::transport::{EmailMessage, IMailer};
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, error, info};

/// Upper bound on undelivered emails. One daily scan stays far below this,
/// so producers in practice never see a full queue.
const QUEUE_CAPACITY: usize = 256;

/// How long the worker waits for the next item before looping again. This
/// is an idle wakeup, not a shutdown signal.
const RECV_TIMEOUT: Duration = Duration::from_secs(5 * 60);

enum QueueMessage {
    Deliver(EmailMessage),
    Shutdown,
}

/// FIFO hand-off between whoever decides to notify and the single worker
/// task that talks to the mail provider. Producers only do a local push and
/// never block on network I/O.
///
/// Constructed once at application startup and injected into both the web
/// layer and the trigger loop.
#[derive(Clone)]
pub struct DeliveryQueue {
    tx: mpsc::Sender<QueueMessage>,
    worker: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl Debug for DeliveryQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DeliveryQueue")
    }
}

impl DeliveryQueue {
    /// Spawns the delivery worker. At most one worker per queue so a slow
    /// provider is never hit by concurrent connections.
    pub fn start(mailer: Arc<dyn IMailer>) -> Self {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        let worker = tokio::spawn(delivery_worker(rx, mailer));

        Self {
            tx,
            worker: Arc::new(Mutex::new(Some(worker))),
        }
    }

    /// Hands an email to the delivery worker. Returns whether the queue
    /// accepted it, which says nothing about eventual delivery.
    pub fn enqueue(&self, email: EmailMessage) -> bool {
        let to = email.to.clone();
        match self.tx.try_send(QueueMessage::Deliver(email)) {
            Ok(_) => {
                debug!("Email to {} added to the delivery queue", to);
                true
            }
            Err(e) => {
                error!("Delivery queue rejected email to {}: {:?}", to, e);
                false
            }
        }
    }

    /// Clean shutdown: lets the worker drain everything enqueued before the
    /// sentinel and waits for it to exit.
    pub async fn stop(&self) {
        if self.tx.send(QueueMessage::Shutdown).await.is_err() {
            // Worker already gone
        }
        let worker = self.worker.lock().unwrap().take();
        if let Some(worker) = worker {
            if let Err(e) = worker.await {
                error!("Delivery worker did not exit cleanly: {:?}", e);
            }
        }
    }
}

async fn delivery_worker(mut rx: mpsc::Receiver<QueueMessage>, mailer: Arc<dyn IMailer>) {
    info!("Delivery worker started");
    loop {
        match timeout(RECV_TIMEOUT, rx.recv()).await {
            // Idle for a while, keep waiting
            Err(_) => continue,
            Ok(None) | Ok(Some(QueueMessage::Shutdown)) => break,
            Ok(Some(QueueMessage::Deliver(email))) => {
                debug!("Sending email from the delivery queue to: {}", email.to);
                if !mailer.send(&email).await {
                    // Send failures are logged by the mailer. No retry: the
                    // reminder for this recipient is abandoned.
                    error!("Delivery failed for email to: {}", email.to);
                }
            }
        }
    }
    info!("Delivery worker stopped");
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mail::InMemoryMailer;

    fn email(to: &str) -> EmailMessage {
        EmailMessage {
            to: to.into(),
            subject: "subject".into(),
            html_body: "<p>body</p>".into(),
        }
    }

    #[tokio::test]
    async fn delivers_enqueued_emails_in_fifo_order() {
        let mailer = Arc::new(InMemoryMailer::new());
        let queue = DeliveryQueue::start(mailer.clone());

        assert!(queue.enqueue(email("a@x.com")));
        assert!(queue.enqueue(email("b@x.com")));
        queue.stop().await;

        let sent = mailer.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "a@x.com");
        assert_eq!(sent[1].to, "b@x.com");
    }

    #[tokio::test]
    async fn worker_survives_failed_sends() {
        let mailer = Arc::new(InMemoryMailer::failing());
        let queue = DeliveryQueue::start(mailer.clone());

        assert!(queue.enqueue(email("a@x.com")));
        assert!(queue.enqueue(email("b@x.com")));
        queue.stop().await;

        // Nothing delivered, but enqueueing kept working and the worker
        // exited cleanly on the sentinel
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn rejects_enqueue_after_shutdown() {
        let mailer = Arc::new(InMemoryMailer::new());
        let queue = DeliveryQueue::start(mailer.clone());
        queue.stop().await;

        assert!(!queue.enqueue(email("late@x.com")));
    }
}
