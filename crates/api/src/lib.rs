mod error;
mod job_schedulers;
mod reminder;
mod shared;
mod status;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use classmate_reminders_infra::{ClassmateContext, DeliveryQueue, SmtpMailer};
use job_schedulers::start_due_work_reminder_job;
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    reminder::configure_routes(cfg);
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    queue: DeliveryQueue,
}

impl Application {
    pub async fn new(context: ClassmateContext) -> Result<Self, std::io::Error> {
        // One queue for the whole process: the web layer and the trigger
        // loop share it, and its worker owns the only SMTP transport.
        let mailer = Arc::new(SmtpMailer::new(&context.config.smtp));
        let queue = DeliveryQueue::start(mailer);

        let (server, port) =
            Application::configure_server(context.clone(), queue.clone()).await?;
        Application::start_job_schedulers(context, queue.clone());

        Ok(Self {
            server,
            port,
            queue,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(context: ClassmateContext, queue: DeliveryQueue) {
        start_due_work_reminder_job(context, queue);
    }

    async fn configure_server(
        context: ClassmateContext,
        queue: DeliveryQueue,
    ) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr().unwrap().port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();
            let queue = queue.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .app_data(web::Data::new(queue))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        let res = self.server.await;
        // Let the delivery worker drain before the process exits
        self.queue.stop().await;
        res
    }
}
