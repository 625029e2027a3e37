mod scan_due_work;
mod send_due_work_reminders;
mod send_test_email;

use actix_web::web;
pub use send_due_work_reminders::SendDueWorkRemindersUseCase;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Admin route
    cfg.route(
        "/reminders/trigger",
        web::post().to(send_due_work_reminders::trigger_scan_admin_controller),
    );
    // Admin route
    cfg.route(
        "/mail/test",
        web::post().to(send_test_email::send_test_email_admin_controller),
    );
}
