mod notification;
mod reminder_email;
mod subscription;
mod work;

pub use notification::{InvalidNotificationWindowError, NotificationWindow, SentNotification};
pub use reminder_email::ReminderEmail;
pub use subscription::{SubjectFollow, Subscription};
pub use work::{MalformedDateError, WorkItem, WorkKind};
