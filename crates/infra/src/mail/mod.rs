mod delivery;
mod transport;

pub use delivery::DeliveryQueue;
pub use transport::{EmailMessage, IMailer, InMemoryMailer, SmtpMailer};
