use chrono::NaiveTime;
use chrono_tz::Tz;
use classmate_reminders_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Key required by the administrative routes (manual scan trigger and
    /// test-email diagnostic)
    pub admin_api_key: String,
    /// Port for the application to run on
    pub port: usize,
    pub smtp: SmtpConfig,
    pub reminder: ReminderConfig,
}

/// Outbound SMTP settings. When no credentials are provided the mail
/// transport is disabled and every send reports a failure.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// RFC 5322 "From" address
    pub from: String,
}

impl SmtpConfig {
    pub fn is_configured(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

/// When the daily reminder check is allowed to fire
#[derive(Debug, Clone)]
pub struct ReminderConfig {
    /// Timezone the trigger window is evaluated in
    pub timezone: Tz,
    pub window_start: NaiveTime,
    pub window_end: NaiveTime,
}

impl Config {
    pub fn new() -> Self {
        let admin_api_key = match std::env::var("ADMIN_API_KEY") {
            Ok(key) => key,
            Err(_) => {
                info!("Did not find ADMIN_API_KEY environment variable. Going to create one.");
                let key = create_random_secret(16);
                info!(
                    "Admin api key for the reminder routes was generated and set to: {}",
                    key
                );
                key
            }
        };

        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let smtp_username = std::env::var("SMTP_USERNAME").ok();
        let smtp = SmtpConfig {
            server: std::env::var("SMTP_SERVER").unwrap_or_else(|_| "smtp.gmail.com".into()),
            port: env_or("SMTP_PORT", 587),
            from: std::env::var("SMTP_FROM")
                .ok()
                .or_else(|| smtp_username.clone())
                .unwrap_or_else(|| "noreply@classmate.local".into()),
            username: smtp_username,
            password: std::env::var("SMTP_PASSWORD").ok(),
        };
        if !smtp.is_configured() {
            warn!("SMTP_USERNAME / SMTP_PASSWORD not set. Email delivery will be disabled.");
        }

        let reminder = ReminderConfig {
            timezone: env_or("REMINDER_TIMEZONE", chrono_tz::UTC),
            window_start: env_or_time("REMINDER_WINDOW_START", NaiveTime::from_hms(8, 0, 0)),
            window_end: env_or_time("REMINDER_WINDOW_END", NaiveTime::from_hms(8, 5, 0)),
        };

        Self {
            admin_api_key,
            port,
            smtp,
            reminder,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn env_or<T: std::str::FromStr>(var: &str, default: T) -> T {
    match std::env::var(var) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!("The given {}: {} is not valid, falling back to the default.", var, raw);
                default
            }
        },
        Err(_) => default,
    }
}

fn env_or_time(var: &str, default: NaiveTime) -> NaiveTime {
    match std::env::var(var) {
        Ok(raw) => match NaiveTime::parse_from_str(&raw, "%H:%M") {
            Ok(time) => time,
            Err(_) => {
                warn!(
                    "The given {}: {} is not a valid HH:MM time, falling back to the default.",
                    var, raw
                );
                default
            }
        },
        Err(_) => default,
    }
}
