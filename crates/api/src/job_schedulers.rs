use crate::reminder::SendDueWorkRemindersUseCase;
use crate::shared::usecase::execute;
use actix_web::rt::time::interval;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use classmate_reminders_infra::{ClassmateContext, DeliveryQueue};
use std::time::Duration;
use tracing::info;

/// Decides, tick by tick, whether the daily reminder pass should fire.
///
/// Fires at most once per local calendar day, and only while the local
/// wall-clock time is inside the configured window. A day where the process
/// was down for the whole window is skipped, never caught up on later.
pub struct DailyTrigger {
    window_start: NaiveTime,
    window_end: NaiveTime,
    last_fired: Option<NaiveDate>,
}

impl DailyTrigger {
    pub fn new(window_start: NaiveTime, window_end: NaiveTime) -> Self {
        Self {
            window_start,
            window_end,
            last_fired: None,
        }
    }

    pub fn on_tick(&mut self, local_now: NaiveDateTime) -> bool {
        let today = local_now.date();
        let time = local_now.time();

        if time < self.window_start || time > self.window_end {
            // Reset once the window has passed so firing resumes the next
            // time the window opens even when the host clock misbehaved. A
            // repeat pass is harmless, the dedup ledger absorbs it.
            self.last_fired = None;
            return false;
        }

        if self.last_fired == Some(today) {
            return false;
        }

        self.last_fired = Some(today);
        true
    }
}

/// Spawns the trigger loop: wakes every minute, asks the `DailyTrigger`
/// whether it is reminder time, and runs one full reminder pass when it is.
pub fn start_due_work_reminder_job(ctx: ClassmateContext, queue: DeliveryQueue) {
    actix_web::rt::spawn(async move {
        let reminder = &ctx.config.reminder;
        info!(
            "Daily reminder trigger running, window {} - {} ({})",
            reminder.window_start, reminder.window_end, reminder.timezone
        );

        let mut trigger = DailyTrigger::new(reminder.window_start, reminder.window_end);
        let mut minutely_interval = interval(Duration::from_secs(60));
        loop {
            minutely_interval.tick().await;

            let local_now = ctx
                .sys
                .now()
                .with_timezone(&reminder.timezone)
                .naive_local();
            if !trigger.on_tick(local_now) {
                continue;
            }

            info!("Starting the daily due work reminder pass");
            let usecase = SendDueWorkRemindersUseCase {
                today: local_now.date(),
                queue: queue.clone(),
            };
            match execute(usecase, &ctx).await {
                Ok(report) => info!("Daily reminder pass finished: {:?}", report),
                // Already logged by the usecase wrapper. The next attempt is
                // tomorrow's window.
                Err(_) => (),
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trigger() -> DailyTrigger {
        DailyTrigger::new(
            NaiveTime::from_hms(8, 0, 0),
            NaiveTime::from_hms(8, 5, 0),
        )
    }

    fn at(date: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
        date.and_hms(h, m, 0)
    }

    #[test]
    fn fires_only_inside_the_window() {
        let mut trigger = trigger();
        let day = NaiveDate::from_ymd(2025, 1, 10);

        assert!(!trigger.on_tick(at(day, 7, 59)));
        assert!(trigger.on_tick(at(day, 8, 0)));
    }

    #[test]
    fn fires_at_most_once_per_day() {
        let mut trigger = trigger();
        let day = NaiveDate::from_ymd(2025, 1, 10);

        assert!(trigger.on_tick(at(day, 8, 0)));
        assert!(!trigger.on_tick(at(day, 8, 1)));
        assert!(!trigger.on_tick(at(day, 8, 5)));

        assert!(trigger.on_tick(at(day.succ(), 8, 0)));
    }

    #[test]
    fn a_missed_window_is_not_caught_up_later() {
        let mut trigger = trigger();
        let day = NaiveDate::from_ymd(2025, 1, 10);

        // Process was "down" for the whole window, first tick after it
        assert!(!trigger.on_tick(at(day, 11, 30)));
        assert!(!trigger.on_tick(at(day, 23, 59)));
        assert!(trigger.on_tick(at(day.succ(), 8, 2)));
    }

    #[test]
    fn recovers_when_the_clock_moves_backwards() {
        let mut trigger = trigger();
        let day = NaiveDate::from_ymd(2025, 1, 10);

        assert!(trigger.on_tick(at(day, 8, 0)));
        // Host clock jumps back a day: the gate resets and firing resumes
        assert!(trigger.on_tick(at(day.pred(), 8, 0)));
    }
}
