use std::time::Duration;

use chrono::{DateTime, Datelike, Local, Timelike};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::models::Habit;
use crate::notify::Notification;
use crate::state::AppState;

pub const TICK_PERIOD: Duration = Duration::from_secs(60);

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

pub fn day_and_minute(now: DateTime<Local>) -> (u8, String) {
    let day = now.weekday().num_days_from_sunday() as u8;
    let minute = format!("{:02}:{:02}", now.hour(), now.minute());
    (day, minute)
}

pub fn due_habits<'a>(habits: &'a [Habit], day: u8, minute: &str) -> Vec<&'a Habit> {
    habits
        .iter()
        .filter(|habit| habit.time == minute && habit.days.contains(&day))
        .collect()
}

/// Runs for the process lifetime; never cancelled.
pub async fn run(state: AppState) {
    let mut interval = tokio::time::interval(TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    info!("reminder scheduler running every {}s", TICK_PERIOD.as_secs());
    loop {
        interval.tick().await;
        check_reminders(&state).await;
    }
}

pub async fn check_reminders(state: &AppState) {
    if !state.notifier.can_deliver().await {
        debug!("skipping reminder check, notifications not deliverable");
        return;
    }
    let (day, minute) = day_and_minute(state.clock.now());
    let habits = state.store.list().await;
    for habit in due_habits(&habits, day, &minute) {
        info!("reminder due: {} at {}", habit.name, minute);
        state
            .notifier
            .show(Notification::reminder(&habit.name))
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppData, NewHabit};
    use crate::notify::{Notifier, Permission, Platform};
    use crate::quotes::QuoteProvider;
    use crate::store::HabitStore;
    use chrono::TimeZone;
    use std::sync::Arc;

    struct FixedClock(DateTime<Local>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Local> {
            self.0
        }
    }

    fn local(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .expect("valid timestamp")
    }

    fn wednesday_morning() -> DateTime<Local> {
        local(2026, 1, 7, 7, 30)
    }

    fn habit(name: &str, time: &str, days: &[u8]) -> Habit {
        NewHabit {
            name: name.to_string(),
            time: time.to_string(),
            days: days.to_vec(),
            description: String::new(),
        }
        .into_habit()
        .expect("valid habit")
    }

    fn state_at(
        now: DateTime<Local>,
        permission: Permission,
    ) -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = HabitStore::new(dir.path().join("state.json"), AppData::default());
        let notifier = Notifier::new(Platform::full(), permission);
        let quotes = QuoteProvider::new("http://127.0.0.1:9/quotes".to_string()).expect("provider");
        let state = AppState::new(store, notifier, quotes, Arc::new(FixedClock(now)));
        (state, dir)
    }

    #[test]
    fn days_count_from_sunday_and_minutes_are_zero_padded() {
        assert_eq!(day_and_minute(wednesday_morning()), (3, "07:30".to_string()));
        assert_eq!(day_and_minute(local(2026, 1, 4, 0, 5)), (0, "00:05".to_string()));
        assert_eq!(day_and_minute(local(2026, 1, 10, 23, 59)), (6, "23:59".to_string()));
    }

    #[test]
    fn due_habits_need_both_day_and_minute_to_match() {
        let habits = vec![
            habit("Meditate", "07:30", &[1, 3, 5]),
            habit("Run", "07:30", &[0]),
            habit("Read", "20:00", &[3]),
        ];

        let due = due_habits(&habits, 3, "07:30");
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].name, "Meditate");

        assert!(due_habits(&habits, 6, "07:30").is_empty());
        assert!(due_habits(&habits, 3, "07:31").is_empty());
    }

    #[tokio::test]
    async fn matching_habit_fires_a_reminder() {
        let (state, _dir) = state_at(wednesday_morning(), Permission::Granted);
        state
            .store
            .add(habit("Meditate", "07:30", &[1, 3, 5]))
            .await
            .expect("add");

        check_reminders(&state).await;

        let entries = state.notifier.outbox().expect("outbox").active().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].notification.title, "Habit Reminder");
        assert_eq!(entries[0].notification.body, "Time to Meditate!");
    }

    #[tokio::test]
    async fn off_schedule_habits_stay_quiet() {
        let (state, _dir) = state_at(wednesday_morning(), Permission::Granted);
        state
            .store
            .add(habit("Meditate", "07:31", &[3]))
            .await
            .expect("add");
        state
            .store
            .add(habit("Run", "07:30", &[2]))
            .await
            .expect("add");

        check_reminders(&state).await;

        assert!(state.notifier.outbox().expect("outbox").active().await.is_empty());
    }

    #[tokio::test]
    async fn reminders_wait_for_permission() {
        let (state, _dir) = state_at(wednesday_morning(), Permission::Undetermined);
        state
            .store
            .add(habit("Meditate", "07:30", &[3]))
            .await
            .expect("add");

        check_reminders(&state).await;
        state.notifier.set_permission(Permission::Granted).await;

        let entries = state.notifier.outbox().expect("outbox").active().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].notification.title, "Notifications Enabled");
    }
}
