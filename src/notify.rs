use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::chime::CHIME_PATH;

pub const REMINDER_TAG: &str = "habit-reminder";
pub const AUTO_CLOSE: Duration = Duration::from_secs(15);
pub const VIBRATION_PATTERN: [u32; 3] = [200, 100, 200];

const ICON_URL: &str = "https://cdn-icons-png.flaticon.com/512/3063/3063188.png";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    #[default]
    Undetermined,
    Granted,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShowOutcome {
    Delivered,
    AwaitingPermission,
    Denied,
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: &'static str,
    pub body: String,
    pub tag: &'static str,
    pub require_interaction: bool,
    pub icon: &'static str,
}

impl Notification {
    pub fn reminder(name: &str) -> Self {
        Self::tagged("Habit Reminder", format!("Time to {name}!"))
    }

    pub fn test() -> Self {
        Self::tagged(
            "Test Notification",
            "This is a test of the reminder system!".to_string(),
        )
    }

    pub fn permission_granted() -> Self {
        Self::tagged(
            "Notifications Enabled",
            "You will now receive reminders!".to_string(),
        )
    }

    fn tagged(title: &'static str, body: String) -> Self {
        Self {
            title,
            body,
            tag: REMINDER_TAG,
            require_interaction: true,
            icon: ICON_URL,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Capability<T> {
    Available(T),
    Unavailable,
}

impl<T> Capability<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Capability::Available(value) => Some(value),
            Capability::Unavailable => None,
        }
    }
}

#[derive(Clone)]
pub struct Platform {
    pub notifications: Capability<Outbox>,
    pub sound: Capability<&'static str>,
    pub vibration: Capability<Vec<u32>>,
}

impl Platform {
    pub fn full() -> Self {
        Self {
            notifications: Capability::Available(Outbox::default()),
            sound: Capability::Available(CHIME_PATH),
            vibration: Capability::Available(VIBRATION_PATTERN.to_vec()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActiveNotification {
    pub id: u64,
    #[serde(flatten)]
    pub notification: Notification,
    pub sound: Option<&'static str>,
    pub vibration: Option<Vec<u32>>,
    #[serde(skip)]
    expires_at: Instant,
}

#[derive(Clone, Default)]
pub struct Outbox {
    inner: Arc<Mutex<OutboxInner>>,
}

#[derive(Default)]
struct OutboxInner {
    next_id: u64,
    entries: Vec<ActiveNotification>,
}

impl Outbox {
    pub async fn post(
        &self,
        notification: Notification,
        sound: Option<&'static str>,
        vibration: Option<Vec<u32>>,
    ) -> u64 {
        let mut inner = self.inner.lock().await;
        let now = Instant::now();
        let tag = notification.tag;
        inner
            .entries
            .retain(|entry| entry.expires_at > now && entry.notification.tag != tag);
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.push(ActiveNotification {
            id,
            notification,
            sound,
            vibration,
            expires_at: now + AUTO_CLOSE,
        });
        id
    }

    pub async fn active(&self) -> Vec<ActiveNotification> {
        let mut inner = self.inner.lock().await;
        let now = Instant::now();
        inner.entries.retain(|entry| entry.expires_at > now);
        inner.entries.clone()
    }

    pub async fn dismiss(&self, id: u64) {
        self.inner.lock().await.entries.retain(|entry| entry.id != id);
    }
}

#[derive(Clone)]
pub struct Notifier {
    platform: Platform,
    permission: Arc<Mutex<Permission>>,
    pending: Arc<Mutex<Vec<Notification>>>,
}

impl Notifier {
    pub fn new(platform: Platform, permission: Permission) -> Self {
        Self {
            platform,
            permission: Arc::new(Mutex::new(permission)),
            pending: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn permission(&self) -> Permission {
        *self.permission.lock().await
    }

    pub async fn can_deliver(&self) -> bool {
        self.platform.notifications.is_available()
            && *self.permission.lock().await == Permission::Granted
    }

    pub fn outbox(&self) -> Option<&Outbox> {
        self.platform.notifications.value()
    }

    pub async fn show(&self, notification: Notification) -> ShowOutcome {
        if !self.platform.notifications.is_available() {
            warn!("notifications unsupported on this platform, dropping {}", notification.title);
            return ShowOutcome::Unsupported;
        }
        match *self.permission.lock().await {
            Permission::Granted => {
                self.deliver(notification).await;
                ShowOutcome::Delivered
            }
            Permission::Undetermined => {
                debug!("permission undetermined, queueing {}", notification.title);
                self.pending.lock().await.push(notification);
                ShowOutcome::AwaitingPermission
            }
            Permission::Denied => {
                debug!("permission denied, dropping {}", notification.title);
                ShowOutcome::Denied
            }
        }
    }

    pub async fn set_permission(&self, permission: Permission) {
        {
            let mut current = self.permission.lock().await;
            if *current == permission {
                return;
            }
            *current = permission;
        }
        info!("notification permission is now {permission:?}");
        match permission {
            Permission::Granted => {
                self.deliver(Notification::permission_granted()).await;
                let queued: Vec<Notification> = self.pending.lock().await.drain(..).collect();
                for notification in queued {
                    self.deliver(notification).await;
                }
            }
            Permission::Denied => self.pending.lock().await.clear(),
            Permission::Undetermined => {}
        }
    }

    async fn deliver(&self, notification: Notification) {
        if let Capability::Available(outbox) = &self.platform.notifications {
            info!("showing notification: {}", notification.title);
            let sound = self.platform.sound.value().copied();
            let vibration = self.platform.vibration.value().cloned();
            outbox.post(notification, sound, vibration).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outbox_only() -> Platform {
        Platform {
            notifications: Capability::Available(Outbox::default()),
            sound: Capability::Unavailable,
            vibration: Capability::Unavailable,
        }
    }

    fn no_platform() -> Platform {
        Platform {
            notifications: Capability::Unavailable,
            sound: Capability::Unavailable,
            vibration: Capability::Unavailable,
        }
    }

    async fn active(notifier: &Notifier) -> Vec<ActiveNotification> {
        notifier.outbox().expect("outbox").active().await
    }

    #[test]
    fn permission_serializes_lowercase() {
        let json = serde_json::to_value([
            Permission::Undetermined,
            Permission::Granted,
            Permission::Denied,
        ])
        .expect("serialize");
        assert_eq!(json, serde_json::json!(["undetermined", "granted", "denied"]));
        assert_eq!(Permission::default(), Permission::Undetermined);
    }

    #[test]
    fn reminder_fills_in_habit_name() {
        let notification = Notification::reminder("Meditate");
        assert_eq!(notification.title, "Habit Reminder");
        assert_eq!(notification.body, "Time to Meditate!");
        assert_eq!(notification.tag, REMINDER_TAG);
        assert!(notification.require_interaction);
    }

    #[tokio::test]
    async fn granted_show_lands_in_outbox() {
        let notifier = Notifier::new(Platform::full(), Permission::Granted);
        let outcome = notifier.show(Notification::reminder("Meditate")).await;
        assert_eq!(outcome, ShowOutcome::Delivered);

        let entries = active(&notifier).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].notification.body, "Time to Meditate!");
        assert_eq!(entries[0].sound, Some(CHIME_PATH));
        assert_eq!(entries[0].vibration, Some(VIBRATION_PATTERN.to_vec()));
    }

    #[tokio::test]
    async fn same_tag_replaces_previous_entry() {
        let notifier = Notifier::new(outbox_only(), Permission::Granted);
        notifier.show(Notification::reminder("Meditate")).await;
        notifier.show(Notification::test()).await;

        let entries = active(&notifier).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].notification.title, "Test Notification");
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_auto_close() {
        let notifier = Notifier::new(outbox_only(), Permission::Granted);
        notifier.show(Notification::reminder("Meditate")).await;
        assert_eq!(active(&notifier).await.len(), 1);

        tokio::time::advance(AUTO_CLOSE + Duration::from_secs(1)).await;
        assert!(active(&notifier).await.is_empty());
    }

    #[tokio::test]
    async fn dismiss_removes_entry() {
        let notifier = Notifier::new(outbox_only(), Permission::Granted);
        notifier.show(Notification::reminder("Meditate")).await;
        let id = active(&notifier).await[0].id;

        notifier.outbox().expect("outbox").dismiss(id).await;
        assert!(active(&notifier).await.is_empty());
    }

    #[tokio::test]
    async fn queued_notifications_flush_once_granted() {
        let notifier = Notifier::new(outbox_only(), Permission::Undetermined);
        let outcome = notifier.show(Notification::reminder("Stretch")).await;
        assert_eq!(outcome, ShowOutcome::AwaitingPermission);
        assert!(active(&notifier).await.is_empty());

        notifier.set_permission(Permission::Granted).await;
        let entries = active(&notifier).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].notification.body, "Time to Stretch!");
    }

    #[tokio::test]
    async fn deny_drops_the_queue() {
        let notifier = Notifier::new(outbox_only(), Permission::Undetermined);
        notifier.show(Notification::reminder("Stretch")).await;
        notifier.set_permission(Permission::Denied).await;
        assert_eq!(
            notifier.show(Notification::reminder("Stretch")).await,
            ShowOutcome::Denied
        );

        notifier.set_permission(Permission::Granted).await;
        let entries = active(&notifier).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].notification.title, "Notifications Enabled");
    }

    #[tokio::test]
    async fn unsupported_platform_never_delivers() {
        let notifier = Notifier::new(no_platform(), Permission::Granted);
        assert_eq!(
            notifier.show(Notification::test()).await,
            ShowOutcome::Unsupported
        );
        assert!(notifier.outbox().is_none());
        assert!(!notifier.can_deliver().await);
    }

    #[tokio::test]
    async fn sound_and_vibration_degrade_independently() {
        let platform = Platform {
            notifications: Capability::Available(Outbox::default()),
            sound: Capability::Unavailable,
            vibration: Capability::Available(VIBRATION_PATTERN.to_vec()),
        };
        let notifier = Notifier::new(platform, Permission::Granted);
        notifier.show(Notification::test()).await;

        let entries = active(&notifier).await;
        assert_eq!(entries[0].sound, None);
        assert_eq!(entries[0].vibration, Some(VIBRATION_PATTERN.to_vec()));
    }

    #[tokio::test]
    async fn active_entry_serializes_flat() {
        let notifier = Notifier::new(Platform::full(), Permission::Granted);
        notifier.show(Notification::test()).await;

        let entries = active(&notifier).await;
        let json = serde_json::to_value(&entries[0]).expect("serialize");
        assert_eq!(json["title"], "Test Notification");
        assert_eq!(json["tag"], "habit-reminder");
        assert_eq!(json["require_interaction"], true);
        assert_eq!(json["sound"], CHIME_PATH);
        assert!(json.get("expires_at").is_none());
    }

    #[tokio::test]
    async fn setting_same_permission_again_is_silent() {
        let notifier = Notifier::new(outbox_only(), Permission::Granted);
        notifier.set_permission(Permission::Granted).await;
        assert!(active(&notifier).await.is_empty());
    }
}
