//! Notification preferences shown next to the profile form.
//!
//! Preferences are page-local: they start from [`NotificationPrefs::default`]
//! (or the configured defaults) and are never written anywhere.

use serde::{Deserialize, Serialize};

/// A single notification channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Email,
    Push,
    Security,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 3] = [Self::Email, Self::Push, Self::Security];

    pub fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Push => "Push",
            Self::Security => "Security",
        }
    }
}

/// On/off state for each notification channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPrefs {
    #[serde(default = "default_on")]
    pub email: bool,
    #[serde(default)]
    pub push: bool,
    #[serde(default = "default_on")]
    pub security: bool,
}

fn default_on() -> bool {
    true
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            email: true,
            push: false,
            security: true,
        }
    }
}

impl NotificationPrefs {
    pub fn get(&self, kind: NotificationKind) -> bool {
        match kind {
            NotificationKind::Email => self.email,
            NotificationKind::Push => self.push,
            NotificationKind::Security => self.security,
        }
    }

    /// Flip one channel and return its new value.
    pub fn toggle(&mut self, kind: NotificationKind) -> bool {
        let slot = match kind {
            NotificationKind::Email => &mut self.email,
            NotificationKind::Push => &mut self.push,
            NotificationKind::Security => &mut self.security,
        };
        *slot = !*slot;
        *slot
    }
}
