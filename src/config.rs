//! Plugin Settings
//!
//! User-editable settings for the reminder, loaded from a TOML file in the
//! platform config directory. A missing or unreadable file falls back to
//! defaults matching the stock toy-store scenario.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// Whether the daily reminder message is shown at all.
    pub enabled: bool,
    /// Substring the shop window title must contain to be watched.
    pub shop_title: String,
    /// Daily purchase limit enforced by the game.
    pub max_daily_purchases: i32,
    /// Reminder line; `{remaining}` is replaced with the count still buyable.
    pub reminder_message: String,
    /// Exact chat line the game prints when the daily limit is hit.
    pub capped_chat_line: String,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            shop_title: "Diango's Toy Store.".to_string(),
            max_daily_purchases: 100,
            reminder_message:
                "You have {remaining} chronicle teleport cards waiting to be bought from Diango."
                    .to_string(),
            capped_chat_line: "You can only buy 100 of those per day.".to_string(),
        }
    }
}

impl ReminderConfig {
    /// Format the reminder line for a remaining-purchase count.
    pub fn format_reminder(&self, remaining: i32) -> String {
        self.reminder_message
            .replace("{remaining}", &remaining.to_string())
    }
}

fn config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|p| p.join("daily-shop-reminder").join("config.toml"))
}

/// Load settings from the platform config directory, defaulting on any failure.
pub fn load_config() -> ReminderConfig {
    let Some(path) = config_path() else {
        return ReminderConfig::default();
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => ReminderConfig::default(),
    }
}

/// Save settings to the platform config directory. Failures are logged only.
pub fn save_config(config: &ReminderConfig) {
    let Some(path) = config_path() else {
        return;
    };

    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    match toml::to_string_pretty(config) {
        Ok(contents) => {
            if let Err(e) = std::fs::write(&path, contents) {
                tracing::warn!("Failed to save settings to {:?}: {}", path, e);
            }
        }
        Err(e) => tracing::warn!("Failed to serialize settings: {}", e),
    }
}
