use crate::reminder::Policy;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub reminder: ReminderConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub notifications: NotificationsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default log filter when RUST_LOG is unset (error, warn, info, debug, trace)
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// Minimum time between two reveals, in minutes.
    pub throttle_minutes: u64,
    /// After "remind me later", the popup is due again after this many minutes.
    /// Must not exceed throttle_minutes.
    pub rearm_after_minutes: u64,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON key-value file. Empty = ~/.local/share/nudge/storage.json
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    /// Send a desktop notification via notify-send when --show reveals the reminder.
    pub notify_send: bool,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { log_level: "warn".into() }
    }
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            throttle_minutes:    6 * 60,
            rearm_after_minutes: 60,
            title:   "Daily check-in".into(),
            message: "Have you checked off your habits today?".into(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { notify_send: true }
    }
}

// ── Derived values ────────────────────────────────────────────────────

impl Config {
    /// The reminder timing pair. An inconsistent pair is reported and
    /// replaced by the built-in 6 h / 1 h.
    pub fn policy(&self) -> Policy {
        let r = &self.reminder;
        Policy::from_minutes(r.throttle_minutes, r.rearm_after_minutes).unwrap_or_else(|e| {
            log::warn!("invalid [reminder] timing ({:#}); using defaults", e);
            Policy::default()
        })
    }

    pub fn store_path(&self) -> Option<PathBuf> {
        let configured = self.storage.path.trim();
        if configured.is_empty() {
            crate::store::FileStore::default_path()
        } else {
            Some(PathBuf::from(configured))
        }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    pub fn load() -> Self {
        let (cfg, err) = Self::load_checked();
        if let Some(e) = err {
            log::warn!("ignoring config file: {:#}", e);
        }
        cfg
    }

    /// Like `load`, but hands back the parse error of an existing config file
    /// instead of logging it, for callers that set up logging afterwards.
    pub fn load_checked() -> (Self, Option<anyhow::Error>) {
        match try_load() {
            Ok(c)  => (c, None),
            Err(e) => {
                let present = Config::config_path().is_some_and(|p| p.exists());
                // Write defaults on first run (best-effort)
                let _ = try_write_defaults();
                (Config::default(), present.then_some(e))
            }
        }
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("nudge").join("nudge.toml"))
    }
}

fn try_load() -> Result<Config> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    let text = fs::read_to_string(path)?;
    Config::from_toml(&text)
}

fn try_write_defaults() -> Result<()> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    if path.exists() {
        // Present but unparseable; leave the user's file alone.
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# nudge configuration\n# Generated on first run, edit freely\n\n{}", text))?;
    Ok(())
}
