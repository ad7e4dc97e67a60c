use anyhow::Result;
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Shown,
    RemindLater,
    Dismissed,
    Reset,
}

impl Activity {
    pub fn label(&self) -> &'static str {
        match self {
            Activity::Shown       => "SHOWN",
            Activity::RemindLater => "LATER",
            Activity::Dismissed   => "DISMISSED",
            Activity::Reset       => "RESET",
        }
    }
}

pub fn log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("nudge").join("activity.log"))
}

/// Append one entry to the persistent log (best-effort).
pub fn append(activity: Activity, detail: &str) {
    let Some(path) = log_path() else { return };
    if let Err(e) = append_to(&path, Local::now(), activity, detail) {
        log::warn!("failed to append to {}: {:#}", path.display(), e);
    }
}

pub fn append_to(path: &Path, at: DateTime<Local>, activity: Activity, detail: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(
        file,
        "{} [{}] {}",
        at.format("%Y-%m-%d %H:%M:%S"), activity.label(), detail
    )?;
    Ok(())
}

/// The last `n` log lines, oldest first. Empty if there is no log yet.
pub fn load_recent(n: usize) -> Vec<String> {
    log_path().map(|p| load_recent_from(&p, n)).unwrap_or_default()
}

pub fn load_recent_from(path: &Path, n: usize) -> Vec<String> {
    let text = match fs::read_to_string(path) { Ok(t) => t, Err(_) => return Vec::new() };
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let skip = lines.len().saturating_sub(n);
    lines[skip..].iter().map(|l| l.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn appends_and_reads_back_tail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("activity.log");
        let at = Local.with_ymd_and_hms(2024, 3, 7, 9, 30, 0).unwrap();

        append_to(&path, at, Activity::Shown, "Daily check-in").unwrap();
        append_to(&path, at, Activity::RemindLater, "due again in 60 min").unwrap();
        append_to(&path, at, Activity::Dismissed, "until 2024-03-08").unwrap();

        let all = load_recent_from(&path, 10);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0], "2024-03-07 09:30:00 [SHOWN] Daily check-in");

        let tail = load_recent_from(&path, 2);
        assert_eq!(tail.len(), 2);
        assert!(tail[0].contains("[LATER]"));
        assert!(tail[1].contains("[DISMISSED]"));
    }

    #[test]
    fn missing_log_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_recent_from(&dir.path().join("nope.log"), 5).is_empty());
    }
}
