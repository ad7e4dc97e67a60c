/// Fire a desktop notification via `notify-send`.
/// Best-effort: silently ignored if notify-send is not installed or DISPLAY is unset.
pub fn notify_send(title: &str, body: &str) {
    let spawned = std::process::Command::new("notify-send")
        .args(["--urgency", "normal", "--app-name", "nudge", title, body])
        .spawn();
    if let Err(e) = spawned {
        log::debug!("notify-send unavailable: {}", e);
    }
}
