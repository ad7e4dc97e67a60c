use crate::input::{handle_key, Action};
use crate::ui::popup::{self, Button, PopupLayout};
use crate::ui::theme::{Theme, ThemeVariant};
use crate::ui::{help, page};
use anyhow::Result;
use crossterm::event::{self, Event, MouseButton, MouseEventKind};
use nudge::clock::{Clock, SystemClock};
use nudge::config::Config;
use nudge::reminder::{Outcome, Popup, PopupFlag, Reminder};
use nudge::store::{FileStore, KeyValueStore};
use nudge::util::activity_log::{self, Activity};
use std::path::PathBuf;
use std::time::Duration;

const POLL_TIMEOUT: Duration = Duration::from_millis(250);

pub struct App<S = FileStore, C = SystemClock> {
    pub config: Config,

    pub theme:         Theme,
    pub theme_variant: ThemeVariant,
    pub show_help:     bool,

    pub reminder: Reminder<S, C, PopupFlag>,

    // None = do not record activity
    activity_log: Option<PathBuf>,

    // Feedback for the last button press, shown on the page
    pub notice: Option<String>,

    // Where the popup buttons were last drawn
    popup_layout: Option<PopupLayout>,

    pub should_quit: bool,
}

impl<S: KeyValueStore, C: Clock> App<S, C> {
    /// Build the page and run the load-time reminder check.
    pub fn new(
        initial_theme: ThemeVariant,
        config: Config,
        store: S,
        clock: C,
        activity_log: Option<PathBuf>,
    ) -> Self {
        let reminder = Reminder::new(store, clock, PopupFlag::default(), config.policy());

        let mut app = Self {
            config,
            theme:         Theme::for_variant(initial_theme),
            theme_variant: initial_theme,
            show_help:     false,
            reminder,
            activity_log,
            notice:        None,
            popup_layout:  None,
            should_quit:   false,
        };

        if app.reminder.evaluate_and_maybe_show() == Outcome::Shown {
            let title = app.config.reminder.title.clone();
            app.record(Activity::Shown, &title);
        }
        app
    }

    pub fn popup_visible(&self) -> bool {
        self.reminder.popup().is_visible()
    }

    // ── Main event loop ───────────────────────────────────────────────

    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
    ) -> Result<()> {
        loop {
            terminal.draw(|f| {
                page::render(f, self);
                self.popup_layout = if self.popup_visible() {
                    Some(popup::render(
                        f,
                        &self.config.reminder.title,
                        &self.config.reminder.message,
                        &self.theme,
                    ))
                } else {
                    None
                };
                if self.show_help {
                    let rearm = self.reminder.policy().rearm_after().num_minutes();
                    help::render(f, &self.theme, rearm);
                }
            })?;

            if event::poll(POLL_TIMEOUT)? {
                match event::read()? {
                    Event::Key(key) => {
                        let action = handle_key(key);
                        self.handle_action(action);
                    }
                    Event::Mouse(me) => {
                        if let MouseEventKind::Down(MouseButton::Left) = me.kind {
                            self.handle_mouse_click(me.column, me.row);
                        }
                    }
                    _ => {}
                }
            }

            if self.should_quit { break; }
        }
        Ok(())
    }

    // ── Input dispatch ────────────────────────────────────────────────

    fn handle_action(&mut self, action: Action) {
        if self.show_help {
            match action {
                Action::Quit => self.should_quit = true,
                Action::ShowHelp | Action::Back => self.show_help = false,
                _ => {}
            }
            return;
        }

        match action {
            Action::Quit     => self.should_quit = true,
            Action::ShowHelp => self.show_help = true,
            Action::CycleTheme => {
                self.theme_variant = self.theme_variant.next();
                self.theme = Theme::for_variant(self.theme_variant);
            }
            Action::RemindLater => self.remind_later(),
            Action::Dismiss     => self.dismiss(),
            Action::Back | Action::None => {}
        }
    }

    fn handle_mouse_click(&mut self, col: u16, row: u16) {
        if self.show_help { return; }
        match self.popup_layout.and_then(|l| l.hit(col, row)) {
            Some(Button::RemindLater) => self.remind_later(),
            Some(Button::Dismiss)     => self.dismiss(),
            None => {}
        }
    }

    // ── Popup buttons ─────────────────────────────────────────────────

    fn remind_later(&mut self) {
        if !self.popup_visible() { return; }
        self.reminder.remind_later();
        let minutes = self.reminder.policy().rearm_after().num_minutes();
        self.record(Activity::RemindLater, &format!("due again in {} min", minutes));
        self.notice = Some(format!("Okay, I'll remind you in {} min.", minutes));
    }

    fn dismiss(&mut self) {
        if !self.popup_visible() { return; }
        self.reminder.dismiss();
        let today = self.reminder.status().today;
        self.record(Activity::Dismissed, &format!("for {}", today));
        self.notice = Some("Dismissed until tomorrow.".to_string());
    }

    fn record(&self, activity: Activity, detail: &str) {
        let Some(path) = &self.activity_log else { return };
        let now = self.reminder.clock().now();
        if let Err(e) = activity_log::append_to(path, now, activity, detail) {
            log::warn!("failed to append to {}: {:#}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Local, TimeZone};
    use nudge::clock::ManualClock;
    use nudge::reminder::{DISMISSED_FOR_DATE, LAST_SHOWN};
    use nudge::store::MemoryStore;
    use std::path::Path;

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap()
    }

    fn app(store: MemoryStore, log: &Path) -> App<MemoryStore, ManualClock> {
        App::new(
            ThemeVariant::Default,
            Config::default(),
            store,
            ManualClock::new(noon()),
            Some(log.to_path_buf()),
        )
    }

    #[test]
    fn startup_reveals_and_logs_on_fresh_store() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("activity.log");
        let app = app(MemoryStore::new(), &log);

        assert!(app.popup_visible());
        let entries = activity_log::load_recent_from(&log, 10);
        assert_eq!(entries, ["2024-03-07 12:00:00 [SHOWN] Daily check-in"]);
    }

    #[test]
    fn buttons_do_nothing_while_popup_is_hidden() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("activity.log");
        let an_hour_ago = (noon() - Duration::hours(1)).timestamp_millis().to_string();
        let store = MemoryStore::with_entries([(LAST_SHOWN, an_hour_ago.clone())]);
        let mut app = app(store, &log);
        assert!(!app.popup_visible());

        app.handle_action(Action::RemindLater);
        app.handle_action(Action::Dismiss);

        assert_eq!(app.reminder.store().get(LAST_SHOWN), Some(an_hour_ago));
        assert_eq!(app.reminder.store().get(DISMISSED_FOR_DATE), None);
        assert!(app.notice.is_none());
        assert!(activity_log::load_recent_from(&log, 10).is_empty());
    }

    #[test]
    fn remind_later_hides_and_logs() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("activity.log");
        let mut app = app(MemoryStore::new(), &log);

        app.handle_action(Action::RemindLater);

        assert!(!app.popup_visible());
        let entries = activity_log::load_recent_from(&log, 10);
        assert_eq!(entries.len(), 2);
        assert!(entries[1].ends_with("[LATER] due again in 60 min"));

        // Popup is gone, so a second press is ignored.
        app.handle_action(Action::Dismiss);
        assert_eq!(app.reminder.store().get(DISMISSED_FOR_DATE), None);
    }

    #[test]
    fn dismiss_hides_and_logs() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("activity.log");
        let mut app = app(MemoryStore::new(), &log);

        app.handle_action(Action::Dismiss);

        assert!(!app.popup_visible());
        assert_eq!(app.reminder.store().get(DISMISSED_FOR_DATE).as_deref(), Some("2024-03-07"));
        let entries = activity_log::load_recent_from(&log, 10);
        assert!(entries[1].ends_with("[DISMISSED] for 2024-03-07"));
    }

    #[test]
    fn help_overlay_swallows_popup_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(MemoryStore::new(), &dir.path().join("activity.log"));

        app.handle_action(Action::ShowHelp);
        app.handle_action(Action::Dismiss);
        assert!(app.popup_visible());

        app.handle_action(Action::Back);
        assert!(!app.show_help);
    }
}
