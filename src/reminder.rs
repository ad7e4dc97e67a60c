use crate::clock::Clock;
use crate::store::KeyValueStore;
use anyhow::{anyhow, ensure, Result};
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};

/// Store key: calendar date (`YYYY-MM-DD`) the reminder was dismissed for.
pub const DISMISSED_FOR_DATE: &str = "dismissed_for_date";
/// Store key: epoch milliseconds of the last reveal, possibly back-dated.
pub const LAST_SHOWN: &str = "reminder_last_shown";

/// The one place date keys are formatted.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// True when `stored` names `today`. Accepts unpadded month/day
/// (`2024-3-7`) as well as the canonical form.
fn names_day(stored: &str, today: NaiveDate) -> bool {
    NaiveDate::parse_from_str(stored.trim(), "%Y-%m-%d")
        .map(|d| d == today)
        .unwrap_or(false)
}

// ── Popup seam ────────────────────────────────────────────────────────

/// The element whose visibility the controller owns.
pub trait Popup {
    fn reveal(&mut self);
    fn conceal(&mut self);
    fn is_visible(&self) -> bool;
}

/// A popup that is just a flag; the terminal host renders from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopupFlag {
    visible: bool,
}

impl Popup for PopupFlag {
    fn reveal(&mut self)  { self.visible = true; }
    fn conceal(&mut self) { self.visible = false; }
    fn is_visible(&self) -> bool { self.visible }
}

// ── Policy ────────────────────────────────────────────────────────────

/// Throttle window and the "remind later" re-arm delay, kept as one pair so
/// the back-dating offset always follows the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    throttle:    Duration,
    rearm_after: Duration,
}

impl Default for Policy {
    fn default() -> Self {
        Self { throttle: Duration::hours(6), rearm_after: Duration::hours(1) }
    }
}

impl Policy {
    pub fn new(throttle: Duration, rearm_after: Duration) -> Result<Self> {
        ensure!(throttle > Duration::zero(), "throttle must be positive");
        ensure!(
            throttle <= Self::max_throttle(),
            "throttle ({} min) exceeds {} days",
            throttle.num_minutes(),
            Self::max_throttle().num_days()
        );
        ensure!(rearm_after >= Duration::zero(), "re-arm delay must not be negative");
        ensure!(
            rearm_after <= throttle,
            "re-arm delay ({} min) exceeds throttle ({} min)",
            rearm_after.num_minutes(),
            throttle.num_minutes()
        );
        Ok(Self { throttle, rearm_after })
    }

    pub fn from_minutes(throttle_minutes: u64, rearm_after_minutes: u64) -> Result<Self> {
        Self::new(minutes(throttle_minutes)?, minutes(rearm_after_minutes)?)
    }

    pub fn max_throttle() -> Duration {
        Duration::days(365)
    }

    pub fn throttle(&self) -> Duration    { self.throttle }
    pub fn rearm_after(&self) -> Duration { self.rearm_after }

    /// How far "remind later" pushes the last-shown stamp into the past.
    pub fn backdate(&self) -> Duration {
        self.throttle - self.rearm_after
    }
}

fn minutes(value: u64) -> Result<Duration> {
    i64::try_from(value)
        .ok()
        .and_then(Duration::try_minutes)
        .ok_or_else(|| anyhow!("{} minutes is out of range", value))
}

// ── Evaluation results ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderState {
    /// Dismissed for the current calendar day.
    DismissedToday,
    /// Would be revealed by an evaluation right now.
    Eligible,
    /// Shown too recently; eligible again at this epoch-ms instant.
    Throttled { next_eligible_ms: i64 },
}

impl ReminderState {
    pub fn label(&self) -> &'static str {
        match self {
            ReminderState::DismissedToday => "dismissed for today",
            ReminderState::Eligible       => "due",
            ReminderState::Throttled { .. } => "snoozed",
        }
    }
}

/// What a load-time evaluation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Shown,
    RecentlyShown { next_eligible_ms: i64 },
    DismissedToday,
}

/// Read-only snapshot of the persisted state, as of `now`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub as_of:              DateTime<Local>,
    pub today:              String,
    pub dismissed_for_date: Option<String>,
    pub last_shown_ms:      Option<i64>,
    pub state:              ReminderState,
}

impl Status {
    /// One-line human description, e.g. "snoozed until 14:05".
    pub fn summary(&self) -> String {
        match self.state {
            ReminderState::Throttled { next_eligible_ms } => {
                match Local.timestamp_millis_opt(next_eligible_ms).single() {
                    Some(t) => format!("{} until {}", self.state.label(), fmt_local(t, self.as_of)),
                    None    => self.state.label().to_string(),
                }
            }
            _ => self.state.label().to_string(),
        }
    }

    pub fn last_shown_display(&self) -> String {
        self.last_shown_ms
            .and_then(|ms| Local.timestamp_millis_opt(ms).single())
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string())
    }
}

fn fmt_local(t: DateTime<Local>, now: DateTime<Local>) -> String {
    if t.date_naive() == now.date_naive() {
        t.format("%H:%M").to_string()
    } else {
        t.format("%Y-%m-%d %H:%M").to_string()
    }
}

// ── Controller ────────────────────────────────────────────────────────

/// Decides whether the reminder popup should be visible and records the
/// user's answers to it.
pub struct Reminder<S, C, P> {
    store:  S,
    clock:  C,
    popup:  P,
    policy: Policy,
}

impl<S: KeyValueStore, C: Clock, P: Popup> Reminder<S, C, P> {
    pub fn new(store: S, clock: C, popup: P, policy: Policy) -> Self {
        Self { store, clock, popup, policy }
    }

    /// Run once when the page has finished loading. Reveals the popup unless
    /// it was dismissed today or shown within the throttle window.
    pub fn evaluate_and_maybe_show(&mut self) -> Outcome {
        let now = self.clock.now();
        match self.classify(now) {
            ReminderState::DismissedToday => {
                log::debug!("reminder dismissed for {}", day_key(now.date_naive()));
                Outcome::DismissedToday
            }
            ReminderState::Throttled { next_eligible_ms } => {
                log::debug!("reminder shown recently; eligible again at {}", next_eligible_ms);
                Outcome::RecentlyShown { next_eligible_ms }
            }
            ReminderState::Eligible => {
                self.popup.reveal();
                self.store.set(LAST_SHOWN, &now.timestamp_millis().to_string());
                log::info!("reminder shown");
                Outcome::Shown
            }
        }
    }

    /// Hide now and back-date the last-shown stamp so the popup becomes
    /// eligible again after the re-arm delay.
    pub fn remind_later(&mut self) {
        let now = self.clock.now();
        self.popup.conceal();
        let Some(stamp) = now.checked_sub_signed(self.policy.backdate()) else {
            log::warn!("cannot back-date {} by the snooze offset; stamp left unchanged", now);
            return;
        };
        self.store.set(LAST_SHOWN, &stamp.timestamp_millis().to_string());
        log::info!(
            "reminder snoozed for {} min",
            self.policy.rearm_after().num_minutes()
        );
    }

    /// Hide and suppress until the local date changes.
    pub fn dismiss(&mut self) {
        let today = day_key(self.clock.now().date_naive());
        self.store.set(DISMISSED_FOR_DATE, &today);
        self.popup.conceal();
        log::info!("reminder dismissed for {}", today);
    }

    /// Forget both persisted values.
    pub fn reset(&mut self) {
        self.store.remove(DISMISSED_FOR_DATE);
        self.store.remove(LAST_SHOWN);
        log::info!("reminder state cleared");
    }

    pub fn status(&self) -> Status {
        let now = self.clock.now();
        Status {
            as_of:              now,
            today:              day_key(now.date_naive()),
            dismissed_for_date: self.store.get(DISMISSED_FOR_DATE),
            last_shown_ms:      self.last_shown_ms(),
            state:              self.classify(now),
        }
    }

    fn classify(&self, now: DateTime<Local>) -> ReminderState {
        let dismissed = self.store.get(DISMISSED_FOR_DATE);
        if dismissed.is_some_and(|d| names_day(&d, now.date_naive())) {
            return ReminderState::DismissedToday;
        }
        let Some(last) = self.last_shown_ms() else {
            return ReminderState::Eligible;
        };
        let throttle_ms = self.policy.throttle().num_milliseconds();
        let elapsed = now.timestamp_millis().saturating_sub(last);
        if elapsed > throttle_ms {
            ReminderState::Eligible
        } else {
            ReminderState::Throttled { next_eligible_ms: last.saturating_add(throttle_ms + 1) }
        }
    }

    /// An unparseable stamp counts as never shown.
    fn last_shown_ms(&self) -> Option<i64> {
        self.store.get(LAST_SHOWN).and_then(|raw| raw.trim().parse::<i64>().ok())
    }

    pub fn popup(&self) -> &P   { &self.popup }
    pub fn store(&self) -> &S   { &self.store }
    pub fn clock(&self) -> &C   { &self.clock }
    pub fn policy(&self) -> Policy { self.policy }
}
