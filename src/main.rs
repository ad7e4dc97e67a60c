mod app;
mod input;
mod ui;

use anyhow::Result;
use app::App;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use nudge::clock::SystemClock;
use nudge::config::Config;
use nudge::reminder::{Outcome, PopupFlag, Reminder};
use nudge::store::FileStore;
use nudge::util::{activity_log, notify};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::panic;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nudge", about = "Daily reminder popup you can snooze or dismiss until tomorrow", version)]
struct Cli {
    /// Color theme: default, nord, gruvbox
    #[arg(short = 't', long, default_value = "default")]
    theme: String,

    /// Use this key-value file instead of the configured one
    #[arg(long, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Print today's reminder state and exit
    #[arg(long)]
    status: bool,

    /// Run the startup check without a UI; print the reminder (and notify) if it is due
    #[arg(long)]
    show: bool,

    /// Snooze the reminder as if "Remind me later" was pressed
    #[arg(long)]
    remind_later: bool,

    /// Dismiss the reminder until tomorrow
    #[arg(long)]
    dismiss: bool,

    /// Forget the stored dismissal date and last-shown time
    #[arg(long)]
    reset: bool,

    /// Print recent activity log entries and exit
    #[arg(long)]
    history: bool,

    /// Number of activity log entries to show (used with --history)
    #[arg(long, default_value_t = 20)]
    last: usize,

    /// Print config file path and current values, then exit
    #[arg(long)]
    config: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

impl Cli {
    /// True when no one-shot flag is set and the TUI will run.
    fn is_interactive(&self) -> bool {
        self.completions.is_none()
            && !(self.config || self.history || self.status || self.show
                || self.remind_later || self.dismiss || self.reset)
    }
}

type HeadlessReminder = Reminder<FileStore, SystemClock, PopupFlag>;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (cfg, cfg_err) = Config::load_checked();

    // The TUI owns the terminal; only one-shot modes get a logger.
    if !cli.is_interactive() {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(&cfg.general.log_level),
        )
        .init();
        if let Some(e) = &cfg_err {
            log::warn!("ignoring config file: {:#}", e);
        }
    }

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "nudge", &mut io::stdout());
        return Ok(());
    }
    if cli.config {
        return run_print_config(&cfg, cli.store.as_ref());
    }
    if cli.history {
        return run_history(cli.last);
    }

    let store = open_store(&cfg, cli.store);
    if cli.status {
        return run_status(&cfg, store);
    }
    if cli.show {
        return run_show(&cfg, store);
    }
    if cli.remind_later {
        return run_remind_later(&cfg, store);
    }
    if cli.dismiss {
        return run_dismiss(&cfg, store);
    }
    if cli.reset {
        return run_reset(&cfg, store);
    }

    let initial_theme = ui::theme::ThemeVariant::from_name(&cli.theme);

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let notice = cfg_err.map(|e| format!("Config file ignored: {:#}", e));
    let result = run(initial_theme, cfg, store, notice);
    restore_terminal()?;
    result
}

fn open_store(cfg: &Config, override_path: Option<PathBuf>) -> FileStore {
    match override_path.or_else(|| cfg.store_path()) {
        Some(p) => FileStore::open(p),
        None    => FileStore::open_default(),
    }
}

fn headless(cfg: &Config, store: FileStore) -> HeadlessReminder {
    Reminder::new(store, SystemClock, PopupFlag::default(), cfg.policy())
}

fn run_status(cfg: &Config, store: FileStore) -> Result<()> {
    let path = store.path().map(|p| p.display().to_string()).unwrap_or_else(|| "(memory)".to_string());
    let status = headless(cfg, store).status();
    println!("Store:          {}", path);
    println!("Today:          {}", status.today);
    println!("State:          {}", status.summary());
    println!("Last shown:     {}", status.last_shown_display());
    println!("Dismissed for:  {}", status.dismissed_for_date.as_deref().unwrap_or("-"));
    Ok(())
}

fn run_show(cfg: &Config, store: FileStore) -> Result<()> {
    let mut reminder = headless(cfg, store);
    match reminder.evaluate_and_maybe_show() {
        Outcome::Shown => {
            let r = &cfg.reminder;
            println!("{}: {}", r.title, r.message);
            println!("(nudge --remind-later to snooze, nudge --dismiss to stop for today)");
            activity_log::append(activity_log::Activity::Shown, &r.title);
            if cfg.notifications.notify_send {
                notify::notify_send(&r.title, &r.message);
            }
        }
        Outcome::RecentlyShown { .. } => {
            log::info!("not due: {}", reminder.status().summary());
        }
        Outcome::DismissedToday => {
            log::info!("dismissed for today");
        }
    }
    Ok(())
}

fn run_remind_later(cfg: &Config, store: FileStore) -> Result<()> {
    let mut reminder = headless(cfg, store);
    reminder.remind_later();
    let minutes = reminder.policy().rearm_after().num_minutes();
    activity_log::append(activity_log::Activity::RemindLater, &format!("due again in {} min", minutes));
    println!("Snoozed; due again in {} min.", minutes);
    Ok(())
}

fn run_dismiss(cfg: &Config, store: FileStore) -> Result<()> {
    let mut reminder = headless(cfg, store);
    reminder.dismiss();
    let today = reminder.status().today;
    activity_log::append(activity_log::Activity::Dismissed, &format!("for {}", today));
    println!("Dismissed for {}.", today);
    Ok(())
}

fn run_reset(cfg: &Config, store: FileStore) -> Result<()> {
    let mut reminder = headless(cfg, store);
    reminder.reset();
    activity_log::append(activity_log::Activity::Reset, "state cleared");
    println!("Reminder state cleared.");
    Ok(())
}

fn run_history(n: usize) -> Result<()> {
    let entries = activity_log::load_recent(n);
    if entries.is_empty() {
        println!("No reminder activity logged.");
        return Ok(());
    }
    for line in &entries {
        println!("{}", line);
    }
    Ok(())
}

fn run_print_config(cfg: &Config, store_override: Option<&PathBuf>) -> Result<()> {
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    let store = store_override
        .cloned()
        .or_else(|| cfg.store_path())
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(memory)".to_string());
    let policy = cfg.policy();
    println!("Config: {}", path);
    println!();
    println!("[general]");
    println!("  log_level           = {}", cfg.general.log_level);
    println!();
    println!("[reminder]");
    println!("  throttle_minutes    = {} (effective {})", cfg.reminder.throttle_minutes, policy.throttle().num_minutes());
    println!("  rearm_after_minutes = {} (effective {})", cfg.reminder.rearm_after_minutes, policy.rearm_after().num_minutes());
    println!("  title               = {}", cfg.reminder.title);
    println!("  message             = {}", cfg.reminder.message);
    println!();
    println!("[storage]");
    println!("  path                = {}", store);
    println!();
    println!("[notifications]");
    println!("  notify_send         = {}", cfg.notifications.notify_send);
    Ok(())
}

fn run(
    initial_theme: ui::theme::ThemeVariant,
    cfg: Config,
    store: FileStore,
    notice: Option<String>,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut term = Terminal::new(backend)?;

    let mut app = App::new(initial_theme, cfg, store, SystemClock, activity_log::log_path());
    app.notice = notice;
    app.run(&mut term)?;

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}
