use crate::app::App;
use nudge::clock::Clock;
use nudge::reminder::ReminderState;
use nudge::store::KeyValueStore;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render<S: KeyValueStore, C: Clock>(f: &mut Frame, app: &App<S, C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    render_body(f, chunks[0], app);
    render_footer(f, chunks[1], app);
}

fn render_body<S: KeyValueStore, C: Clock>(f: &mut Frame, area: Rect, app: &App<S, C>) {
    let theme = &app.theme;
    let status = app.reminder.status();

    let state_style = match status.state {
        ReminderState::DismissedToday   => theme.ok,
        ReminderState::Eligible         => theme.warn,
        ReminderState::Throttled { .. } => theme.text,
    };

    let field = |label: &'static str, value: String, style: Style| {
        Line::from(vec![
            Span::styled(format!("  {:<16}", label), theme.text_dim),
            Span::styled(value, style),
        ])
    };

    let mut lines = vec![
        Line::from(""),
        field("Today", status.today.clone(), theme.text),
        field("Reminder", status.summary(), state_style),
        field("Last shown", status.last_shown_display(), theme.text),
        field(
            "Dismissed for",
            status.dismissed_for_date.clone().unwrap_or_else(|| "-".to_string()),
            theme.text,
        ),
        field(
            "Snooze",
            format!("{} min", app.reminder.policy().rearm_after().num_minutes()),
            theme.text,
        ),
    ];

    if let Some(notice) = &app.notice {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("  {}", notice), theme.ok)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(" nudge ", theme.title));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer<S: KeyValueStore, C: Clock>(f: &mut Frame, area: Rect, app: &App<S, C>) {
    let theme = &app.theme;
    let keys: &[(&str, &str)] = if app.popup_visible() {
        &[("l", "Remind later"), ("d", "Dismiss today"), ("t", "Theme"), ("?", "Help"), ("q", "Quit")]
    } else {
        &[("t", "Theme"), ("?", "Help"), ("q", "Quit")]
    };

    let mut spans: Vec<Span> = vec![Span::styled(" ", theme.footer_bg)];
    for (key, desc) in keys {
        spans.push(Span::styled(format!(" {} ", key), theme.footer_key));
        spans.push(Span::styled(format!("{}  ", desc), theme.footer_text));
    }
    spans.push(Span::styled(
        format!("  \u{2502}  theme: {}", app.theme_variant.name()),
        theme.footer_text,
    ));

    f.render_widget(Paragraph::new(Line::from(spans)).style(theme.footer_bg), area);
}
