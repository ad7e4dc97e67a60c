use crate::ui::centered_rect;
use crate::ui::theme::Theme;
use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, theme: &Theme, rearm_minutes: i64) {
    let area = centered_rect(54, 12, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.popup_border)
        .title(Span::styled(" Keybindings (? or Esc to close) ", theme.title));

    let later = format!("Hide; due again in {} min", rearm_minutes);
    let lines = vec![
        Line::from(""),
        key_line(theme, "  l / click", &later),
        key_line(theme, "  d / click", "Hide until tomorrow"),
        key_line(theme, "  t",         "Cycle color theme"),
        key_line(theme, "  ? / F1",    "Toggle this help"),
        key_line(theme, "  q / Ctrl-C", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "  The reminder is checked once, at startup.",
            theme.text_dim,
        )),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn key_line<'a>(theme: &Theme, key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<14}", key), theme.warn),
        Span::styled(desc, theme.text),
    ])
}
