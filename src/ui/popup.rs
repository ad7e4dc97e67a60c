use crate::ui::centered_rect;
use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const WIDTH:  u16 = 58;
const HEIGHT: u16 = 9;

const LATER_LABEL:   &str = " L  Remind me later ";
const DISMISS_LABEL: &str = " D  Dismiss for today ";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Button {
    RemindLater,
    Dismiss,
}

/// Screen positions of the popup buttons, for mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupLayout {
    pub later:   Rect,
    pub dismiss: Rect,
}

impl PopupLayout {
    /// Place the buttons on the last inner row of a popup drawn at `area`.
    pub fn for_area(area: Rect) -> Self {
        let inner = Rect::new(
            area.x.saturating_add(1),
            area.y.saturating_add(1),
            area.width.saturating_sub(2),
            area.height.saturating_sub(2),
        );
        let row = inner.y + inner.height.saturating_sub(1);
        let later_x = inner.x + 2;
        let later = Rect::new(later_x, row, LATER_LABEL.len() as u16, 1).intersection(inner);
        let dismiss_x = later.x + later.width + 3;
        let dismiss = Rect::new(dismiss_x, row, DISMISS_LABEL.len() as u16, 1).intersection(inner);
        Self { later, dismiss }
    }

    pub fn hit(&self, col: u16, row: u16) -> Option<Button> {
        let inside = |r: Rect| col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
        if inside(self.later) {
            Some(Button::RemindLater)
        } else if inside(self.dismiss) {
            Some(Button::Dismiss)
        } else {
            None
        }
    }
}

pub fn render(f: &mut Frame, title: &str, message: &str, theme: &Theme) -> PopupLayout {
    let area = centered_rect(WIDTH, HEIGHT, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.popup_border)
        .title(Span::styled(format!(" {} ", title), theme.title));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let body = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1));
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}", message), theme.text)),
    ];
    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), body);

    let layout = PopupLayout::for_area(area);
    f.render_widget(Paragraph::new(button_line(LATER_LABEL, theme)), layout.later);
    f.render_widget(Paragraph::new(button_line(DISMISS_LABEL, theme)), layout.dismiss);
    layout
}

/// Underline the hotkey letter, which is always the second character.
fn button_line<'a>(label: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(&label[..1], theme.button),
        Span::styled(&label[1..2], theme.button_key),
        Span::styled(&label[2..], theme.button),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_sit_on_the_bottom_inner_row() {
        let area = Rect::new(10, 5, WIDTH, HEIGHT);
        let layout = PopupLayout::for_area(area);

        assert_eq!(layout.later.y, area.y + HEIGHT - 2);
        assert_eq!(layout.dismiss.y, layout.later.y);
        assert!(layout.dismiss.x > layout.later.x + layout.later.width);
        assert!(layout.dismiss.x + layout.dismiss.width <= area.x + area.width - 1);
    }

    #[test]
    fn hit_testing() {
        let layout = PopupLayout::for_area(Rect::new(0, 0, WIDTH, HEIGHT));
        let row = layout.later.y;

        assert_eq!(layout.hit(layout.later.x, row), Some(Button::RemindLater));
        assert_eq!(layout.hit(layout.dismiss.x + 1, row), Some(Button::Dismiss));
        assert_eq!(layout.hit(layout.later.x + layout.later.width + 1, row), None);
        assert_eq!(layout.hit(layout.later.x, row - 1), None);
    }
}
