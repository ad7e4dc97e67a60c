use ratatui::style::{Color, Modifier, Style};

const fn rgb(hex: u32) -> Color {
    Color::Rgb(
        ((hex >> 16) & 0xFF) as u8,
        ((hex >>  8) & 0xFF) as u8,
        ( hex        & 0xFF) as u8,
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThemeVariant {
    Default,
    Nord,
    Gruvbox,
}

impl ThemeVariant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Nord    => "Nord",
            Self::Gruvbox => "Gruvbox",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Default => Self::Nord,
            Self::Nord    => Self::Gruvbox,
            Self::Gruvbox => Self::Default,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "nord"    => Self::Nord,
            "gruvbox" => Self::Gruvbox,
            _         => Self::Default,
        }
    }
}

#[derive(Clone)]
pub struct Theme {
    pub border:       Style,
    pub popup_border: Style,
    pub title:        Style,
    pub text:         Style,
    pub text_dim:     Style,
    pub ok:           Style,
    pub warn:         Style,
    pub button:       Style,
    pub button_key:   Style,
    pub footer_bg:    Style,
    pub footer_key:   Style,
    pub footer_text:  Style,
}

impl Theme {
    pub fn for_variant(v: ThemeVariant) -> Self {
        match v {
            ThemeVariant::Default => Self::default(),
            ThemeVariant::Nord    => Self::nord(),
            ThemeVariant::Gruvbox => Self::gruvbox(),
        }
    }

    pub fn default() -> Self {
        Self {
            border:       Style::default().fg(Color::DarkGray),
            popup_border: Style::default().fg(Color::Cyan),
            title:        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            text:         Style::default().fg(Color::White),
            text_dim:     Style::default().fg(Color::DarkGray),
            ok:           Style::default().fg(Color::Green),
            warn:         Style::default().fg(Color::Yellow),
            button:       Style::default().fg(Color::Black).bg(Color::Cyan),
            button_key:   Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            footer_bg:    Style::default().bg(Color::DarkGray).fg(Color::White),
            footer_key:   Style::default().bg(Color::DarkGray).fg(Color::Cyan).add_modifier(Modifier::BOLD),
            footer_text:  Style::default().bg(Color::DarkGray).fg(Color::Gray),
        }
    }

    fn nord() -> Self {
        // https://www.nordtheme.com/ — polar night / snow storm / frost
        Self {
            border:       Style::default().fg(rgb(0x4c566a)),
            popup_border: Style::default().fg(rgb(0x88c0d0)),
            title:        Style::default().fg(rgb(0xeceff4)).add_modifier(Modifier::BOLD),
            text:         Style::default().fg(rgb(0xd8dee9)),
            text_dim:     Style::default().fg(rgb(0x4c566a)),
            ok:           Style::default().fg(rgb(0xa3be8c)),
            warn:         Style::default().fg(rgb(0xebcb8b)),
            button:       Style::default().fg(rgb(0x2e3440)).bg(rgb(0x88c0d0)),
            button_key:   Style::default().fg(rgb(0x2e3440)).bg(rgb(0x88c0d0)).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            footer_bg:    Style::default().bg(rgb(0x3b4252)).fg(rgb(0xeceff4)),
            footer_key:   Style::default().bg(rgb(0x3b4252)).fg(rgb(0x88c0d0)).add_modifier(Modifier::BOLD),
            footer_text:  Style::default().bg(rgb(0x3b4252)).fg(rgb(0xd8dee9)),
        }
    }

    fn gruvbox() -> Self {
        // https://github.com/morhetz/gruvbox — warm retro dark theme
        Self {
            border:       Style::default().fg(rgb(0x665c54)),
            popup_border: Style::default().fg(rgb(0xfabd2f)),
            title:        Style::default().fg(rgb(0xfbf1c7)).add_modifier(Modifier::BOLD),
            text:         Style::default().fg(rgb(0xebdbb2)),
            text_dim:     Style::default().fg(rgb(0x928374)),
            ok:           Style::default().fg(rgb(0xb8bb26)),
            warn:         Style::default().fg(rgb(0xfe8019)),
            button:       Style::default().fg(rgb(0x282828)).bg(rgb(0xfabd2f)),
            button_key:   Style::default().fg(rgb(0x282828)).bg(rgb(0xfabd2f)).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            footer_bg:    Style::default().bg(rgb(0x3c3836)).fg(rgb(0xebdbb2)),
            footer_key:   Style::default().bg(rgb(0x3c3836)).fg(rgb(0xfabd2f)).add_modifier(Modifier::BOLD),
            footer_text:  Style::default().bg(rgb(0x3c3836)).fg(rgb(0xa89984)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycling_visits_every_variant() {
        let mut v = ThemeVariant::Default;
        let mut seen = vec![v];
        for _ in 0..2 {
            v = v.next();
            seen.push(v);
        }
        assert_eq!(seen, [ThemeVariant::Default, ThemeVariant::Nord, ThemeVariant::Gruvbox]);
        assert_eq!(v.next(), ThemeVariant::Default);
    }

    #[test]
    fn unknown_name_is_default() {
        assert_eq!(ThemeVariant::from_name("NORD"), ThemeVariant::Nord);
        assert_eq!(ThemeVariant::from_name("solarized"), ThemeVariant::Default);
    }
}
