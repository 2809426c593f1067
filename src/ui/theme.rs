use ratatui::style::{Color, Modifier, Style};

const ACCENT: Color = Color::Rgb(0xF9, 0x73, 0x16);
const MUTED: Color = Color::Rgb(0x6B, 0x72, 0x80);
const WHITE: Color = Color::Rgb(0xFA, 0xFA, 0xFA);
const GREEN: Color = Color::Rgb(0x22, 0xC5, 0x5E);
const YELLOW: Color = Color::Rgb(0xEA, 0xB3, 0x08);
const RED: Color = Color::Rgb(0xEF, 0x44, 0x44);

pub struct Theme;

impl Theme {
    pub fn title() -> Style {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn muted() -> Style {
        Style::default().fg(MUTED)
    }

    pub fn header() -> Style {
        Style::default().fg(WHITE).add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(WHITE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_marker() -> Style {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn tab_active() -> Style {
        Style::default()
            .fg(ACCENT)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn tab_inactive() -> Style {
        Self::muted()
    }

    pub fn footer() -> Style {
        Self::muted()
    }

    pub fn error() -> Style {
        Style::default().fg(RED)
    }

    pub fn notice() -> Style {
        Style::default().fg(YELLOW)
    }

    pub fn filter_prompt() -> Style {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn help_key() -> Style {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn help_desc() -> Style {
        Style::default().fg(WHITE)
    }

    pub fn value() -> Style {
        Style::default().fg(WHITE)
    }

    pub fn operation_status(status: &str) -> Style {
        match status {
            "COMPLETED" => Style::default().fg(GREEN),
            "IN_PROGRESS" | "QUEUED" => Style::default().fg(YELLOW),
            "FAILED" => Style::default().fg(RED),
            _ => Self::muted(),
        }
    }

    pub fn log_level(level: &str) -> Style {
        match level {
            "DEBUG" => Self::muted(),
            "WARN" => Style::default().fg(YELLOW),
            "ERROR" | "FATAL" => Style::default().fg(RED),
            _ => Style::default().fg(WHITE),
        }
    }
}
