use crate::core::message::DisplayStyle;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    // Panel and message styles, one per display style
    pub bot_style: Style,
    pub user_style: Style,
    pub system_style: Style,
    pub error_style: Style,

    // Startup banner
    pub heading_style: Style,
    pub tip_style: Style,
    pub emphasis_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            bot_style: Style::default().fg(Color::Magenta),
            user_style: Style::default().fg(Color::Blue),
            system_style: Style::default().fg(Color::Cyan),
            error_style: Style::default().fg(Color::Red),

            heading_style: Style::default().fg(Color::Green),
            tip_style: Style::default().fg(Color::Yellow),
            emphasis_style: Style::default().add_modifier(Modifier::BOLD),
        }
    }

    /// No colours or modifiers at all; used when output is not a terminal.
    pub fn monochrome() -> Self {
        Theme {
            bot_style: Style::default(),
            user_style: Style::default(),
            system_style: Style::default(),
            error_style: Style::default(),

            heading_style: Style::default(),
            tip_style: Style::default(),
            emphasis_style: Style::default(),
        }
    }

    pub fn style_for(&self, style: DisplayStyle) -> Style {
        match style {
            DisplayStyle::Bot => self.bot_style,
            DisplayStyle::User => self.user_style,
            DisplayStyle::System => self.system_style,
            DisplayStyle::Error => self.error_style,
        }
    }
}
