use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

use crate::commands::documented_commands;
use crate::ui::panel::Console;

const TITLE_BOX_WIDTH: u16 = 36;
const TITLE_LINES: [&str; 2] = ["Bot Terminal Interface", "Type 'help' for commands"];
const TIPS: [&str; 3] = [
    "Type your message and press Enter to chat",
    "Press Ctrl+C at any time to exit",
    "Some words are best left unsaid... or are they?",
];

/// Print the welcome screen shown before the first prompt.
pub fn print_startup<W: Write>(console: &mut Console<W>, bot_name: &str) -> io::Result<()> {
    let theme = console.theme().clone();

    // Body width inside the border and padding columns
    let body_width = usize::from(TITLE_BOX_WIDTH.min(console.width())).saturating_sub(4);
    let title = TITLE_LINES
        .iter()
        .map(|line| center(line, body_width))
        .collect::<Vec<_>>()
        .join("\n");
    console.panel_with_width(bot_name, &title, theme.system_style, TITLE_BOX_WIDTH)?;
    console.blank_line()?;

    console.line(&format!("Welcome to {bot_name}!"), theme.system_style)?;
    console.blank_line()?;

    console.line("Available Commands:", theme.heading_style)?;
    for command in documented_commands() {
        console.line_spans(&[
            ("  • ", theme.system_style),
            (command.name, theme.emphasis_style),
            (" - ", theme.system_style),
            (command.help, theme.system_style),
        ])?;
    }
    console.blank_line()?;

    console.line("Tips:", theme.tip_style)?;
    for tip in TIPS {
        console.line(&format!("  • {tip}"), theme.system_style)?;
    }
    console.blank_line()?;

    console.line("Ready to start chatting!", theme.system_style)?;
    console.blank_line()
}

fn center(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(UnicodeWidthStr::width(text)) / 2;
    format!("{}{text}", " ".repeat(padding))
}
