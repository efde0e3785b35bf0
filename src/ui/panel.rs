//! Line-mode output: bordered panels and styled lines written straight to a
//! `Write` sink, scrolling with the rest of the terminal.
//!
//! Panels are laid out by ratatui into an off-screen [`Buffer`] and then
//! serialised cell by cell with crossterm escape sequences, so the client gets
//! ratatui's borders and titles without taking over the screen.

use std::io::{self, Write};

use ratatui::buffer::{Buffer, Cell};
use ratatui::crossterm::cursor::MoveTo;
use ratatui::crossterm::queue;
use ratatui::crossterm::style::{
    Attribute, Color as CColor, Print, SetAttribute, SetForegroundColor,
};
use ratatui::crossterm::terminal::{Clear, ClearType};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::core::text_wrapping::{TextWrapper, WrapConfig};
use crate::ui::theme::Theme;

pub const DEFAULT_WIDTH: u16 = 80;
const MIN_PANEL_WIDTH: u16 = 12;
// Two border columns plus one column of padding on each side
const HORIZONTAL_CHROME: u16 = 4;

pub struct Console<W: Write> {
    out: W,
    theme: Theme,
    width: u16,
}

impl<W: Write> Console<W> {
    pub fn new(out: W, theme: Theme, width: u16) -> Self {
        Self {
            out,
            theme,
            width: width.max(MIN_PANEL_WIDTH),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Draw `text` inside a rounded box titled `title`, as wide as the console.
    pub fn panel(&mut self, title: &str, text: &str, style: Style) -> io::Result<()> {
        self.panel_with_width(title, text, style, self.width)
    }

    pub fn panel_with_width(
        &mut self,
        title: &str,
        text: &str,
        style: Style,
        width: u16,
    ) -> io::Result<()> {
        for buffer in render_panel(title, text, style, width.min(self.width)) {
            write_buffer(&mut self.out, &buffer)?;
        }
        self.out.flush()
    }

    pub fn line(&mut self, text: &str, style: Style) -> io::Result<()> {
        self.line_spans(&[(text, style)])
    }

    /// One line made of differently styled pieces.
    pub fn line_spans(&mut self, spans: &[(&str, Style)]) -> io::Result<()> {
        for (text, style) in spans {
            write_styled(&mut self.out, text, *style)?;
        }
        queue!(self.out, Print("\n"))?;
        self.out.flush()
    }

    pub fn blank_line(&mut self) -> io::Result<()> {
        queue!(self.out, Print("\n"))?;
        self.out.flush()
    }

    /// Write the input prompt without a trailing newline.
    pub fn prompt(&mut self, text: &str, style: Style) -> io::Result<()> {
        write_styled(&mut self.out, text, style)?;
        self.out.flush()
    }

    pub fn clear_screen(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.out.flush()
    }
}

/// Lay out a panel. Tall panels are split into several buffers because a
/// single buffer's area is limited to `u16::MAX` cells.
pub fn render_panel(title: &str, text: &str, style: Style, width: u16) -> Vec<Buffer> {
    let width = width.max(MIN_PANEL_WIDTH);
    let body_width = width.saturating_sub(HORIZONTAL_CHROME) as usize;
    let lines = TextWrapper::wrap_lines(text, &WrapConfig::new(body_width));

    let rows_per_chunk = (usize::from(u16::MAX / width)).saturating_sub(2).max(1);
    let chunk_count = lines.len().div_ceil(rows_per_chunk);
    let title = format!(" {title} ");

    lines
        .chunks(rows_per_chunk)
        .enumerate()
        .map(|(index, chunk)| {
            let first = index == 0;
            let last = index + 1 == chunk_count;

            let mut borders = Borders::LEFT | Borders::RIGHT;
            let mut height = chunk.len() as u16;
            if first {
                borders |= Borders::TOP;
                height += 1;
            }
            if last {
                borders |= Borders::BOTTOM;
                height += 1;
            }

            let mut block = Block::default()
                .borders(borders)
                .border_type(BorderType::Rounded)
                .border_style(style)
                .padding(Padding::horizontal(1));
            if first {
                block = block.title(title.as_str()).title_style(style);
            }

            let body: Vec<Line<'_>> = chunk.iter().map(|line| Line::from(line.as_str())).collect();
            let area = Rect::new(0, 0, width, height);
            let mut buffer = Buffer::empty(area);
            Paragraph::new(Text::from(body))
                .style(style)
                .block(block)
                .render(area, &mut buffer);
            buffer
        })
        .collect()
}

/// Serialise a buffer as plain rows with escape sequences only where a cell
/// actually carries colour or modifiers.
pub fn write_buffer<W: Write>(out: &mut W, buffer: &Buffer) -> io::Result<()> {
    let width = usize::from(buffer.area.width).max(1);
    for row in buffer.content.chunks(width) {
        let mut current = CellStyle::default();
        let mut skip = 0usize;
        for cell in row {
            // Cells shadowed by a preceding wide grapheme
            if skip > 0 {
                skip -= 1;
                continue;
            }
            let style = CellStyle::of(cell);
            if style != current {
                if !current.is_plain() {
                    queue!(out, SetAttribute(Attribute::Reset))?;
                }
                style.apply(out)?;
                current = style;
            }
            let symbol = cell.symbol();
            queue!(out, Print(symbol))?;
            skip = UnicodeWidthStr::width(symbol).saturating_sub(1);
        }
        if !current.is_plain() {
            queue!(out, SetAttribute(Attribute::Reset))?;
        }
        queue!(out, Print("\n"))?;
    }
    Ok(())
}

fn write_styled<W: Write>(out: &mut W, text: &str, style: Style) -> io::Result<()> {
    let style = CellStyle::from_style(style);
    style.apply(out)?;
    queue!(out, Print(text))?;
    if !style.is_plain() {
        queue!(out, SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct CellStyle {
    fg: Option<CColor>,
    bold: bool,
}

impl CellStyle {
    fn of(cell: &Cell) -> Self {
        Self {
            fg: to_crossterm(cell.fg),
            bold: cell.modifier.contains(Modifier::BOLD),
        }
    }

    fn from_style(style: Style) -> Self {
        Self {
            fg: style.fg.and_then(to_crossterm),
            bold: style.add_modifier.contains(Modifier::BOLD),
        }
    }

    fn is_plain(&self) -> bool {
        self.fg.is_none() && !self.bold
    }

    fn apply<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if let Some(fg) = self.fg {
            queue!(out, SetForegroundColor(fg))?;
        }
        if self.bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        Ok(())
    }
}

fn to_crossterm(color: Color) -> Option<CColor> {
    let mapped = match color {
        Color::Reset => return None,
        Color::Black => CColor::Black,
        Color::Red => CColor::DarkRed,
        Color::Green => CColor::DarkGreen,
        Color::Yellow => CColor::DarkYellow,
        Color::Blue => CColor::DarkBlue,
        Color::Magenta => CColor::DarkMagenta,
        Color::Cyan => CColor::DarkCyan,
        Color::Gray => CColor::Grey,
        Color::DarkGray => CColor::DarkGrey,
        Color::LightRed => CColor::Red,
        Color::LightGreen => CColor::Green,
        Color::LightYellow => CColor::Yellow,
        Color::LightBlue => CColor::Blue,
        Color::LightMagenta => CColor::Magenta,
        Color::LightCyan => CColor::Cyan,
        Color::White => CColor::White,
        Color::Indexed(index) => CColor::AnsiValue(index),
        Color::Rgb(r, g, b) => CColor::Rgb { r, g, b },
    };
    Some(mapped)
}
