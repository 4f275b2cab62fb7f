//! Flushes frames to a real terminal through crossterm.
//!
//! Rows are compared against the last frame and only changed rows are
//! rewritten.

use std::io::{self, Write};

use crossterm::{
    QueueableCommand, cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal,
};

use super::frame::{Frame, Tint};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<Frame>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(32 * 1024),
        }
    }

    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> io::Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()
    }

    /// Current terminal size in cells
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Force a full redraw on the next frame (after a resize)
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn draw(&mut self, frame: Frame) -> io::Result<()> {
        self.buf.clear();
        match &self.last {
            Some(prev) if prev.width() == frame.width() && prev.height() == frame.height() => {
                encode_diff_into(prev, &frame, &mut self.buf)?
            }
            _ => encode_full_into(&frame, &mut self.buf)?,
        }
        self.flush_buf()?;
        self.last = Some(frame);
        Ok(())
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()
    }
}

fn color_for(tint: Tint) -> Color {
    match tint {
        Tint::Plain => Color::White,
        Tint::Road => Color::DarkGrey,
        Tint::Lane => Color::Grey,
        Tint::Coin => Color::Yellow,
        Tint::Obstacle => Color::Red,
        Tint::Car => Color::Cyan,
        Tint::Hud => Color::White,
        Tint::Warning => Color::Magenta,
        Tint::Title => Color::Green,
    }
}

fn encode_row(frame: &Frame, y: u16, out: &mut Vec<u8>) -> io::Result<()> {
    out.queue(cursor::MoveTo(0, y))?;
    let mut current: Option<Tint> = None;
    for cell in frame.row(y) {
        if current != Some(cell.tint) {
            out.queue(SetForegroundColor(color_for(cell.tint)))?;
            current = Some(cell.tint);
        }
        out.queue(Print(cell.ch))?;
    }
    Ok(())
}

/// Encode a full redraw into `out` without touching stdout
pub fn encode_full_into(frame: &Frame, out: &mut Vec<u8>) -> io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    for y in 0..frame.height() {
        encode_row(frame, y, out)?;
    }
    out.queue(ResetColor)?;
    Ok(())
}

/// Encode only the rows that differ from `prev`
pub fn encode_diff_into(prev: &Frame, next: &Frame, out: &mut Vec<u8>) -> io::Result<()> {
    for y in 0..next.height() {
        if prev.row(y) != next.row(y) {
            encode_row(next, y, out)?;
        }
    }
    out.queue(ResetColor)?;
    Ok(())
}
