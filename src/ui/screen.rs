//! Terminal output for the prompt.
//!
//! The prompt is redrawn in place: every frame erases the rows written by the
//! previous one before writing its own, so the picker never scrolls the
//! user's scrollback.

use std::io::{self, Write};

use crossterm::{cursor, execute, terminal, QueueableCommand};
use unicode_width::UnicodeWidthStr;

use crate::error::PickerResult;
use crate::prompt::Frame;

/// Where frames end up
pub trait Screen {
    fn render(&mut self, frame: &Frame) -> PickerResult<()>;

    /// Leave the last frame on screen and move past it
    fn done(&mut self) -> PickerResult<()>;
}

/// Live region on a terminal stream
#[derive(Debug)]
pub struct TerminalScreen<W: Write> {
    out: W,
    last_rows: usize,
    width: Option<u16>,
}

impl TerminalScreen<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> TerminalScreen<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_rows: 0,
            width: None,
        }
    }

    /// Fix the wrap width instead of querying the terminal
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn width(&self) -> usize {
        let width = self
            .width
            .or_else(|| terminal::size().ok().map(|(w, _)| w))
            .unwrap_or(80);
        usize::from(width.max(1))
    }

    fn erase(&mut self) -> io::Result<()> {
        if self.last_rows == 0 {
            return Ok(());
        }
        let up = (self.last_rows - 1).min(u16::MAX as usize) as u16;
        self.out.queue(cursor::MoveToColumn(0))?;
        if up > 0 {
            self.out.queue(cursor::MoveUp(up))?;
        }
        self.out
            .queue(terminal::Clear(terminal::ClearType::FromCursorDown))?;
        Ok(())
    }
}

impl<W: Write> Screen for TerminalScreen<W> {
    fn render(&mut self, frame: &Frame) -> PickerResult<()> {
        let content = frame.to_string();
        self.erase()?;

        // Raw mode: a bare line feed does not return the carriage.
        self.out.write_all(content.replace('\n', "\r\n").as_bytes())?;
        self.out.flush()?;

        let width = self.width();
        self.last_rows = content.split('\n').map(|line| rows(line, width)).sum();
        Ok(())
    }

    fn done(&mut self) -> PickerResult<()> {
        self.out.write_all(b"\r\n")?;
        self.out.flush()?;
        self.last_rows = 0;
        Ok(())
    }
}

/// Terminal rows a single logical line occupies at `width` columns
fn rows(line: &str, width: usize) -> usize {
    let visible = visible_width(line);
    if visible == 0 {
        1
    } else {
        visible.div_ceil(width)
    }
}

pub(crate) fn visible_width(s: &str) -> usize {
    strip_ansi(s).width()
}

pub(crate) fn strip_ansi(s: &str) -> std::borrow::Cow<'_, str> {
    if !s.contains('\u{1b}') {
        return std::borrow::Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            // ESC [ ... <final>
            if matches!(chars.peek(), Some('[') | Some(']')) {
                let _ = chars.next();
            }
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }

    std::borrow::Cow::Owned(out)
}

/// Raw mode plus a hidden cursor for as long as the guard lives
#[derive(Debug)]
pub struct CursorGuard {
    _private: (),
}

impl CursorGuard {
    pub fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(err) = execute!(io::stderr(), cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        Ok(Self { _private: () })
    }
}

impl Drop for CursorGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stderr(), cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}
