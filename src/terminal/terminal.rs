use crate::terminal::event::{
    CursorPos, KeyCode, KeyEvent, KeyModifiers, TerminalEvent, TerminalSize,
};
use crate::ui::span::SpanLine;
use crate::ui::style::Color;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode as CrosstermKeyCode, KeyEvent as CrosstermKeyEvent,
    KeyEventKind, KeyModifiers as CrosstermKeyModifiers,
};
use crossterm::style::{
    Attribute, Color as CrosstermColor, Print, ResetColor, SetAttribute, SetForegroundColor,
};
use crossterm::terminal::{
    self, BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};
use std::time::Duration;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Full-screen crossterm surface the wizard draws into.
pub struct Terminal {
    stdout: Stdout,
    size: TerminalSize,
    scroll_offset: usize,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout: io::stdout(),
            size: TerminalSize { width, height },
            scroll_offset: 0,
        })
    }

    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.stdout, EnterAlternateScreen, Hide)?;
        Ok(())
    }

    pub fn exit(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, LeaveAlternateScreen, Show)?;
        self.stdout.flush()
    }

    pub fn size(&self) -> TerminalSize {
        self.size
    }

    pub fn set_size(&mut self, size: TerminalSize) {
        self.size = size;
    }

    /// Waits up to `timeout` for input; returns `Tick` when nothing arrived.
    pub fn poll_event(&mut self, timeout: Duration) -> io::Result<TerminalEvent> {
        if !event::poll(timeout)? {
            return Ok(TerminalEvent::Tick);
        }
        match event::read()? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                Ok(TerminalEvent::Key(map_key_event(key)))
            }
            CrosstermEvent::Resize(width, height) => {
                Ok(TerminalEvent::Resize(TerminalSize { width, height }))
            }
            _ => Ok(TerminalEvent::Tick),
        }
    }

    pub fn render(&mut self, lines: &[SpanLine], cursor: Option<CursorPos>) -> io::Result<()> {
        let height = self.size.height as usize;
        let width = self.size.width;
        if height == 0 || width == 0 {
            return Ok(());
        }

        let max_offset = lines.len().saturating_sub(height);
        self.scroll_offset = match cursor {
            Some(cur) => (cur.row as usize).saturating_sub(height.saturating_sub(1)),
            None => max_offset,
        }
        .min(max_offset);
        let offset = self.scroll_offset;

        queue!(
            self.stdout,
            BeginSynchronizedUpdate,
            MoveTo(0, 0),
            Clear(ClearType::All)
        )?;
        for (row, line) in lines.iter().skip(offset).take(height).enumerate() {
            queue!(self.stdout, MoveTo(0, row as u16))?;
            self.write_span_line(line, width)?;
        }

        match cursor {
            Some(cur) if (cur.row as usize) >= offset && (cur.row as usize) < offset + height => {
                let col = cur.col.min(width.saturating_sub(1));
                queue!(
                    self.stdout,
                    MoveTo(col, (cur.row as usize - offset) as u16),
                    Show
                )?;
            }
            _ => queue!(self.stdout, Hide)?,
        }

        queue!(self.stdout, EndSynchronizedUpdate)?;
        self.stdout.flush()
    }

    fn write_span_line(&mut self, line: &SpanLine, width: u16) -> io::Result<()> {
        let render_width = width.saturating_sub(1).max(1) as usize;
        let mut used = 0usize;
        for span in line {
            if used >= render_width {
                break;
            }
            let clipped = clip_to_width(&span.text, render_width - used);
            if clipped.is_empty() {
                continue;
            }
            if let Some(color) = span.style.color {
                queue!(self.stdout, SetForegroundColor(map_color(color)))?;
            }
            if span.style.bold {
                queue!(self.stdout, SetAttribute(Attribute::Bold))?;
            }
            if span.style.dim {
                queue!(self.stdout, SetAttribute(Attribute::Dim))?;
            }
            queue!(self.stdout, Print(clipped.as_str()), ResetColor)?;
            if span.style.bold || span.style.dim {
                queue!(self.stdout, SetAttribute(Attribute::NormalIntensity))?;
            }
            used = used.saturating_add(UnicodeWidthStr::width(clipped.as_str()));
        }
        Ok(())
    }
}

fn clip_to_width(text: &str, max_cols: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max_cols {
            break;
        }
        out.push(ch);
        used += w;
    }
    out
}

fn map_color(color: Color) -> CrosstermColor {
    match color {
        Color::Reset => CrosstermColor::Reset,
        Color::DarkGrey => CrosstermColor::DarkGrey,
        Color::Red => CrosstermColor::Red,
        Color::Green => CrosstermColor::Green,
        Color::Yellow => CrosstermColor::DarkYellow,
        Color::Blue => CrosstermColor::DarkBlue,
        Color::Cyan => CrosstermColor::DarkCyan,
        Color::White => CrosstermColor::White,
    }
}

fn map_key_event(key: CrosstermKeyEvent) -> KeyEvent {
    KeyEvent {
        code: map_key_code(key.code),
        modifiers: map_key_modifiers(key.modifiers),
    }
}

fn map_key_code(code: CrosstermKeyCode) -> KeyCode {
    match code {
        CrosstermKeyCode::Char(ch) => KeyCode::Char(ch),
        CrosstermKeyCode::Enter => KeyCode::Enter,
        CrosstermKeyCode::Tab => KeyCode::Tab,
        CrosstermKeyCode::BackTab => KeyCode::BackTab,
        CrosstermKeyCode::Esc => KeyCode::Esc,
        CrosstermKeyCode::Backspace => KeyCode::Backspace,
        CrosstermKeyCode::Delete => KeyCode::Delete,
        CrosstermKeyCode::Home => KeyCode::Home,
        CrosstermKeyCode::End => KeyCode::End,
        CrosstermKeyCode::Left => KeyCode::Left,
        CrosstermKeyCode::Right => KeyCode::Right,
        CrosstermKeyCode::Up => KeyCode::Up,
        CrosstermKeyCode::Down => KeyCode::Down,
        CrosstermKeyCode::PageUp => KeyCode::PageUp,
        CrosstermKeyCode::PageDown => KeyCode::PageDown,
        _ => KeyCode::Unknown,
    }
}

fn map_key_modifiers(modifiers: CrosstermKeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::NONE;
    if modifiers.contains(CrosstermKeyModifiers::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    if modifiers.contains(CrosstermKeyModifiers::CONTROL) {
        out |= KeyModifiers::CONTROL;
    }
    if modifiers.contains(CrosstermKeyModifiers::ALT) {
        out |= KeyModifiers::ALT;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::clip_to_width;

    #[test]
    fn clip_respects_wide_characters() {
        assert_eq!(clip_to_width("abcdef", 3), "abc");
        assert_eq!(clip_to_width("日本語", 5), "日本");
        assert_eq!(clip_to_width("", 4), "");
    }
}
