//! In-place redraw of the bottom of the terminal

use std::io::{self, Write};

use crossterm::{cursor, terminal, QueueableCommand};

/// Block of lines that is erased and redrawn on every update. Text printed
/// through [`LiveRegion::print_above`] scrolls away normally.
#[derive(Debug, Default)]
pub struct LiveRegion {
    last_lines: usize,
    content: String,
}

impl LiveRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines currently drawn
    #[cfg(test)]
    pub fn height(&self) -> usize {
        self.last_lines
    }

    /// Replace the region with `content`
    pub fn update(&mut self, out: &mut impl Write, content: &str) -> io::Result<()> {
        self.erase(out)?;
        self.draw(out, content)?;
        out.flush()
    }

    /// Write permanent text, then redraw the region below it
    pub fn print_above(&mut self, out: &mut impl Write, text: &str) -> io::Result<()> {
        self.erase(out)?;
        out.write_all(text.as_bytes())?;
        if !text.is_empty() && !text.ends_with('\n') {
            out.write_all(b"\n")?;
        }
        let content = std::mem::take(&mut self.content);
        self.draw(out, &content)?;
        out.flush()
    }

    fn erase(&mut self, out: &mut impl Write) -> io::Result<()> {
        let lines_to_clear = self.last_lines.min(u16::MAX as usize) as u16;
        if lines_to_clear == 0 {
            return Ok(());
        }

        out.queue(cursor::MoveUp(lines_to_clear))?;
        for _ in 0..lines_to_clear {
            out.queue(cursor::MoveToColumn(0))?;
            out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
            out.queue(cursor::MoveDown(1))?;
        }
        out.queue(cursor::MoveUp(lines_to_clear))?;
        out.queue(cursor::MoveToColumn(0))?;
        self.last_lines = 0;
        Ok(())
    }

    fn draw(&mut self, out: &mut impl Write, content: &str) -> io::Result<()> {
        let mut content = content.to_string();
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        out.write_all(content.as_bytes())?;
        self.last_lines = content.chars().filter(|&c| c == '\n').count();
        self.content = content;
        Ok(())
    }
}
