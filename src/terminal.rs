// Copyright (c) 2026 rezky_nightky

use std::io::{stdout, Result, Stdout, Write};

use crossterm::{
    cursor, event,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::frame::Frame;

pub struct Terminal {
    stdout: Stdout,
    last_size: Option<(u16, u16)>,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(SetAttribute(Attribute::Reset))?;
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore_terminal_best_effort();
            return Err(e);
        }
        Ok(Self {
            stdout: out,
            last_size: None,
        })
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll_event(timeout: std::time::Duration) -> Result<bool> {
        event::poll(timeout)
    }

    pub fn read_event() -> Result<event::Event> {
        event::read()
    }

    /// Paint the frame. Full repaint after a size change or when the
    /// frame asks for one; otherwise only the dirty cells, with cursor
    /// and color state carried across cells to keep the byte stream
    /// small. `Frame::set` already filters no-op writes, so everything
    /// in the dirty list is a real change.
    pub fn draw(&mut self, frame: &mut Frame) -> Result<()> {
        let size_changed = self.last_size != Some((frame.width, frame.height));
        self.last_size = Some((frame.width, frame.height));

        let mut cur_fg: Option<Color> = None;
        let mut cur_bg: Option<Color> = None;

        if size_changed || frame.is_dirty_all() {
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::All))?;
            for y in 0..frame.height {
                self.stdout.queue(cursor::MoveTo(0, y))?;
                for x in 0..frame.width {
                    let idx = y as usize * frame.width as usize + x as usize;
                    let cell = frame.cell_at_index(idx);
                    Self::apply_colors(&mut self.stdout, cell.fg, cell.bg, &mut cur_fg, &mut cur_bg)?;
                    self.stdout.queue(Print(cell.ch))?;
                }
            }
        } else {
            let width = frame.width as usize;
            let mut cur_pos: Option<(u16, u16)> = None;
            let mut dirty: Vec<usize> = frame.dirty_indices().to_vec();
            dirty.sort_unstable();

            for idx in dirty {
                let x = (idx % width) as u16;
                let y = (idx / width) as u16;
                if y >= frame.height {
                    continue;
                }
                if cur_pos != Some((x, y)) {
                    self.stdout.queue(cursor::MoveTo(x, y))?;
                }
                let cell = frame.cell_at_index(idx);
                Self::apply_colors(&mut self.stdout, cell.fg, cell.bg, &mut cur_fg, &mut cur_bg)?;
                self.stdout.queue(Print(cell.ch))?;
                cur_pos = if x + 1 < frame.width {
                    Some((x + 1, y))
                } else {
                    None
                };
            }
        }

        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        frame.clear_dirty();
        Ok(())
    }

    fn apply_colors(
        out: &mut Stdout,
        fg: Option<Color>,
        bg: Option<Color>,
        cur_fg: &mut Option<Color>,
        cur_bg: &mut Option<Color>,
    ) -> Result<()> {
        if fg != *cur_fg {
            out.queue(SetForegroundColor(fg.unwrap_or(Color::Reset)))?;
            *cur_fg = fg;
        }
        if bg != *cur_bg {
            out.queue(SetBackgroundColor(bg.unwrap_or(Color::Reset)))?;
            *cur_bg = bg;
        }
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        restore_terminal_best_effort();
    }
}

pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}
