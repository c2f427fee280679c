// Copyright (c) 2026 rezky_nightky

use crate::cell::Cell;

/// Dirty-tracked cell grid. The scene is redrawn from scratch every tick;
/// `set` compares against the current content so only real changes are
/// recorded, and the terminal only repaints those.
#[derive(Clone, Debug)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    cells: Vec<Cell>,
    blank: Cell,
    dirty_all: bool,
    dirty_map: Vec<bool>,
    dirty: Vec<usize>,
}

impl Frame {
    pub fn new(width: u16, height: u16, bg: Option<crossterm::style::Color>) -> Self {
        let len = width as usize * height as usize;
        let blank = Cell::blank_with_bg(bg);
        Self {
            width,
            height,
            cells: vec![blank; len],
            blank,
            dirty_all: true,
            dirty_map: vec![false; len],
            dirty: Vec::new(),
        }
    }

    /// Blank every cell, recording the ones that actually change.
    pub fn clear(&mut self) {
        for i in 0..self.cells.len() {
            if self.cells[i] != self.blank {
                self.cells[i] = self.blank;
                self.mark(i);
            }
        }
    }

    pub fn force_full_redraw(&mut self) {
        self.dirty_all = true;
        self.dirty.clear();
    }

    pub fn is_dirty_all(&self) -> bool {
        self.dirty_all
    }

    pub fn dirty_indices(&self) -> &[usize] {
        &self.dirty
    }

    pub fn clear_dirty(&mut self) {
        if self.dirty_all {
            self.dirty_all = false;
            self.dirty_map.fill(false);
            self.dirty.clear();
            return;
        }
        for &i in &self.dirty {
            if let Some(v) = self.dirty_map.get_mut(i) {
                *v = false;
            }
        }
        self.dirty.clear();
    }

    pub fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    #[allow(dead_code)]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn cell_at_index(&self, i: usize) -> Cell {
        self.cells[i]
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            if self.cells[i] == cell {
                return;
            }
            self.cells[i] = cell;
            self.mark(i);
        }
    }

    fn mark(&mut self, i: usize) {
        if !self.dirty_all && self.dirty_map.get(i).copied() == Some(false) {
            self.dirty_map[i] = true;
            self.dirty.push(i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(ch: char) -> Cell {
        Cell {
            ch,
            fg: None,
            bg: None,
        }
    }

    #[test]
    fn set_records_only_real_changes() {
        let mut f = Frame::new(4, 2, None);
        f.clear_dirty();

        f.set(1, 0, cell('x'));
        f.set(1, 0, cell('x'));
        assert_eq!(f.dirty_indices(), &[1]);
        assert_eq!(f.get(1, 0).unwrap().ch, 'x');
    }

    #[test]
    fn clear_dirties_previously_set_cells() {
        let mut f = Frame::new(4, 2, None);
        f.clear_dirty();

        f.set(2, 1, cell('x'));
        f.clear_dirty();

        f.clear();
        assert_eq!(f.dirty_indices(), &[6]);
        assert_eq!(f.get(2, 1).unwrap().ch, ' ');
    }

    #[test]
    fn out_of_bounds_set_is_ignored() {
        let mut f = Frame::new(2, 2, None);
        f.clear_dirty();
        f.set(5, 5, cell('x'));
        assert!(f.dirty_indices().is_empty());
    }

    #[test]
    fn new_frame_wants_a_full_redraw() {
        let mut f = Frame::new(2, 2, None);
        assert!(f.is_dirty_all());
        f.clear_dirty();
        assert!(!f.is_dirty_all());
        f.force_full_redraw();
        assert!(f.is_dirty_all());
    }
}
