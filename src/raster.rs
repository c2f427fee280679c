// Copyright (c) 2026 rezky_nightky

use std::f32::consts::TAU;

use crossterm::style::Color;

use crate::cell::Cell;
use crate::frame::Frame;
use crate::palette::Palette;
use crate::runtime::ColorMode;
use crate::sprite::{Shape, Sprite};

/// A terminal cell stands in for a 4x8 pixel block of the virtual
/// surface, which roughly cancels the usual 1:2 glyph aspect ratio so
/// circles come out round.
pub const CELL_WIDTH_PX: i32 = 4;
pub const CELL_HEIGHT_PX: i32 = 8;

const RING_CH: char = 'o';
const EDGE_CH: char = '#';

/// Surface dimensions, in pixels, for a terminal of the given cell size.
pub fn surface_size(cols: u16, rows: u16) -> (i32, i32) {
    (
        cols as i32 * CELL_WIDTH_PX,
        rows as i32 * CELL_HEIGHT_PX,
    )
}

fn plot(frame: &mut Frame, px: i32, py: i32, ch: char, fg: Option<Color>, bg: Option<Color>) {
    if px < 0 || py < 0 {
        return;
    }
    let x = px / CELL_WIDTH_PX;
    let y = py / CELL_HEIGHT_PX;
    if x > u16::MAX as i32 || y > u16::MAX as i32 {
        return;
    }
    frame.set(x as u16, y as u16, Cell { ch, fg, bg });
}

fn draw_circle(
    frame: &mut Frame,
    cx: i32,
    cy: i32,
    radius: i32,
    fg: Option<Color>,
    bg: Option<Color>,
) {
    let steps = (radius * 12).max(16);
    let r = radius as f32;
    for i in 0..steps {
        let theta = TAU * (i as f32) / (steps as f32);
        let px = cx + (r * theta.cos()).round() as i32;
        let py = cy + (r * theta.sin()).round() as i32;
        plot(frame, px, py, RING_CH, fg, bg);
    }
}

fn draw_segment(
    frame: &mut Frame,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    fg: Option<Color>,
    bg: Option<Color>,
) {
    let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1);
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let px = x0 + ((x1 - x0) as f32 * t).round() as i32;
        let py = y0 + ((y1 - y0) as f32 * t).round() as i32;
        plot(frame, px, py, EDGE_CH, fg, bg);
    }
}

/// Rasterize one sprite onto the cell grid. Stage six emits nothing.
pub fn draw_sprite(frame: &mut Frame, sprite: &Sprite, palette: &Palette, mode: ColorMode) {
    let fg = palette.ring_color(sprite.stage, mode);
    let bg = palette.bg;
    let cx = sprite.center.x;
    let cy = sprite.center.y;

    for shape in &sprite.shapes {
        match shape {
            Shape::Circle { radius } => draw_circle(frame, cx, cy, *radius, fg, bg),
            Shape::Square { half } => {
                let h = *half;
                draw_segment(frame, cx - h, cy - h, cx + h, cy - h, fg, bg);
                draw_segment(frame, cx + h, cy - h, cx + h, cy + h, fg, bg);
                draw_segment(frame, cx + h, cy + h, cx - h, cy + h, fg, bg);
                draw_segment(frame, cx - h, cy + h, cx - h, cy - h, fg, bg);
            }
            Shape::Polygon { points } => {
                for pair in points.windows(2) {
                    let (dx0, dy0) = pair[0];
                    let (dx1, dy1) = pair[1];
                    draw_segment(frame, cx + dx0, cy + dy0, cx + dx1, cy + dy1, fg, bg);
                }
            }
            Shape::Blank { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::build_palette;
    use crate::raindrop::{Coord, Stage};
    use crate::runtime::ColorScheme;
    use crate::sprite::render;

    fn setup() -> (Frame, Palette) {
        let mut frame = Frame::new(80, 24, None);
        frame.clear_dirty();
        let palette = build_palette(ColorScheme::Rain, ColorMode::Mono, true);
        (frame, palette)
    }

    #[test]
    fn visible_sprite_touches_cells_near_its_center() {
        let (mut frame, palette) = setup();
        let sprite = render(Coord::new(160, 96), Stage::Three);
        draw_sprite(&mut frame, &sprite, &palette, ColorMode::Mono);

        assert!(!frame.dirty_indices().is_empty());
        for &i in frame.dirty_indices() {
            let x = (i % 80) as i32;
            let y = (i / 80) as i32;
            assert!((x - 40).abs() <= 3, "cell x={} too far", x);
            assert!((y - 12).abs() <= 2, "cell y={} too far", y);
        }
    }

    #[test]
    fn stage_six_draws_nothing() {
        let (mut frame, palette) = setup();
        let sprite = render(Coord::new(160, 96), Stage::Six);
        draw_sprite(&mut frame, &sprite, &palette, ColorMode::Mono);
        assert!(frame.dirty_indices().is_empty());
    }

    #[test]
    fn off_surface_geometry_is_clipped_not_wrapped() {
        let (mut frame, palette) = setup();
        // Center near the origin pushes parts of the octagon negative.
        let sprite = render(Coord::new(2, 2), Stage::Five);
        draw_sprite(&mut frame, &sprite, &palette, ColorMode::Mono);
        for &i in frame.dirty_indices() {
            let x = (i % 80) as i32;
            let y = (i / 80) as i32;
            assert!(x <= 5 && y <= 2, "unexpected cell at {},{}", x, y);
        }
    }

    #[test]
    fn square_outline_has_no_interior() {
        let (mut frame, palette) = setup();
        let sprite = render(Coord::new(160, 96), Stage::Four);
        draw_sprite(&mut frame, &sprite, &palette, ColorMode::Mono);
        // Cells strictly inside the 30x30 outline, away from the inner
        // circle, stay blank.
        assert_eq!(frame.get(38, 11).map(|c| c.ch), Some(' '));
        assert_eq!(frame.get(42, 12).map(|c| c.ch), Some(' '));
    }
}
