// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

use crate::raindrop::Stage;
use crate::runtime::{ColorMode, ColorScheme};

/// Ring colors for the five visible stages (index = `Stage::index()`),
/// brightest at stage one, fading as the ripple spreads.
#[derive(Clone, Debug)]
pub struct Palette {
    pub colors: Vec<Color>,
    pub bg: Option<Color>,
}

impl Palette {
    pub fn ring_color(&self, stage: Stage, mode: ColorMode) -> Option<Color> {
        if mode == ColorMode::Mono {
            return None;
        }
        self.colors.get(stage.index()).copied()
    }
}

fn dist2(r0: u8, g0: u8, b0: u8, r1: u8, g1: u8, b1: u8) -> i32 {
    let dr = (r0 as i32) - (r1 as i32);
    let dg = (g0 as i32) - (g1 as i32);
    let db = (b0 as i32) - (b1 as i32);
    (dr * dr) + (dg * dg) + (db * db)
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

    let r6 = ((r as u16 * 5) + 127) / 255;
    let g6 = ((g as u16 * 5) + 127) / 255;
    let b6 = ((b as u16 * 5) + 127) / 255;

    let cr = CUBE_LEVELS[r6 as usize];
    let cg = CUBE_LEVELS[g6 as usize];
    let cb = CUBE_LEVELS[b6 as usize];
    let cube_idx = 16 + (36 * r6 as u8) + (6 * g6 as u8) + (b6 as u8);
    let cube_dist = dist2(r, g, b, cr, cg, cb);

    let avg = ((r as u16 + g as u16 + b as u16) / 3) as u8;
    let gray_idx = if avg < 8 {
        16
    } else if avg > 238 {
        231
    } else {
        232 + ((avg - 8) / 10)
    };
    let (gr, gg, gb) = if gray_idx == 16 {
        (0, 0, 0)
    } else if gray_idx == 231 {
        (255, 255, 255)
    } else {
        let v = 8 + 10 * (gray_idx - 232);
        (v, v, v)
    };
    let gray_dist = dist2(r, g, b, gr, gg, gb);

    if gray_dist < cube_dist {
        gray_idx
    } else {
        cube_idx
    }
}

fn colors_from_rgb(mode: ColorMode, list: &[(u8, u8, u8)]) -> Vec<Color> {
    match mode {
        ColorMode::Mono => vec![Color::White; list.len()],
        ColorMode::TrueColor => list
            .iter()
            .map(|&(r, g, b)| Color::Rgb { r, g, b })
            .collect(),
        ColorMode::Color256 => list
            .iter()
            .map(|&(r, g, b)| Color::AnsiValue(rgb_to_ansi256(r, g, b)))
            .collect(),
    }
}

fn scheme_rgb(scheme: ColorScheme) -> [(u8, u8, u8); 5] {
    match scheme {
        ColorScheme::Rain => [
            (210, 235, 255),
            (150, 205, 250),
            (95, 170, 235),
            (60, 130, 200),
            (35, 90, 155),
        ],
        ColorScheme::Ocean => [
            (190, 255, 250),
            (110, 225, 225),
            (55, 185, 200),
            (25, 140, 170),
            (10, 95, 130),
        ],
        ColorScheme::Green => [
            (220, 255, 220),
            (150, 245, 150),
            (85, 215, 85),
            (45, 165, 45),
            (20, 110, 20),
        ],
        ColorScheme::Cyan => [
            (225, 255, 255),
            (150, 245, 245),
            (80, 215, 215),
            (40, 165, 165),
            (15, 110, 110),
        ],
        ColorScheme::Purple => [
            (240, 225, 255),
            (205, 160, 250),
            (170, 110, 230),
            (130, 70, 190),
            (90, 40, 140),
        ],
        ColorScheme::Neon => [
            (255, 240, 255),
            (255, 150, 235),
            (230, 90, 210),
            (170, 60, 200),
            (105, 40, 170),
        ],
        ColorScheme::Gray => [
            (245, 245, 245),
            (200, 200, 200),
            (155, 155, 155),
            (110, 110, 110),
            (70, 70, 70),
        ],
        ColorScheme::Snow => [
            (255, 255, 255),
            (230, 240, 250),
            (200, 215, 235),
            (165, 185, 215),
            (125, 150, 185),
        ],
    }
}

pub fn build_palette(scheme: ColorScheme, mode: ColorMode, default_background: bool) -> Palette {
    let bg = if default_background || mode == ColorMode::Mono {
        None
    } else {
        Some(Color::Black)
    };
    Palette {
        colors: colors_from_rgb(mode, &scheme_rgb(scheme)),
        bg,
    }
}
