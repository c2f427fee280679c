// Copyright (c) 2026 rezky_nightky

use rand::{
    distr::{Distribution, Uniform},
    rngs::StdRng,
    SeedableRng,
};

use crate::raindrop::{Coord, Raindrop, Stage};
use crate::sprite::{render, Sprite};

pub const DROP_COUNT: usize = 10;

/// Margin reserved at every surface edge so the largest sprite
/// (80x80 plus a 10 px cushion) is never clipped.
pub const PADDING: i32 = 90;

pub const DEFAULT_WIDTH: i32 = 1280;
pub const DEFAULT_HEIGHT: i32 = 720;
pub const DEFAULT_SEED: u64 = 0x1234567;

/// Everything that can happen to the field, totally ordered by the
/// event loop. One event, one synchronous update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldEvent {
    /// One animation step: every drop moves one stage.
    Tick,
    /// A (possibly repeated) surface-size report. Reinitializes.
    Resized { width: i32, height: i32 },
    /// The size query failed; keep current dimensions.
    SizeUnavailable,
}

/// Owns the raindrop collection, the surface bounds and the seeded RNG.
/// Random state is threaded sequentially in collection order, so a given
/// seed and size always reproduce the same animation.
pub struct Field {
    pub width: i32,
    pub height: i32,
    seed: u64,
    drop_count: usize,
    raindrops: Vec<Raindrop>,
    rng: StdRng,
    rand_x: Uniform<i32>,
    rand_y: Uniform<i32>,
    rand_stage: Uniform<usize>,
}

/// Valid placement range along one axis. Undersized surfaces collapse
/// toward a centered box instead of producing an inverted range.
fn axis_range(dim: i32) -> (i32, i32) {
    let lo = PADDING.min(dim / 2).max(0);
    let hi = (dim - PADDING).max(lo);
    (lo, hi)
}

impl Field {
    /// An empty field at the default surface size. Drops appear on the
    /// first `Resized` (or `SizeUnavailable`) event.
    pub fn new(seed: u64, drop_count: usize) -> Self {
        let (x_lo, x_hi) = axis_range(DEFAULT_WIDTH);
        let (y_lo, y_hi) = axis_range(DEFAULT_HEIGHT);
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed,
            drop_count,
            raindrops: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            rand_x: Uniform::new_inclusive(x_lo, x_hi).expect("valid range"),
            rand_y: Uniform::new_inclusive(y_lo, y_hi).expect("valid range"),
            rand_stage: Uniform::new_inclusive(0, Stage::ALL.len() - 1).expect("valid range"),
        }
    }

    pub fn update(&mut self, event: FieldEvent) {
        match event {
            FieldEvent::Tick => self.tick(),
            FieldEvent::Resized { width, height } => self.resize(width, height),
            FieldEvent::SizeUnavailable => self.reseed(),
        }
    }

    /// Full reinitialization: RNG back to the seed, every drop replaced.
    /// A resize deliberately discards in-flight ripple progress.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
        self.reseed();
    }

    fn reseed(&mut self) {
        let (x_lo, x_hi) = axis_range(self.width);
        let (y_lo, y_hi) = axis_range(self.height);
        self.rand_x = Uniform::new_inclusive(x_lo, x_hi).expect("valid range");
        self.rand_y = Uniform::new_inclusive(y_lo, y_hi).expect("valid range");
        self.rng = StdRng::seed_from_u64(self.seed);

        self.raindrops.clear();
        for _ in 0..self.drop_count {
            let coord = self.place();
            let stage = Stage::from_index(self.rand_stage.sample(&mut self.rng));
            self.raindrops.push(Raindrop::new(coord, stage));
        }
    }

    /// One animation step. End-of-life drops respawn at stage one at a
    /// freshly drawn spot; everyone else advances in place.
    pub fn tick(&mut self) {
        for i in 0..self.raindrops.len() {
            if self.raindrops[i].is_at_end_of_life() {
                let coord = self.place();
                self.raindrops[i] = Raindrop::new(coord, Stage::One);
            } else {
                self.raindrops[i] = self.raindrops[i].advance();
            }
        }
    }

    // Draw order is fixed: x then y.
    fn place(&mut self) -> Coord {
        let x = self.rand_x.sample(&mut self.rng);
        let y = self.rand_y.sample(&mut self.rng);
        Coord::new(x, y)
    }

    #[allow(dead_code)]
    pub fn raindrops(&self) -> &[Raindrop] {
        &self.raindrops
    }

    /// Per-frame emission for the host renderer.
    pub fn sprites(&self) -> Vec<Sprite> {
        self.raindrops
            .iter()
            .map(|d| render(d.coord, d.stage))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_bounds(d: &Raindrop, width: i32, height: i32) -> bool {
        let (x_lo, x_hi) = axis_range(width);
        let (y_lo, y_hi) = axis_range(height);
        (x_lo..=x_hi).contains(&d.coord.x) && (y_lo..=y_hi).contains(&d.coord.y)
    }

    fn seeded(width: i32, height: i32) -> Field {
        let mut f = Field::new(DEFAULT_SEED, DROP_COUNT);
        f.update(FieldEvent::Resized { width, height });
        f
    }

    #[test]
    fn starts_empty_until_a_size_report() {
        let f = Field::new(DEFAULT_SEED, DROP_COUNT);
        assert_eq!(f.width, DEFAULT_WIDTH);
        assert_eq!(f.height, DEFAULT_HEIGHT);
        assert!(f.raindrops().is_empty());
    }

    #[test]
    fn size_failure_populates_at_default_dimensions() {
        let mut f = Field::new(DEFAULT_SEED, DROP_COUNT);
        f.update(FieldEvent::SizeUnavailable);
        assert_eq!(f.width, DEFAULT_WIDTH);
        assert_eq!(f.raindrops().len(), DROP_COUNT);
        for d in f.raindrops() {
            assert!(in_bounds(d, DEFAULT_WIDTH, DEFAULT_HEIGHT));
        }
    }

    #[test]
    fn initialize_places_every_drop_inside_the_padded_box() {
        let f = seeded(1280, 720);
        assert_eq!(f.raindrops().len(), DROP_COUNT);
        for d in f.raindrops() {
            assert!((90..=1190).contains(&d.coord.x), "{:?}", d.coord);
            assert!((90..=630).contains(&d.coord.y), "{:?}", d.coord);
        }
    }

    #[test]
    fn same_seed_and_size_replays_identically() {
        let mut a = seeded(1280, 720);
        let mut b = seeded(1280, 720);
        for _ in 0..50 {
            a.update(FieldEvent::Tick);
            b.update(FieldEvent::Tick);
            assert_eq!(a.raindrops(), b.raindrops());
        }
    }

    #[test]
    fn tick_advances_live_drops_without_moving_them() {
        let mut f = seeded(1280, 720);
        f.raindrops[3] = Raindrop::new(Coord::new(200, 300), Stage::Three);
        f.update(FieldEvent::Tick);
        let d = f.raindrops()[3];
        assert_eq!(d.stage, Stage::Four);
        assert_eq!(d.coord, Coord::new(200, 300));
    }

    #[test]
    fn tick_respawns_end_of_life_drops_at_stage_one() {
        let mut f = seeded(1280, 720);
        f.raindrops[0] = Raindrop::new(Coord::new(91, 91), Stage::Six);
        f.update(FieldEvent::Tick);
        let d = f.raindrops()[0];
        assert_eq!(d.stage, Stage::One);
        assert!(in_bounds(&d, 1280, 720));
    }

    #[test]
    fn a_drop_walks_the_full_cycle_then_respawns() {
        let mut f = seeded(1280, 720);
        let start = Coord::new(400, 400);
        f.raindrops[0] = Raindrop::new(start, Stage::One);

        let expected = [Stage::Two, Stage::Three, Stage::Four, Stage::Five, Stage::Six];
        for want in expected {
            f.update(FieldEvent::Tick);
            assert_eq!(f.raindrops()[0].stage, want);
            assert_eq!(f.raindrops()[0].coord, start);
        }

        f.update(FieldEvent::Tick);
        let d = f.raindrops()[0];
        assert_eq!(d.stage, Stage::One);
        assert!(in_bounds(&d, 1280, 720));
    }

    #[test]
    fn resize_discards_and_rebuilds_deterministically() {
        let mut f = seeded(800, 600);
        for _ in 0..7 {
            f.update(FieldEvent::Tick);
        }
        f.update(FieldEvent::Resized {
            width: 1280,
            height: 720,
        });

        assert_eq!(f.raindrops().len(), DROP_COUNT);
        for d in f.raindrops() {
            assert!((90..=1190).contains(&d.coord.x));
            assert!((90..=630).contains(&d.coord.y));
        }

        // RNG resets to the seed, so the rebuilt set matches a fresh field.
        let fresh = seeded(1280, 720);
        assert_eq!(f.raindrops(), fresh.raindrops());
    }

    #[test]
    fn undersized_surfaces_clamp_instead_of_inverting() {
        assert_eq!(axis_range(1280), (90, 1190));
        assert_eq!(axis_range(180), (90, 90));
        assert_eq!(axis_range(100), (50, 50));
        assert_eq!(axis_range(0), (0, 0));

        let f = seeded(120, 64);
        assert_eq!(f.raindrops().len(), DROP_COUNT);
        for d in f.raindrops() {
            assert!((0..=120).contains(&d.coord.x));
            assert!((0..=64).contains(&d.coord.y));
        }
    }

    #[test]
    fn sprites_emit_one_description_per_drop() {
        let f = seeded(1280, 720);
        let sprites = f.sprites();
        assert_eq!(sprites.len(), DROP_COUNT);
        for (s, d) in sprites.iter().zip(f.raindrops()) {
            assert_eq!(s.center, d.coord);
            assert_eq!(s.stage, d.stage);
        }
    }
}
