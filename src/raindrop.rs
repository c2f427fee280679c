// Copyright (c) 2026 rezky_nightky

/// A point on the virtual pixel surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The six-step ripple cycle. `One..Five` are the visible ring sizes;
/// `Six` is the invisible end-of-life marker a drop holds for exactly
/// one tick before the field respawns it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::One,
        Stage::Two,
        Stage::Three,
        Stage::Four,
        Stage::Five,
        Stage::Six,
    ];

    /// Total cyclic successor: 1→2→3→4→5→6→1.
    pub fn next(self) -> Stage {
        match self {
            Stage::One => Stage::Two,
            Stage::Two => Stage::Three,
            Stage::Three => Stage::Four,
            Stage::Four => Stage::Five,
            Stage::Five => Stage::Six,
            Stage::Six => Stage::One,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Stage::One => 0,
            Stage::Two => 1,
            Stage::Three => 2,
            Stage::Four => 3,
            Stage::Five => 4,
            Stage::Six => 5,
        }
    }

    pub fn from_index(i: usize) -> Stage {
        Stage::ALL[i % Stage::ALL.len()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Raindrop {
    pub coord: Coord,
    pub stage: Stage,
}

impl Raindrop {
    pub fn new(coord: Coord, stage: Stage) -> Self {
        Self { coord, stage }
    }

    /// Next stage, same spot.
    pub fn advance(self) -> Raindrop {
        Raindrop {
            coord: self.coord,
            stage: self.stage.next(),
        }
    }

    pub fn is_at_end_of_life(&self) -> bool {
        self.stage == Stage::Six
    }
}
