// Copyright (c) 2026 rezky_nightky

use crate::raindrop::{Coord, Stage};

/// An outline primitive, centered on the sprite's coordinate.
/// Every shape is a 1-unit stroke with no fill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Open circle of the given radius.
    Circle { radius: i32 },
    /// Unfilled axis-aligned square outline, `half` pixels from center to edge.
    Square { half: i32 },
    /// Closed outline through the given center-relative points.
    Polygon { points: Vec<(i32, i32)> },
    /// Transparent placeholder: occupies `half*2` square but draws nothing.
    Blank { half: i32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub center: Coord,
    pub stage: Stage,
    pub shapes: Vec<Shape>,
}

/// Rounded-square silhouette for stage five: corners cut at ±5,
/// extreme offsets ±15, first point repeated to close the loop.
const OCTAGON: [(i32, i32); 9] = [
    (-15, -5),
    (-5, -15),
    (5, -15),
    (15, -5),
    (15, 5),
    (5, 15),
    (-5, 15),
    (-15, 5),
    (-15, -5),
];

/// Pure lookup from (position, stage) to a drawable description.
pub fn render(center: Coord, stage: Stage) -> Sprite {
    let shapes = match stage {
        Stage::One => vec![Shape::Circle { radius: 2 }],
        Stage::Two => vec![Shape::Circle { radius: 5 }],
        Stage::Three => vec![Shape::Circle { radius: 8 }],
        Stage::Four => vec![Shape::Circle { radius: 2 }, Shape::Square { half: 15 }],
        Stage::Five => vec![
            Shape::Circle { radius: 8 },
            Shape::Polygon {
                points: OCTAGON.to_vec(),
            },
        ],
        Stage::Six => vec![Shape::Blank { half: 20 }],
    };
    Sprite {
        center,
        stage,
        shapes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_stages_lead_with_the_expected_circle() {
        let c = Coord::new(100, 100);
        for (stage, radius) in [
            (Stage::One, 2),
            (Stage::Two, 5),
            (Stage::Three, 8),
            (Stage::Four, 2),
            (Stage::Five, 8),
        ] {
            let s = render(c, stage);
            assert_eq!(s.shapes[0], Shape::Circle { radius });
        }
    }

    #[test]
    fn stage_four_adds_a_thirty_px_square() {
        let s = render(Coord::new(0, 0), Stage::Four);
        assert_eq!(s.shapes.len(), 2);
        assert_eq!(s.shapes[1], Shape::Square { half: 15 });
    }

    #[test]
    fn stage_five_octagon_closes_and_stays_within_fifteen() {
        let s = render(Coord::new(0, 0), Stage::Five);
        let Shape::Polygon { points } = &s.shapes[1] else {
            panic!("expected polygon");
        };
        assert_eq!(points.len(), 9);
        assert_eq!(points.first(), points.last());
        for &(dx, dy) in points {
            assert!(dx.abs() <= 15 && dy.abs() <= 15);
        }
    }

    #[test]
    fn stage_six_is_an_invisible_placeholder() {
        let s = render(Coord::new(7, 9), Stage::Six);
        assert_eq!(s.shapes, vec![Shape::Blank { half: 20 }]);
    }
}
