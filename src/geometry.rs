/// Playfield geometry: shoulders, lanes and the drivable band.
///
/// Nothing here is stored; every value is derived from the `Config` on
/// demand, so lane positions can never drift from the road they live on.

use rand::Rng;

use crate::config::Config;

pub const LANE_COUNT: usize = 3;

/// One of the three lanes of the road, left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lane {
    Left,
    Center,
    Right,
}

impl Lane {
    pub const ALL: [Lane; LANE_COUNT] = [Lane::Left, Lane::Center, Lane::Right];

    /// Lane centre as a fraction of the road width.
    fn fraction(self) -> f32 {
        match self {
            Lane::Left => 1.0 / 6.0,
            Lane::Center => 1.0 / 2.0,
            Lane::Right => 5.0 / 6.0,
        }
    }

    /// Uniformly random lane.
    pub fn random(rng: &mut impl Rng) -> Lane {
        Lane::ALL[rng.gen_range(0..LANE_COUNT)]
    }
}

/// Axis-aligned rectangle in playfield coordinates (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Rect { left, top, width, height }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Strict overlap: rectangles that merely touch do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right()
            && self.right() > other.left
            && self.top < other.bottom()
            && self.bottom() > other.top
    }
}

impl Config {
    /// Width of each grass band flanking the road.
    pub fn shoulder_width(&self) -> f32 {
        (self.width - self.road_width) / 2.0
    }

    pub fn lane_width(&self) -> f32 {
        self.road_width / LANE_COUNT as f32
    }

    /// Left edge for an entity of `entity_width` so that it sits centred in `lane`.
    pub fn lane_x(&self, lane: Lane, entity_width: f32) -> f32 {
        self.shoulder_width() + self.road_width * lane.fraction() - entity_width / 2.0
    }

    /// All three lane offsets for an entity of `entity_width`, left to right.
    pub fn lane_offsets(&self, entity_width: f32) -> [f32; LANE_COUNT] {
        Lane::ALL.map(|lane| self.lane_x(lane, entity_width))
    }

    /// `[min, max]` left-edge bounds keeping an entity on the road.
    pub fn drive_bounds(&self, entity_width: f32) -> (f32, f32) {
        let shoulder = self.shoulder_width();
        (shoulder, self.width - shoulder - entity_width)
    }
}
