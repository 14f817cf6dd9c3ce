/// All game entity types — pure data, no logic.

use crate::config::Config;
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Movement intents sampled once per frame from the input collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intents {
    pub left: bool,
    pub right: bool,
}

// ── Player ────────────────────────────────────────────────────────────────────

/// The player's car.  Size comes from the session `Config`.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
}

// ── Scrolling entities ────────────────────────────────────────────────────────

/// A roadside tree.  Cosmetic only.
#[derive(Clone, Debug, PartialEq)]
pub struct Scenery {
    pub x: f32,
    pub y: f32,
}

/// A road block.  Touching one ends the session.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A coin.  `(x, y)` is the top-left corner of its bounding square, so the
/// centre sits at `(x + radius, y + radius)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Collectible {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Collectible {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.radius, self.y + self.radius)
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    /// Validated configuration the session was started with.
    pub config: Config,
    pub player: Player,
    pub scenery: Vec<Scenery>,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    pub score: u32,
    pub status: GameStatus,
    /// Frames simulated since session start.
    pub frame: u64,
}

impl GameState {
    pub fn player_rect(&self) -> Rect {
        Rect::new(
            self.player.x,
            self.player.y,
            self.config.player_width,
            self.config.player_height,
        )
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}
