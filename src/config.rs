/// Tuning constants, the deserializable `Config`, and its validation.
///
/// A `Config` is checked once when a session starts.  After that every
/// simulation function trusts it.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

// ── Defaults ──────────────────────────────────────────────────────────────────

/// Default tuning values.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Playfield
    pub const WIDTH: f32 = 400.0;
    pub const HEIGHT: f32 = 600.0;
    pub const ROAD_WIDTH: f32 = 200.0;

    // Player car
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    pub const PLAYER_BOTTOM_MARGIN: f32 = 70.0; // distance from the bottom edge to the car's top
    pub const PLAYER_SPEED: f32 = 5.0;

    // Obstacles
    pub const OBSTACLE_WIDTH: f32 = 30.0;
    pub const OBSTACLE_HEIGHT: f32 = 40.0;
    pub const OBJECT_SPEED: f32 = 4.0;
    pub const OBSTACLE_CHANCE: f64 = 0.02;

    // Coins
    pub const COIN_RADIUS: f32 = 10.0;
    pub const COIN_REWARD: u32 = 10;
    pub const MAX_COIN_REWARD: u32 = 10_000;
    pub const COIN_CHANCE: f64 = 0.03;

    // Trees
    pub const TREE_FOOTPRINT: f32 = 40.0;
    pub const TREE_SPEED: f32 = 3.0;
    pub const TREE_CHANCE: f64 = 0.05;

    /// Everything enters the screen from above the top edge.
    pub const SPAWN_Y: f32 = -50.0;
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`{field}` must be a positive finite number, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("`{field}` must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("coin_reward must lie in [1, {max}], got {value}")]
    RewardOutOfRange { value: u32, max: u32 },

    #[error("tree_speed {tree_speed} must be slower than obstacles and coins ({road_speed})")]
    SceneryTooFast { tree_speed: f32, road_speed: f32 },

    #[error(
        "player_bottom_margin {margin} must lie in [{player_height}, {height}] to keep the car on screen"
    )]
    PlayerOffField {
        margin: f32,
        player_height: f32,
        height: f32,
    },

    #[error("road width {road} must be smaller than playfield width {width}")]
    RoadTooWide { road: f32, width: f32 },

    #[error("{entity} width {entity_width} does not fit in a lane of width {lane_width}")]
    EntityTooWide {
        entity: &'static str,
        entity_width: f32,
        lane_width: f32,
    },

    #[error("`{field}` must lie in [0, 1], got {value}")]
    ChanceOutOfRange { field: &'static str, value: f64 },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config ────────────────────────────────────────────────────────────────────

/// Session configuration.  Every field has a default, so a TOML file only
/// needs to list what it overrides.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub width: f32,
    pub height: f32,
    pub road_width: f32,

    pub player_width: f32,
    pub player_height: f32,
    pub player_bottom_margin: f32,
    pub player_speed: f32,

    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub obstacle_speed: f32,
    pub obstacle_chance: f64,

    pub coin_radius: f32,
    pub coin_speed: f32,
    pub coin_reward: u32,
    pub coin_chance: f64,

    pub tree_footprint: f32,
    pub tree_speed: f32,
    pub tree_chance: f64,

    pub spawn_y: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: Params::WIDTH,
            height: Params::HEIGHT,
            road_width: Params::ROAD_WIDTH,
            player_width: Params::PLAYER_WIDTH,
            player_height: Params::PLAYER_HEIGHT,
            player_bottom_margin: Params::PLAYER_BOTTOM_MARGIN,
            player_speed: Params::PLAYER_SPEED,
            obstacle_width: Params::OBSTACLE_WIDTH,
            obstacle_height: Params::OBSTACLE_HEIGHT,
            obstacle_speed: Params::OBJECT_SPEED,
            obstacle_chance: Params::OBSTACLE_CHANCE,
            coin_radius: Params::COIN_RADIUS,
            coin_speed: Params::OBJECT_SPEED,
            coin_reward: Params::COIN_REWARD,
            coin_chance: Params::COIN_CHANCE,
            tree_footprint: Params::TREE_FOOTPRINT,
            tree_speed: Params::TREE_SPEED,
            tree_chance: Params::TREE_CHANCE,
            spawn_y: Params::SPAWN_Y,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys fall back to [`Params`].
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        Ok(config)
    }

    /// Read and parse a TOML file.  Validation is left to session start.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Reject configurations the lane math cannot handle.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("width", self.width),
            ("height", self.height),
            ("road_width", self.road_width),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_speed", self.player_speed),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("obstacle_speed", self.obstacle_speed),
            ("coin_radius", self.coin_radius),
            ("coin_speed", self.coin_speed),
            ("tree_footprint", self.tree_footprint),
            ("tree_speed", self.tree_speed),
        ];
        for (field, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("spawn_y", self.spawn_y),
            ("player_bottom_margin", self.player_bottom_margin),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        if self.player_bottom_margin < self.player_height || self.player_bottom_margin > self.height {
            return Err(ConfigError::PlayerOffField {
                margin: self.player_bottom_margin,
                player_height: self.player_height,
                height: self.height,
            });
        }

        // Trees scroll slower than the road traffic for the depth cue
        let road_speed = self.obstacle_speed.min(self.coin_speed);
        if self.tree_speed >= road_speed {
            return Err(ConfigError::SceneryTooFast {
                tree_speed: self.tree_speed,
                road_speed,
            });
        }

        if self.coin_reward == 0 || self.coin_reward > Params::MAX_COIN_REWARD {
            return Err(ConfigError::RewardOutOfRange {
                value: self.coin_reward,
                max: Params::MAX_COIN_REWARD,
            });
        }

        if self.road_width >= self.width {
            return Err(ConfigError::RoadTooWide {
                road: self.road_width,
                width: self.width,
            });
        }

        let lane_width = self.lane_width();
        let hosted = [
            ("player", self.player_width),
            ("obstacle", self.obstacle_width),
            ("coin", self.coin_radius * 2.0),
        ];
        for (entity, entity_width) in hosted {
            if entity_width > lane_width {
                return Err(ConfigError::EntityTooWide {
                    entity,
                    entity_width,
                    lane_width,
                });
            }
        }

        let chances = [
            ("obstacle_chance", self.obstacle_chance),
            ("coin_chance", self.coin_chance),
            ("tree_chance", self.tree_chance),
        ];
        for (field, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ChanceOutOfRange { field, value });
            }
        }

        Ok(())
    }

    /// Vertical position of the player's top edge.
    pub fn player_y(&self) -> f32 {
        self.height - self.player_bottom_margin
    }
}
