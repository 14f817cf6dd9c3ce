/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle or the frame's input
/// intents) and returns a brand-new `GameState`.  Side effects are limited
/// to the injected RNG.

use rand::Rng;

use crate::config::{Config, ConfigError};
use crate::entities::{
    Collectible, GameState, GameStatus, Intents, Obstacle, Player, Scenery,
};
use crate::geometry::Lane;

/// What the scheduler should do after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Session still running; request another frame.
    NextFrame,
    /// Session ended; hand the final score to the presentation layer.
    GameOver { score: u32 },
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Validate `config` and build a fresh session: no entities, score 0,
/// player centred on the road.
pub fn init_state(config: Config) -> Result<GameState, ConfigError> {
    config.validate()?;
    tracing::info!(
        width = config.width,
        height = config.height,
        road_width = config.road_width,
        "Session started"
    );
    Ok(new_session(config))
}

/// Start over with the same (already validated) configuration.
pub fn restart(state: &GameState) -> GameState {
    tracing::info!(previous_score = state.score, "Session restarted");
    new_session(state.config)
}

fn new_session(config: Config) -> GameState {
    GameState {
        player: Player {
            x: config.width / 2.0 - config.player_width / 2.0,
            y: config.player_y(),
        },
        scenery: Vec::new(),
        obstacles: Vec::new(),
        collectibles: Vec::new(),
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
        config,
    }
}

// ── Spawner ──────────────────────────────────────────────────────────────────

/// Roll once per entity class and append whatever comes up.
pub fn spawn(state: &GameState, rng: &mut impl Rng) -> GameState {
    let c = &state.config;
    let mut scenery = state.scenery.clone();
    let mut obstacles = state.obstacles.clone();
    let mut collectibles = state.collectibles.clone();

    if rng.gen::<f64>() < c.tree_chance {
        let shoulder = c.shoulder_width();
        let offset = rng.gen::<f32>() * (shoulder - c.tree_footprint).max(0.0);
        let x = if rng.gen_bool(0.5) {
            offset
        } else {
            shoulder + c.road_width + offset
        };
        tracing::trace!(x, "Spawned tree");
        scenery.push(Scenery { x, y: c.spawn_y });
    }

    if rng.gen::<f64>() < c.obstacle_chance {
        let lane = Lane::random(rng);
        tracing::trace!(?lane, "Spawned obstacle");
        obstacles.push(Obstacle {
            x: c.lane_x(lane, c.obstacle_width),
            y: c.spawn_y,
            width: c.obstacle_width,
            height: c.obstacle_height,
        });
    }

    if rng.gen::<f64>() < c.coin_chance {
        let lane = Lane::random(rng);
        tracing::trace!(?lane, "Spawned coin");
        collectibles.push(Collectible {
            x: c.lane_x(lane, c.coin_radius * 2.0),
            y: c.spawn_y,
            radius: c.coin_radius,
        });
    }

    GameState {
        scenery,
        obstacles,
        collectibles,
        ..state.clone()
    }
}

// ── Motion & lifecycle ───────────────────────────────────────────────────────

/// Scroll everything down by its class speed and drop whatever has left
/// the bottom of the playfield.
pub fn advance(state: &GameState) -> GameState {
    let c = &state.config;

    let scenery = state
        .scenery
        .iter()
        .map(|s| Scenery { y: s.y + c.tree_speed, ..s.clone() })
        .filter(|s| s.y < c.height)
        .collect();

    let obstacles = state
        .obstacles
        .iter()
        .map(|o| Obstacle { y: o.y + c.obstacle_speed, ..o.clone() })
        .filter(|o| o.y < c.height)
        .collect();

    let collectibles = state
        .collectibles
        .iter()
        .map(|k| Collectible { y: k.y + c.coin_speed, ..k.clone() })
        .filter(|k| k.y < c.height)
        .collect();

    GameState {
        scenery,
        obstacles,
        collectibles,
        ..state.clone()
    }
}

// ── Collisions & scoring ─────────────────────────────────────────────────────

/// Obstacles first: any overlap ends the session and nothing else changes.
/// Otherwise every coin within reach is consumed and scored exactly once.
pub fn resolve_collisions(state: &GameState) -> GameState {
    let car = state.player_rect();

    if state.obstacles.iter().any(|o| car.overlaps(&o.rect())) {
        tracing::info!(score = state.score, frame = state.frame, "Game over");
        return GameState {
            status: GameStatus::GameOver,
            ..state.clone()
        };
    }

    let (cx, cy) = car.center();
    let reach = state.config.player_width / 2.0;
    let (taken, collectibles): (Vec<Collectible>, Vec<Collectible>) =
        state.collectibles.iter().cloned().partition(|k| {
            let (kx, ky) = k.center();
            let distance = (cx - kx).hypot(cy - ky);
            distance < reach + k.radius
        });

    let gain = (taken.len() as u32).saturating_mul(state.config.coin_reward);
    if gain > 0 {
        tracing::debug!(coins = taken.len(), gain, "Collected coins");
    }

    GameState {
        collectibles,
        score: state.score.saturating_add(gain),
        ..state.clone()
    }
}

// ── Player controller ────────────────────────────────────────────────────────

/// Move the car one step toward the held direction and keep it on the road.
/// Right wins when both directions are held.
pub fn steer(state: &GameState, intents: Intents) -> GameState {
    let c = &state.config;
    let dx = if intents.right {
        c.player_speed
    } else if intents.left {
        -c.player_speed
    } else {
        0.0
    };
    let (min_x, max_x) = c.drive_bounds(c.player_width);
    GameState {
        player: Player {
            x: (state.player.x + dx).clamp(min_x, max_x),
            ..state.player.clone()
        },
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame: spawn, scroll and cull, collide and
/// score, then steer.  A finished session is returned untouched.
pub fn tick(state: &GameState, intents: Intents, rng: &mut impl Rng) -> GameState {
    if state.is_over() {
        return state.clone();
    }

    let next = spawn(state, rng);
    let next = advance(&next);
    let next = resolve_collisions(&next);
    let next = if next.is_over() {
        next
    } else {
        steer(&next, intents)
    };

    GameState {
        frame: state.frame + 1,
        ..next
    }
}

/// One scheduler invocation: tick, then say whether another frame is wanted.
pub fn frame(
    state: &GameState,
    intents: Intents,
    rng: &mut impl Rng,
) -> (GameState, FrameOutcome) {
    let next = tick(state, intents, rng);
    let outcome = if next.is_over() {
        FrameOutcome::GameOver { score: next.score }
    } else {
        FrameOutcome::NextFrame
    };
    (next, outcome)
}
