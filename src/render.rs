/// Rendering seam.
///
/// The simulation never draws anything itself; a `Canvas` receives read-only
/// views of entities in a fixed order and produces no feedback.

use std::io;

use crate::config::Config;
use crate::entities::{Collectible, GameState, Obstacle, Player, Scenery};

pub trait Canvas {
    /// Grass, road and lane marking.
    fn draw_background(&mut self, config: &Config) -> io::Result<()>;
    fn draw_scenery(&mut self, tree: &Scenery) -> io::Result<()>;
    fn draw_player(&mut self, player: &Player) -> io::Result<()>;
    fn draw_obstacle(&mut self, obstacle: &Obstacle) -> io::Result<()>;
    fn draw_collectible(&mut self, coin: &Collectible) -> io::Result<()>;
    fn draw_score(&mut self, score: u32) -> io::Result<()>;
    /// Terminal overlay with the final score and the restart hint.
    fn draw_game_over(&mut self, score: u32) -> io::Result<()>;
    /// Push the finished frame out.
    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Render one complete frame.
pub fn render_frame<C: Canvas + ?Sized>(canvas: &mut C, state: &GameState) -> io::Result<()> {
    canvas.draw_background(&state.config)?;
    for tree in &state.scenery {
        canvas.draw_scenery(tree)?;
    }
    canvas.draw_player(&state.player)?;
    for obstacle in &state.obstacles {
        canvas.draw_obstacle(obstacle)?;
    }
    for coin in &state.collectibles {
        canvas.draw_collectible(coin)?;
    }
    canvas.draw_score(state.score)?;

    if state.is_over() {
        canvas.draw_game_over(state.score)?;
    }

    canvas.present()
}
