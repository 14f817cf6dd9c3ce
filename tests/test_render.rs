use std::io;

use road_dodger::compute::init_state;
use road_dodger::config::Config;
use road_dodger::entities::*;
use road_dodger::render::{render_frame, Canvas};

/// Records every call so tests can check the draw order.
#[derive(Default)]
struct Recorder {
    calls: Vec<String>,
}

impl Canvas for Recorder {
    fn draw_background(&mut self, config: &Config) -> io::Result<()> {
        self.calls.push(format!("background {}", config.road_width));
        Ok(())
    }
    fn draw_scenery(&mut self, tree: &Scenery) -> io::Result<()> {
        self.calls.push(format!("tree {}", tree.x));
        Ok(())
    }
    fn draw_player(&mut self, player: &Player) -> io::Result<()> {
        self.calls.push(format!("player {}", player.x));
        Ok(())
    }
    fn draw_obstacle(&mut self, obstacle: &Obstacle) -> io::Result<()> {
        self.calls.push(format!("obstacle {}", obstacle.y));
        Ok(())
    }
    fn draw_collectible(&mut self, coin: &Collectible) -> io::Result<()> {
        self.calls.push(format!("coin {}", coin.y));
        Ok(())
    }
    fn draw_score(&mut self, score: u32) -> io::Result<()> {
        self.calls.push(format!("score {}", score));
        Ok(())
    }
    fn draw_game_over(&mut self, score: u32) -> io::Result<()> {
        self.calls.push(format!("game over {}", score));
        Ok(())
    }
    fn present(&mut self) -> io::Result<()> {
        self.calls.push("present".to_string());
        Ok(())
    }
}

fn busy_state() -> GameState {
    let mut s = init_state(Config::new()).unwrap();
    s.scenery.push(Scenery { x: 5.0, y: 0.0 });
    s.scenery.push(Scenery { x: 320.0, y: 80.0 });
    s.obstacles.push(Obstacle { x: 118.0, y: 40.0, width: 30.0, height: 40.0 });
    s.collectibles.push(Collectible { x: 190.0, y: 12.0, radius: 10.0 });
    s.score = 20;
    s
}

#[test]
fn draws_in_fixed_order() {
    let mut canvas = Recorder::default();
    render_frame(&mut canvas, &busy_state()).unwrap();
    assert_eq!(
        canvas.calls,
        vec![
            "background 200",
            "tree 5",
            "tree 320",
            "player 185",
            "obstacle 40",
            "coin 12",
            "score 20",
            "present",
        ]
    );
}

#[test]
fn game_over_overlay_shows_final_score() {
    let mut s = busy_state();
    s.status = GameStatus::GameOver;
    let mut canvas = Recorder::default();
    render_frame(&mut canvas, &s).unwrap();

    let n = canvas.calls.len();
    assert_eq!(canvas.calls[n - 2], "game over 20");
    assert_eq!(canvas.calls[n - 1], "present");
}

#[test]
fn rendering_leaves_state_untouched() {
    let s = busy_state();
    let before = s.clone();
    render_frame(&mut Recorder::default(), &s).unwrap();
    assert_eq!(s, before);
}

/// A canvas that fails on the first entity stops the frame there.
struct Broken {
    drawn: usize,
}

impl Canvas for Broken {
    fn draw_background(&mut self, _: &Config) -> io::Result<()> {
        self.drawn += 1;
        Ok(())
    }
    fn draw_scenery(&mut self, _: &Scenery) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
    }
    fn draw_player(&mut self, _: &Player) -> io::Result<()> {
        self.drawn += 1;
        Ok(())
    }
    fn draw_obstacle(&mut self, _: &Obstacle) -> io::Result<()> {
        self.drawn += 1;
        Ok(())
    }
    fn draw_collectible(&mut self, _: &Collectible) -> io::Result<()> {
        self.drawn += 1;
        Ok(())
    }
    fn draw_score(&mut self, _: u32) -> io::Result<()> {
        self.drawn += 1;
        Ok(())
    }
    fn draw_game_over(&mut self, _: u32) -> io::Result<()> {
        self.drawn += 1;
        Ok(())
    }
}

#[test]
fn draw_error_propagates() {
    let mut canvas = Broken { drawn: 0 };
    let err = render_frame(&mut canvas, &busy_state()).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    assert_eq!(canvas.drawn, 1);
}
