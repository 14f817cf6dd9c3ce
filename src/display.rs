/// Rendering layer — all terminal I/O lives here.
///
/// `TerminalCanvas` implements the library's `Canvas` by scaling playfield
/// coordinates onto terminal cells.  No game logic is performed; this module
/// only translates state into terminal commands.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use road_dodger::config::Config;
use road_dodger::entities::{Collectible, Obstacle, Player, Scenery};
use road_dodger::geometry::Rect;
use road_dodger::render::Canvas;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_GRASS: Color = Color::DarkGreen;
const C_ROAD: Color = Color::DarkGrey;
const C_LANE_MARK: Color = Color::White;
const C_TREE: Color = Color::Green;
const C_TRUNK: Color = Color::DarkYellow;
const C_CAR: Color = Color::Red;
const C_WINDSHIELD: Color = Color::White;
const C_OBSTACLE: Color = Color::DarkRed;
const C_OBSTACLE_MARK: Color = Color::Yellow;
const C_COIN: Color = Color::Yellow;
const C_HUD_SCORE: Color = Color::White;
const C_HINT: Color = Color::Grey;

pub struct TerminalCanvas<'a, W: Write> {
    out: &'a mut W,
    columns: u16,
    rows: u16,
    config: Config,
}

impl<'a, W: Write> TerminalCanvas<'a, W> {
    pub fn new(out: &'a mut W, columns: u16, rows: u16, config: Config) -> Self {
        Self {
            out,
            columns,
            rows,
            config,
        }
    }

    fn col(&self, x: f32) -> i32 {
        (x * self.columns as f32 / self.config.width).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        (y * self.rows as f32 / self.config.height).floor() as i32
    }

    /// Terminal cell for a playfield point, if it is on screen.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let (c, r) = (self.col(x), self.row(y));
        if c < 0 || r < 0 || c >= self.columns as i32 || r >= self.rows as i32 {
            None
        } else {
            Some((c as u16, r as u16))
        }
    }

    fn put(&mut self, x: f32, y: f32, glyph: &str, fg: Color, bg: Color) -> io::Result<()> {
        if let Some((c, r)) = self.cell(x, y) {
            self.out.queue(cursor::MoveTo(c, r))?;
            self.out.queue(style::SetForegroundColor(fg))?;
            self.out.queue(style::SetBackgroundColor(bg))?;
            self.out.queue(Print(glyph))?;
        }
        Ok(())
    }

    /// Fill every on-screen cell of a playfield rectangle (at least one cell).
    fn fill(&mut self, area: Rect, glyph: &str, fg: Color, bg: Color) -> io::Result<()> {
        let (c0, r0) = (self.col(area.left), self.row(area.top));
        let c1 = self.col(area.right()).max(c0 + 1);
        let r1 = self.row(area.bottom()).max(r0 + 1);
        let c0 = c0.max(0);
        let c1 = c1.min(self.columns as i32);
        if c0 >= c1 {
            return Ok(());
        }
        let line = glyph.repeat((c1 - c0) as usize);
        self.out.queue(style::SetForegroundColor(fg))?;
        self.out.queue(style::SetBackgroundColor(bg))?;
        for r in r0.max(0)..r1.min(self.rows as i32) {
            self.out.queue(cursor::MoveTo(c0 as u16, r as u16))?;
            self.out.queue(Print(&line))?;
        }
        Ok(())
    }

    /// Background colour under a playfield column, for sprites drawn on it.
    fn ground_at(&self, x: f32) -> Color {
        let shoulder = self.config.shoulder_width();
        if x >= shoulder && x < self.config.width - shoulder {
            C_ROAD
        } else {
            C_GRASS
        }
    }
}

impl<W: Write> Canvas for TerminalCanvas<'_, W> {
    fn draw_background(&mut self, config: &Config) -> io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;

        let shoulder = config.shoulder_width();
        let road_left = self.col(shoulder).max(0) as usize;
        let road_right = (self.col(config.width - shoulder).max(0) as usize).min(self.columns as usize);
        let total = self.columns as usize;
        let mid = self.col(config.width / 2.0).max(0) as u16;

        for r in 0..self.rows {
            self.out.queue(cursor::MoveTo(0, r))?;
            self.out.queue(style::SetBackgroundColor(C_GRASS))?;
            self.out.queue(Print(" ".repeat(road_left)))?;
            self.out.queue(style::SetBackgroundColor(C_ROAD))?;
            self.out.queue(Print(" ".repeat(road_right.saturating_sub(road_left))))?;
            self.out.queue(style::SetBackgroundColor(C_GRASS))?;
            self.out.queue(Print(" ".repeat(total.saturating_sub(road_right))))?;

            // Dashed centre line
            if r % 2 == 0 {
                self.out.queue(cursor::MoveTo(mid, r))?;
                self.out.queue(style::SetForegroundColor(C_LANE_MARK))?;
                self.out.queue(style::SetBackgroundColor(C_ROAD))?;
                self.out.queue(Print("╎"))?;
            }
        }
        Ok(())
    }

    fn draw_scenery(&mut self, tree: &Scenery) -> io::Result<()> {
        //   ♣     ← crown
        //   ┃     ← trunk
        let cx = tree.x + self.config.tree_footprint / 2.0;
        let bg = self.ground_at(cx);
        self.put(cx, tree.y + 10.0, "♣", C_TREE, bg)?;
        self.put(cx, tree.y + 40.0, "┃", C_TRUNK, bg)
    }

    fn draw_player(&mut self, player: &Player) -> io::Result<()> {
        let (w, h) = (self.config.player_width, self.config.player_height);
        self.fill(Rect::new(player.x, player.y, w, h), "█", C_CAR, C_ROAD)?;
        // Windshield across the upper third
        self.put(player.x + w / 2.0, player.y + h * 0.25, "▀", C_WINDSHIELD, C_CAR)
    }

    fn draw_obstacle(&mut self, obstacle: &Obstacle) -> io::Result<()> {
        self.fill(obstacle.rect(), " ", C_OBSTACLE, C_OBSTACLE)?;
        self.put(
            obstacle.x + obstacle.width / 2.0,
            obstacle.y + obstacle.height / 2.0,
            "!",
            C_OBSTACLE_MARK,
            C_OBSTACLE,
        )
    }

    fn draw_collectible(&mut self, coin: &Collectible) -> io::Result<()> {
        let (cx, cy) = coin.center();
        self.put(cx, cy, "●", C_COIN, C_ROAD)
    }

    fn draw_score(&mut self, score: u32) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(1, 0))?;
        self.out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        self.out.queue(style::SetBackgroundColor(C_GRASS))?;
        self.out.queue(Print(format!("SCORE: {}", score)))?;
        Ok(())
    }

    fn draw_game_over(&mut self, score: u32) -> io::Result<()> {
        let score_line = format!("Final Score: {:>6}", score);
        let lines: &[(&str, Color)] = &[
            ("╔════════════════════╗", Color::Red),
            ("║    GAME  OVER      ║", Color::Red),
            ("╚════════════════════╝", Color::Red),
        ];

        let cx = self.columns / 2;
        let total_rows = lines.len() + 2; // 3 box lines + score + hint
        let start_row = (self.rows / 2).saturating_sub(total_rows as u16 / 2);

        self.out.queue(style::SetBackgroundColor(Color::Black))?;
        for (i, (msg, color)) in lines.iter().enumerate() {
            let row = start_row + i as u16;
            let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
            self.out.queue(cursor::MoveTo(col, row))?;
            self.out.queue(style::SetForegroundColor(*color))?;
            self.out.queue(Print(*msg))?;
        }

        let score_row = start_row + lines.len() as u16;
        let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
        self.out.queue(cursor::MoveTo(col, score_row))?;
        self.out.queue(style::SetForegroundColor(Color::Yellow))?;
        self.out.queue(Print(&score_line))?;

        let hint = "R - Play Again  Q - Quit";
        let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
        self.out.queue(cursor::MoveTo(col, score_row + 1))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out.queue(Print(hint))?;
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}
