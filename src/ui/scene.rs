//! Scene composition.
//!
//! `compose_scene` is a pure function of the game state and the wall clock
//! to a grid of terminal cells. Layers are painted back to front:
//! background, dashed centerline, rope, cars, confetti.

use super::sprites::{car_sprite, sample_sprite, Facing};
use crate::tug::confetti::ConfettiParticle;
use crate::tug::types::*;
use ratatui::style::Color;
use std::f64::consts::FRAC_PI_4;

pub const START_BACKGROUND: Color = Color::Rgb(34, 34, 34);
pub const CENTERLINE_COLOR: Color = Color::Rgb(231, 76, 60);
pub const ROPE_COLOR: Color = Color::Rgb(160, 120, 70);
pub const PLAYER_COLOR: Color = Color::Rgb(52, 152, 219);
/// Orange at 85% brightness; the bot's car is drawn a little faded.
pub const BOT_COLOR: Color = Color::Rgb(217, 140, 0);

pub const CONFETTI_COLORS: [Color; 6] = [
    Color::Rgb(231, 76, 60),
    Color::Rgb(241, 196, 15),
    Color::Rgb(46, 204, 113),
    Color::Rgb(52, 152, 219),
    Color::Rgb(155, 89, 182),
    Color::Rgb(236, 240, 241),
];

/// Confetti glyph by rotation octant (repeats every half turn).
const CONFETTI_CHARS: [char; 4] = ['─', '╲', '│', '╱'];

const CENTERLINE_CHAR: char = '│';
const ROPE_CHAR: char = '~';

/// Dash and gap length of the centerline in world units.
const DASH_LENGTH: f64 = 10.0;

// Festive backdrop
const SKY_TOP: (u8, u8, u8) = (58, 110, 190);
const SKY_HORIZON: (u8, u8, u8) = (160, 205, 240);
const GRASS_LIGHT: Color = Color::Rgb(88, 160, 60);
const GRASS_DARK: Color = Color::Rgb(62, 128, 44);
const GRASS_BLADE: Color = Color::Rgb(150, 210, 110);
/// Fraction of the field height above the grass.
const HORIZON: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

/// Row-major grid of cells.
#[derive(Debug, Clone)]
pub struct SceneBuffer {
    pub width: u16,
    pub height: u16,
    cells: Vec<Cell>,
}

impl SceneBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.width as i32 || row >= self.height as i32 {
            return None;
        }
        Some(row as usize * self.width as usize + col as usize)
    }

    pub fn get(&self, col: u16, row: u16) -> Option<Cell> {
        self.index(col as i32, row as i32).map(|i| self.cells[i])
    }

    /// Draw a glyph, keeping the cell's background. Out-of-bounds is a no-op.
    fn set_char(&mut self, col: i32, row: i32, ch: char, fg: Color) {
        if let Some(i) = self.index(col, row) {
            self.cells[i].ch = ch;
            self.cells[i].fg = fg;
        }
    }

    fn set_bg(&mut self, col: i32, row: i32, bg: Color) {
        if let Some(i) = self.index(col, row) {
            self.cells[i].bg = bg;
        }
    }

    fn fill_bg(&mut self, bg: Color) {
        for cell in &mut self.cells {
            cell.bg = bg;
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Characters of one row, for tests and debugging.
    pub fn row_text(&self, row: u16) -> String {
        self.rows()
            .nth(row as usize)
            .map(|cells| cells.iter().map(|c| c.ch).collect())
            .unwrap_or_default()
    }
}

/// World-to-cell mapping.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    width: u16,
    height: u16,
}

impl Viewport {
    fn col(&self, x: f64) -> i32 {
        (x * self.width as f64 / WORLD_WIDTH).floor() as i32
    }

    fn row(&self, y: f64) -> i32 {
        (y * self.height as f64 / WORLD_HEIGHT).floor() as i32
    }
}

/// Build the frame for the current state. `key_label` names the pull key
/// on the start screen.
pub fn compose_scene(
    game: &TugGame,
    now_ms: u64,
    width: u16,
    height: u16,
    key_label: &str,
) -> SceneBuffer {
    let mut scene = SceneBuffer::new(width, height);
    if width == 0 || height == 0 {
        return scene;
    }

    if !game.started {
        draw_start_prompt(&mut scene, key_label);
        return scene;
    }

    let view = Viewport { width, height };

    if game.variant.animated_backdrop() {
        draw_festive_backdrop(&mut scene, now_ms);
    }
    draw_centerline(&mut scene, view, game.centerline());
    draw_rope(&mut scene, view, game, now_ms);

    let positions = game.positions();
    draw_car(
        &mut scene,
        view,
        positions.player_x,
        positions.y,
        Facing::Right,
        PLAYER_COLOR,
    );
    draw_car(
        &mut scene,
        view,
        positions.bot_x,
        positions.y,
        Facing::Left,
        BOT_COLOR,
    );

    draw_confetti(&mut scene, view, &game.confetti);
    scene
}

fn draw_start_prompt(scene: &mut SceneBuffer, key_label: &str) {
    scene.fill_bg(START_BACKGROUND);

    let prompt = format!("Press {} to Start Tug of War!", key_label);
    let len = prompt.chars().count() as i32;
    let col = (scene.width as i32 - len).max(0) / 2;
    let row = scene.height as i32 / 2;
    for (i, ch) in prompt.chars().enumerate() {
        scene.set_char(col + i as i32, row, ch, Color::White);
    }
}

/// Sky gradient with a slow brightness shimmer over wavy grass bands.
fn draw_festive_backdrop(scene: &mut SceneBuffer, now_ms: u64) {
    let t = now_ms as f64;
    let horizon = ((scene.height as f64 * HORIZON).round() as i32).max(1);
    let shimmer = (t / 1500.0).sin() * 12.0;

    for row in 0..scene.height as i32 {
        if row < horizon {
            let color = lerp_rgb(SKY_TOP, SKY_HORIZON, row as f64 / horizon as f64, shimmer);
            for col in 0..scene.width as i32 {
                scene.set_bg(col, row, color);
            }
            continue;
        }

        for col in 0..scene.width as i32 {
            let wave = (col as f64 * 0.35 + t / 300.0).sin() * 0.8;
            let band = ((row - horizon) as f64 + wave).floor() as i64;
            let color = if band.rem_euclid(2) == 0 {
                GRASS_LIGHT
            } else {
                GRASS_DARK
            };
            scene.set_bg(col, row, color);
            if row == horizon && wave > 0.2 {
                scene.set_char(col, row, '"', GRASS_BLADE);
            }
        }
    }
}

fn lerp_rgb(from: (u8, u8, u8), to: (u8, u8, u8), f: f64, shift: f64) -> Color {
    let channel = |a: u8, b: u8| -> u8 {
        let v = a as f64 + (b as f64 - a as f64) * f.clamp(0.0, 1.0) + shift;
        v.round().clamp(0.0, 255.0) as u8
    };
    Color::Rgb(
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2),
    )
}

fn draw_centerline(scene: &mut SceneBuffer, view: Viewport, x: f64) {
    let col = view.col(x);
    let units_per_row = WORLD_HEIGHT / view.height as f64;
    // At least one row per dash so the pattern survives small terminals
    let dash_rows = ((DASH_LENGTH / units_per_row).round() as i32).max(1);

    for row in 0..view.height as i32 {
        if (row / dash_rows) % 2 == 0 {
            scene.set_char(col, row, CENTERLINE_CHAR, CENTERLINE_COLOR);
        }
    }
}

/// Vertical offset of the rope's control point at `now_ms`.
pub fn rope_wiggle(now_ms: u64) -> f64 {
    (now_ms as f64 / ROPE_WIGGLE_PERIOD_MS).sin() * ROPE_WIGGLE_AMPLITUDE
}

/// Point on a quadratic Bezier curve, written as the chord plus a bulge
/// toward the control point so a flat rope stays exactly on its row.
pub fn quad_point(p0: (f64, f64), control: (f64, f64), p1: (f64, f64), t: f64) -> (f64, f64) {
    let bulge = 2.0 * (1.0 - t) * t;
    let axis = |a: f64, c: f64, b: f64| a + (b - a) * t + bulge * (c - (a + b) / 2.0);
    (
        axis(p0.0, control.0, p1.0),
        axis(p0.1, control.1, p1.1),
    )
}

fn draw_rope(scene: &mut SceneBuffer, view: Viewport, game: &TugGame, now_ms: u64) {
    let p = game.positions();
    let mid_y = p.y + CAR_HEIGHT / 2.0;

    // Back of the player's car to the back of the bot's car
    let start = (p.player_x + ROPE_OFFSET, mid_y);
    let end = (p.bot_x + CAR_WIDTH - ROPE_OFFSET, mid_y);
    let control = (
        (p.player_x + p.bot_x + CAR_WIDTH) / 2.0,
        mid_y + rope_wiggle(now_ms),
    );

    let span_cols = (view.col(start.0) - view.col(end.0)).unsigned_abs() as usize;
    let samples = (span_cols * 3).max(8);
    for i in 0..=samples {
        let t = i as f64 / samples as f64;
        let (x, y) = quad_point(start, control, end, t);
        scene.set_char(view.col(x), view.row(y), ROPE_CHAR, ROPE_COLOR);
    }
}

fn draw_car(scene: &mut SceneBuffer, view: Viewport, x: f64, y: f64, facing: Facing, color: Color) {
    let sprite = car_sprite(facing);
    let left = view.col(x);
    let top = view.row(y);
    let width = (view.col(x + CAR_WIDTH) - left).max(1) as usize;
    let height = (view.row(y + CAR_HEIGHT) - top).max(1) as usize;

    for row in 0..height {
        for col in 0..width {
            if let Some(ch) = sample_sprite(&sprite, width, height, col, row) {
                scene.set_char(left + col as i32, top + row as i32, ch, color);
            }
        }
    }
}

fn draw_confetti(scene: &mut SceneBuffer, view: Viewport, particles: &[ConfettiParticle]) {
    for p in particles {
        let octant = ((p.rotation / FRAC_PI_4).floor() as i64).rem_euclid(4) as usize;
        let color = CONFETTI_COLORS[p.color as usize % CONFETTI_COLORS.len()];
        scene.set_char(view.col(p.x), view.row(p.y), CONFETTI_CHARS[octant], color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(variant: Variant) -> TugGame {
        let mut game = TugGame::new(variant, Tuning::default());
        game.started = true;
        game
    }

    #[test]
    fn test_start_prompt_before_start() {
        let game = TugGame::new(Variant::Classic, Tuning::default());
        let scene = compose_scene(&game, 0, 80, 20, "SPACE");
        assert!(scene
            .row_text(10)
            .contains("Press SPACE to Start Tug of War!"));
        assert_eq!(scene.get(0, 0).unwrap().bg, START_BACKGROUND);
        // No cars or rope on the start screen
        assert!(!(0..20).any(|row| scene.row_text(row).contains('~')));
    }

    #[test]
    fn test_zero_size_is_empty() {
        let game = started(Variant::Festive);
        let scene = compose_scene(&game, 0, 0, 0, "SPACE");
        assert!(scene.get(0, 0).is_none());
        assert_eq!(scene.rows().count(), 0);
    }

    #[test]
    fn test_centerline_is_dashed() {
        let game = started(Variant::Classic);
        let scene = compose_scene(&game, 0, 80, 20, "SPACE");
        assert_eq!(scene.get(40, 0).unwrap().ch, CENTERLINE_CHAR);
        assert_eq!(scene.get(40, 0).unwrap().fg, CENTERLINE_COLOR);
        assert_eq!(scene.get(40, 1).unwrap().ch, ' ');
        assert_eq!(scene.get(40, 2).unwrap().ch, CENTERLINE_CHAR);
    }

    #[test]
    fn test_rope_between_cars() {
        let game = started(Variant::Classic);
        let scene = compose_scene(&game, 0, 80, 20, "SPACE");
        let cell = scene.get(35, 10).unwrap();
        assert_eq!(cell.ch, ROPE_CHAR);
        assert_eq!(cell.fg, ROPE_COLOR);
        // Rope passes over the centerline
        assert_eq!(scene.get(40, 10).unwrap().ch, ROPE_CHAR);
    }

    #[test]
    fn test_car_fronts_point_away_from_rope() {
        let game = started(Variant::Classic);
        let scene = compose_scene(&game, 0, 160, 40, "SPACE");

        // Both fronts point away from the rope. Player car spans cols
        // 94..112 with its front on the far right
        let player_front = scene.get(111, 20).unwrap();
        assert_eq!(player_front.ch, '>');
        assert_eq!(player_front.fg, PLAYER_COLOR);

        // Bot car spans cols 36..54 and is mirrored
        let bot_front = scene.get(36, 20).unwrap();
        assert_eq!(bot_front.ch, '<');
        assert_eq!(bot_front.fg, BOT_COLOR);
    }

    #[test]
    fn test_classic_background_is_flat() {
        let game = started(Variant::Classic);
        let scene = compose_scene(&game, 1234, 80, 20, "SPACE");
        assert_eq!(scene.get(0, 0).unwrap().bg, Color::Reset);
        assert_eq!(scene.get(0, 19).unwrap().bg, Color::Reset);
    }

    #[test]
    fn test_festive_backdrop_sky_and_grass() {
        let game = started(Variant::Festive);
        let scene = compose_scene(&game, 1234, 80, 20, "SPACE");
        assert!(matches!(scene.get(0, 0).unwrap().bg, Color::Rgb(..)));
        let grass = scene.get(0, 19).unwrap().bg;
        assert!(grass == GRASS_LIGHT || grass == GRASS_DARK);
    }

    #[test]
    fn test_festive_backdrop_animates() {
        let game = started(Variant::Festive);
        let a = compose_scene(&game, 0, 80, 20, "SPACE");
        let b = compose_scene(&game, 2000, 80, 20, "SPACE");
        let differs = (14..20).any(|row| (0..80).any(|col| a.get(col, row) != b.get(col, row)));
        assert!(differs);
    }

    #[test]
    fn test_confetti_drawn_on_top() {
        let mut game = started(Variant::Festive);
        game.confetti.push(ConfettiParticle {
            x: 405.0,
            y: 105.0,
            vx: 0.0,
            vy: 0.0,
            color: 0,
            rotation: 0.0,
            spin: 0.0,
        });
        let scene = compose_scene(&game, 0, 80, 20, "SPACE");
        let cell = scene.get(40, 5).unwrap();
        assert_eq!(cell.ch, '─');
        assert_eq!(cell.fg, CONFETTI_COLORS[0]);
    }

    #[test]
    fn test_offscreen_confetti_is_ignored() {
        let mut game = started(Variant::Festive);
        game.confetti.push(ConfettiParticle {
            x: -50.0,
            y: 9000.0,
            vx: 0.0,
            vy: 0.0,
            color: 3,
            rotation: 1.0,
            spin: 0.0,
        });
        let scene = compose_scene(&game, 0, 80, 20, "SPACE");
        assert_eq!(scene.rows().count(), 20);
    }

    #[test]
    fn test_rope_wiggle() {
        assert!(rope_wiggle(0).abs() < 1e-9);
        let peak = rope_wiggle(314);
        assert!(peak > 9.9 && peak <= ROPE_WIGGLE_AMPLITUDE);
    }

    #[test]
    fn test_quad_point_endpoints() {
        let p0 = (0.0, 0.0);
        let c = (5.0, 10.0);
        let p1 = (10.0, 0.0);
        assert_eq!(quad_point(p0, c, p1, 0.0), p0);
        assert_eq!(quad_point(p0, c, p1, 1.0), p1);
        let mid = quad_point(p0, c, p1, 0.5);
        assert!((mid.0 - 5.0).abs() < 1e-9);
        assert!((mid.1 - 5.0).abs() < 1e-9);
    }
}
