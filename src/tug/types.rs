//! Tug of war data structures.
//!
//! All positions are in world units on an 800x400 play field. The renderer
//! scales world units to terminal cells.

use super::confetti::ConfettiParticle;
use serde::{Deserialize, Serialize};

/// Play field dimensions in world units.
pub const WORLD_WIDTH: f64 = 800.0;
pub const WORLD_HEIGHT: f64 = 400.0;

/// Car bounding box size.
pub const CAR_WIDTH: f64 = 90.0;
pub const CAR_HEIGHT: f64 = 90.0;

/// Rope length between the facing edges of the two cars.
pub const CAR_GAP: f64 = 200.0;

/// Player pull per frame while holding.
pub const PLAYER_SPEED: f64 = 2.0;

/// Bot pull per frame, applied unconditionally once the game is running.
pub const BOT_SPEED: f64 = 0.5;

/// Rope shift per discrete press in the festive variant.
pub const TAP_STEP: f64 = 12.0;

/// Initial rope center relative to the centerline (negative = bot side).
pub const START_OFFSET: f64 = -30.0;

/// Frame interval in milliseconds (~60 FPS).
pub const FRAME_MS: u64 = 16;

/// Largest elapsed time fed into a single scheduler call.
pub const MAX_TICK_DT_MS: u64 = 100;

/// Frames to keep pulling after a key press when the terminal has not
/// (yet) reported key-release events. Bridges auto-repeat gaps.
pub const INPUT_HOLD_FRAMES: u32 = 12;

/// Delay between the result and the result message.
pub const RESULT_DELAY_MS: u64 = 100;

/// Time the result message stays up before a press starts a new round.
/// Keeps a still-held pull key from skipping the message.
pub const RESTART_GRACE_MS: u64 = 500;

/// Rope attachment inset from each car's facing edge.
pub const ROPE_OFFSET: f64 = 10.0;

/// Vertical wiggle of the rope's control point.
pub const ROPE_WIGGLE_AMPLITUDE: f64 = 10.0;
pub const ROPE_WIGGLE_PERIOD_MS: f64 = 200.0;

/// Game variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Hold to pull continuously, flat background.
    #[default]
    Classic,
    /// Tap to pull in fixed steps, animated background, confetti on win.
    Festive,
}

/// How player input moves the rope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullMode {
    Hold,
    Tap,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Classic, Variant::Festive];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Festive => "Festive",
        }
    }

    pub fn pull_mode(&self) -> PullMode {
        match self {
            Self::Classic => PullMode::Hold,
            Self::Festive => PullMode::Tap,
        }
    }

    /// Gradient sky and wavy grass instead of a flat background.
    pub fn animated_backdrop(&self) -> bool {
        matches!(self, Self::Festive)
    }

    /// Confetti burst when the player wins.
    pub fn confetti(&self) -> bool {
        matches!(self, Self::Festive)
    }
}

/// Tunable game parameters. Defaults match the constants above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player_speed: f64,
    pub bot_speed: f64,
    pub tap_step: f64,
    pub start_offset: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            bot_speed: BOT_SPEED,
            tap_step: TAP_STEP,
            start_offset: START_OFFSET,
        }
    }
}

/// Game outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TugResult {
    /// The bot's car reached the centerline.
    PlayerWins,
    /// The player's car reached the centerline.
    BotWins,
}

/// Car bounding boxes derived from the rope center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarPositions {
    /// Left edge of the player's car (right side of the field).
    pub player_x: f64,
    /// Left edge of the bot's car (left side of the field).
    pub bot_x: f64,
    /// Top edge shared by both cars.
    pub y: f64,
}

/// Main game state.
#[derive(Debug, Clone)]
pub struct TugGame {
    pub variant: Variant,
    pub tuning: Tuning,
    /// False until the first press. Nothing moves while waiting.
    pub started: bool,
    pub game_result: Option<TugResult>,

    /// Balance point of the rope in world x.
    pub rope_center_x: f64,

    // Input state
    /// Pull key currently held (set on press, cleared on release).
    pub key_held: bool,
    /// Frames left before a held key is considered released when the
    /// terminal does not report releases.
    pub key_hold_frames: u32,
    /// Set once any key release has been observed.
    pub key_release_reported: bool,
    /// Mouse button held.
    pub pointer_held: bool,
    /// Presses waiting to be applied next frame (tap mode).
    pub taps_queued: u32,

    /// Festive celebration particles. Never removed once spawned.
    pub confetti: Vec<ConfettiParticle>,

    // Timing
    /// Sub-frame time accumulator (milliseconds).
    pub accumulated_time_ms: u64,
    /// Frames simulated since the game started.
    pub frame_count: u64,
    /// Milliseconds since the result was decided.
    pub result_elapsed_ms: u64,
}

impl TugGame {
    pub fn new(variant: Variant, tuning: Tuning) -> Self {
        Self {
            variant,
            tuning,
            started: false,
            game_result: None,
            rope_center_x: WORLD_WIDTH / 2.0 + tuning.start_offset,
            key_held: false,
            key_hold_frames: 0,
            key_release_reported: false,
            pointer_held: false,
            taps_queued: 0,
            confetti: Vec::new(),
            accumulated_time_ms: 0,
            frame_count: 0,
            result_elapsed_ms: 0,
        }
    }

    /// A fresh unstarted game with the same variant and tuning.
    pub fn restarted(&self) -> Self {
        Self::new(self.variant, self.tuning)
    }

    /// Fixed x-coordinate whose crossing ends the game.
    pub fn centerline(&self) -> f64 {
        WORLD_WIDTH / 2.0
    }

    pub fn positions(&self) -> CarPositions {
        CarPositions {
            player_x: self.rope_center_x + CAR_GAP / 2.0,
            bot_x: self.rope_center_x - CAR_GAP / 2.0 - CAR_WIDTH,
            y: WORLD_HEIGHT / 2.0 - CAR_HEIGHT / 2.0,
        }
    }

    /// Pull key still down: held with release reporting, or within the
    /// hold window of its last press/repeat otherwise.
    pub fn pull_key_down(&self) -> bool {
        self.key_held && (self.key_release_reported || self.key_hold_frames > 0)
    }

    /// Whether hold-mode pulling applies this frame.
    pub fn is_pulling(&self) -> bool {
        self.pull_key_down() || self.pointer_held
    }

    pub fn is_over(&self) -> bool {
        self.game_result.is_some()
    }

    /// The result message is due once the delay has passed.
    pub fn result_ready(&self) -> bool {
        self.game_result.is_some() && self.result_elapsed_ms >= RESULT_DELAY_MS
    }

    pub fn accepts_restart(&self) -> bool {
        self.game_result.is_some() && self.result_elapsed_ms >= RESULT_DELAY_MS + RESTART_GRACE_MS
    }

    /// Distance of the player's car from the centerline (0 = touching).
    pub fn player_margin(&self) -> f64 {
        (self.positions().player_x - self.centerline()).max(0.0)
    }

    /// Distance of the bot's car from the centerline (0 = touching).
    pub fn bot_margin(&self) -> f64 {
        let p = self.positions();
        (self.centerline() - (p.bot_x + CAR_WIDTH)).max(0.0)
    }

    /// Rope balance in [-1, 1]: -1 = bot about to win, 1 = player about to win.
    pub fn balance(&self) -> f64 {
        let half = CAR_GAP / 2.0;
        ((self.rope_center_x - self.centerline()) / half).clamp(-1.0, 1.0)
    }
}

/// Wins per side across restarts within one run of the program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionTally {
    pub player_wins: u32,
    pub bot_wins: u32,
}

impl SessionTally {
    pub fn record(&mut self, result: TugResult) {
        match result {
            TugResult::PlayerWins => self.player_wins += 1,
            TugResult::BotWins => self.bot_wins += 1,
        }
    }

    pub fn rounds(&self) -> u32 {
        self.player_wins + self.bot_wins
    }
}

/// The game in progress plus the tally of rounds already decided.
#[derive(Debug, Clone)]
pub struct TugSession {
    pub game: TugGame,
    pub tally: SessionTally,
}

impl TugSession {
    pub fn new(variant: Variant, tuning: Tuning) -> Self {
        Self {
            game: TugGame::new(variant, tuning),
            tally: SessionTally::default(),
        }
    }
}
