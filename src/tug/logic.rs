//! Tug of war game logic: input processing, per-frame update, win condition,
//! and the fixed-step frame scheduler.

use super::confetti::{advance_confetti, spawn_confetti, CONFETTI_COUNT};
use super::types::*;
use rand::Rng;

/// Where a pull came from. Keyboard holds may lack release events in some
/// terminals; pointer holds always get a matching release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullSource {
    Keyboard,
    Pointer,
}

/// UI-agnostic input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TugInput {
    /// Pull key or mouse button went down.
    Press(PullSource),
    /// Terminal auto-repeat of a held key.
    Repeat(PullSource),
    /// Pull key or mouse button went up.
    Release(PullSource),
    /// Anything else.
    Other,
}

/// Process player input. Ignored once the result is decided; restarting is
/// the caller's job.
pub fn process_input(game: &mut TugGame, input: TugInput) {
    if game.game_result.is_some() {
        return;
    }

    match input {
        TugInput::Press(source) => {
            if !game.started {
                game.started = true;
                log::info!("Round started ({} variant)", game.variant.name());
            }
            match game.variant.pull_mode() {
                PullMode::Hold => hold_on(game, source),
                PullMode::Tap => game.taps_queued += 1,
            }
        }
        TugInput::Repeat(source) => {
            if game.variant.pull_mode() == PullMode::Hold {
                game.started = true;
                hold_on(game, source);
            }
        }
        TugInput::Release(PullSource::Keyboard) => release_key(game),
        TugInput::Release(PullSource::Pointer) => {
            game.pointer_held = false;
        }
        TugInput::Other => {}
    }
}

/// Input while the result is shown. Returns true when the player asks for
/// a new round.
///
/// The pull key only counts once it has been let go: a key still held from
/// the round keeps refreshing its hold through auto-repeat presses, so it
/// can never restart on its own.
pub fn process_result_input(game: &mut TugGame, input: TugInput) -> bool {
    if game.game_result.is_none() {
        return false;
    }

    match input {
        TugInput::Press(PullSource::Keyboard) => {
            let was_down = game.pull_key_down();
            hold_on(game, PullSource::Keyboard);
            !was_down && game.accepts_restart()
        }
        TugInput::Repeat(PullSource::Keyboard) => {
            hold_on(game, PullSource::Keyboard);
            false
        }
        TugInput::Release(PullSource::Keyboard) => {
            release_key(game);
            false
        }
        TugInput::Release(PullSource::Pointer) => {
            game.pointer_held = false;
            false
        }
        TugInput::Repeat(PullSource::Pointer) => false,
        TugInput::Press(PullSource::Pointer) | TugInput::Other => game.accepts_restart(),
    }
}

fn release_key(game: &mut TugGame) {
    game.key_held = false;
    game.key_hold_frames = 0;
    if !game.key_release_reported {
        log::debug!("Terminal reports key releases");
        game.key_release_reported = true;
    }
}

fn hold_on(game: &mut TugGame, source: PullSource) {
    match source {
        PullSource::Keyboard => {
            game.key_held = true;
            game.key_hold_frames = INPUT_HOLD_FRAMES;
        }
        PullSource::Pointer => game.pointer_held = true,
    }
}

/// Advance the simulation by one frame: player pull, bot pull, win check.
///
/// Does nothing before the first press or after the result.
pub fn update<R: Rng>(game: &mut TugGame, rng: &mut R) {
    if !game.started || game.game_result.is_some() {
        return;
    }

    match game.variant.pull_mode() {
        PullMode::Hold => {
            if game.is_pulling() {
                game.rope_center_x += game.tuning.player_speed;
            }
        }
        PullMode::Tap => {
            game.rope_center_x += game.tuning.tap_step * game.taps_queued as f64;
            game.taps_queued = 0;
        }
    }

    game.rope_center_x -= game.tuning.bot_speed;
    game.key_hold_frames = game.key_hold_frames.saturating_sub(1);

    check_win_condition(game, rng);
}

/// Compare car bounding boxes to the centerline and end the game if one
/// touches it. The bot's car is checked first, so a simultaneous touch is
/// a player win.
pub fn check_win_condition<R: Rng>(game: &mut TugGame, rng: &mut R) -> Option<TugResult> {
    let positions = game.positions();
    let centerline = game.centerline();

    let result = if positions.bot_x + CAR_WIDTH >= centerline {
        Some(TugResult::PlayerWins)
    } else if positions.player_x <= centerline {
        Some(TugResult::BotWins)
    } else {
        None
    };

    if let Some(result) = result {
        end_game(game, result, rng);
    }
    result
}

fn end_game<R: Rng>(game: &mut TugGame, result: TugResult, rng: &mut R) {
    game.game_result = Some(result);
    game.result_elapsed_ms = 0;

    if result == TugResult::PlayerWins && game.variant.confetti() {
        game.confetti = spawn_confetti(rng, CONFETTI_COUNT);
    }

    log::info!(
        "Round over after {} frames: {:?} (rope at {:.1})",
        game.frame_count,
        result,
        game.rope_center_x
    );
}

/// Run one scheduled frame. After the result only the message timer, the
/// key hold window and the confetti keep moving.
fn step_frame<R: Rng>(game: &mut TugGame, rng: &mut R) {
    if game.game_result.is_some() {
        game.result_elapsed_ms += FRAME_MS;
        game.key_hold_frames = game.key_hold_frames.saturating_sub(1);
        advance_confetti(&mut game.confetti);
        return;
    }

    game.frame_count += 1;
    update(game, rng);
}

/// Advance the game from the main loop.
///
/// `dt_ms` is milliseconds since the last call. Internally runs whole
/// frames of `FRAME_MS`; leftover time carries to the next call. Returns
/// true if at least one frame ran.
pub fn tick_game<R: Rng>(game: &mut TugGame, dt_ms: u64, rng: &mut R) -> bool {
    if !game.started {
        return false;
    }

    // Clamp dt so a stall does not replay seconds of frames at once
    let dt_ms = dt_ms.min(MAX_TICK_DT_MS);

    game.accumulated_time_ms += dt_ms;
    let mut changed = false;

    while game.accumulated_time_ms >= FRAME_MS {
        game.accumulated_time_ms -= FRAME_MS;
        step_frame(game, rng);
        changed = true;
    }

    changed
}

impl TugSession {
    /// Advance the current game like `tick_game`. When this call decides the
    /// round, the result is added to the tally and returned; later ticks on
    /// the frozen game return `None`.
    pub fn tick<R: Rng>(&mut self, dt_ms: u64, rng: &mut R) -> Option<TugResult> {
        let was_over = self.game.is_over();
        tick_game(&mut self.game, dt_ms, rng);
        if was_over {
            return None;
        }

        let result = self.game.game_result?;
        self.tally.record(result);
        log::info!(
            "Session: {} wins, {} losses",
            self.tally.player_wins,
            self.tally.bot_wins
        );
        Some(result)
    }
}
