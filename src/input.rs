//! Input handling: maps crossterm events to game actions.
//!
//! Priority chain: quit keys, then the result screen (restart), then the
//! running game.

use crate::tug::{process_input, process_result_input, PullSource, TugGame, TugInput};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Result of handling one terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue the frame loop normally.
    Continue,
    /// A finished round was replaced by a fresh one.
    Restarted,
    /// Leave the program.
    Quit,
}

/// A terminal event translated for the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    Game(TugInput),
}

/// Translate a terminal event. `None` for events the game ignores (mouse
/// motion, resize, focus, releases of unrelated keys).
pub fn map_event(event: &Event, pull_key: char) -> Option<AppEvent> {
    match event {
        Event::Key(key) => map_key(key, pull_key),
        Event::Mouse(mouse) => map_mouse(mouse),
        _ => None,
    }
}

fn map_key(key: &KeyEvent, pull_key: char) -> Option<AppEvent> {
    let is_quit = match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    };
    if is_quit {
        return (key.kind == KeyEventKind::Press).then_some(AppEvent::Quit);
    }

    if key.code == KeyCode::Char(pull_key) {
        let input = match key.kind {
            KeyEventKind::Press => TugInput::Press(PullSource::Keyboard),
            KeyEventKind::Repeat => TugInput::Repeat(PullSource::Keyboard),
            KeyEventKind::Release => TugInput::Release(PullSource::Keyboard),
        };
        return Some(AppEvent::Game(input));
    }

    (key.kind == KeyEventKind::Press).then_some(AppEvent::Game(TugInput::Other))
}

fn map_mouse(mouse: &MouseEvent) -> Option<AppEvent> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            Some(AppEvent::Game(TugInput::Press(PullSource::Pointer)))
        }
        MouseEventKind::Up(MouseButton::Left) => {
            Some(AppEvent::Game(TugInput::Release(PullSource::Pointer)))
        }
        _ => None,
    }
}

/// Apply one terminal event to the game.
pub fn handle_event(event: &Event, game: &mut TugGame, pull_key: char) -> InputResult {
    let input = match map_event(event, pull_key) {
        Some(AppEvent::Quit) => return InputResult::Quit,
        Some(AppEvent::Game(input)) => input,
        None => return InputResult::Continue,
    };

    // Result screen: a fresh press starts a new round once the message has
    // been up long enough
    if game.is_over() {
        if process_result_input(game, input) {
            *game = game.restarted();
            log::info!("New round");
            return InputResult::Restarted;
        }
        return InputResult::Continue;
    }

    process_input(game, input);
    InputResult::Continue
}
