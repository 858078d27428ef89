pub mod game_common;
pub mod responsive;
pub mod scene;
pub mod sprites;
pub mod tug_scene;

use crate::tug::{SessionTally, TugGame};
use ratatui::Frame;
use responsive::{render_too_small, LayoutContext, SizeTier};

/// Draw one frame of the game screen.
pub fn draw(
    frame: &mut Frame,
    game: &TugGame,
    tally: &SessionTally,
    now_ms: u64,
    key_label: &str,
) {
    let ctx = LayoutContext::from_frame(frame);
    if ctx.tier == SizeTier::TooSmall {
        render_too_small(frame, &ctx);
        return;
    }

    let area = frame.size();
    tug_scene::render_tug_scene(frame, area, game, tally, now_ms, key_label, &ctx);
}
