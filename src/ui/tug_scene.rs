//! Tug of war screen: framed play field, status bar, info panel and the
//! result banner over the frozen field.

use super::game_common::{
    create_game_layout, render_game_over_banner, render_info_panel_frame, render_status_bar,
    GameResultType,
};
use super::responsive::LayoutContext;
use super::scene::{compose_scene, SceneBuffer, BOT_COLOR, PLAYER_COLOR};
use crate::tug::{PullMode, SessionTally, TugGame, TugResult};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Width of the balance gauge in the info panel.
const GAUGE_WIDTH: usize = 16;

/// Render the whole tug of war screen into `area`.
pub fn render_tug_scene(
    frame: &mut Frame,
    area: Rect,
    game: &TugGame,
    tally: &SessionTally,
    now_ms: u64,
    key_label: &str,
    ctx: &LayoutContext,
) {
    let title = format!(" Tug of War ({}) ", game.variant.name());
    let layout = create_game_layout(
        frame,
        area,
        &title,
        Color::LightBlue,
        6,
        ctx.info_panel_width(),
    );

    let scene = compose_scene(
        game,
        now_ms,
        layout.content.width,
        layout.content.height,
        key_label,
    );
    paint_scene(frame, layout.content, &scene);

    if game.result_ready() {
        render_result(frame, layout.content, game, key_label);
    }

    render_status_bar_content(frame, layout.status_bar, game, key_label);

    if layout.info_panel.width >= 2 {
        render_info_panel(frame, layout.info_panel, game, tally);
    }
}

/// Paint a composed scene, merging runs of equal style into one span.
fn paint_scene(frame: &mut Frame, area: Rect, scene: &SceneBuffer) {
    for (row_idx, row_data) in scene.rows().enumerate().take(area.height as usize) {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_fg = Color::Reset;
        let mut current_bg = Color::Reset;
        let mut current_text = String::new();

        for &cell in row_data.iter() {
            if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut current_text),
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }
            current_fg = cell.fg;
            current_bg = cell.bg;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(
                current_text,
                Style::default().fg(current_fg).bg(current_bg),
            ));
        }

        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}

/// Title and message shown once a round is decided.
pub fn result_text(result: TugResult) -> (GameResultType, &'static str, &'static str) {
    match result {
        TugResult::PlayerWins => (GameResultType::Win, "You win! 🎉", "The bot crossed the line."),
        TugResult::BotWins => (GameResultType::Loss, "Bot wins! 😈", "You were dragged over."),
    }
}

fn render_result(frame: &mut Frame, area: Rect, game: &TugGame, key_label: &str) {
    let Some(result) = game.game_result else {
        return;
    };
    let (result_type, title, message) = result_text(result);
    let hint = if game.accepts_restart() {
        format!("[{}] Play again   [Esc] Quit", key_label)
    } else {
        "[Esc] Quit".to_string()
    };
    render_game_over_banner(frame, area, result_type, title, message, &hint);
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &TugGame, key_label: &str) {
    let key_hint = format!("[{}]", key_label);
    let pull_key = key_hint.as_str();

    if !game.started {
        render_status_bar(
            frame,
            area,
            "Ready",
            Color::LightBlue,
            &[(pull_key, "Start"), ("[Click]", "Start"), ("[Esc]", "Quit")],
        );
        return;
    }

    if game.is_over() {
        render_status_bar(
            frame,
            area,
            "Round over",
            Color::DarkGray,
            &[(pull_key, "Restart"), ("[Esc]", "Quit")],
        );
        return;
    }

    let pull_action = match game.variant.pull_mode() {
        PullMode::Hold => "Hold to pull",
        PullMode::Tap => "Tap to pull",
    };

    let (status, color) = if game.is_pulling() || game.taps_queued > 0 {
        ("Pulling!", PLAYER_COLOR)
    } else {
        ("The bot is pulling", BOT_COLOR)
    };

    render_status_bar(
        frame,
        area,
        status,
        color,
        &[(pull_key, pull_action), ("[Click]", pull_action), ("[Esc]", "Quit")],
    );
}

/// Text gauge of the rope balance: `B` side on the left, `P` on the right.
pub fn balance_gauge(balance: f64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let t = ((balance.clamp(-1.0, 1.0) + 1.0) / 2.0 * (width - 1) as f64).round() as usize;
    (0..width)
        .map(|i| if i == t { '●' } else { '─' })
        .collect()
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &TugGame, tally: &SessionTally) {
    let inner = render_info_panel_frame(frame, area);
    let gauge_width = GAUGE_WIDTH.min(inner.width.saturating_sub(4) as usize);

    let balance_color = if game.balance() >= 0.0 {
        PLAYER_COLOR
    } else {
        BOT_COLOR
    };

    let lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Variant: ", Style::default().fg(Color::DarkGray)),
            Span::styled(game.variant.name(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Balance",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("B ", Style::default().fg(BOT_COLOR)),
            Span::styled(
                balance_gauge(game.balance(), gauge_width),
                Style::default().fg(balance_color),
            ),
            Span::styled(" P", Style::default().fg(PLAYER_COLOR)),
        ]),
        Line::from(vec![
            Span::styled("You:  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:.0} units", game.player_margin()),
                Style::default().fg(PLAYER_COLOR),
            ),
        ]),
        Line::from(vec![
            Span::styled("Bot:  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:.0} units", game.bot_margin()),
                Style::default().fg(BOT_COLOR),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Session",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Wins:   ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                tally.player_wins.to_string(),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled("Losses: ", Style::default().fg(Color::DarkGray)),
            Span::styled(tally.bot_wins.to_string(), Style::default().fg(Color::Red)),
        ]),
        Line::from(vec![
            Span::styled("Frames: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                game.frame_count.to_string(),
                Style::default().fg(Color::White),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tug::{Tuning, Variant};
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|c| c.symbol()).collect()
    }

    fn draw(game: &TugGame, cols: u16, rows: u16) -> String {
        let backend = TestBackend::new(cols, rows);
        let mut terminal = Terminal::new(backend).unwrap();
        let ctx = LayoutContext::from_size(cols, rows);
        terminal
            .draw(|frame| {
                let area = frame.size();
                render_tug_scene(frame, area, game, &SessionTally::default(), 0, "SPACE", &ctx);
            })
            .unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn test_balance_gauge_positions() {
        assert_eq!(balance_gauge(-1.0, 5), "●────");
        assert_eq!(balance_gauge(0.0, 5), "──●──");
        assert_eq!(balance_gauge(1.0, 5), "────●");
        assert_eq!(balance_gauge(0.0, 0), "");
    }

    #[test]
    fn test_result_text() {
        let (kind, title, _) = result_text(TugResult::PlayerWins);
        assert!(kind == GameResultType::Win);
        assert!(title.starts_with("You win!"));
        let (kind, title, _) = result_text(TugResult::BotWins);
        assert!(kind == GameResultType::Loss);
        assert!(title.starts_with("Bot wins!"));
    }

    #[test]
    fn test_render_start_screen() {
        let game = TugGame::new(Variant::Classic, Tuning::default());
        let text = draw(&game, 100, 30);
        assert!(text.contains("Tug of War"));
        assert!(text.contains("to Start Tug of War!"));
        assert!(text.contains("Info"));
    }

    #[test]
    fn test_small_terminal_hides_info_panel() {
        let game = TugGame::new(Variant::Classic, Tuning::default());
        let text = draw(&game, 50, 14);
        assert!(!text.contains("Info"));
    }

    #[test]
    fn test_result_banner_after_delay() {
        let mut game = TugGame::new(Variant::Classic, Tuning::default());
        game.started = true;
        game.game_result = Some(TugResult::BotWins);
        assert!(!draw(&game, 100, 30).contains("Bot wins!"));

        game.result_elapsed_ms = crate::tug::RESULT_DELAY_MS;
        assert!(draw(&game, 100, 30).contains("Bot wins!"));
    }

    #[test]
    fn test_info_panel_margins_in_world_units() {
        let mut game = TugGame::new(Variant::Classic, Tuning::default());
        game.started = true;
        let text = draw(&game, 100, 30);
        assert!(text.contains("130 units"));
        assert!(text.contains("70 units"));
        assert!(!text.contains("px"));
    }
}
