//! Responsive layout infrastructure.
//!
//! Classifies the terminal size once per frame. The tier decides whether the
//! info panel fits and how wide it is.

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

/// Terminal size tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SizeTier {
    TooSmall,
    S, // 40x12+
    M, // 70x20+
    L, // 100x30+
}

const L_MIN_COLS: u16 = 100;
const L_MIN_ROWS: u16 = 30;
const M_MIN_COLS: u16 = 70;
const M_MIN_ROWS: u16 = 20;
const S_MIN_COLS: u16 = 40;
const S_MIN_ROWS: u16 = 12;

#[derive(Debug, Clone, Copy)]
pub struct LayoutContext {
    /// min(width tier, height tier).
    pub tier: SizeTier,
    pub cols: u16,
    pub rows: u16,
}

impl LayoutContext {
    pub fn from_frame(frame: &Frame) -> Self {
        let size = frame.size();
        Self::from_size(size.width, size.height)
    }

    /// Create a LayoutContext from explicit dimensions (for testing).
    pub fn from_size(cols: u16, rows: u16) -> Self {
        let width_tier = classify(cols, L_MIN_COLS, M_MIN_COLS, S_MIN_COLS);
        let height_tier = classify(rows, L_MIN_ROWS, M_MIN_ROWS, S_MIN_ROWS);
        LayoutContext {
            tier: width_tier.min(height_tier),
            cols,
            rows,
        }
    }

    /// Info panel width for this size; 0 hides the panel.
    pub fn info_panel_width(&self) -> u16 {
        match self.tier {
            SizeTier::TooSmall | SizeTier::S => 0,
            SizeTier::M => 22,
            SizeTier::L => 26,
        }
    }
}

fn classify(val: u16, l: u16, m: u16, s: u16) -> SizeTier {
    if val >= l {
        SizeTier::L
    } else if val >= m {
        SizeTier::M
    } else if val >= s {
        SizeTier::S
    } else {
        SizeTier::TooSmall
    }
}

/// Render a "terminal too small" message when below the minimum size.
pub fn render_too_small(frame: &mut Frame, ctx: &LayoutContext) {
    let area = frame.size();
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Terminal too small",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Need: {}x{}   Have: {}x{}",
                S_MIN_COLS, S_MIN_ROWS, ctx.cols, ctx.rows
            ),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Please resize your terminal.",
            Style::default().fg(Color::White),
        )),
    ];

    let text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(text, area);
}
