//! ASCII car sprites.
//!
//! One template facing right (the player's car). The bot's car is the same
//! template mirrored horizontally.

/// Car template, facing right. Spaces are transparent.
pub const CAR_TEMPLATE: [&str; 4] = [
    "   ____   ",
    " _/[]_|\\_ ",
    "|  _    _>",
    "'-(o)--(o)",
];

pub const CAR_TEMPLATE_WIDTH: usize = 10;
pub const CAR_TEMPLATE_HEIGHT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Right,
    Left,
}

/// Swap direction-bearing characters when mirroring.
fn mirror_char(ch: char) -> char {
    match ch {
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        '<' => '>',
        '>' => '<',
        '/' => '\\',
        '\\' => '/',
        other => other,
    }
}

/// Mirror one sprite row horizontally.
pub fn mirror_row(row: &str) -> String {
    row.chars().rev().map(mirror_char).collect()
}

/// Sprite rows as character grids for the given facing.
pub fn car_sprite(facing: Facing) -> Vec<Vec<char>> {
    CAR_TEMPLATE
        .iter()
        .map(|row| match facing {
            Facing::Right => row.chars().collect(),
            Facing::Left => mirror_row(row).chars().collect(),
        })
        .collect()
}

/// Nearest-neighbour sample of a sprite scaled to `width` x `height` cells.
/// `None` for transparent cells.
pub fn sample_sprite(
    sprite: &[Vec<char>],
    width: usize,
    height: usize,
    col: usize,
    row: usize,
) -> Option<char> {
    if width == 0 || height == 0 || sprite.is_empty() {
        return None;
    }
    let src_row = (row * sprite.len() / height).min(sprite.len() - 1);
    let line = &sprite[src_row];
    if line.is_empty() {
        return None;
    }
    let src_col = (col * line.len() / width).min(line.len() - 1);
    match line[src_col] {
        ' ' => None,
        ch => Some(ch),
    }
}
