#![warn(clippy::all, clippy::pedantic)]

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Text,
    widgets::Paragraph,
};

use super::renderer::centered_rect;
use crate::config::menu::TitleConfig;

// ASCII art letters for the "SHOWDOWN" title
pub const TITLE_LETTERS: [&str; 8] = [
    // S
    " ████\n█    \n ███ \n    █\n████ ",
    // H
    "█   █\n█   █\n█████\n█   █\n█   █",
    // O
    " ███ \n█   █\n█   █\n█   █\n ███ ",
    // W
    "█   █\n█   █\n█ █ █\n██ ██\n█   █",
    // D
    "████ \n█   █\n█   █\n█   █\n████ ",
    // O
    " ███ \n█   █\n█   █\n█   █\n ███ ",
    // W
    "█   █\n█   █\n█ █ █\n██ ██\n█   █",
    // N
    "█   █\n██  █\n█ █ █\n█  ██\n█   █",
];

fn letter_width(letter: &str) -> u16 {
    letter
        .lines()
        .next()
        .map_or(0, |l| u16::try_from(l.chars().count()).unwrap_or(0))
}

/// Total width of the title with `spacing` columns between letters.
#[must_use]
pub fn title_width(spacing: u16) -> u16 {
    let letters: u16 = TITLE_LETTERS.iter().map(|l| letter_width(l)).sum();
    let gaps = u16::try_from(TITLE_LETTERS.len().saturating_sub(1)).unwrap_or(0);
    letters + gaps * spacing
}

/// Renders the ASCII art title
pub fn render_ascii_title(f: &mut Frame, area: Rect, colors: &[Color], config: &TitleConfig) {
    let title_area = centered_rect(
        title_width(config.letter_spacing),
        config.title_height,
        area,
    );

    let mut current_x = title_area.x;
    for (i, letter) in TITLE_LETTERS.iter().enumerate() {
        let width = letter_width(letter);
        let letter_area = Rect::new(current_x, title_area.y, width, config.title_height)
            .intersection(area);

        // Use a different color for each letter
        let color = if colors.is_empty() {
            Color::Yellow
        } else {
            colors[i % colors.len()]
        };
        let paragraph = Paragraph::new(Text::from(*letter)).style(Style::default().fg(color));
        f.render_widget(paragraph, letter_area);

        current_x = current_x.saturating_add(width + config.letter_spacing);
    }
}

/// Rows at the top of the screen that background effects must stay out of
#[must_use]
pub fn get_title_protection_zone(area: Rect, config: &TitleConfig, title_rows: u16) -> Rect {
    let title_area = centered_rect(
        title_width(config.letter_spacing),
        config.title_height,
        Rect::new(area.x, area.y, area.width, title_rows),
    );

    Rect::new(
        area.x,
        area.y,
        area.width,
        (title_area.y + title_area.height + config.protection_margin).min(area.height),
    )
}
