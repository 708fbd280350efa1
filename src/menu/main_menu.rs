#![warn(clippy::all, clippy::pedantic)]

use crate::menu_types::{Menu, MenuOption};
use crate::session::SessionState;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};

/// Renders the main menu options, with the saved records underneath
pub fn render_main_menu_options(f: &mut Frame, area: Rect, menu: &Menu, records: &SessionState) {
    let mut lines = Vec::new();
    for option in MenuOption::ALL {
        let label = match option {
            MenuOption::Play => "Draw!".to_string(),
            MenuOption::Difficulty => format!("Difficulty: < {} >", menu.difficulty),
            MenuOption::Settings => "Settings".to_string(),
            MenuOption::Quit => "Quit".to_string(),
        };
        let style = if option == menu.selected_option {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![Span::styled(label, style)]));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("High Score: {}", records.high_score()),
        Style::default().fg(Color::Yellow),
    )));
    lines.push(Line::from(Span::styled(
        format!("Best Accuracy: {}%", records.best_accuracy()),
        Style::default().fg(Color::Yellow),
    )));

    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
