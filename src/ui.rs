#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Playfield coordinates are small and non-negative once clipped to the view
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::App;
use crate::components::{Particle, Pointer, ScreenShake, Target};
use crate::game::{Playfield, URGENT_TIME};
use crate::menu::MenuRenderer;
use crate::menu_types::{GameOverOption, Screen};
use crate::session::{Session, SessionState};
use crate::settings::SettingsStore;
use crate::store::TargetStore;

// Smallest terminal the shooting range can be played in
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 16;

const SAND: Color = Color::Rgb(222, 184, 135);

pub fn render(f: &mut Frame, app: &mut App) {
    match app.menu.screen {
        Screen::MainMenu | Screen::Settings => {
            let records = app.world.resource::<Session>().state();
            let settings = app.world.resource::<SettingsStore>().get();
            MenuRenderer::render_menu(f, &app.menu, &app.menu_renderer, records, &settings);
        }
        Screen::Playing => render_game(f, app),
        Screen::GameOver => {
            let state = app.world.resource::<Session>().state();
            render_game_over(f, state, app.menu.game_over_selected);
        }
    }
}

/// `m:ss`
#[must_use]
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Maps a terminal cell inside `area` to the playfield point at the cell's
/// center.
#[must_use]
pub fn cell_to_playfield(area: Rect, bounds: &Playfield, col: u16, row: u16) -> Option<(f32, f32)> {
    if area.width == 0 || area.height == 0 || !area.contains(Position::new(col, row)) {
        return None;
    }
    let x = (f32::from(col - area.x) + 0.5) * bounds.width / f32::from(area.width);
    let y = (f32::from(row - area.y) + 0.5) * bounds.height / f32::from(area.height);
    Some((x, y))
}

/// The terminal cell showing playfield point (`x`, `y`), if it is visible.
#[must_use]
pub fn playfield_to_cell(area: Rect, bounds: &Playfield, x: f32, y: f32) -> Option<(u16, u16)> {
    if x < 0.0 || y < 0.0 || x >= bounds.width || y >= bounds.height {
        return None;
    }
    let col = (x / bounds.width * f32::from(area.width)) as u16;
    let row = (y / bounds.height * f32::from(area.height)) as u16;
    if col >= area.width || row >= area.height {
        return None;
    }
    Some((area.x + col, area.y + row))
}

fn render_too_small(f: &mut Frame) {
    let warning_text = Paragraph::new(
        "Terminal too small!\nPlease resize your terminal\nto continue playing.",
    )
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Showdown - Paused"),
    );
    f.render_widget(warning_text, f.area());
}

fn render_game(f: &mut Frame, app: &mut App) {
    if f.area().width < MIN_WIDTH || f.area().height < MIN_HEIGHT {
        app.playfield_area = None;
        render_too_small(f);
        return;
    }

    // Get screen shake offset if active
    let (shake_x, shake_y) = app.world.resource::<ScreenShake>().current_offset;
    let original_area = f.area();
    let shake_area = Rect {
        x: original_area.x.saturating_add_signed(shake_x),
        y: original_area.y.saturating_add_signed(shake_y),
        width: original_area.width,
        height: original_area.height,
    }
    .intersection(original_area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // HUD
            Constraint::Min(8),    // Playfield
            Constraint::Length(1), // Controls
        ])
        .split(shake_area);

    let state = app.world.resource::<Session>().state().clone();
    render_hud(f, &state, layout[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SAND));
    let inner = block.inner(layout[1]);
    f.render_widget(block, layout[1]);
    app.playfield_area = Some(inner);

    let bounds = *app.world.resource::<Playfield>();
    render_targets(f, app.world.resource::<TargetStore>(), &bounds, inner);
    render_particles(f, app, &bounds, inner);

    let style = app.world.resource::<SettingsStore>().get().crosshair_style;
    if let Some((col, row)) = app.world.resource::<Pointer>().cell {
        if inner.contains(Position::new(col, row)) {
            if let Some(cell) = f.buffer_mut().cell_mut((col, row)) {
                cell.set_symbol(style.glyph())
                    .set_fg(Color::LightRed)
                    .set_style(Style::default().add_modifier(Modifier::BOLD));
            }
        }
    }

    let controls = Paragraph::new("Click: shoot   P/Space: pause   Esc: menu   Q: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(controls, layout[2]);

    if state.is_paused() {
        render_pause_overlay(f, inner);
    }
}

fn render_hud(f: &mut Frame, state: &SessionState, area: Rect) {
    let time = state.time_remaining();
    let timer_style = if time <= URGENT_TIME {
        Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK)
    } else {
        Style::default().fg(Color::White)
    };

    let combo_color = match state.combo() {
        0 | 1 => Color::White,
        2..=3 => Color::LightGreen,
        4..=5 => Color::LightCyan,
        _ => Color::LightMagenta,
    };

    let difficulty_color = match state.difficulty() {
        crate::game::Difficulty::Easy => Color::Green,
        crate::game::Difficulty::Medium => Color::Yellow,
        crate::game::Difficulty::Hard => Color::Red,
    };

    let label = Style::default().fg(SAND);
    let line = Line::from(vec![
        Span::styled("SCORE ", label),
        Span::styled(
            state.score().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled("COMBO ", label),
        Span::styled(format!("x{}", state.combo()), Style::default().fg(combo_color)),
        Span::raw("   "),
        Span::styled("ACC ", label),
        Span::raw(format!("{}%", state.accuracy())),
        Span::raw("   "),
        Span::styled("TIME ", label),
        Span::styled(format_time(time), timer_style),
        Span::raw("   "),
        Span::styled(
            format!(" {} ", state.difficulty().as_str().to_uppercase()),
            Style::default().fg(Color::Black).bg(difficulty_color),
        ),
        Span::raw("   "),
        Span::styled("BEST ", label),
        Span::raw(state.high_score().to_string()),
    ]);

    let hud = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" SHOWDOWN ")
                .border_style(Style::default().fg(SAND)),
        );
    f.render_widget(hud, area);
}

/// Fills every cell whose center lies inside a target's hit box, and puts
/// the target's glyph on the cell under its center.
fn render_targets(f: &mut Frame, store: &TargetStore, bounds: &Playfield, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let buffer = f.buffer_mut();

    for target in store.iter() {
        let (fill, color) = if target.is_hit {
            ("✶", Color::Yellow)
        } else {
            ("▒", target.kind.get_color())
        };

        for (col, row) in covered_cells(target, bounds, area) {
            if let Some(cell) = buffer.cell_mut((col, row)) {
                cell.set_symbol(fill).set_fg(color);
            }
        }

        let (cx, cy) = target.center();
        if let Some((col, row)) = playfield_to_cell(area, bounds, cx, cy) {
            let glyph = if target.is_hit { "✸" } else { target.kind.glyph() };
            if let Some(cell) = buffer.cell_mut((col, row)) {
                cell.set_symbol(glyph)
                    .set_fg(color)
                    .set_style(Style::default().add_modifier(Modifier::BOLD));
            }
        }
    }
}

fn covered_cells(target: &Target, bounds: &Playfield, area: Rect) -> Vec<(u16, u16)> {
    let col_width = bounds.width / f32::from(area.width);
    let row_height = bounds.height / f32::from(area.height);
    let size = crate::game::TARGET_SIZE;

    let first_col = (target.x / col_width).floor().max(0.0) as u16;
    let last_col = ((target.x + size) / col_width).ceil().max(0.0) as u16;
    let first_row = (target.y / row_height).floor().max(0.0) as u16;
    let last_row = ((target.y + size) / row_height).ceil().max(0.0) as u16;

    let mut cells = Vec::new();
    for col in first_col..last_col.min(area.width) {
        for row in first_row..last_row.min(area.height) {
            let x = (f32::from(col) + 0.5) * col_width;
            let y = (f32::from(row) + 0.5) * row_height;
            if target.contains(x, y) {
                cells.push((area.x + col, area.y + row));
            }
        }
    }
    cells
}

fn render_particles(f: &mut Frame, app: &mut App, bounds: &Playfield, area: Rect) {
    let particles: Vec<Particle> = app
        .world
        .query::<&Particle>()
        .iter(&app.world)
        .cloned()
        .collect();

    let buffer = f.buffer_mut();
    for particle in particles {
        let Some((col, row)) =
            playfield_to_cell(area, bounds, particle.position.x, particle.position.y)
        else {
            continue;
        };

        // Different particle size based on the size attribute
        let symbol = if particle.size > 0.7 {
            "*"
        } else if particle.size > 0.4 {
            "+"
        } else {
            "·"
        };

        if let Some(cell) = buffer.cell_mut((col, row)) {
            cell.set_symbol(symbol).set_fg(particle.color);
        }
    }
}

fn render_pause_overlay(f: &mut Frame, area: Rect) {
    let overlay_area = crate::menu::renderer::centered_rect(36, 5, area);
    let text = Text::from(vec![
        Line::from(Span::styled(
            "PAUSED",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from("P/Space: resume   Esc: menu"),
    ]);
    f.render_widget(Clear, overlay_area);
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        overlay_area,
    );
}

fn render_game_over(f: &mut Frame, state: &SessionState, selected: GameOverOption) {
    let area = crate::menu::renderer::centered_rect(44, 18, f.area());

    let mut lines = vec![
        Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];

    if state.is_new_high_score() {
        lines.push(Line::from(Span::styled(
            "NEW HIGH SCORE!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
        )));
    }

    lines.push(Line::from(format!("Final Score: {}", state.score())));
    lines.push(Line::from(format!("Accuracy: {}%", state.accuracy())));
    lines.push(Line::from(Span::styled(
        state.performance().message(),
        Style::default().fg(SAND),
    )));
    lines.push(Line::default());
    lines.push(Line::from(format!(
        "Hits: {}   Misses: {}   Shots: {}",
        state.shots_hit(),
        state.misses(),
        state.shots_fired()
    )));
    lines.push(Line::from(format!("Difficulty: {}", state.difficulty())));
    lines.push(Line::default());

    for option in GameOverOption::ALL {
        let label = match option {
            GameOverOption::PlayAgain => "Play Again",
            GameOverOption::MainMenu => "Main Menu",
        };
        let style = if option == selected {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(label, style)));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(SAND)),
        );
    f.render_widget(paragraph, area);
}
