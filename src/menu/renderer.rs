#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Background effects live in terminal cell space, far below the f32 mantissa limit
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
};
use std::time::{Duration, Instant};

use super::main_menu::render_main_menu_options;
use super::settings_menu::render_settings_menu;
use super::title::{get_title_protection_zone, render_ascii_title};
use crate::components::{Particle, Position};
use crate::config::menu::MenuConfig;
use crate::menu_types::{Menu, Screen};
use crate::session::SessionState;
use crate::settings::Settings;

const TUMBLEWEED_FRAMES: [&str; 4] = ["@", "ø", "@", "Ø"];
const TUMBLEWEED_COLOR: Color = Color::Rgb(166, 124, 82);
const DUST_COLOR: Color = Color::Rgb(194, 154, 108);

/// A tumbleweed rolling along the bottom of the menu, in cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Tumbleweed {
    pub x: f32,
    pub row_from_bottom: u16,
    pub speed: f32,
    pub spin: f32,
}

pub struct MenuRenderer {
    pub dust: Vec<Particle>,
    pub tumbleweeds: Vec<Tumbleweed>,
    pub last_dust_spawn: Instant,
    pub last_tumbleweed_spawn: Instant,
    pub title_colors: Vec<Color>,
    pub color_change_time: Instant,
    config: MenuConfig,
}

impl Default for MenuRenderer {
    fn default() -> Self {
        Self::new(&MenuConfig::default())
    }
}

impl MenuRenderer {
    #[must_use]
    pub fn new(config: &MenuConfig) -> Self {
        let title_colors = config
            .renderer
            .title_colors
            .iter()
            .map(|color| Color::from(*color))
            .collect();

        Self {
            dust: Vec::new(),
            tumbleweeds: Vec::new(),
            last_dust_spawn: Instant::now(),
            last_tumbleweed_spawn: Instant::now(),
            title_colors,
            color_change_time: Instant::now(),
            config: config.clone(),
        }
    }

    /// Advances the background animation by one frame. `width` is the
    /// terminal width in cells.
    pub fn update(&mut self, width: u16) {
        let renderer_config = &self.config.renderer;
        let width = f32::from(width.max(1));

        // Update title colors
        if self.color_change_time.elapsed()
            > Duration::from_millis(renderer_config.title_color_cycle_interval_ms)
            && !self.title_colors.is_empty()
        {
            self.color_change_time = Instant::now();
            self.title_colors.rotate_left(1);
        }

        // Dust drifting across the screen on the wind
        if self.last_dust_spawn.elapsed()
            > Duration::from_millis(renderer_config.dust_spawn_interval_ms)
        {
            self.last_dust_spawn = Instant::now();
            if self.dust.len() < renderer_config.dust_max_count {
                self.dust.push(Particle {
                    position: Position {
                        x: 0.0,
                        y: fastrand::f32() * 100.0,
                    },
                    velocity: (
                        fastrand::f32()
                            * (renderer_config.dust_max_drift - renderer_config.dust_min_drift)
                            + renderer_config.dust_min_drift,
                        (fastrand::f32() - 0.5) * 0.1,
                    ),
                    color: DUST_COLOR,
                    lifetime: fastrand::f32()
                        * (renderer_config.dust_max_lifetime - renderer_config.dust_min_lifetime)
                        + renderer_config.dust_min_lifetime,
                    size: fastrand::f32(),
                });
            }
        }

        if self.last_tumbleweed_spawn.elapsed()
            > Duration::from_millis(renderer_config.tumbleweed_spawn_interval_ms)
        {
            self.last_tumbleweed_spawn = Instant::now();
            if self.tumbleweeds.len() < renderer_config.tumbleweed_max_count {
                self.tumbleweeds.push(Tumbleweed {
                    x: -1.0,
                    row_from_bottom: fastrand::u16(1..4),
                    speed: fastrand::f32()
                        * (renderer_config.tumbleweed_max_speed
                            - renderer_config.tumbleweed_min_speed)
                        + renderer_config.tumbleweed_min_speed,
                    spin: 0.0,
                });
            }
        }

        for tumbleweed in &mut self.tumbleweeds {
            tumbleweed.x += tumbleweed.speed;
            tumbleweed.spin += tumbleweed.speed;
        }
        self.tumbleweeds.retain(|t| t.x < width);

        let decay = renderer_config.dust_lifetime_decay;
        self.dust.retain_mut(|p| {
            p.position.x += p.velocity.0;
            p.position.y += p.velocity.1;
            p.lifetime -= decay;

            p.lifetime > 0.0 && p.position.x < width
        });
    }

    pub fn render_menu(
        f: &mut Frame,
        menu: &Menu,
        renderer: &MenuRenderer,
        records: &SessionState,
        settings: &Settings,
    ) {
        let config = &renderer.config;
        let area = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(config.renderer.menu_title_height),
                Constraint::Min(0),
            ])
            .split(area);

        // Background first so everything else draws over it
        let protection =
            get_title_protection_zone(area, &config.title, config.renderer.menu_title_height);
        render_dust(f, renderer, area, protection);
        render_tumbleweeds(f, renderer, area);

        render_ascii_title(f, chunks[0], &renderer.title_colors, &config.title);

        let options_area = centered_rect(config.renderer.menu_option_width, 10, chunks[1]);
        match menu.screen {
            Screen::MainMenu => render_main_menu_options(f, options_area, menu, records),
            Screen::Settings => render_settings_menu(f, options_area, menu, settings),
            Screen::Playing | Screen::GameOver => {}
        }
    }
}

/// Dust is percent-of-height on the y axis so it survives resizes.
fn render_dust(f: &mut Frame, renderer: &MenuRenderer, area: Rect, protection: Rect) {
    let buffer = f.buffer_mut();
    for particle in &renderer.dust {
        let x = particle.position.x as u16;
        let y = (particle.position.y.clamp(0.0, 99.0) / 100.0 * f32::from(area.height)) as u16;
        if y < protection.height || x >= area.width || y >= area.height {
            continue;
        }
        let symbol = if particle.size > 0.7 { "∙" } else { "." };
        if let Some(cell) = buffer.cell_mut((area.x + x, area.y + y)) {
            cell.set_symbol(symbol).set_fg(particle.color);
        }
    }
}

fn render_tumbleweeds(f: &mut Frame, renderer: &MenuRenderer, area: Rect) {
    let buffer = f.buffer_mut();
    for tumbleweed in &renderer.tumbleweeds {
        if tumbleweed.x < 0.0 || tumbleweed.row_from_bottom > area.height {
            continue;
        }
        let x = tumbleweed.x as u16;
        let y = area.height - tumbleweed.row_from_bottom;
        if x >= area.width {
            continue;
        }
        let frame = TUMBLEWEED_FRAMES[(tumbleweed.spin as usize) % TUMBLEWEED_FRAMES.len()];
        if let Some(cell) = buffer.cell_mut((area.x + x, area.y + y)) {
            cell.set_symbol(frame).set_fg(TUMBLEWEED_COLOR);
        }
    }
}

/// Helper function to create a centered rectangle inside another rectangle
#[must_use]
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + r.width.saturating_sub(width) / 2;
    let y = r.y + r.height.saturating_sub(height) / 2;

    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
