use ratatui::style::Color;
use serde::{Deserialize, Serialize};

// Configuration for menu visual elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MenuConfig {
    pub title: TitleConfig,
    pub renderer: RendererConfig,
}

// Title-specific configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleConfig {
    pub letter_spacing: u16,
    pub title_height: u16,
    pub protection_margin: u16,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            letter_spacing: 1,
            title_height: 5,      // Height of ASCII art letters
            protection_margin: 2, // Rows kept clear of dust below the title
        }
    }
}

// Menu renderer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    // Tumbleweeds rolling across the background
    pub tumbleweed_max_count: usize,
    pub tumbleweed_min_speed: f32,
    pub tumbleweed_max_speed: f32,
    pub tumbleweed_spawn_interval_ms: u64,

    // Dust particles
    pub dust_max_count: usize,
    pub dust_min_lifetime: f32,
    pub dust_max_lifetime: f32,
    pub dust_min_drift: f32,
    pub dust_max_drift: f32,
    pub dust_spawn_interval_ms: u64,
    pub dust_lifetime_decay: f32,

    // Color cycling settings
    pub title_color_cycle_interval_ms: u64,
    pub title_colors: Vec<TitleColor>,

    // Layout settings
    pub menu_title_height: u16,
    pub menu_option_width: u16,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            tumbleweed_max_count: 6,
            tumbleweed_min_speed: 0.3,
            tumbleweed_max_speed: 1.2,
            tumbleweed_spawn_interval_ms: 1500,

            dust_max_count: 80,
            dust_min_lifetime: 0.5,
            dust_max_lifetime: 2.0,
            dust_min_drift: 0.2,
            dust_max_drift: 1.0,
            dust_spawn_interval_ms: 60,
            dust_lifetime_decay: 0.05,

            title_color_cycle_interval_ms: 150,
            title_colors: vec![
                TitleColor::Yellow,
                TitleColor::LightYellow,
                TitleColor::White,
                TitleColor::LightRed,
                TitleColor::Red,
                TitleColor::Yellow,
            ],

            menu_title_height: 9,
            menu_option_width: 28,
        }
    }
}

// Supported colors for serialization/deserialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TitleColor {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Black,
    DarkGray,
    LightRed,
    LightGreen,
    LightYellow,
    LightBlue,
    LightMagenta,
    LightCyan,
    Gray,
    Custom(u8, u8, u8),
}

impl From<TitleColor> for Color {
    fn from(color: TitleColor) -> Self {
        match color {
            TitleColor::Red => Color::Red,
            TitleColor::Green => Color::Green,
            TitleColor::Yellow => Color::Yellow,
            TitleColor::Blue => Color::Blue,
            TitleColor::Magenta => Color::Magenta,
            TitleColor::Cyan => Color::Cyan,
            TitleColor::White => Color::White,
            TitleColor::Black => Color::Black,
            TitleColor::DarkGray => Color::DarkGray,
            TitleColor::LightRed => Color::LightRed,
            TitleColor::LightGreen => Color::LightGreen,
            TitleColor::LightYellow => Color::LightYellow,
            TitleColor::LightBlue => Color::LightBlue,
            TitleColor::LightMagenta => Color::LightMagenta,
            TitleColor::LightCyan => Color::LightCyan,
            TitleColor::Gray => Color::Gray,
            TitleColor::Custom(r, g, b) => Color::Rgb(r, g, b),
        }
    }
}
