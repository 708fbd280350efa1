mod main_menu;
pub mod renderer;
mod settings_menu;
pub mod title;

pub use self::renderer::MenuRenderer;
pub use crate::menu_types::{GameOverOption, Menu, MenuOption, Screen, SettingsOption};
