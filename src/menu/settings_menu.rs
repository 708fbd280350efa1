#![warn(clippy::all, clippy::pedantic)]

use crate::menu_types::{Menu, SettingsOption};
use crate::settings::Settings;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};

/// Renders the settings panel
pub fn render_settings_menu(f: &mut Frame, area: Rect, menu: &Menu, settings: &Settings) {
    let mut lines = Vec::new();
    for option in SettingsOption::ALL {
        let label = match option {
            SettingsOption::SfxVolume => format!("SFX Volume: < {:>3} >", settings.sfx_volume),
            SettingsOption::MusicVolume => {
                format!("Music Volume: < {:>3} >", settings.music_volume)
            }
            SettingsOption::Crosshair => format!(
                "Crosshair: < {} {} >",
                settings.crosshair_style,
                settings.crosshair_style.glyph()
            ),
            SettingsOption::Reset => "Reset to Defaults".to_string(),
            SettingsOption::Back => "Back".to_string(),
        };
        let style = if option == menu.settings_selected {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![Span::styled(label, style)]));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
