use crate::game::Difficulty;

// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    Settings,
    Playing,
    GameOver,
}

// Main menu option selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Play,
    Difficulty,
    Settings,
    Quit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 4] = [
        MenuOption::Play,
        MenuOption::Difficulty,
        MenuOption::Settings,
        MenuOption::Quit,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsOption {
    SfxVolume,
    MusicVolume,
    Crosshair,
    Reset,
    Back,
}

impl SettingsOption {
    pub const ALL: [SettingsOption; 5] = [
        SettingsOption::SfxVolume,
        SettingsOption::MusicVolume,
        SettingsOption::Crosshair,
        SettingsOption::Reset,
        SettingsOption::Back,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverOption {
    PlayAgain,
    MainMenu,
}

impl GameOverOption {
    pub const ALL: [GameOverOption; 2] = [GameOverOption::PlayAgain, GameOverOption::MainMenu];
}

#[derive(Debug, Clone)]
pub struct Menu {
    pub screen: Screen,
    pub selected_option: MenuOption,
    pub settings_selected: SettingsOption,
    pub game_over_selected: GameOverOption,
    pub difficulty: Difficulty,
}

impl Default for Menu {
    fn default() -> Self {
        Self {
            screen: Screen::MainMenu,
            selected_option: MenuOption::Play,
            settings_selected: SettingsOption::SfxVolume,
            game_over_selected: GameOverOption::PlayAgain,
            difficulty: Difficulty::default(),
        }
    }
}

impl Menu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_option(&mut self) {
        match self.screen {
            Screen::MainMenu => {
                self.selected_option = cycle(&MenuOption::ALL, self.selected_option, 1);
            }
            Screen::Settings => {
                self.settings_selected = cycle(&SettingsOption::ALL, self.settings_selected, 1);
            }
            Screen::GameOver => {
                self.game_over_selected =
                    cycle(&GameOverOption::ALL, self.game_over_selected, 1);
            }
            Screen::Playing => {}
        }
    }

    pub fn prev_option(&mut self) {
        match self.screen {
            Screen::MainMenu => {
                self.selected_option = cycle(&MenuOption::ALL, self.selected_option, -1);
            }
            Screen::Settings => {
                self.settings_selected = cycle(&SettingsOption::ALL, self.settings_selected, -1);
            }
            Screen::GameOver => {
                self.game_over_selected =
                    cycle(&GameOverOption::ALL, self.game_over_selected, -1);
            }
            Screen::Playing => {}
        }
    }
}

// Step through `options` with wrap-around
fn cycle<T: Copy + PartialEq>(options: &[T], current: T, step: isize) -> T {
    let len = options.len();
    let index = options.iter().position(|o| *o == current).unwrap_or(0);
    let next = (index + len).wrapping_add_signed(step) % len;
    options[next]
}
