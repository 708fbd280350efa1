#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use log::{debug, info};
use ratatui::layout::Rect;
use std::time::Duration;

use crate::components::{Pointer, ScreenShake};
use crate::config::GameConfig;
use crate::game::Playfield;
use crate::menu::MenuRenderer;
use crate::menu_types::{GameOverOption, Menu, MenuOption, Screen, SettingsOption};
use crate::particles;
use crate::session::Session;
use crate::settings::{SettingsStore, SettingsUpdate};
use crate::sound::{AudioState, SoundEffect};
use crate::storage::SharedStore;
use crate::store::TargetStore;
use crate::systems::{self, GameEvent, GameEvents, ShotOutcome};
use crate::ui;

// Settings panel step for one Left/Right press
const VOLUME_STEP: i32 = 10;

pub struct App {
    pub world: World,
    pub should_quit: bool,
    pub menu: Menu,
    pub menu_renderer: MenuRenderer,
    /// Where the playfield was last drawn, for mapping clicks.
    pub playfield_area: Option<Rect>,
    terminal_width: u16,
    terminal_height: u16,
}

impl App {
    #[must_use]
    pub fn new(config: &GameConfig, store: SharedStore, audio: AudioState) -> Self {
        let playfield = config.viewport.playfield();

        let mut world = World::new();
        world.insert_resource(playfield);
        world.insert_resource(config.timing.target_timing());
        world.insert_resource(TargetStore::new(playfield));
        world.insert_resource(Session::load(store.clone()));
        world.insert_resource(SettingsStore::load(store));
        world.insert_resource(GameEvents::default());
        world.insert_resource(ScreenShake::default());
        world.insert_resource(Pointer::default());
        world.insert_resource(audio);

        Self {
            world,
            should_quit: false,
            menu: Menu::new(),
            menu_renderer: MenuRenderer::new(&config.menu),
            playfield_area: None,
            terminal_width: 80,
            terminal_height: 24,
        }
    }

    pub fn set_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal_width = width;
        self.terminal_height = height;
    }

    fn terminal_too_small(&self) -> bool {
        self.terminal_width < ui::MIN_WIDTH || self.terminal_height < ui::MIN_HEIGHT
    }

    /// Advances the game by `delta` and reacts to whatever happened.
    pub fn on_tick(&mut self, delta: Duration) {
        match self.menu.screen {
            Screen::Playing => {
                if self.terminal_too_small() {
                    self.pause_for_resize();
                }
                systems::game_tick_system(&mut self.world, delta);
            }
            Screen::MainMenu | Screen::Settings => self.menu_renderer.update(self.terminal_width),
            Screen::GameOver => {}
        }
        particles::update_particles(&mut self.world, delta.as_secs_f32());
        self.process_events();
    }

    pub fn start_game(&mut self) {
        particles::clear_particles(&mut self.world);
        systems::start_session(&mut self.world, self.menu.difficulty);
        self.menu.screen = Screen::Playing;
        self.world.resource_mut::<AudioState>().set_music_playing(true);
    }

    pub fn quit_to_menu(&mut self) {
        systems::quit_to_menu(&mut self.world);
        particles::clear_particles(&mut self.world);
        self.world.insert_resource(ScreenShake::default());
        self.menu.screen = Screen::MainMenu;
        self.playfield_area = None;
        self.world.resource_mut::<AudioState>().set_music_playing(false);
    }

    pub fn toggle_pause(&mut self) {
        if !self.world.resource::<Session>().state().is_playing() {
            return;
        }
        let paused = systems::toggle_pause(&mut self.world);
        self.world
            .resource_mut::<AudioState>()
            .set_music_playing(!paused);
    }

    /// Pauses a running session while the terminal is too small to show it.
    fn pause_for_resize(&mut self) {
        let state = self.world.resource::<Session>().state();
        if state.is_playing() && !state.is_paused() {
            info!("Terminal too small, pausing");
            self.toggle_pause();
        }
    }

    /// Fires at terminal cell (`col`, `row`).
    pub fn shoot(&mut self, col: u16, row: u16) -> ShotOutcome {
        let Some(area) = self.playfield_area else {
            return ShotOutcome::Ignored;
        };
        let bounds = *self.world.resource::<Playfield>();
        let Some((x, y)) = ui::cell_to_playfield(area, &bounds, col, row) else {
            return ShotOutcome::Ignored;
        };

        let outcome = systems::resolve_shot(&mut self.world, x, y);
        if outcome != ShotOutcome::Ignored {
            self.world
                .resource::<AudioState>()
                .play_sound(SoundEffect::Gunshot);
            particles::spawn_muzzle_flash(&mut self.world, x, y);
        }
        self.process_events();
        outcome
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        self.world.resource_mut::<Pointer>().cell = Some((event.column, event.row));

        if let MouseEventKind::Down(MouseButton::Left) = event.kind {
            if self.menu.screen == Screen::Playing {
                self.shoot(event.column, event.row);
            }
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        // Allow quitting with 'q' regardless of screen
        if code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }

        match self.menu.screen {
            Screen::Playing => match code {
                KeyCode::Char('p' | ' ') => self.toggle_pause(),
                KeyCode::Esc => self.quit_to_menu(),
                _ => {}
            },
            Screen::MainMenu | Screen::Settings | Screen::GameOver => self.handle_menu_key(code),
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('w' | 'k') => self.menu.prev_option(),
            KeyCode::Down | KeyCode::Char('s' | 'j') => self.menu.next_option(),
            KeyCode::Left | KeyCode::Char('a' | 'h') => self.adjust(-1),
            KeyCode::Right | KeyCode::Char('d' | 'l') => self.adjust(1),
            KeyCode::Enter | KeyCode::Char(' ') => self.select(),
            KeyCode::Esc => match self.menu.screen {
                Screen::Settings | Screen::GameOver => self.quit_to_menu(),
                Screen::MainMenu | Screen::Playing => {}
            },
            _ => {}
        }
    }

    fn adjust(&mut self, step: i32) {
        match self.menu.screen {
            Screen::MainMenu if self.menu.selected_option == MenuOption::Difficulty => {
                self.menu.difficulty = if step > 0 {
                    self.menu.difficulty.next()
                } else {
                    self.menu.difficulty.prev()
                };
            }
            Screen::Settings => {
                let current = self.world.resource::<SettingsStore>().get();
                let update = match self.menu.settings_selected {
                    SettingsOption::SfxVolume => SettingsUpdate {
                        sfx_volume: Some(i32::from(current.sfx_volume) + step * VOLUME_STEP),
                        ..SettingsUpdate::default()
                    },
                    SettingsOption::MusicVolume => SettingsUpdate {
                        music_volume: Some(i32::from(current.music_volume) + step * VOLUME_STEP),
                        ..SettingsUpdate::default()
                    },
                    SettingsOption::Crosshair => SettingsUpdate {
                        crosshair_style: Some(if step > 0 {
                            current.crosshair_style.next()
                        } else {
                            current.crosshair_style.prev()
                        }),
                        ..SettingsUpdate::default()
                    },
                    SettingsOption::Reset | SettingsOption::Back => return,
                };
                self.update_settings(update);
            }
            _ => {}
        }
    }

    fn select(&mut self) {
        self.world
            .resource::<AudioState>()
            .play_sound(SoundEffect::MenuSelect);

        match self.menu.screen {
            Screen::MainMenu => match self.menu.selected_option {
                MenuOption::Play => self.start_game(),
                MenuOption::Difficulty => self.adjust(1),
                MenuOption::Settings => self.menu.screen = Screen::Settings,
                MenuOption::Quit => self.should_quit = true,
            },
            Screen::Settings => match self.menu.settings_selected {
                SettingsOption::Reset => {
                    let settings = self.world.resource_mut::<SettingsStore>().reset();
                    self.world
                        .resource_mut::<AudioState>()
                        .apply_settings(&settings);
                }
                SettingsOption::Back => self.menu.screen = Screen::MainMenu,
                SettingsOption::SfxVolume
                | SettingsOption::MusicVolume
                | SettingsOption::Crosshair => self.adjust(1),
            },
            Screen::GameOver => match self.menu.game_over_selected {
                GameOverOption::PlayAgain => self.start_game(),
                GameOverOption::MainMenu => self.quit_to_menu(),
            },
            Screen::Playing => {}
        }
    }

    pub fn update_settings(&mut self, update: SettingsUpdate) {
        let settings = self.world.resource_mut::<SettingsStore>().update(update);
        self.world
            .resource_mut::<AudioState>()
            .apply_settings(&settings);
    }

    /// Turns queued game events into sound, particles and screen changes.
    pub fn process_events(&mut self) {
        let events = self.world.resource_mut::<GameEvents>().drain();
        for event in events {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::TargetHit {
                kind,
                award,
                center,
                ..
            } => {
                self.play(SoundEffect::Hit);
                particles::spawn_hit_sparks(&mut self.world, center, kind, award);
            }
            GameEvent::SheriffShot { center, .. } => {
                self.play(SoundEffect::SheriffHit);
                particles::spawn_sheriff_smoke(&mut self.world, center);
            }
            GameEvent::Miss { x, y } => {
                self.play(SoundEffect::Ricochet);
                particles::spawn_ricochet_dust(&mut self.world, x, y);
            }
            GameEvent::CountdownWarning(_) => self.play(SoundEffect::CountdownBeep),
            GameEvent::SessionEnded {
                score,
                new_high_score,
            } => {
                debug!("Game over screen, score {score}");
                self.play(if new_high_score {
                    SoundEffect::NewHighScore
                } else {
                    SoundEffect::GameOver
                });
                self.world
                    .resource_mut::<AudioState>()
                    .set_music_playing(false);
                particles::clear_particles(&mut self.world);
                self.menu.screen = Screen::GameOver;
                self.menu.game_over_selected = GameOverOption::PlayAgain;
                self.playfield_area = None;
            }
            GameEvent::SessionStarted(_)
            | GameEvent::TargetSpawned { .. }
            | GameEvent::PauseChanged(_) => {}
        }
    }

    fn play(&self, effect: SoundEffect) {
        self.world.resource::<AudioState>().play_sound(effect);
    }
}
