use serde::{Deserialize, Serialize};

use crate::menu::{
    MAIN_MENU_ITEM_COUNT, MainMenuItem, OPTIONS_ITEM_COUNT, OptionsItem, initial_selection,
    step_main_menu, step_selection,
};
use crate::settings::{VOLUME_STEP, VolumeKind};

/// Where an exit confirmation was opened from, so cancelling can restore
/// the prior screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitOrigin {
    MainMenu,
    Options,
    Playing,
    Paused,
    GameOver,
}

impl ExitOrigin {
    fn restore(self, first_launch: bool) -> AppView {
        match self {
            Self::MainMenu => AppView::MainMenu {
                selected: initial_selection(first_launch),
            },
            Self::Options => AppView::Options { selected: 0 },
            Self::Playing => AppView::Playing,
            Self::Paused => AppView::Paused,
            Self::GameOver => AppView::GameOver,
        }
    }
}

/// Top-level application mode. Exactly one variant holds at any time;
/// menu selections travel inside their variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppView {
    MainMenu { selected: usize },
    Options { selected: usize },
    ExitConfirm { from: ExitOrigin },
    Playing,
    Paused,
    GameOver,
    Exited,
}

impl Default for AppView {
    fn default() -> Self {
        Self::initial(true)
    }
}

/// Discrete UI event, already decoupled from physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewEvent {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Back,
    TogglePause,
    Yes,
    No,
    /// Pointer rested over a menu row after moving.
    Hover(usize),
    CloseRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ViewEffect {
    None,
    /// Fresh run: recenter the entity, restart music from the top.
    NewRun,
    /// Back into gameplay: resume music where it paused.
    Resume,
    /// Gameplay left the foreground: hold music.
    Suspend,
    /// Nudge a volume by one keyboard step.
    AdjustVolume(VolumeKind, f32),
}

impl AppView {
    pub fn initial(first_launch: bool) -> Self {
        Self::MainMenu {
            selected: initial_selection(first_launch),
        }
    }

    /// Pure transition function for the application mode.
    ///
    /// Side effects (audio, entity resets) are reported as a `ViewEffect`
    /// so callers stay deterministic and easy to test. `first_launch` gates
    /// the Continue paths and the main-menu ring shape.
    pub fn handle(self, event: ViewEvent, first_launch: bool) -> (AppView, ViewEffect) {
        use AppView as V;
        use ViewEffect as E;

        match (self, event) {
            (V::Exited, _) => (V::Exited, E::None),

            // A close request always routes through the confirm screen,
            // holding music while it is up.
            (V::ExitConfirm { from }, ViewEvent::CloseRequested) => {
                (V::ExitConfirm { from }, E::None)
            }
            (view, ViewEvent::CloseRequested) => (
                V::ExitConfirm {
                    from: view.exit_origin(),
                },
                E::Suspend,
            ),

            // Main menu.
            (V::MainMenu { selected }, ViewEvent::Up) => (
                V::MainMenu {
                    selected: step_main_menu(selected, -1, first_launch),
                },
                E::None,
            ),
            (V::MainMenu { selected }, ViewEvent::Down) => (
                V::MainMenu {
                    selected: step_main_menu(selected, 1, first_launch),
                },
                E::None,
            ),
            (V::MainMenu { .. }, ViewEvent::Hover(row)) if row < MAIN_MENU_ITEM_COUNT => {
                (V::MainMenu { selected: row }, E::None)
            }
            (V::MainMenu { selected }, ViewEvent::Confirm) => {
                match MainMenuItem::from_index(selected) {
                    Some(MainMenuItem::Continue) if !first_launch => (V::Playing, E::Resume),
                    // There is no session to continue yet.
                    Some(MainMenuItem::Continue) => (V::MainMenu { selected }, E::None),
                    Some(MainMenuItem::NewGame) => (V::Playing, E::NewRun),
                    Some(MainMenuItem::Options) => (V::Options { selected: 0 }, E::None),
                    Some(MainMenuItem::Quit) => (
                        V::ExitConfirm {
                            from: ExitOrigin::MainMenu,
                        },
                        E::Suspend,
                    ),
                    None => {
                        debug_assert!(false, "main menu selection out of range: {selected}");
                        (
                            V::MainMenu {
                                selected: MAIN_MENU_ITEM_COUNT - 1,
                            },
                            E::None,
                        )
                    }
                }
            }
            (V::MainMenu { .. }, ViewEvent::Back) if !first_launch => (V::Playing, E::Resume),

            // Options.
            (V::Options { selected }, ViewEvent::Up) => (
                V::Options {
                    selected: step_selection(selected, OPTIONS_ITEM_COUNT, -1),
                },
                E::None,
            ),
            (V::Options { selected }, ViewEvent::Down) => (
                V::Options {
                    selected: step_selection(selected, OPTIONS_ITEM_COUNT, 1),
                },
                E::None,
            ),
            (V::Options { .. }, ViewEvent::Hover(row)) if row < OPTIONS_ITEM_COUNT => {
                (V::Options { selected: row }, E::None)
            }
            (V::Options { selected }, ViewEvent::Left) => {
                (V::Options { selected }, volume_effect(selected, -VOLUME_STEP))
            }
            (V::Options { selected }, ViewEvent::Right) => {
                (V::Options { selected }, volume_effect(selected, VOLUME_STEP))
            }
            (V::Options { selected }, ViewEvent::Confirm) => {
                match OptionsItem::from_index(selected) {
                    Some(OptionsItem::Back) => (
                        V::MainMenu {
                            selected: initial_selection(first_launch),
                        },
                        E::None,
                    ),
                    _ => (V::Options { selected }, E::None),
                }
            }
            (V::Options { .. }, ViewEvent::Back) => (
                V::MainMenu {
                    selected: initial_selection(first_launch),
                },
                E::None,
            ),

            // Gameplay.
            (V::Playing, ViewEvent::Back) => (
                V::MainMenu {
                    selected: initial_selection(first_launch),
                },
                E::Suspend,
            ),
            (V::Playing, ViewEvent::TogglePause) => (V::Paused, E::Suspend),

            (V::Paused, ViewEvent::TogglePause) | (V::Paused, ViewEvent::Confirm) => {
                (V::Playing, E::Resume)
            }
            (V::Paused, ViewEvent::Back) => (
                V::MainMenu {
                    selected: initial_selection(first_launch),
                },
                E::None,
            ),

            // Exit confirmation.
            (V::ExitConfirm { .. }, ViewEvent::Yes) => (V::Exited, E::None),
            (V::ExitConfirm { from }, ViewEvent::No)
            | (V::ExitConfirm { from }, ViewEvent::Back) => (
                from.restore(first_launch),
                if from == ExitOrigin::Playing {
                    E::Resume
                } else {
                    E::None
                },
            ),

            // Game over is only a hook; nothing in the demo raises it, but
            // the screen still offers a way out.
            (V::GameOver, ViewEvent::Confirm) => (V::Playing, E::NewRun),
            (V::GameOver, ViewEvent::Back) => (
                V::MainMenu {
                    selected: initial_selection(first_launch),
                },
                E::None,
            ),

            // Ignore irrelevant events in the current state.
            (state, _) => (state, E::None),
        }
    }

    fn exit_origin(self) -> ExitOrigin {
        match self {
            Self::MainMenu { .. } => ExitOrigin::MainMenu,
            Self::Options { .. } => ExitOrigin::Options,
            Self::Playing => ExitOrigin::Playing,
            Self::Paused => ExitOrigin::Paused,
            Self::GameOver => ExitOrigin::GameOver,
            Self::ExitConfirm { from } => from,
            Self::Exited => ExitOrigin::MainMenu,
        }
    }

    /// Gameplay advances only in this mode.
    pub fn is_running(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Exited)
    }

    pub fn selected_row(self) -> Option<usize> {
        match self {
            Self::MainMenu { selected } | Self::Options { selected } => Some(selected),
            _ => None,
        }
    }
}

fn volume_effect(selected: usize, delta: f32) -> ViewEffect {
    match OptionsItem::from_index(selected) {
        Some(OptionsItem::SoundVolume) => ViewEffect::AdjustVolume(VolumeKind::Sound, delta),
        Some(OptionsItem::MusicVolume) => ViewEffect::AdjustVolume(VolumeKind::Music, delta),
        _ => ViewEffect::None,
    }
}
