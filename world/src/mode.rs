use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Top-level state of the host game loop.
#[derive(
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Hash,
    Debug,
    Serialize,
    Deserialize,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    Startup,
    Logos,
    TitleScreen,
    EnterDemoWorld,
    EnterWorld,
    #[default]
    World,
    Battle,
    Pause,
    Unpause,
    ChangeMap,
    GameOver,
    FileSelect,
    EndFileSelect,
    Intro,
    Demo,
}

impl GameMode {
    /// Modes where no gameplay is running and chaos must stay dormant.
    pub const DORMANT: [GameMode; 10] = [
        GameMode::Startup,
        GameMode::Logos,
        GameMode::TitleScreen,
        GameMode::EnterDemoWorld,
        GameMode::EnterWorld,
        GameMode::GameOver,
        GameMode::FileSelect,
        GameMode::EndFileSelect,
        GameMode::Intro,
        GameMode::Demo,
    ];

    pub fn is_dormant(self) -> bool {
        GameMode::DORMANT.contains(&self)
    }
}
