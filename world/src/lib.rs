//! Game state surface that chaos effects read and perturb.
//!
//! This is a model of the host game, not the game itself. Rendering, audio
//! mixing and the battle system consume the state stored here.

mod audio;
pub use audio::{Audio, Song, Sound};

pub mod battle;
pub use battle::{Actor, Battle, BattleState, PlayerMove};

mod cue;
pub use cue::{Cue, MessageId};

mod input;
pub use input::{Buttons, Input, FACE_BUTTONS};

pub mod inventory;
pub use inventory::{Badge, Item, PlayerData};

mod mode;
pub use mode::GameMode;

mod mods;
pub use mods::{Mods, Switch};

mod player;
pub use player::{ActionState, Player, PlayerFlags};

mod scene;
pub use scene::{Background, Npc, Prop, PALETTE_LEN};

mod world;
pub use world::World;
