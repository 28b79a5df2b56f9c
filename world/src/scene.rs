//! Overworld scene contents apart from the player.
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Number of 16-bit colors in a background palette.
pub const PALETTE_LEN: usize = 256;

#[derive(Clone, Default, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Npc {
    pub id: i16,
    pub pos: Vec3,
    pub scale: Vec3,
}

impl Npc {
    pub fn new(id: i16, pos: Vec3) -> Self {
        Npc {
            id,
            pos,
            scale: Vec3::ONE,
        }
    }
}

/// Static or item entity placed in the map.
#[derive(Copy, Clone, Default, PartialEq, Debug, Serialize, Deserialize)]
pub struct Prop {
    pub pos: Vec3,
}

/// Scrolling backdrop image parameters.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Background {
    pub palette: Vec<u16>,
    pub start_x: i32,
    pub start_y: i32,
    pub width: i32,
    pub height: i32,
    /// Set whenever the game loads a new backdrop.
    pub fresh: bool,
}

impl Default for Background {
    fn default() -> Self {
        Background {
            palette: vec![0; PALETTE_LEN],
            start_x: 0,
            start_y: 0,
            width: 0,
            height: 0,
            fresh: true,
        }
    }
}

impl Background {
    pub fn load(&mut self, other: Background) {
        *self = Background {
            fresh: true,
            ..other
        };
    }

    /// Overwrite one byte of the big-endian palette data.
    pub fn poke(&mut self, offset: usize, byte: u8) {
        let Some(color) = self.palette.get_mut(offset / 2) else {
            return;
        };
        let mut bytes = color.to_be_bytes();
        bytes[offset % 2] = byte;
        *color = u16::from_be_bytes(bytes);
    }

    /// Size of the palette in bytes.
    pub fn palette_bytes(&self) -> usize {
        self.palette.len() * 2
    }
}
