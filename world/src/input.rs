//! Controller snapshot as seen by game logic.
use std::str::FromStr;

use bitflags::bitflags;
use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::Mods;

bitflags! {
    #[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
    pub struct Buttons: u32 {
        const A = 1 << 0;
        const B = 1 << 1;
        const Z = 1 << 2;
        const START = 1 << 3;
        const D_UP = 1 << 4;
        const D_DOWN = 1 << 5;
        const D_LEFT = 1 << 6;
        const D_RIGHT = 1 << 7;
        const L = 1 << 8;
        const R = 1 << 9;
        const C_UP = 1 << 10;
        const C_DOWN = 1 << 11;
        const C_LEFT = 1 << 12;
        const C_RIGHT = 1 << 13;
    }
}

/// Buttons that take part in button shuffling, in map order.
///
/// D-pad, `L` and the stick are never shuffled.
pub const FACE_BUTTONS: [Buttons; 9] = [
    Buttons::C_RIGHT,
    Buttons::C_LEFT,
    Buttons::C_DOWN,
    Buttons::C_UP,
    Buttons::R,
    Buttons::START,
    Buttons::Z,
    Buttons::B,
    Buttons::A,
];

/// Parse `+`-separated button names, eg. `R+D_DOWN`.
///
/// Names are case insensitive, an empty string or `-` is no buttons.
impl FromStr for Buttons {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "-" {
            return Ok(Buttons::empty());
        }

        let mut ret = Buttons::empty();
        for name in s.split('+') {
            let name = name.trim().to_ascii_uppercase();
            let Some(b) = Buttons::from_name(&name) else {
                return Err(format!("unknown button {name:?}"));
            };
            ret |= b;
        }
        Ok(ret)
    }
}

#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct Input {
    /// Buttons down this frame.
    pub held: Buttons,
    /// Buttons that went down this frame.
    pub pressed: Buttons,
    pub stick: IVec2,
}

impl Input {
    /// Feed in a raw controller sample for a new frame.
    ///
    /// Chaos input modifiers are applied before edge detection so that
    /// shuffled buttons produce consistent edges.
    pub fn update(&mut self, raw: Buttons, stick: IVec2, mods: &Mods) {
        let (buttons, stick) = remap(raw, stick, mods);
        self.pressed = buttons - self.held;
        self.held = buttons;
        self.stick = stick;
    }

    pub fn is_pressed(&self, b: Buttons) -> bool {
        self.pressed.contains(b)
    }

    pub fn is_held(&self, b: Buttons) -> bool {
        self.held.contains(b)
    }
}

fn remap(raw: Buttons, stick: IVec2, mods: &Mods) -> (Buttons, IVec2) {
    let stick = if mods.reverse_analog { -stick } else { stick };

    let Some(map) = mods.button_map else {
        return (raw, stick);
    };

    let mut buttons = raw;
    for b in FACE_BUTTONS {
        buttons.remove(b);
    }
    for (i, b) in FACE_BUTTONS.iter().enumerate() {
        if raw.contains(*b) {
            buttons |= map[i];
        }
    }
    (buttons, stick)
}

#[cfg(test)]
mod tests {
    use glam::ivec2;
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn parse_buttons() {
        assert_eq!("-".parse(), Ok(Buttons::empty()));
        assert_eq!("l".parse(), Ok(Buttons::L));
        assert_eq!("R+d_down".parse(), Ok(Buttons::R | Buttons::D_DOWN));
        assert!("R+Q".parse::<Buttons>().is_err());
    }

    #[test]
    fn edges() {
        let mods = Mods::default();
        let mut input = Input::default();

        input.update(Buttons::A, IVec2::ZERO, &mods);
        assert!(input.is_pressed(Buttons::A));

        input.update(Buttons::A | Buttons::B, IVec2::ZERO, &mods);
        assert!(!input.is_pressed(Buttons::A));
        assert!(input.is_held(Buttons::A));
        assert!(input.is_pressed(Buttons::B));
    }

    #[test]
    fn reversed_stick() {
        let mods = Mods {
            reverse_analog: true,
            ..Default::default()
        };
        let mut input = Input::default();
        input.update(Buttons::empty(), ivec2(30, -12), &mods);
        assert_eq!(input.stick, ivec2(-30, 12));
    }

    #[test]
    fn shuffle_keeps_dpad() {
        let mut map = FACE_BUTTONS;
        map.reverse();
        let mods = Mods {
            button_map: Some(map),
            ..Default::default()
        };

        let mut input = Input::default();
        let raw = Buttons::A | Buttons::D_UP | Buttons::L;
        input.update(raw, IVec2::ZERO, &mods);
        assert_eq!(input.held, Buttons::C_RIGHT | Buttons::D_UP | Buttons::L);
    }

    #[quickcheck]
    fn shuffle_preserves_count(bits: u32) -> bool {
        let raw = Buttons::from_bits_truncate(bits);
        let mut map = FACE_BUTTONS;
        map.rotate_left(3);
        let mods = Mods {
            button_map: Some(map),
            ..Default::default()
        };
        let (out, _) = remap(raw, IVec2::ZERO, &mods);
        out.bits().count_ones() == raw.bits().count_ones()
    }
}
