//! Overworld player avatar.
use bitflags::bitflags;
use glam::Vec3;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Motion state bits of the player avatar.
    #[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
    pub struct PlayerFlags: u32 {
        const AIRBORNE = 1 << 0;
        const JUMPING = 1 << 1;
        const FALLING = 1 << 2;
        const SLIDING = 1 << 3;
    }
}

/// What the player avatar is currently doing.
///
/// Variant order matters, everything up to and including `Run` counts as
/// standing on solid ground.
#[derive(
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Serialize,
    Deserialize,
)]
pub enum ActionState {
    #[default]
    Idle,
    Walk,
    Run,
    Jump,
    Fall,
    Knockback,
    HitLava,
    Talk,
}

impl ActionState {
    pub fn is_grounded(self) -> bool {
        self <= ActionState::Run
    }
}

#[derive(Clone, Default, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Player {
    pub pos: Vec3,
    pub speed: f32,
    pub flags: PlayerFlags,
    /// Frames spent airborne in the current jump.
    pub time_in_air: i32,
    pub action: ActionState,

    /// Sprite orientation angles in degrees.
    pub pitch: f32,
    pub yaw: f32,
    pub facing: f32,

    pub input_disabled: bool,
}

impl Player {
    pub fn set_action(&mut self, action: ActionState) {
        if self.action != action {
            log::trace!("player action {:?} -> {action:?}", self.action);
        }
        self.action = action;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grounded_states() {
        assert!(ActionState::Idle.is_grounded());
        assert!(ActionState::Run.is_grounded());
        assert!(!ActionState::Jump.is_grounded());
        assert!(!ActionState::HitLava.is_grounded());
    }
}
