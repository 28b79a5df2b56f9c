//! Turn-based battle roster.
use glam::Vec3;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

pub const MAX_ENEMIES: usize = 24;

/// How far an actor may drift from its home position while still being
/// considered at home.
const HOME_SLACK: f32 = 20.0;

#[derive(Clone, Default, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Actor {
    pub id: i16,
    pub cur_hp: i32,
    pub max_hp: i32,
    pub home_pos: Vec3,
    pub cur_pos: Vec3,
    pub health_bar_pos: Vec3,
    pub scale: Vec3,
}

impl Actor {
    pub fn new(id: i16, hp: i32, home_pos: Vec3) -> Self {
        Actor {
            id,
            cur_hp: hp,
            max_hp: hp,
            home_pos,
            cur_pos: home_pos,
            health_bar_pos: home_pos,
            scale: Vec3::ONE,
        }
    }

    /// Actors bob around a bit when idle, so this checks a range around the
    /// home position. An actor away from home is probably mid-attack.
    pub fn is_at_home(&self) -> bool {
        (self.home_pos - self.cur_pos).abs().max_element() <= HOME_SLACK
    }
}

#[derive(
    Copy, Clone, Default, Eq, PartialEq, Hash, Debug, Serialize, Deserialize,
)]
pub enum BattleState {
    #[default]
    PlayerMenu,
    SelectTarget,
    PlayerMove,
    EnemyTurn,
}

/// Commands the player can give on their turn.
#[derive(
    Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize,
)]
pub enum PlayerMove {
    Jump,
    Hammer,
    StarPower,
    Item,
    DoNothing,
    RunAway,
    ChangePartner,
}

#[derive(Clone, Default, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Battle {
    pub player: Actor,
    pub partner: Option<Actor>,
    /// Enemy slots, empty slots are `None`.
    pub enemies: Vec<Option<Actor>>,
    /// Tutorial or story-scripted battles that must play out as written.
    pub scripted: bool,
    pub state: BattleState,
    /// Moves the battle system currently allows the player to use.
    pub usable_moves: Vec<PlayerMove>,
    /// Number of valid targets for the player's moves.
    pub target_count: usize,
    /// Pick a random player move as soon as the player menu opens.
    pub random_move_queued: bool,
    /// Move and target chosen for the player, consumed by the battle system.
    pub chosen_move: Option<(PlayerMove, usize)>,
}

impl Battle {
    pub fn enemies(&self) -> impl Iterator<Item = &Actor> {
        self.enemies.iter().flatten()
    }

    pub fn enemies_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.enemies.iter_mut().flatten()
    }

    pub fn has_enemies(&self) -> bool {
        self.enemies().next().is_some()
    }

    /// Every actor on the field, player first, then partner, then enemies.
    pub fn actors_mut(&mut self) -> Vec<&mut Actor> {
        let mut ret = vec![&mut self.player];
        if let Some(p) = self.partner.as_mut() {
            ret.push(p);
        }
        ret.extend(self.enemies.iter_mut().flatten());
        ret
    }

    /// Resolve a queued random player move once the player gets to choose.
    pub fn resolve_queued_move(&mut self, rng: &mut impl Rng) {
        if !self.random_move_queued
            || !matches!(
                self.state,
                BattleState::PlayerMenu | BattleState::SelectTarget
            )
        {
            return;
        }
        self.random_move_queued = false;

        let Some(&mv) = self.usable_moves.choose(rng) else {
            log::debug!("no usable moves for random player move");
            return;
        };

        let target = if self.target_count > 0 {
            rng.gen_range(0..self.target_count)
        } else {
            0
        };
        log::debug!("random player move {mv:?} at target {target}");
        self.chosen_move = Some((mv, target));
        self.state = BattleState::PlayerMove;
    }
}
