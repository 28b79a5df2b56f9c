//! Eligibility predicates shared by the effect catalog.
use world::World;

use crate::{Descriptor, Timer, Timers};

/// Can the effect start or keep running in the current game state.
pub fn eligible(desc: &Descriptor, w: &World, timers: &Timers) -> bool {
    desc.condition.map_or(true, |c| c(w, timers))
}

pub fn overworld(w: &World, _: &Timers) -> bool {
    !w.is_battle()
}

pub fn not_levitating(w: &World, t: &Timers) -> bool {
    overworld(w, t) && !w.mods.levitating
}

pub fn grounded(w: &World, t: &Timers) -> bool {
    overworld(w, t) && w.player.action.is_grounded()
}

/// Battle with enemies that isn't scripted to play out a certain way.
pub fn valid_battle(w: &World, _: &Timers) -> bool {
    w.battle
        .as_ref()
        .is_some_and(|b| !b.scripted && b.has_enemies())
}

pub fn can_equip_badge(w: &World, _: &Timers) -> bool {
    !w.data.equippable_badges().is_empty()
}

pub fn can_unequip_badge(w: &World, _: &Timers) -> bool {
    !w.data.equipped.is_empty()
}

pub fn hp_differs_from_fp(w: &World, _: &Timers) -> bool {
    w.data.cur_hp != w.data.cur_fp
}

/// There is more than one HP value to reroll into.
pub fn can_reroll_hp(w: &World, _: &Timers) -> bool {
    w.data.max_hp > 1
}

pub fn can_reroll_fp(w: &World, _: &Timers) -> bool {
    w.data.max_fp > 0
}

pub fn has_mushroom(w: &World, _: &Timers) -> bool {
    !w.data.mushroom_slots().is_empty()
}

pub fn memory_idle(_: &World, t: &Timers) -> bool {
    t.is_idle(Timer::Memory)
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use world::{ActionState, Actor, Battle};

    use super::*;

    #[test]
    fn no_condition_is_always_eligible() {
        let desc = Descriptor::flash("x");
        assert!(eligible(&desc, &World::default(), &Timers::default()));

        let desc = Descriptor::flash("y").when(valid_battle);
        assert!(!eligible(&desc, &World::default(), &Timers::default()));
    }

    #[test]
    fn battle_validity() {
        let t = Timers::default();
        let mut w = World {
            battle: Some(Battle::default()),
            ..Default::default()
        };
        assert!(!valid_battle(&w, &t));
        assert!(!overworld(&w, &t));

        let b = w.battle.as_mut().unwrap();
        b.enemies.push(Some(Actor::new(0, 3, Vec3::ZERO)));
        assert!(valid_battle(&w, &t));

        w.battle.as_mut().unwrap().scripted = true;
        assert!(!valid_battle(&w, &t));
    }

    #[test]
    fn player_state() {
        let t = Timers::default();
        let mut w = World::default();
        assert!(grounded(&w, &t));
        assert!(not_levitating(&w, &t));

        w.player.action = ActionState::Jump;
        assert!(!grounded(&w, &t));
        w.mods.levitating = true;
        assert!(!not_levitating(&w, &t));
    }
}
