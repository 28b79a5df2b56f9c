use glam::Vec3;
use rand::prelude::*;
use world::{Cue, Sound, World};

use crate::EffectCx;

/// Height above an actor's feet where shuffle sparkles show up.
const SPARKLE_HEIGHT: f32 = 15.0;

/// Reroll every enemy's HP, the change animates in over the next frames.
pub fn random_enemy_hp(w: &mut World, cx: &mut EffectCx) {
    let Some(battle) = w.battle.as_ref() else {
        return;
    };

    let deltas: Vec<i32> = battle
        .enemies
        .iter()
        .map(|e| match e {
            Some(e) if e.max_hp > 1 => loop {
                let hp = cx.rng.gen_range(1..=e.max_hp);
                if hp != e.cur_hp {
                    break hp - e.cur_hp;
                }
            },
            _ => 0,
        })
        .collect();

    if deltas.iter().any(|&d| d != 0) {
        cx.timers.animate_enemy_hp(deltas);
    }
}

/// Swap the home positions of everyone in the battle around.
pub fn location_shuffle(w: &mut World, cx: &mut EffectCx) {
    let Some(battle) = w.battle.as_mut() else {
        return;
    };

    let mut actors = battle.actors_mut();
    let at_home: Vec<bool> = actors.iter().map(|a| a.is_at_home()).collect();
    let mut spots: Vec<(Vec3, Vec3)> = actors
        .iter()
        .map(|a| (a.home_pos, a.health_bar_pos))
        .collect();
    spots.shuffle(&mut *cx.rng);

    let mut sparkles = Vec::with_capacity(actors.len());
    for ((actor, (home, bar)), at_home) in
        actors.iter_mut().zip(spots).zip(at_home)
    {
        actor.home_pos.x = home.x;
        actor.home_pos.z = home.z;
        actor.health_bar_pos.x = bar.x;
        actor.health_bar_pos.z = bar.z;
        // Actors away from home are mid-move and get there on their own.
        if at_home {
            actor.cur_pos.x = home.x;
            actor.cur_pos.z = home.z;
        }
        sparkles.push(actor.cur_pos + Vec3::Y * SPARKLE_HEIGHT);
    }

    w.audio.play(Sound::StarSpiritsAppear);
    for pos in sparkles {
        w.cue(Cue::Sparkles(pos));
    }
}

/// Have the battle system pick the player's next move for them.
pub fn random_player_move(w: &mut World, _: &mut EffectCx) {
    if let Some(battle) = w.battle.as_mut() {
        battle.random_move_queued = true;
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;
    use world::{Actor, Battle};

    use super::*;
    use crate::{
        effects::tests::{sample_world, shared},
        Timer,
    };

    #[test]
    fn enemy_hp_rerolls() {
        let mut sh = shared();
        let mut w = sample_world();
        random_enemy_hp(&mut w, &mut sh.cx(90));

        let deltas = sh.timers.pending_enemy_hp().to_vec();
        assert_eq!(deltas.len(), 2);
        assert_ne!(deltas[0], 0);
        assert!((1..=5).contains(&(5 + deltas[0])));
        // Single HP enemies are left alone.
        assert_eq!(deltas[1], 0);
        assert!(!sh.timers.is_idle(Timer::EnemyHp));
    }

    #[test]
    fn shuffle_keeps_spots() {
        let mut sh = shared();
        let mut w = World {
            battle: Some(Battle {
                player: Actor::new(-1, 10, vec3(-50.0, 0.0, 0.0)),
                partner: Some(Actor::new(-2, 10, vec3(-80.0, 0.0, 0.0))),
                enemies: (0..4)
                    .map(|i| {
                        Some(Actor::new(i, 3, vec3(i as f32 * 40.0, 0.0, 0.0)))
                    })
                    .collect(),
                ..Default::default()
            }),
            ..Default::default()
        };
        // Enemy 0 is away attacking.
        let b = w.battle.as_mut().unwrap();
        b.enemies[0].as_mut().unwrap().cur_pos.x = -200.0;

        let mut before: Vec<i32> = w
            .battle
            .as_mut()
            .unwrap()
            .actors_mut()
            .iter()
            .map(|a| a.home_pos.x as i32)
            .collect();
        location_shuffle(&mut w, &mut sh.cx(90));

        let b = w.battle.as_mut().unwrap();
        assert_eq!(b.enemies[0].as_ref().unwrap().cur_pos.x, -200.0);
        let actors = b.actors_mut();
        for a in &actors {
            if a.id != 0 {
                assert_eq!(a.cur_pos, a.home_pos);
            }
            assert_eq!(a.health_bar_pos.x, a.home_pos.x);
        }
        let mut after: Vec<i32> =
            actors.iter().map(|a| a.home_pos.x as i32).collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);

        assert_eq!(w.audio.played(), &[Sound::StarSpiritsAppear]);
        assert_eq!(w.cues().len(), 6);
    }

    #[test]
    fn random_move_is_queued() {
        let mut sh = shared();
        let mut w = sample_world();
        random_player_move(&mut w, &mut sh.cx(90));
        assert!(w.battle.unwrap().random_move_queued);

        let mut w = World::default();
        random_player_move(&mut w, &mut sh.cx(90));
        assert!(w.battle.is_none());
    }
}
