use glam::Vec3;
use rand::prelude::*;
use util::RngExt;
use world::{ActionState, GameMode, PlayerFlags, World};

use crate::{Cadence, Effect, EffectCx};

/// Units per frame that chasing actors close in on the player.
const CHASE_SPEED: f32 = 3.0;

/// Units per frame the player floats up while levitating.
const LEVITATE_RISE: f32 = 0.2;

/// Periodically snap the player back to an earlier position.
#[derive(Clone, Default, Debug)]
pub struct Rewind {
    cadence: Cadence,
    saved: Option<Vec3>,
}

impl Effect for Rewind {
    fn activate(&mut self, w: &mut World, cx: &mut EffectCx) {
        if self.cadence == Cadence::Idle {
            self.saved = None;
        }
        let due = self.cadence.is_due(cx.ticks);

        // Never rewind into the previous map.
        if w.mode == GameMode::ChangeMap {
            self.saved = None;
            return;
        }

        if !due {
            return;
        }
        match self.saved.take() {
            Some(pos) => {
                log::debug!("rewinding player to {pos}");
                w.player.pos = pos;
                self.cadence.postpone(cx.rng.gen_range(1..=61));
            }
            None => {
                self.saved = Some(w.player.pos);
                self.cadence.postpone(cx.rng.gen_range(1..=31));
            }
        }
    }

    fn deactivate(&mut self, _: &mut World, _: &mut EffectCx) {
        self.cadence.reset();
        self.saved = None;
    }
}

pub struct Levitate;

impl Effect for Levitate {
    fn activate(&mut self, w: &mut World, _: &mut EffectCx) {
        w.mods.levitating = true;

        let p = &mut w.player;
        p.speed = 0.0;
        p.flags.insert(PlayerFlags::JUMPING);
        p.flags.remove(PlayerFlags::FALLING);
        p.time_in_air = 1;
        p.pos.y += LEVITATE_RISE;
    }

    fn deactivate(&mut self, w: &mut World, _: &mut EffectCx) {
        w.mods.levitating = false;
    }
}

/// Pull every movable thing on the map toward the player.
pub struct ActorChase;

impl Effect for ActorChase {
    fn activate(&mut self, w: &mut World, _: &mut EffectCx) {
        let target = w.player.pos;
        for pos in w.movable_positions_mut() {
            let offset = target - *pos;
            if offset.length() <= CHASE_SPEED {
                continue;
            }
            *pos += offset.normalize() * CHASE_SPEED;
        }
    }
}

/// Knock the player back at random intervals.
#[derive(Clone, Default, Debug)]
pub struct Knockback {
    cadence: Cadence,
}

impl Effect for Knockback {
    fn activate(&mut self, w: &mut World, cx: &mut EffectCx) {
        if self.cadence.is_due(cx.ticks) {
            w.player.set_action(ActionState::Knockback);
            self.cadence.postpone(cx.rng.gen_range(30..=120));
        }
    }

    fn deactivate(&mut self, _: &mut World, _: &mut EffectCx) {
        self.cadence.reset();
    }
}

pub fn lava(w: &mut World, _: &mut EffectCx) {
    w.player.set_action(ActionState::HitLava);
}

#[derive(Copy, Clone, Debug)]
struct Spin {
    pitch_speed: f32,
    yaw_speed: f32,
    /// Orientation before spinning started.
    baseline: (f32, f32, f32),
}

/// Spin the player sprite around.
#[derive(Clone, Default, Debug)]
pub struct RotatePlayer {
    spin: Option<Spin>,
}

impl Effect for RotatePlayer {
    fn activate(&mut self, w: &mut World, cx: &mut EffectCx) {
        let p = &mut w.player;
        let spin = *self.spin.get_or_insert_with(|| {
            let mut speed = || {
                let s = cx.rng.gen_range(4.0f32..10.0);
                cx.rng.flip_sign(s)
            };
            Spin {
                pitch_speed: speed(),
                yaw_speed: speed(),
                baseline: (p.pitch, p.yaw, p.facing),
            }
        });

        p.pitch = (p.pitch + spin.pitch_speed).rem_euclid(360.0);
        p.yaw = (p.yaw + spin.yaw_speed).rem_euclid(360.0);
        p.facing = (p.facing + spin.yaw_speed).rem_euclid(360.0);
    }

    fn deactivate(&mut self, w: &mut World, _: &mut EffectCx) {
        if let Some(Spin { baseline, .. }) = self.spin.take() {
            let p = &mut w.player;
            (p.pitch, p.yaw, p.facing) = baseline;
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;
    use world::{Npc, Prop};

    use super::*;
    use crate::effects::tests::{run, shared, stop};

    #[test]
    fn rewind_restores_saved_position() {
        let mut sh = shared();
        let mut w = World::default();
        let mut rewind = Rewind::default();
        let start = vec3(1.0, 2.0, 3.0);
        w.player.pos = start;

        // First frame saves the position.
        run(&mut rewind, &mut w, &mut sh, 600..=600);
        assert_eq!(rewind.saved, Some(start));

        w.player.pos = vec3(100.0, 0.0, 0.0);
        run(&mut rewind, &mut w, &mut sh, 568..=599);
        assert_eq!(w.player.pos, start);

        stop(&mut rewind, &mut w, &mut sh);
        assert_eq!(rewind.cadence, Cadence::Idle);
        assert_eq!(rewind.saved, None);
    }

    #[test]
    fn rewind_skips_map_changes() {
        let mut sh = shared();
        let mut w = World {
            mode: GameMode::ChangeMap,
            ..Default::default()
        };
        let mut rewind = Rewind::default();
        run(&mut rewind, &mut w, &mut sh, 500..=600);
        assert_eq!(rewind.saved, None);
    }

    #[test]
    fn levitate() {
        let mut sh = shared();
        let mut w = World::default();
        w.player.flags = PlayerFlags::FALLING;
        run(&mut Levitate, &mut w, &mut sh, 1..=10);
        assert!(w.mods.levitating);
        assert_eq!(w.player.flags, PlayerFlags::JUMPING);
        assert!((w.player.pos.y - 10.0 * LEVITATE_RISE).abs() < 0.001);

        stop(&mut Levitate, &mut w, &mut sh);
        assert!(!w.mods.levitating);
    }

    #[test]
    fn chase_converges() {
        let mut sh = shared();
        let mut w = World {
            npcs: vec![Npc::new(1, vec3(30.0, 0.0, 40.0))],
            entities: vec![Prop {
                pos: vec3(1.0, 0.0, 0.0),
            }],
            ..Default::default()
        };
        run(&mut ActorChase, &mut w, &mut sh, 1..=5);
        assert!((w.npcs[0].pos.length() - 35.0).abs() < 0.001);
        // Already close enough, left alone.
        assert_eq!(w.entities[0].pos, vec3(1.0, 0.0, 0.0));

        run(&mut ActorChase, &mut w, &mut sh, 1..=100);
        assert!(w.npcs[0].pos.length() <= CHASE_SPEED);
    }

    #[test]
    fn knockback_cadence() {
        let mut sh = shared();
        let mut w = World::default();
        let mut kb = Knockback::default();
        run(&mut kb, &mut w, &mut sh, 600..=600);
        assert_eq!(w.player.action, ActionState::Knockback);

        // Next hit comes at least 30 frames later.
        w.player.action = ActionState::Idle;
        run(&mut kb, &mut w, &mut sh, 571..=599);
        assert_eq!(w.player.action, ActionState::Idle);
        run(&mut kb, &mut w, &mut sh, 480..=570);
        assert_eq!(w.player.action, ActionState::Knockback);
    }

    #[test]
    fn rotate_and_restore() {
        let mut sh = shared();
        let mut w = World::default();
        w.player.yaw = 90.0;
        let mut rot = RotatePlayer::default();
        run(&mut rot, &mut w, &mut sh, 1..=50);
        assert!(w.player.yaw != 90.0);
        assert!((0.0..360.0).contains(&w.player.pitch));

        stop(&mut rot, &mut w, &mut sh);
        assert_eq!(w.player.yaw, 90.0);
        assert_eq!(w.player.pitch, 0.0);
    }
}
