use glam::{vec3, Vec3};
use rand::prelude::*;
use util::RngExt;
use world::{Background, Cue, Item, MessageId, Sound, World, FACE_BUTTONS};

use crate::{Cadence, Effect, EffectCx, Timer};

/// Frames until the pickup sound after an HP or FP change.
const PICKUP_SOUND_DELAY: i32 = 20;

/// Most actors Squish keeps track of at once.
const SQUISH_CAPACITY: usize = 64;

/// Per-frame scale change while squishing.
const SQUISH_STEP: Vec3 = vec3(0.03, -0.0005, 0.03);

/// Stages of the Bad Music effect last this many seconds times the stage
/// number.
const BAD_MUSIC_STAGE_SECS: i32 = 5;

pub fn equip_badge(w: &mut World, cx: &mut EffectCx) {
    let Some(&badge) = w.data.equippable_badges().choose(&mut *cx.rng) else {
        return;
    };
    log::debug!("equipping badge {}", badge.id);
    w.data.equipped.push(badge);
    w.audio.play(Sound::BadgeEquip);
}

pub fn unequip_badge(w: &mut World, cx: &mut EffectCx) {
    if w.data.equipped.is_empty() {
        return;
    }
    let idx = cx.rng.gen_range(0..w.data.equipped.len());
    // Keep the equipped list compact.
    w.data.equipped.swap_remove(idx);
    w.audio.play(Sound::BadgeUnequip);
}

/// Repeat the low HP warning sound.
#[derive(Clone, Default, Debug)]
pub struct PerilSound {
    cadence: Cadence,
}

impl Effect for PerilSound {
    fn activate(&mut self, w: &mut World, cx: &mut EffectCx) {
        if self.cadence.is_due(cx.ticks) {
            w.audio.play(Sound::Peril);
            self.cadence.postpone(cx.rng.gen_range(15..40));
        }
    }

    fn deactivate(&mut self, _: &mut World, _: &mut EffectCx) {
        self.cadence.reset();
    }
}

/// Actor whose scale Squish is messing with.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Squishee {
    Npc(i16),
    /// Battle enemy slot.
    Enemy(usize),
    Partner,
}

impl Squishee {
    fn scale_mut(self, w: &mut World) -> Option<&mut Vec3> {
        match self {
            Squishee::Npc(id) => {
                w.npcs.iter_mut().find(|n| n.id == id).map(|n| &mut n.scale)
            }
            Squishee::Enemy(i) => w
                .battle
                .as_mut()?
                .enemies
                .get_mut(i)?
                .as_mut()
                .map(|e| &mut e.scale),
            Squishee::Partner => {
                w.battle.as_mut()?.partner.as_mut().map(|p| &mut p.scale)
            }
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct SquishState {
    who: Squishee,
    original: Vec3,
    current: Vec3,
}

/// Flatten everyone out a bit more every frame.
#[derive(Clone, Default, Debug)]
pub struct Squish {
    squished: Vec<SquishState>,
}

impl Squish {
    fn squish(&mut self, w: &mut World, who: Squishee) {
        let known = self.squished.iter().position(|s| s.who == who);
        if known.is_none() && self.squished.len() >= SQUISH_CAPACITY {
            return;
        }
        let Some(scale) = who.scale_mut(w) else { return };

        match known {
            Some(i) => {
                let s = &mut self.squished[i];
                s.current += SQUISH_STEP;
                *scale = s.current;
            }
            // Start tracking the actor.
            None => self.squished.push(SquishState {
                who,
                original: *scale,
                current: *scale,
            }),
        }
    }
}

impl Effect for Squish {
    fn activate(&mut self, w: &mut World, _: &mut EffectCx) {
        let mut targets: Vec<Squishee> =
            w.npcs.iter().map(|n| Squishee::Npc(n.id)).collect();
        if let Some(battle) = &w.battle {
            for (i, e) in battle.enemies.iter().enumerate() {
                if e.is_some() {
                    targets.push(Squishee::Enemy(i));
                }
            }
            if battle.partner.is_some() {
                targets.push(Squishee::Partner);
            }
        }

        for who in targets {
            self.squish(w, who);
        }
    }

    fn deactivate(&mut self, w: &mut World, _: &mut EffectCx) {
        for s in self.squished.drain(..) {
            if let Some(scale) = s.who.scale_mut(w) {
                *scale = s.original;
            }
        }
    }
}

pub fn point_swap(w: &mut World, cx: &mut EffectCx) {
    let d = &mut w.data;
    std::mem::swap(&mut d.cur_hp, &mut d.cur_fp);
    // Dropping to zero HP is allowed.
    d.cur_hp = d.cur_hp.min(d.max_hp);
    d.cur_fp = d.cur_fp.min(d.max_fp);

    w.audio.play(Sound::PointSwap);
    cx.timers.set(Timer::HpSound, PICKUP_SOUND_DELAY);
    cx.timers.set(Timer::FpSound, PICKUP_SOUND_DELAY);
}

/// Pick a value from `range` that differs from `old`.
fn reroll(
    rng: &mut impl Rng,
    range: std::ops::RangeInclusive<i32>,
    old: i32,
) -> i32 {
    loop {
        let ret = rng.gen_range(range.clone());
        if ret != old {
            return ret;
        }
    }
}

pub fn random_hp(w: &mut World, cx: &mut EffectCx) {
    let d = &mut w.data;
    if d.max_hp <= 1 {
        return;
    }
    d.cur_hp = reroll(&mut *cx.rng, 1..=d.max_hp, d.cur_hp);
    cx.timers.set(Timer::HpSound, PICKUP_SOUND_DELAY);
}

pub fn random_fp(w: &mut World, cx: &mut EffectCx) {
    let d = &mut w.data;
    if d.max_fp <= 0 {
        return;
    }
    d.cur_fp = reroll(&mut *cx.rng, 0..=d.max_fp, d.cur_fp);
    cx.timers.set(Timer::FpSound, PICKUP_SOUND_DELAY);
}

pub fn add_remove_coins(w: &mut World, cx: &mut EffectCx) {
    let n = cx.rng.gen_range(1..=100);
    w.data.add_coins(cx.rng.flip_sign(n));
    w.audio.play(Sound::CoinPickup);
    w.cue(Cue::OpenStatusBar);
}

pub fn add_remove_star_points(w: &mut World, cx: &mut EffectCx) {
    let n = cx.rng.gen_range(1..=25);
    w.data.add_star_points(cx.rng.flip_sign(n));
    w.audio.play(Sound::StarPointPickup);
    w.cue(Cue::OpenStatusBar);
    if !w.is_battle() {
        w.cue(Cue::BlinkStarPoints);
    }
}

/// Show a random tattle text.
pub fn random_tattle(w: &mut World, cx: &mut EffectCx) {
    // Message sections of the different tattle kinds and their sizes,
    // weighted by how many entries they have.
    let (section, count) = match cx.rng.gen_range(0..=100) {
        0..=44 => (0x19, 0x188),
        45..=77 => (0x1A, 0x121),
        78..=87 => (0x1B, 0x25),
        _ => (0x1C, 0x95),
    };
    let id = MessageId {
        section,
        index: cx.rng.gen_range(0..=count),
    };
    w.cue(Cue::Message(id));
}

/// Detune the music in increasingly longer stages.
pub struct BadMusic;

impl Effect for BadMusic {
    fn activate(&mut self, w: &mut World, cx: &mut EffectCx) {
        let stage = &mut w.mods.bad_music;
        if *stage == 0 {
            cx.timers.set(Timer::BadMusic, BAD_MUSIC_STAGE_SECS * cx.fps);
            *stage = 1;
        } else if cx.timers.get(Timer::BadMusic) == 0 {
            cx.timers.set(
                Timer::BadMusic,
                *stage as i32 * BAD_MUSIC_STAGE_SECS * cx.fps,
            );
            *stage += 1;
        }
    }

    fn deactivate(&mut self, w: &mut World, _: &mut EffectCx) {
        w.mods.bad_music = 0;
    }
}

pub fn expire_mushroom(w: &mut World, cx: &mut EffectCx) {
    let Some(&slot) = w.data.mushroom_slots().choose(&mut *cx.rng) else {
        return;
    };
    w.data.items[slot] = Some(Item::DriedShroom);
    w.audio.play(Sound::HitBones);
}

pub struct RotateCamera;

impl Effect for RotateCamera {
    fn activate(&mut self, w: &mut World, cx: &mut EffectCx) {
        w.mods.camera_roll = Some(cx.rng.gen_range(45.0..315.0));
    }

    fn deactivate(&mut self, w: &mut World, _: &mut EffectCx) {
        w.mods.camera_roll = None;
    }
}

/// Scribble random bytes over the background palette.
#[derive(Clone, Default, Debug)]
pub struct CorruptBackground {
    /// Clean copy of the current background.
    saved: Option<Background>,
}

impl Effect for CorruptBackground {
    fn activate(&mut self, w: &mut World, cx: &mut EffectCx) {
        let bg = &mut w.background;
        if bg.fresh || self.saved.is_none() {
            self.saved = Some(Background {
                fresh: false,
                ..bg.clone()
            });
            bg.fresh = false;
        }

        let len = bg.palette_bytes();
        if len > 0 {
            bg.poke(cx.rng.gen_range(0..len), cx.rng.gen());
        }
    }

    fn deactivate(&mut self, w: &mut World, _: &mut EffectCx) {
        if let Some(saved) = self.saved.take() {
            w.background = saved;
        }
    }
}

pub struct ShuffleButtons;

impl Effect for ShuffleButtons {
    fn activate(&mut self, w: &mut World, cx: &mut EffectCx) {
        let mut map = FACE_BUTTONS;
        map.shuffle(&mut *cx.rng);
        w.mods.button_map = Some(map);
    }

    fn deactivate(&mut self, w: &mut World, _: &mut EffectCx) {
        w.mods.button_map = None;
    }
}

/// Grab the current frame to flash it back at the player later.
pub fn remember_this(w: &mut World, cx: &mut EffectCx) {
    // At most five minutes, but long enough for the flashback to fit in.
    let delay = cx
        .rng
        .gen_range(crate::timers::MEMORY_SHOW_AT + 1..=cx.fps * 300);
    log::debug!("remembering frame {} for {delay} frames", w.frame);
    cx.timers.remember(w.frame, delay);
}
