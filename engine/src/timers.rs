//! Countdowns for effect consequences that outlive their activation frame.
use strum::EnumCount;
use world::{Cue, Song, Sound, World};

/// Named aftermath timers.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, EnumCount)]
pub enum Timer {
    /// Animates enemy HP toward its rerolled target.
    EnemyHp,
    HpSound,
    FpSound,
    /// Remembered frame flashback.
    Memory,
    /// Time left in the current detuning stage.
    BadMusic,
}

/// Enemy HP animation step is taken when the timer reads this.
const ENEMY_HP_STEP_AT: i32 = 30;

/// Frames between enemy HP steps.
const ENEMY_HP_STEP_FRAMES: i32 = 4;

/// Memory flashback shows between this timer value and zero.
pub const MEMORY_SHOW_AT: i32 = 130;

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Timers {
    counts: [i32; Timer::COUNT],
    /// Pending HP change per enemy slot.
    enemy_hp: Vec<i32>,
    /// Frame to show during the memory flashback.
    memory: Option<u64>,
}

impl Default for Timers {
    fn default() -> Self {
        Timers {
            counts: [-1; Timer::COUNT],
            enemy_hp: Vec::new(),
            memory: None,
        }
    }
}

impl Timers {
    pub fn get(&self, timer: Timer) -> i32 {
        self.counts[timer as usize]
    }

    pub fn set(&mut self, timer: Timer, value: i32) {
        self.counts[timer as usize] = value;
    }

    pub fn is_idle(&self, timer: Timer) -> bool {
        self.get(timer) < 0
    }

    /// Queue HP changes to animate on the battle's enemy slots.
    pub fn animate_enemy_hp(&mut self, deltas: Vec<i32>) {
        self.enemy_hp = deltas;
        self.set(Timer::EnemyHp, ENEMY_HP_STEP_AT + ENEMY_HP_STEP_FRAMES);
    }

    pub fn pending_enemy_hp(&self) -> &[i32] {
        &self.enemy_hp
    }

    /// Schedule a flashback to `frame` after `delay` frames.
    pub fn remember(&mut self, frame: u64, delay: i32) {
        self.memory = Some(frame);
        self.set(Timer::Memory, delay);
    }

    pub(crate) fn update(&mut self, w: &mut World) {
        for c in self.counts.iter_mut() {
            if *c >= 0 {
                *c -= 1;
            }
        }

        if self.get(Timer::EnemyHp) == ENEMY_HP_STEP_AT {
            self.step_enemy_hp(w);
        }

        if self.get(Timer::HpSound) == 0 {
            w.audio.play(Sound::HeartPickup);
        }
        if self.get(Timer::FpSound) == 0 {
            w.audio.play(Sound::FlowerPickup);
        }

        match self.get(Timer::Memory) {
            MEMORY_SHOW_AT => {
                log::debug!("memory flashback starts");
                w.mods.remember_this = true;
                if let Some(frame) = self.memory {
                    w.cue(Cue::ShowFrame(frame));
                }
                w.audio.push_song(Song::ItemUpgrade);
            }
            0 => {
                w.mods.remember_this = false;
                w.audio.pop_song();
                self.memory = None;
            }
            _ => {}
        }
    }

    fn step_enemy_hp(&mut self, w: &mut World) {
        let Some(battle) = w.battle.as_mut() else {
            self.enemy_hp.clear();
            return;
        };

        let mut stepped = false;
        for (delta, enemy) in self.enemy_hp.iter_mut().zip(&mut battle.enemies)
        {
            let Some(enemy) = enemy else { continue };
            if *delta == 0 {
                continue;
            }
            let step = delta.signum();
            enemy.cur_hp += step;
            *delta -= step;
            stepped = true;
        }

        if stepped {
            w.audio.play(Sound::HeartPickup);
            self.set(
                Timer::EnemyHp,
                ENEMY_HP_STEP_AT + ENEMY_HP_STEP_FRAMES,
            );
        } else {
            self.enemy_hp.clear();
        }
    }
}
