//! Per-effect runtime state and the per-frame tick contract.
use std::fmt;

use util::GameRng;
use world::World;

use crate::{Descriptor, Shape, Timers};

/// Behavior of a chaos effect.
///
/// Callbacks must not fail. If the game state an effect expects is missing,
/// it should do nothing.
pub trait Effect {
    fn activate(&mut self, w: &mut World, cx: &mut EffectCx);

    /// Undo the effect. Only called for latching and restoring shapes.
    fn deactivate(&mut self, _w: &mut World, _cx: &mut EffectCx) {}
}

/// Effect with only an activation callback.
pub struct FnEffect<F>(F);

impl<F: FnMut(&mut World, &mut EffectCx)> Effect for FnEffect<F> {
    fn activate(&mut self, w: &mut World, cx: &mut EffectCx) {
        (self.0)(w, cx)
    }
}

/// Make an effect out of an activation function.
pub fn from_fn<F>(f: F) -> FnEffect<F>
where
    F: FnMut(&mut World, &mut EffectCx),
{
    FnEffect(f)
}

/// Requests effects make of the scheduler itself.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Request {
    /// Flip between automatic and manual mode.
    ToggleAutomatic,
}

/// Scheduler-owned context handed to effect callbacks.
pub struct EffectCx<'a> {
    /// Remaining frames of the effect, counting the current one.
    pub ticks: i32,
    pub fps: i32,
    pub rng: &'a mut GameRng,
    pub timers: &'a mut Timers,
    requests: &'a mut Vec<Request>,
}

impl EffectCx<'_> {
    pub fn request(&mut self, req: Request) {
        self.requests.push(req);
    }
}

/// Scheduler state that effect callbacks get to borrow.
pub(crate) struct Shared {
    pub rng: GameRng,
    pub timers: Timers,
    pub requests: Vec<Request>,
    pub fps: i32,
}

impl Shared {
    pub fn new(rng: GameRng, fps: i32) -> Self {
        Shared {
            rng,
            timers: Default::default(),
            requests: Vec::new(),
            fps,
        }
    }

    pub fn cx(&mut self, ticks: i32) -> EffectCx<'_> {
        EffectCx {
            ticks,
            fps: self.fps,
            rng: &mut self.rng,
            timers: &mut self.timers,
            requests: &mut self.requests,
        }
    }
}

/// Phase of a periodic sub-effect inside a running effect.
///
/// Effects keep one of these and fire their sub-effect whenever the
/// effect's remaining ticks reach the scheduled point.
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub enum Cadence {
    /// Not started during the current activation.
    #[default]
    Idle,
    /// Fire once remaining ticks are at or below this.
    Next(i32),
}

impl Cadence {
    /// Arm on first sight, then report whether the sub-effect is due.
    pub fn is_due(&mut self, ticks: i32) -> bool {
        if *self == Cadence::Idle {
            *self = Cadence::Next(ticks);
        }
        matches!(*self, Cadence::Next(n) if ticks <= n)
    }

    /// Push the next firing `frames` further down the countdown.
    pub fn postpone(&mut self, frames: i32) {
        if let Cadence::Next(n) = self {
            *n -= frames;
        }
    }

    pub fn reset(&mut self) {
        *self = Cadence::Idle;
    }
}

/// What the tick pass does with a slot this frame.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Step {
    Idle,
    Frozen,
    Advance,
}

/// Result of ticking a slot for one frame.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    Idle,
    Frozen,
    Running,
    Retired,
}

/// Mutable runtime state of one registered effect.
pub struct Slot {
    ticks: i32,
    effect: Box<dyn Effect>,
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot").field("ticks", &self.ticks).finish()
    }
}

impl Slot {
    pub(crate) fn new(effect: Box<dyn Effect>) -> Self {
        Slot { ticks: 0, effect }
    }

    /// Frames left to run, zero when inactive.
    pub fn ticks(&self) -> i32 {
        self.ticks
    }

    pub fn is_active(&self) -> bool {
        self.ticks > 0
    }

    fn step(&self, desc: &Descriptor, eligible: bool) -> Step {
        if self.ticks <= 0 {
            Step::Idle
        } else if !eligible && !desc.is_instant() {
            Step::Frozen
        } else {
            Step::Advance
        }
    }

    /// Run one frame of the tick contract.
    pub(crate) fn tick(
        &mut self,
        desc: &Descriptor,
        eligible: bool,
        w: &mut World,
        shared: &mut Shared,
    ) -> Outcome {
        match self.step(desc, eligible) {
            Step::Idle => Outcome::Idle,
            Step::Frozen => Outcome::Frozen,
            Step::Advance => {
                if self.ticks == 1 && desc.shape.has_deactivate() {
                    self.retire(desc, w, shared);
                    return Outcome::Retired;
                }

                if desc.shape.is_continuous() {
                    self.effect.activate(w, &mut shared.cx(self.ticks));
                }
                self.ticks -= 1;

                if self.ticks == 0 {
                    Outcome::Retired
                } else {
                    Outcome::Running
                }
            }
        }
    }

    /// Start a new activation lasting `ticks` frames.
    pub(crate) fn start(
        &mut self,
        desc: &Descriptor,
        ticks: i32,
        w: &mut World,
        shared: &mut Shared,
    ) {
        debug_assert!(ticks > 0);
        self.ticks = ticks;
        if !desc.shape.is_continuous() {
            self.effect.activate(w, &mut shared.cx(ticks));
        }
    }

    /// Change the remaining duration of a running effect.
    pub(crate) fn rearm(&mut self, ticks: i32) {
        self.ticks = ticks;
    }

    /// End an active effect now, undoing it if its shape says so.
    ///
    /// Return whether the slot was active.
    pub(crate) fn retire(
        &mut self,
        desc: &Descriptor,
        w: &mut World,
        shared: &mut Shared,
    ) -> bool {
        if !self.is_active() {
            return false;
        }

        let mut cx = shared.cx(self.ticks);
        match desc.shape {
            Shape::Toggle => self.effect.activate(w, &mut cx),
            Shape::Latch | Shape::Continuous { restores: true } => {
                self.effect.deactivate(w, &mut cx)
            }
            Shape::Flash | Shape::Continuous { restores: false } => {}
        }
        self.ticks = 0;
        true
    }
}
