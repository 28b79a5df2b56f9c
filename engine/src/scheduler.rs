use rand::prelude::*;
use util::GameRng;
use world::World;

use crate::{
    condition, runtime::Shared, Confirm, Config, Descriptor, Effect,
    EffectCx, ManualControl, Outcome, Registry, RegistryBuilder, Reload,
    Request, Result, Slot, Timers,
};

/// Name of the manual mode toggle entry.
pub const MODE_TOGGLE: &str = "Toggle Random Effects";

/// Menu entry that flips between automatic and manual mode.
struct ModeToggle;

impl Effect for ModeToggle {
    fn activate(&mut self, _: &mut World, cx: &mut EffectCx) {
        cx.request(Request::ToggleAutomatic);
    }
}

/// What a manual confirm ended up doing.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Operation {
    Activated,
    /// Running effect got a new duration.
    Rearmed,
    Deactivated,
    Ignored,
}

/// One line of the debug overlay.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct OverlayLine {
    pub label: String,
    /// Seconds left, if the line has a timer.
    pub secs: Option<i32>,
}

/// Runs chaos effects on a game world, one frame at a time.
pub struct Scheduler {
    config: Config,
    registry: Registry,
    slots: Vec<Slot>,
    shared: Shared,
    /// Frames until the next automatic pick.
    countdown: i32,
    automatic: bool,
    manual: ManualControl,
    reload: Reload,
}

impl Scheduler {
    pub fn new(
        config: Config,
        effects: RegistryBuilder,
        rng: GameRng,
    ) -> Result<Self> {
        config.validate()?;

        let meta = config.debug_menu.then(|| {
            (
                Descriptor::flash(MODE_TOGGLE).reserved(),
                Box::new(ModeToggle) as Box<dyn Effect>,
            )
        });
        let (registry, slots) = effects.build(&config, meta)?;
        log::info!("chaos scheduler running {} effects", registry.len());

        Ok(Scheduler {
            automatic: !config.debug_menu,
            shared: Shared::new(rng, config.fps as i32),
            config,
            registry,
            slots,
            countdown: 1,
            manual: Default::default(),
            reload: Default::default(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Remaining ticks of the effect with the given name.
    pub fn ticks(&self, name: &str) -> Option<i32> {
        Some(self.slots[self.registry.position(name)?].ticks())
    }

    pub fn is_automatic(&self) -> bool {
        self.automatic
    }

    pub fn countdown(&self) -> i32 {
        self.countdown
    }

    pub fn manual(&self) -> &ManualControl {
        &self.manual
    }

    pub fn reload(&self) -> &Reload {
        &self.reload
    }

    pub fn timers(&self) -> &Timers {
        &self.shared.timers
    }

    /// Run one frame.
    pub fn update(&mut self, w: &mut World) {
        if self.config.is_excluded(w.mode) {
            return;
        }

        if self.automatic {
            self.countdown = (self.countdown - 1).max(0);
        }

        if let Some(Confirm { index, secs }) =
            self.manual.handle(&w.input, self.registry.len())
        {
            self.confirm(index, secs, w);
        }
        self.reload.update(
            w,
            self.config.secs_to_ticks(self.config.reload_cooldown_secs) as u32,
        );

        self.shared.timers.update(w);
        let valid_battle = condition::valid_battle(w, &self.shared.timers);
        if let Some(battle) = w.battle.as_mut() {
            if valid_battle {
                battle.resolve_queued_move(&mut self.shared.rng);
            } else {
                battle.random_move_queued = false;
            }
        }

        self.maintain(w);

        if self.automatic && self.countdown == 0 {
            self.select(w);
        }
    }

    /// Tick every effect slot.
    fn maintain(&mut self, w: &mut World) {
        for (desc, slot) in self.registry.iter().zip(self.slots.iter_mut()) {
            let eligible = slot.is_active()
                && condition::eligible(desc, w, &self.shared.timers);
            let outcome = slot.tick(desc, eligible, w, &mut self.shared);
            if outcome == Outcome::Retired {
                log::debug!("{} ran out", desc.name);
            }
        }
        self.process_requests(w);
    }

    /// Try to start a random effect and schedule the next attempt.
    fn select(&mut self, w: &mut World) {
        let mut picked = None;
        for _ in 0..self.config.retries {
            let selectable = self.registry.selectable();
            let Some(&idx) = selectable.choose(&mut self.shared.rng) else {
                break;
            };
            if self.slots[idx].is_active() {
                continue;
            }
            let desc = &self.registry[idx];
            if condition::eligible(desc, w, &self.shared.timers) {
                picked = Some(idx);
                break;
            }
        }

        match picked {
            Some(idx) => self.activate(idx, None, w),
            None => log::debug!("no eligible effect found, skipping"),
        }

        let max_interval =
            self.config.secs_to_ticks(self.config.max_interval_secs);
        self.countdown = self.shared.rng.gen_range(1..=max_interval);
    }

    /// Start an effect, with a random duration unless one is given.
    fn activate(&mut self, idx: usize, secs: Option<u32>, w: &mut World) {
        let desc = &self.registry[idx];
        let ticks = if desc.is_instant() {
            self.config.flash_ticks as i32
        } else if let Some(secs) = secs {
            self.config.secs_to_ticks(secs)
        } else {
            self.shared.rng.gen_range(
                self.config.secs_to_ticks(self.config.min_effect_secs)
                    ..=self.config.secs_to_ticks(desc.max_secs),
            )
        };

        log::info!("activating {} for {ticks} frames", desc.name);
        self.slots[idx].start(desc, ticks, w, &mut self.shared);
        self.process_requests(w);
    }

    fn process_requests(&mut self, w: &mut World) {
        for req in std::mem::take(&mut self.shared.requests) {
            match req {
                Request::ToggleAutomatic => {
                    self.set_automatic(!self.automatic, w)
                }
            }
        }
    }

    /// Switch between automatic and manual mode.
    ///
    /// Going manual stops every running effect.
    pub fn set_automatic(&mut self, automatic: bool, w: &mut World) {
        if self.automatic == automatic {
            return;
        }
        log::info!(
            "chaos {}",
            if automatic { "automatic" } else { "manual" }
        );

        if !automatic {
            for (desc, slot) in self.registry.iter().zip(self.slots.iter_mut())
            {
                if desc.reserved {
                    continue;
                }
                if slot.retire(desc, w, &mut self.shared) {
                    log::debug!("{} stopped", desc.name);
                }
            }
        }
        self.automatic = automatic;
    }

    /// Apply an operator's choice of effect and duration.
    ///
    /// Running effects get their duration replaced, or are stopped when the
    /// duration is zero. Inactive effects start if their condition allows.
    pub fn confirm(
        &mut self,
        idx: usize,
        secs: u32,
        w: &mut World,
    ) -> Operation {
        let Some(desc) = self.registry.get(idx) else {
            return Operation::Ignored;
        };

        if self.slots[idx].is_active() {
            if desc.is_instant() {
                return Operation::Ignored;
            }
            if secs > 0 {
                log::debug!("{} set to {secs}s", desc.name);
                self.slots[idx].rearm(self.config.secs_to_ticks(secs));
                return Operation::Rearmed;
            }
            if !desc.interruptible {
                log::debug!("{} can't be interrupted", desc.name);
                return Operation::Ignored;
            }
            self.slots[idx].retire(desc, w, &mut self.shared);
            log::debug!("{} stopped", desc.name);
            return Operation::Deactivated;
        }

        if !desc.is_instant() && secs == 0 {
            return Operation::Ignored;
        }
        if !condition::eligible(desc, w, &self.shared.timers) {
            return Operation::Ignored;
        }
        self.activate(idx, Some(secs), w);
        Operation::Activated
    }

    /// Lines for the debug overlay.
    pub fn overlay(&self) -> Vec<OverlayLine> {
        let mut ret = Vec::new();
        let fps = self.config.fps as i32;

        if self.config.debug_menu {
            let cursor = self.manual.cursor() % self.registry.len();
            ret.push(OverlayLine {
                label: format!(
                    "-- {:3}s {:2} {} --",
                    self.manual.secs(),
                    cursor,
                    self.registry[cursor].name
                ),
                secs: None,
            });
        }

        if self.automatic {
            ret.push(OverlayLine {
                label: "Chaos Timer".into(),
                secs: Some(self.countdown / fps),
            });
        }

        for (desc, slot) in self.registry.iter().zip(&self.slots) {
            if !slot.is_active() || desc.reserved {
                continue;
            }
            ret.push(OverlayLine {
                label: desc.name.clone(),
                secs: (!desc.is_instant()).then(|| slot.ticks() / fps),
            });
        }

        ret
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use glam::IVec2;
    use pretty_assertions::assert_eq;
    use quickcheck_macros::quickcheck;
    use util::srng;
    use world::{Buttons, GameMode};

    use super::*;
    use crate::Timer;

    struct Probe;

    impl Effect for Probe {
        fn activate(&mut self, w: &mut World, _: &mut EffectCx) {
            w.data.coins += 1;
        }

        fn deactivate(&mut self, w: &mut World, _: &mut EffectCx) {
            w.data.star_points += 1;
        }
    }

    fn config() -> Config {
        Config {
            fps: 2,
            ..Default::default()
        }
    }

    fn scheduler(config: Config, effects: RegistryBuilder) -> Scheduler {
        Scheduler::new(config, effects, srng("scheduler")).unwrap()
    }

    fn press(s: &mut Scheduler, w: &mut World, b: Buttons) {
        w.begin_frame(b, IVec2::ZERO);
        s.update(w);
        w.end_frame();
    }

    fn never(_: &World, _: &Timers) -> bool {
        false
    }

    fn in_battle(w: &World, _: &Timers) -> bool {
        w.is_battle()
    }

    thread_local! {
        static EVALS: Cell<u32> = const { Cell::new(0) };
    }

    fn counted_never(_: &World, _: &Timers) -> bool {
        EVALS.with(|c| c.set(c.get() + 1));
        false
    }

    #[test]
    fn automatic_pick_of_continuous_effect() {
        let mut s = scheduler(
            config(),
            RegistryBuilder::new()
                .add(Descriptor::continuous("B", 20).restoring(), Probe),
        );
        let mut w = World::default();
        assert!(s.is_automatic());

        s.update(&mut w);
        let ticks = s.ticks("B").unwrap();
        assert!((20..=40).contains(&ticks));
        // Continuous effects don't run on the frame they're picked.
        assert_eq!(w.data.coins, 0);
        assert!(s.countdown() >= 1 && s.countdown() <= 30);

        s.update(&mut w);
        assert_eq!(s.ticks("B"), Some(ticks - 1));
        assert_eq!(w.data.coins, 1);

        // Countdown keeps missing the already running effect.
        for _ in 1..ticks {
            s.update(&mut w);
        }
        assert_eq!(w.data.coins, ticks - 1);
        assert_eq!(w.data.star_points, 1);
    }

    #[test]
    fn automatic_pick_at_full_frame_rate() {
        let mut s = scheduler(
            Config {
                min_effect_secs: 5,
                ..Default::default()
            },
            RegistryBuilder::new()
                .add(Descriptor::continuous("B", 30).restoring(), Probe),
        );
        let mut w = World::default();

        s.update(&mut w);
        let ticks = s.ticks("B").unwrap();
        assert!((300..=1800).contains(&ticks));
        assert!((1..=900).contains(&s.countdown()));

        s.update(&mut w);
        assert_eq!(s.ticks("B"), Some(ticks - 1));
        assert_eq!(w.data.coins, 1);
    }

    #[test]
    fn manual_pick_of_instant_effect() {
        let mut s = scheduler(
            Config {
                debug_menu: true,
                ..config()
            },
            RegistryBuilder::new().add(Descriptor::flash("A"), Probe),
        );
        let mut w = World::default();
        assert!(!s.is_automatic());
        assert_eq!(s.registry()[0].name, MODE_TOGGLE);

        press(&mut s, &mut w, Buttons::L);
        press(&mut s, &mut w, Buttons::D_RIGHT);
        press(&mut s, &mut w, Buttons::R);
        assert_eq!(w.data.coins, 1);
        // The tick pass already ran once after activation.
        assert_eq!(s.ticks("A"), Some(89));

        for _ in 0..89 {
            s.update(&mut w);
        }
        assert_eq!(s.ticks("A"), Some(0));
        assert_eq!(w.data.coins, 1);
        assert_eq!(w.data.star_points, 0);
    }

    #[quickcheck]
    fn only_eligible_effects_start(frames: u16) -> bool {
        let mut s = scheduler(
            config(),
            RegistryBuilder::new()
                .add(Descriptor::flash("blocked").when(never), Probe)
                .add(Descriptor::flash("battle").when(in_battle), Probe)
                .add(Descriptor::flash("free"), Probe),
        );
        let mut w = World::default();
        for _ in 0..frames % 500 {
            s.update(&mut w);
            if s.ticks("blocked") != Some(0) || s.ticks("battle") != Some(0)
            {
                return false;
            }
        }
        true
    }

    #[test]
    fn selection_gives_up_after_retries() {
        EVALS.with(|c| c.set(0));
        let mut s = scheduler(
            config(),
            RegistryBuilder::new()
                .add(Descriptor::flash("a").when(counted_never), Probe)
                .add(Descriptor::toggle("b", 20).when(counted_never), Probe),
        );
        let mut w = World::default();

        s.update(&mut w);
        assert_eq!(EVALS.with(Cell::get), s.config().retries);
        assert!(s.slots().iter().all(|s| !s.is_active()));
        assert!(s.countdown() >= 1);
        assert_eq!(w.data.coins, 0);
    }

    #[test]
    fn excluded_modes_do_nothing() {
        let mut s = scheduler(
            config(),
            RegistryBuilder::new().add(Descriptor::flash("a"), Probe),
        );
        let mut w = World {
            mode: GameMode::TitleScreen,
            ..Default::default()
        };
        for _ in 0..100 {
            s.update(&mut w);
        }
        assert_eq!(s.countdown(), 1);
        assert_eq!(w.data.coins, 0);

        w.mode = GameMode::World;
        s.update(&mut w);
        assert_eq!(w.data.coins, 1);
    }

    #[test]
    fn frozen_effect_waits_for_condition() {
        let mut s = scheduler(
            config(),
            RegistryBuilder::new().add(
                Descriptor::continuous("c", 20).when(in_battle),
                Probe,
            ),
        );
        let mut w = World {
            battle: Some(Default::default()),
            ..Default::default()
        };
        assert_eq!(s.confirm(0, 30, &mut w), Operation::Activated);
        assert_eq!(s.ticks("c"), Some(60));

        w.battle = None;
        for _ in 0..10 {
            s.update(&mut w);
        }
        assert_eq!(s.ticks("c"), Some(60));
        assert_eq!(w.data.coins, 0);
    }

    #[test]
    fn going_manual_stops_effects() {
        let mut s = scheduler(
            config(),
            RegistryBuilder::new()
                .add(Descriptor::latch("latch", 20), Probe)
                .add(Descriptor::toggle("toggle", 20), Probe),
        );
        let mut w = World::default();
        s.confirm(0, 15, &mut w);
        s.confirm(1, 15, &mut w);
        assert_eq!(w.data.coins, 2);

        s.set_automatic(false, &mut w);
        assert!(s.slots().iter().all(|s| !s.is_active()));
        // Latch deactivates, toggle activates a second time.
        assert_eq!(w.data.star_points, 1);
        assert_eq!(w.data.coins, 3);

        // Countdown stays put in manual mode.
        let countdown = s.countdown();
        for _ in 0..100 {
            s.update(&mut w);
        }
        assert_eq!(s.countdown(), countdown);
        assert_eq!(w.data.coins, 3);
    }

    #[test]
    fn mode_toggle_entry() {
        let mut s = scheduler(
            Config {
                debug_menu: true,
                ..config()
            },
            RegistryBuilder::new().add(Descriptor::latch("latch", 20), Probe),
        );
        let mut w = World::default();

        assert_eq!(s.confirm(0, 10, &mut w), Operation::Activated);
        assert!(s.is_automatic());

        s.confirm(1, 100, &mut w);
        assert_eq!(w.data.coins, 1);

        // Toggle entry is still flashing, so wait for it to clear.
        for _ in 0..90 {
            s.update(&mut w);
        }
        assert_eq!(s.ticks(MODE_TOGGLE), Some(0));
        // Running in automatic mode doesn't stop a manual pick.
        assert!(s.ticks("latch").unwrap() > 0);

        assert_eq!(s.confirm(0, 10, &mut w), Operation::Activated);
        assert!(!s.is_automatic());
        assert_eq!(s.ticks("latch"), Some(0));
        assert_eq!(w.data.star_points, 1);
    }

    #[test]
    fn manual_confirm_cases() {
        let mut s = scheduler(
            config(),
            RegistryBuilder::new()
                .add(Descriptor::latch("latch", 20), Probe)
                .add(Descriptor::latch("stuck", 20).uninterruptible(), Probe)
                .add(Descriptor::flash("flash"), Probe)
                .add(Descriptor::flash("never").when(never), Probe),
        );
        let mut w = World::default();

        assert_eq!(s.confirm(0, 0, &mut w), Operation::Ignored);
        assert_eq!(s.confirm(0, 10, &mut w), Operation::Activated);
        assert_eq!(s.ticks("latch"), Some(20));
        assert_eq!(s.confirm(0, 100, &mut w), Operation::Rearmed);
        assert_eq!(s.ticks("latch"), Some(200));
        assert_eq!(w.data.coins, 1);
        assert_eq!(s.confirm(0, 0, &mut w), Operation::Deactivated);
        assert_eq!(w.data.star_points, 1);

        s.confirm(1, 10, &mut w);
        assert_eq!(s.confirm(1, 0, &mut w), Operation::Ignored);
        assert_eq!(s.ticks("stuck"), Some(20));

        // Flashes ignore the chosen duration.
        assert_eq!(s.confirm(2, 0, &mut w), Operation::Activated);
        assert_eq!(s.ticks("flash"), Some(90));
        assert_eq!(s.confirm(2, 10, &mut w), Operation::Ignored);

        assert_eq!(s.confirm(3, 10, &mut w), Operation::Ignored);
        assert_eq!(s.confirm(99, 10, &mut w), Operation::Ignored);
    }

    #[test]
    fn queued_battle_move_is_dropped_outside_valid_battle() {
        let mut s = scheduler(
            config(),
            RegistryBuilder::new()
                .add(Descriptor::flash("never").when(never), Probe),
        );
        let mut w = World {
            battle: Some(world::Battle {
                scripted: true,
                random_move_queued: true,
                ..Default::default()
            }),
            ..Default::default()
        };
        s.update(&mut w);
        assert!(!w.battle.as_ref().unwrap().random_move_queued);
        assert!(s.timers().is_idle(Timer::EnemyHp));
    }

    #[test]
    fn overlay() {
        let mut s = scheduler(
            Config {
                debug_menu: true,
                ..config()
            },
            RegistryBuilder::new()
                .add(Descriptor::latch("latch", 20), Probe)
                .add(Descriptor::flash("flash"), Probe),
        );
        let mut w = World::default();
        s.confirm(1, 15, &mut w);
        s.confirm(2, 15, &mut w);

        assert_eq!(
            s.overlay(),
            vec![
                OverlayLine {
                    label: format!("--  10s  0 {MODE_TOGGLE} --"),
                    secs: None
                },
                OverlayLine {
                    label: "latch".into(),
                    secs: Some(15)
                },
                OverlayLine {
                    label: "flash".into(),
                    secs: None
                },
            ]
        );

        s.set_automatic(true, &mut w);
        assert_eq!(
            s.overlay()[1],
            OverlayLine {
                label: "Chaos Timer".into(),
                secs: Some(0)
            }
        );
    }
}
