//! Stock chaos effects.
use world::{Switch, World};

use crate::{
    condition::*, from_fn, Descriptor, Effect, EffectCx, RegistryBuilder,
};

mod anywhere;
pub use anywhere::{
    BadMusic, CorruptBackground, PerilSound, RotateCamera, ShuffleButtons,
    Squish,
};

mod battle;

mod overworld;
pub use overworld::{ActorChase, Knockback, Levitate, Rewind, RotatePlayer};

/// Effect that flips a modifier switch, undone by flipping it again.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Flip(pub Switch);

impl Effect for Flip {
    fn activate(&mut self, w: &mut World, _: &mut EffectCx) {
        let s = w.mods.switch_mut(self.0);
        *s = !*s;
    }
}

/// The full effect table.
pub fn catalog() -> RegistryBuilder {
    RegistryBuilder::new()
        // Overworld
        .add(
            Descriptor::continuous("Rewind", 60)
                .restoring()
                .uninterruptible()
                .when(overworld),
            Rewind::default(),
        )
        .add(
            Descriptor::continuous("Levitate", 20)
                .restoring()
                .when(overworld),
            Levitate,
        )
        .add(
            Descriptor::continuous("Actor Chase", 20).when(overworld),
            ActorChase,
        )
        .add(
            Descriptor::continuous("Knockback", 60)
                .restoring()
                .when(not_levitating),
            Knockback::default(),
        )
        .add(
            Descriptor::toggle("Slow Go", 60).when(overworld),
            Flip(Switch::SlowGo),
        )
        .add(
            Descriptor::toggle("Top-Down Cam", 60).when(overworld),
            Flip(Switch::TopDownCam),
        )
        .add(
            Descriptor::toggle("Intangible Enemies", 30).when(overworld),
            Flip(Switch::IntangibleEnemies),
        )
        .add(
            Descriptor::toggle("Random Spin Angle", 60).when(overworld),
            Flip(Switch::SpinAngle),
        )
        .add(
            Descriptor::flash("The Floor is Lava").when(grounded),
            from_fn(overworld::lava),
        )
        .add(
            Descriptor::continuous("Rotate Player", 60)
                .restoring()
                .when(overworld),
            RotatePlayer::default(),
        )
        // Battle
        .add(
            Descriptor::toggle("Healing Touch", 20).when(valid_battle),
            Flip(Switch::HealingTouch),
        )
        .add(
            Descriptor::flash("Random Enemy HP").when(valid_battle),
            from_fn(battle::random_enemy_hp),
        )
        .add(
            Descriptor::flash("Location Shuffle").when(valid_battle),
            from_fn(battle::location_shuffle),
        )
        .add(
            Descriptor::flash("Random Player Move").when(valid_battle),
            from_fn(battle::random_player_move),
        )
        // Anywhere
        .add(
            Descriptor::flash("Equip Badge").when(can_equip_badge),
            from_fn(anywhere::equip_badge),
        )
        .add(
            Descriptor::flash("Unequip Badge").when(can_unequip_badge),
            from_fn(anywhere::unequip_badge),
        )
        .add(
            Descriptor::continuous("Peril Sound", 30).restoring(),
            PerilSound::default(),
        )
        .add(
            Descriptor::continuous("Squish", 60).restoring(),
            Squish::default(),
        )
        .add(
            Descriptor::toggle("All SFX AttackFX", 30),
            Flip(Switch::AllSfxAttackFx),
        )
        .add(
            Descriptor::toggle("Hide Models", 90),
            Flip(Switch::HideModels),
        )
        .add(
            Descriptor::flash("Point Swap").when(hp_differs_from_fp),
            from_fn(anywhere::point_swap),
        )
        .add(
            Descriptor::flash("Random HP").when(can_reroll_hp),
            from_fn(anywhere::random_hp),
        )
        .add(
            Descriptor::flash("Random FP").when(can_reroll_fp),
            from_fn(anywhere::random_fp),
        )
        .add(
            Descriptor::flash("Add/Remove Coins"),
            from_fn(anywhere::add_remove_coins),
        )
        .add(
            Descriptor::flash("Add/Remove Star Points"),
            from_fn(anywhere::add_remove_star_points),
        )
        .add(
            Descriptor::flash("Random Tattle"),
            from_fn(anywhere::random_tattle),
        )
        .add(
            Descriptor::continuous("Bad Music", 90).restoring(),
            BadMusic,
        )
        .add(
            Descriptor::flash("Mushroom Expires").when(has_mushroom),
            from_fn(anywhere::expire_mushroom),
        )
        .add(Descriptor::latch("Rotate Camera", 90), RotateCamera)
        .add(
            Descriptor::continuous("Corrupt Background", 90).restoring(),
            CorruptBackground::default(),
        )
        .add(
            Descriptor::toggle("Reverse Analog Stick", 90),
            Flip(Switch::ReverseAnalog),
        )
        .add(Descriptor::latch("Shuffle Buttons", 90), ShuffleButtons)
        .add(
            Descriptor::flash("Remember This?").when(memory_idle),
            from_fn(anywhere::remember_this),
        )
}
