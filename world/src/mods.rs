use crate::Buttons;

/// Gameplay modifier switches that chaos effects flip.
///
/// The rest of the game consults these when running its own systems, eg.
/// the camera reads `top_down_cam` and the audio mixer reads `bad_music`.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct Mods {
    pub levitating: bool,
    pub slow_go: bool,
    pub top_down_cam: bool,
    pub intangible_enemies: bool,
    pub spin_angle: bool,
    /// Attacks heal instead of damaging.
    pub healing_touch: bool,
    pub all_sfx_attack_fx: bool,
    pub hide_models: bool,
    pub reverse_analog: bool,
    /// Face button shuffle, see `FACE_BUTTONS` for the slot order.
    pub button_map: Option<[Buttons; 9]>,
    /// Camera roll in degrees.
    pub camera_roll: Option<f32>,
    /// A remembered frame is being shown instead of the live view.
    pub remember_this: bool,
    /// Music detuning stage, 0 is normal.
    pub bad_music: u32,
}

/// On/off modifiers that can be flipped without further bookkeeping.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Switch {
    SlowGo,
    TopDownCam,
    IntangibleEnemies,
    SpinAngle,
    HealingTouch,
    AllSfxAttackFx,
    HideModels,
    ReverseAnalog,
}

impl Mods {
    pub fn switch_mut(&mut self, s: Switch) -> &mut bool {
        use Switch::*;
        match s {
            SlowGo => &mut self.slow_go,
            TopDownCam => &mut self.top_down_cam,
            IntangibleEnemies => &mut self.intangible_enemies,
            SpinAngle => &mut self.spin_angle,
            HealingTouch => &mut self.healing_touch,
            AllSfxAttackFx => &mut self.all_sfx_attack_fx,
            HideModels => &mut self.hide_models,
            ReverseAnalog => &mut self.reverse_analog,
        }
    }
}
