use glam::{IVec2, Vec3};

use crate::{
    Audio, Background, Battle, Buttons, Cue, GameMode, Input, Mods, Npc,
    Player, PlayerData, Prop,
};

/// Everything about the running game that chaos effects get to touch.
#[derive(Clone, Default, Debug)]
pub struct World {
    pub mode: GameMode,
    /// Number of frames run so far.
    pub frame: u64,

    pub player: Player,
    pub data: PlayerData,
    /// Current battle, if a battle is running.
    pub battle: Option<Battle>,

    pub npcs: Vec<Npc>,
    pub entities: Vec<Prop>,
    pub item_entities: Vec<Prop>,
    pub background: Background,

    pub audio: Audio,
    pub input: Input,
    pub mods: Mods,

    pub cues: Vec<Cue>,
    pub map_change_requested: bool,
}

impl World {
    pub fn is_battle(&self) -> bool {
        self.battle.is_some()
    }

    /// Start a new frame with a fresh controller sample.
    pub fn begin_frame(&mut self, raw: Buttons, stick: IVec2) {
        self.input.update(raw, stick, &self.mods);
    }

    pub fn end_frame(&mut self) {
        self.frame += 1;
    }

    pub fn cue(&mut self, cue: Cue) {
        log::trace!("cue {cue:?}");
        self.cues.push(cue);
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn take_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    /// Positions of everything on the overworld map that can be pushed
    /// around.
    pub fn movable_positions_mut(&mut self) -> impl Iterator<Item = &mut Vec3> {
        self.npcs
            .iter_mut()
            .map(|n| &mut n.pos)
            .chain(self.entities.iter_mut().map(|e| &mut e.pos))
            .chain(self.item_entities.iter_mut().map(|e| &mut e.pos))
    }

    /// Switch into map transition mode, reloading the current map.
    pub fn change_map(&mut self) {
        log::info!("reloading current map");
        self.mode = GameMode::ChangeMap;
        self.map_change_requested = true;
    }

    /// Consume a pending map reload request.
    pub fn take_map_change(&mut self) -> bool {
        std::mem::take(&mut self.map_change_requested)
    }
}
