use world::{Buttons, Cue, GameMode, World};

/// How long the cooldown notice stays up.
const NOTICE_TICKS: u32 = 90;

/// Frames to wait for the pause menu to close before reloading.
const UNPAUSE_DELAY: u32 = 5;

/// Emergency room reload for when chaos leaves the player stuck.
///
/// Hold R and press D-Down.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct Reload {
    cooldown: u32,
    notice: u32,
    delay: u32,
    pending: bool,
}

impl Reload {
    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn update(&mut self, w: &mut World, cooldown_ticks: u32) {
        self.cooldown = self.cooldown.saturating_sub(1);

        if self.notice > 0 {
            self.notice -= 1;
            w.cue(Cue::Notice("Reload cooldown active".into()));
        }

        if w.input.is_held(Buttons::R) && w.input.is_pressed(Buttons::D_DOWN)
        {
            if self.cooldown > 0 {
                log::debug!("reload refused, cooldown {}", self.cooldown);
                self.notice = NOTICE_TICKS;
                return;
            }
            self.start(w, cooldown_ticks);
        }

        if !self.pending {
            return;
        }
        if self.delay > 0 {
            self.delay -= 1;
            return;
        }
        self.pending = false;
        w.change_map();
    }

    fn start(&mut self, w: &mut World, cooldown_ticks: u32) {
        log::info!("reloading room");
        w.audio.reset();
        w.player.input_disabled = true;

        if w.mode == GameMode::Pause {
            w.mode = GameMode::Unpause;
            self.delay = UNPAUSE_DELAY;
        } else {
            self.delay = 0;
        }
        self.cooldown = cooldown_ticks;
        self.pending = true;
    }
}
