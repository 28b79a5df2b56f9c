use world::{Buttons, Input};

/// Seconds added or removed per duration adjustment.
const DURATION_STEP: u32 = 5;

const MAX_DURATION: u32 = 255;

const DEFAULT_DURATION: u32 = 10;

/// Operator picked an effect from the manual menu.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Confirm {
    pub index: usize,
    /// Chosen duration, zero asks to stop a running effect.
    pub secs: u32,
}

/// Controller-driven menu for forcing effects on and off.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ManualControl {
    open: bool,
    cursor: usize,
    secs: u32,
}

impl Default for ManualControl {
    fn default() -> Self {
        ManualControl {
            open: false,
            cursor: 0,
            secs: DEFAULT_DURATION,
        }
    }
}

impl ManualControl {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn secs(&self) -> u32 {
        self.secs
    }

    /// Apply this frame's button presses to a menu over `len` entries.
    pub fn handle(&mut self, input: &Input, len: usize) -> Option<Confirm> {
        if input.is_pressed(Buttons::L) {
            self.open = !self.open;
            return None;
        }
        if !self.open || len == 0 {
            return None;
        }

        if input.is_pressed(Buttons::D_LEFT) {
            self.cursor = (self.cursor + len - 1) % len;
        } else if input.is_pressed(Buttons::D_RIGHT) {
            self.cursor = (self.cursor + 1) % len;
        } else if input.is_pressed(Buttons::D_UP) {
            self.secs = (self.secs + DURATION_STEP).min(MAX_DURATION);
        } else if input.is_pressed(Buttons::D_DOWN) {
            self.secs = self.secs.saturating_sub(DURATION_STEP);
        } else if input.is_pressed(Buttons::R) {
            return Some(Confirm {
                index: self.cursor % len,
                secs: self.secs,
            });
        }
        None
    }
}
