use std::str::FromStr;

use anyhow::{bail, Context};
use glam::{vec3, IVec2};
use util::{srng, Logos};
use world::{
    Actor, Background, Badge, Battle, Buttons, GameMode, Item, Npc,
    PlayerData, PlayerMove, Prop, World,
};

use engine::{effects, Config, Scheduler};

use crate::view;

/// Seconds between the starts of scripted battles.
const BATTLE_PERIOD_SECS: u64 = 40;

/// Seconds a scripted battle lasts.
const BATTLE_SECS: u64 = 15;

/// Scripted button press for a single frame.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Press {
    pub frame: u64,
    pub buttons: Buttons,
}

impl FromStr for Press {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((frame, buttons)) = s.split_once(':') else {
            bail!("bad press {s:?}, expected FRAME:BUTTONS");
        };
        let frame = frame.trim().parse::<u64>().context("bad frame number")?;
        let buttons = buttons.parse::<Buttons>().map_err(anyhow::Error::msg)?;
        Ok(Press { frame, buttons })
    }
}

/// Headless stand-in for the host game loop.
pub struct Driver {
    pub world: World,
    pub scheduler: Scheduler,
    presses: Vec<Press>,
}

impl Driver {
    pub fn new(
        config: Config,
        seed: &Logos,
        mut presses: Vec<Press>,
    ) -> anyhow::Result<Self> {
        let scheduler = Scheduler::new(config, effects::catalog(), srng(seed))?;
        presses.sort_by_key(|p| p.frame);
        Ok(Driver {
            world: demo_world(),
            scheduler,
            presses,
        })
    }

    pub fn run(&mut self, frames: u64) {
        for _ in 0..frames {
            self.step();
        }
    }

    /// Run one game frame.
    pub fn step(&mut self) {
        let frame = self.world.frame;
        let raw = self
            .presses
            .iter()
            .filter(|p| p.frame == frame)
            .fold(Buttons::empty(), |a, p| a | p.buttons);

        self.script_battles();
        self.world.begin_frame(raw, IVec2::ZERO);
        self.scheduler.update(&mut self.world);

        if self.world.take_map_change() {
            // Map reload finishes on the next frame.
            self.world.background.load(demo_background());
        } else if self.world.mode == GameMode::ChangeMap {
            self.world.mode = GameMode::World;
        }

        for sound in self.world.audio.drain() {
            log::debug!("frame {frame}: sound {sound:?}");
        }
        for cue in self.world.take_cues() {
            log::debug!("frame {frame}: {cue:?}");
        }

        let fps = self.scheduler.config().fps as u64;
        if frame % fps == 0 {
            let lines = self.scheduler.overlay();
            if !lines.is_empty() {
                log::info!("{}", view::overlay_text(&lines));
            }
        }

        self.world.end_frame();
    }

    /// Drop the player into a battle every now and then.
    fn script_battles(&mut self) {
        let fps = self.scheduler.config().fps as u64;
        let t = self.world.frame % (BATTLE_PERIOD_SECS * fps);
        let w = &mut self.world;

        if t == (BATTLE_PERIOD_SECS - BATTLE_SECS) * fps && !w.is_battle() {
            log::info!("battle starts");
            w.mode = GameMode::Battle;
            w.battle = Some(demo_battle());
        } else if t == 0 && w.is_battle() {
            log::info!("battle ends");
            w.mode = GameMode::World;
            w.battle = None;
        }
    }
}

fn demo_background() -> Background {
    Background {
        palette: (0..world::PALETTE_LEN as u16).map(|i| i * 0x0101).collect(),
        width: 320,
        height: 240,
        ..Default::default()
    }
}

fn demo_battle() -> Battle {
    Battle {
        player: Actor::new(-1, 10, vec3(-95.0, 0.0, 0.0)),
        partner: Some(Actor::new(-2, 10, vec3(-130.0, 0.0, -10.0))),
        enemies: vec![
            Some(Actor::new(0, 5, vec3(10.0, 0.0, 0.0))),
            Some(Actor::new(1, 5, vec3(50.0, 0.0, 0.0))),
            None,
            Some(Actor::new(3, 12, vec3(90.0, 0.0, 0.0))),
        ],
        usable_moves: vec![
            PlayerMove::Jump,
            PlayerMove::Hammer,
            PlayerMove::Item,
            PlayerMove::DoNothing,
        ],
        target_count: 3,
        ..Default::default()
    }
}

fn demo_world() -> World {
    let mut items = [None; world::inventory::ITEM_SLOTS];
    items[0] = Some(Item::Mushroom);
    items[1] = Some(Item::SuperShroom);
    items[2] = Some(Item::FireFlower);

    World {
        data: PlayerData {
            cur_hp: 10,
            max_hp: 10,
            cur_fp: 5,
            max_fp: 5,
            max_bp: 3,
            coins: 100,
            badges: vec![Badge::new(1, 1), Badge::new(2, 1), Badge::new(3, 2)],
            items,
            ..Default::default()
        },
        npcs: vec![
            Npc::new(0, vec3(100.0, 0.0, 40.0)),
            Npc::new(1, vec3(-60.0, 0.0, 120.0)),
        ],
        entities: vec![Prop {
            pos: vec3(20.0, 0.0, -80.0),
        }],
        background: demo_background(),
        ..Default::default()
    }
}
