//! Player stats, items and badges.
use serde::{Deserialize, Serialize};

/// Maximum number of badges that can be equipped at once.
pub const MAX_EQUIPPED: usize = 64;

/// Number of item slots in the player's pouch.
pub const ITEM_SLOTS: usize = 10;

pub const MAX_COINS: i32 = 999;
pub const MAX_STAR_POINTS: i32 = 99;

#[derive(
    Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Item {
    Mushroom,
    VoltShroom,
    SuperShroom,
    UltraShroom,
    LifeShroom,
    HoneyShroom,
    MapleShroom,
    JellyShroom,
    DriedShroom,
    FireFlower,
    SnowmanDoll,
    HoneySyrup,
}

impl Item {
    /// Mushrooms are the items that can spoil into a dried shroom.
    pub fn is_mushroom(self) -> bool {
        use Item::*;
        matches!(
            self,
            Mushroom
                | VoltShroom
                | SuperShroom
                | UltraShroom
                | LifeShroom
                | HoneyShroom
                | MapleShroom
                | JellyShroom
        )
    }
}

/// Badge with its badge point cost.
#[derive(
    Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize,
)]
pub struct Badge {
    pub id: u16,
    pub cost: i32,
}

impl Badge {
    pub const fn new(id: u16, cost: i32) -> Self {
        Badge { id, cost }
    }
}

#[derive(Clone, Default, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PlayerData {
    pub cur_hp: i32,
    pub max_hp: i32,
    pub cur_fp: i32,
    pub max_fp: i32,
    pub max_bp: i32,
    pub coins: i32,
    pub star_points: i32,
    /// Badges owned.
    pub badges: Vec<Badge>,
    /// Badges currently equipped, kept compact with no gaps.
    pub equipped: Vec<Badge>,
    pub items: [Option<Item>; ITEM_SLOTS],
}

impl PlayerData {
    pub fn equipped_cost(&self) -> i32 {
        self.equipped.iter().map(|b| b.cost).sum()
    }

    pub fn available_bp(&self) -> i32 {
        self.max_bp - self.equipped_cost()
    }

    pub fn is_equipped(&self, badge: Badge) -> bool {
        self.equipped.contains(&badge)
    }

    /// Owned badges that are not equipped and fit in the free badge points.
    pub fn equippable_badges(&self) -> Vec<Badge> {
        let available = self.available_bp();
        if available <= 0 || self.equipped.len() >= MAX_EQUIPPED {
            return Vec::new();
        }

        self.badges
            .iter()
            .copied()
            .filter(|&b| b.cost <= available && !self.is_equipped(b))
            .collect()
    }

    /// Item slot indices holding mushrooms.
    pub fn mushroom_slots(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| {
                slot.filter(|it| it.is_mushroom()).map(|_| i)
            })
            .collect()
    }

    pub fn add_coins(&mut self, n: i32) {
        self.coins = (self.coins + n).clamp(0, MAX_COINS);
    }

    pub fn add_star_points(&mut self, n: i32) {
        self.star_points = (self.star_points + n).clamp(0, MAX_STAR_POINTS);
    }
}
