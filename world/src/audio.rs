use serde::{Deserialize, Serialize};

#[derive(
    Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize,
)]
pub enum Sound {
    HeartPickup,
    FlowerPickup,
    CoinPickup,
    StarPointPickup,
    BadgeEquip,
    BadgeUnequip,
    Peril,
    PointSwap,
    HitBones,
    StarSpiritsAppear,
}

#[derive(
    Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize,
)]
pub enum Song {
    ItemUpgrade,
}

/// Fire-and-forget audio trigger sink.
///
/// The actual mixer lives elsewhere and drains the queued triggers once per
/// frame.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct Audio {
    played: Vec<Sound>,
    songs: Vec<Song>,
    resets: usize,
}

impl Audio {
    pub fn play(&mut self, sound: Sound) {
        log::trace!("sfx {sound:?}");
        self.played.push(sound);
    }

    pub fn push_song(&mut self, song: Song) {
        self.songs.push(song);
    }

    pub fn pop_song(&mut self) -> Option<Song> {
        self.songs.pop()
    }

    /// Song stack pushed on top of the map music.
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Stop secondary songs, ambient sounds and reset the sound effect
    /// player.
    pub fn reset(&mut self) {
        self.songs.clear();
        self.played.clear();
        self.resets += 1;
    }

    pub fn reset_count(&self) -> usize {
        self.resets
    }

    /// Sounds triggered since the last drain.
    pub fn played(&self) -> &[Sound] {
        &self.played
    }

    pub fn drain(&mut self) -> Vec<Sound> {
        std::mem::take(&mut self.played)
    }
}
