//! Unopinionated standalone utilities.

mod rng;
pub use rng::{srng, Logos, RngExt};

pub type FastHasher = rustc_hash::FxHasher;

/// Good default concrete rng.
pub type GameRng = rand_xorshift::XorShiftRng;
