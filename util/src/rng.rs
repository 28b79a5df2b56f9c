use std::{fmt, hash::Hash, ops::Neg};
use std::{hash::Hasher, str::FromStr};

use anyhow::bail;
use derive_more::Deref;
use rand::prelude::*;
use rand_xorshift::XorShiftRng;
use serde_with::{DeserializeFromStr, SerializeDisplay};

/// Construct a random number generator seeded by a noise value.
///
/// Use with a `Logos` seed for a reproducible run, or with any varying value
/// for a throwaway generator.
pub fn srng(seed: &(impl Hash + ?Sized)) -> XorShiftRng {
    let mut h = crate::FastHasher::default();
    seed.hash(&mut h);
    XorShiftRng::seed_from_u64(h.finish())
}

/// Strings that are normalized to be case, whitespace and punctuation
/// insensitive. Use as RNG seeds so that trivial transcription errors like an
/// added space can't mess up the seed.
///
/// ```
/// # use util::{Logos, srng};
/// use rand::prelude::*;
///
/// assert_ne!(
///   srng("pAss Word").gen_range(0..1000),
///   srng("password").gen_range(0..1000));
///
/// assert_eq!(
///   srng(&Logos::new("pAss Word")).gen_range(0..1000),
///   srng(&Logos::new("password")).gen_range(0..1000));
/// ```
#[derive(
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Deref,
    SerializeDisplay,
    DeserializeFromStr,
)]
pub struct Logos(String);

impl fmt::Display for Logos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromIterator<char> for Logos {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        const MAX_LEN: usize = 64;

        Logos(
            iter.into_iter()
                .map(|c| c.to_ascii_uppercase())
                .filter(char::is_ascii_alphanumeric)
                .take(MAX_LEN)
                .collect(),
        )
    }
}

impl Logos {
    /// Construct a new logos, stripping out punctuation, whitespace,
    /// character case and non-ASCII characters from the input.
    pub fn new(s: impl AsRef<str>) -> Self {
        s.as_ref().chars().collect()
    }

    /// Generate a random logos of `len` characters.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Logos {
        const CHARS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

        (0..len)
            .map(|_| CHARS[rng.gen_range(0..CHARS.len())] as char)
            .collect()
    }
}

impl FromStr for Logos {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            bail!("not a valid logos")
        } else {
            Ok(Logos(s.into()))
        }
    }
}

pub trait RngExt {
    /// Return `x` or `-x` with equal probability.
    fn flip_sign<T: Neg<Output = T>>(&mut self, x: T) -> T;
}

impl<R: Rng + ?Sized> RngExt for R {
    fn flip_sign<T: Neg<Output = T>>(&mut self, x: T) -> T {
        if self.gen() {
            -x
        } else {
            x
        }
    }
}
