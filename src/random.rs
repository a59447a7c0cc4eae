//! Seeded pseudo-random numbers for reproducible planning.
//!
//! Every planning and refinement call builds its own [`SeededRandom`] from a
//! seed and threads it through its helpers, so identical inputs always replay
//! the same sequence of draws. The generator is Mulberry32: a 32-bit state,
//! not suitable for anything security related.

use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Increment added to the state on every draw.
const MULBERRY_INCREMENT: u32 = 0x6D2B_79F5;

/// Normalizer mapping a `u32` output onto `[0, 1)`.
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Deterministic generator seeded from a 32-bit integer.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    /// Create a generator from a numeric seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Create a generator from any [`Seed`].
    pub fn from_seed(seed: &Seed) -> Self {
        Self::new(seed.to_u32())
    }

    /// Advance the state and return the raw 32-bit output.
    fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let s = self.state;
        let mut t = (s ^ (s >> 15)).wrapping_mul(1 | s);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t)) ^ t;
        t ^ (t >> 14)
    }

    /// Next float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.step()) / TWO_POW_32
    }

    /// Next float in `[low, low + span)`.
    pub fn next_in(&mut self, low: f64, span: f64) -> f64 {
        low + self.next_f64() * span
    }
}

impl RngCore for SeededRandom {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.step());
        let lo = u64::from(self.step());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Derive a seed from text with a 31x rolling hash over UTF-16 code units.
///
/// The hash wraps as a signed 32-bit integer and the absolute value is
/// returned, so `i32::MIN` maps to `2^31`.
///
/// # Examples
/// ```
/// use align::random::string_to_seed;
/// assert_eq!(string_to_seed(""), 0);
/// assert_eq!(string_to_seed("hello"), 99_162_322);
/// ```
pub fn string_to_seed(text: &str) -> u32 {
    let hash = text.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });
    hash.unsigned_abs()
}

/// A planning seed: either a number or text that gets hashed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    Number(i64),
    Text(String),
}

impl Seed {
    /// Resolve to the 32-bit generator state.
    ///
    /// Numbers keep their low 32 bits, matching integer truncation of the state.
    pub fn to_u32(&self) -> u32 {
        match self {
            Self::Number(n) => *n as u32,
            Self::Text(text) => string_to_seed(text),
        }
    }

    /// Parse a CLI value: integers become numeric seeds, anything else is text.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Text(raw.to_string()),
        }
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<i64> for Seed {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Seed {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Seed {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(text) => write!(f, "\"{}\"", text),
        }
    }
}

/// Shuffle a copy of `items` with a back-to-front Fisher-Yates pass.
pub fn shuffle<T: Clone>(items: &[T], rng: &mut SeededRandom) -> Vec<T> {
    let mut result = items.to_vec();
    for i in (1..result.len()).rev() {
        let j = (rng.next_f64() * (i + 1) as f64).floor() as usize;
        result.swap(i, j);
    }
    result
}

/// Pick `n` items from a deterministic shuffle of `items`.
pub fn pick_n<T: Clone>(items: &[T], n: usize, rng: &mut SeededRandom) -> Vec<T> {
    let mut shuffled = shuffle(items, rng);
    shuffled.truncate(n);
    shuffled
}
