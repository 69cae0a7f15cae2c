//! Injectable random source for dice rolls, shuffles, and pursuit checks.
//!
//! All randomness in the simulation flows through a single [`RandomSource`]
//! owned by the session. Production code uses [`PcgRng`]; tests substitute
//! `ScriptedRng` (feature `test-utils`) to force specific outcomes.

/// Random source capability shared by the graph builder, resolver, and tracker.
///
/// Implementations only need to provide the two primitives; dice helpers are
/// derived from them.
pub trait RandomSource {
    /// Uniform integer in `[min, max]` inclusive. Returns `min` when `min >= max`.
    fn int_in_range(&mut self, min: u32, max: u32) -> u32;

    /// Uniform float in `[0, 1)`.
    fn next_float(&mut self) -> f64;

    /// Roll a die with N sides (1-N inclusive).
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.int_in_range(1, sides.max(1))
    }

    /// Roll a d100 (1-100 inclusive).
    ///
    /// Used for accuracy rolls.
    fn roll_d100(&mut self) -> u32 {
        self.roll_die(100)
    }

    /// Roll a d10 (1-10 inclusive).
    fn roll_d10(&mut self) -> u32 {
        self.roll_die(10)
    }

    /// Returns true with probability `probability`.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_float() < probability
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn int_in_range(&mut self, min: u32, max: u32) -> u32 {
        (**self).int_in_range(min, max)
    }

    fn next_float(&mut self) -> f64 {
        (**self).next_float()
    }
}

/// Picks a uniformly random element of `items`.
pub fn pick<'a, T>(rng: &mut (impl RandomSource + ?Sized), items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let index = rng.int_in_range(0, (items.len() - 1) as u32) as usize;
    items.get(index)
}

/// Fisher-Yates shuffle in place.
pub fn shuffle<T>(rng: &mut (impl RandomSource + ?Sized), items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.int_in_range(0, i as u32) as usize;
        items.swap(i, j);
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 64-bit state, 32-bit output. Same seed always produces
/// the same sequence, which keeps seeded sessions reproducible.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator from a seed.
    pub fn seeded(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.state = Self::pcg_step(rng.state.wrapping_add(seed));
        rng
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Generates the next raw 32-bit value.
    pub fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }
}

impl RandomSource for PcgRng {
    fn int_in_range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = u64::from(max - min) + 1;
        min + (u64::from(self.next_u32()) % span) as u32
    }

    fn next_float(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }
}

/// Random source that replays scripted values.
///
/// Integer requests pop the next scripted integer and clamp it into the
/// requested range, so scripting `95` for a d100 yields exactly 95. Float
/// requests pop the next scripted float. Exhausted scripts fall back to the
/// range minimum and `0.0` respectively.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    ints: std::collections::VecDeque<u32>,
    floats: std::collections::VecDeque<f64>,
}

#[cfg(any(test, feature = "test-utils"))]
impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source that replays the given integers.
    pub fn with_ints(ints: impl IntoIterator<Item = u32>) -> Self {
        Self {
            ints: ints.into_iter().collect(),
            floats: Default::default(),
        }
    }

    /// Appends integers to the script.
    pub fn push_ints(&mut self, ints: impl IntoIterator<Item = u32>) -> &mut Self {
        self.ints.extend(ints);
        self
    }

    /// Appends floats to the script.
    pub fn push_floats(&mut self, floats: impl IntoIterator<Item = f64>) -> &mut Self {
        self.floats.extend(floats);
        self
    }

    /// Number of unread integers.
    pub fn remaining_ints(&self) -> usize {
        self.ints.len()
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl RandomSource for ScriptedRng {
    fn int_in_range(&mut self, min: u32, max: u32) -> u32 {
        match self.ints.pop_front() {
            Some(value) if min < max => value.clamp(min, max),
            _ => min,
        }
    }

    fn next_float(&mut self) -> f64 {
        self.floats.pop_front().unwrap_or(0.0)
    }
}
