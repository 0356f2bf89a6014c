//! RNG oracle for deterministic random number generation.
//!
//! Powers draw randomness only through this module (e.g. the push applied
//! to a freshly summoned digger). Every peer derives the same seed from the
//! game seed, the turn and the caster, so lockstep sessions stay in sync.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Generate a random value in `0..n`; zero when `n` is zero.
    fn below(&self, seed: u64, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.next_u32(seed) % n
    }

    /// Generate a random value in `-spread..=spread`.
    fn spread(&self, seed: u64, spread: u16) -> i32 {
        let width = 2 * u32::from(spread) + 1;
        i32::try_from(self.below(seed, width)).unwrap_or(0) - i32::from(spread)
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// `state' = state * multiplier + increment (mod 2^64)`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Independent draws made while resolving one cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum SeedContext {
    ImpulseX = 0,
    ImpulseY = 1,
}

/// Compute a deterministic seed for one draw.
///
/// # Arguments
///
/// * `game_seed` - Base seed set at game start
/// * `turn` - Current game turn
/// * `caster` - Player resolving the cast
/// * `context` - Which draw of the cast this is
pub fn compute_seed(game_seed: u64, turn: u64, caster: u8, context: SeedContext) -> u64 {
    // SplitMix64 / FxHash multipliers
    let mut hash = game_seed;
    hash ^= turn.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(caster).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context as u32).wrapping_mul(0x85ebca6b);

    // Final avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
