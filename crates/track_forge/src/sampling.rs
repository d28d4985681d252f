//! Crate-internal randomness primitives.
//!
//! Every random draw in the crate goes through [rand01] so that callers can
//! inject any [rand::RngCore] implementation and get reproducible output
//! from a seeded generator.
use rand::RngCore;

/// Generate a random float in the range [0, 1].
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Uniform draw from [lo, hi).
#[inline]
pub(crate) fn rand_range(rng: &mut dyn RngCore, lo: f32, hi: f32) -> f32 {
    lo + rand01(rng) * (hi - lo)
}

/// Uniform integer draw from [0, n). Returns 0 when `n` is 0.
#[inline]
pub(crate) fn rand_index(rng: &mut dyn RngCore, n: usize) -> usize {
    ((rand01(rng) * n as f32) as usize).min(n.saturating_sub(1))
}

/// Random boolean that is `true` with the given probability.
#[inline]
pub(crate) fn rand_bool(rng: &mut dyn RngCore, probability: f32) -> bool {
    rand01(rng) < probability
}

#[cfg(test)]
pub(crate) struct FixedRng {
    pub value: u32,
}

#[cfg(test)]
impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        self.value
    }

    fn next_u64(&mut self) -> u64 {
        self.value as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let bytes = self.value.to_le_bytes();
        for (i, b) in dest.iter_mut().enumerate() {
            *b = bytes[i % 4];
        }
    }
}
