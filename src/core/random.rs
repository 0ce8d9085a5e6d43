//! Deterministic, seedable randomness for spawn placement.
//!
//! xorshift32 keeps the engine reproducible in tests without pulling in an
//! RNG dependency for three numbers per spawned tag.

#[inline]
pub fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

/// Uniform f32 in [0, 1)
#[inline]
pub fn next_f32(state: &mut u32) -> f32 {
    (xorshift32(state) >> 8) as f32 / (1u32 << 24) as f32
}

/// Uniform f32 in [min, max)
#[inline]
pub fn range_f32(state: &mut u32, min: f32, max: f32) -> f32 {
    min + next_f32(state) * (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_stays_within_bounds() {
        let mut state = 12345u32;
        for _ in 0..1000 {
            let v = range_f32(&mut state, 10.0, 20.0);
            assert!((10.0..20.0).contains(&v));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = 777u32;
        let mut b = 777u32;
        for _ in 0..100 {
            assert_eq!(xorshift32(&mut a), xorshift32(&mut b));
        }
    }
}
