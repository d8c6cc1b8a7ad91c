// Deterministic, stateless noise source.
//
// Implements the classic sine-fract hash: the fractional part of
// `sin(seed) * 10000`, normalized into [0, 1). This is a hand-rolled
// primitive with zero external dependencies, chosen so that the same seed
// always yields the same value on any machine, with no stored random state.
//
// This crate is the single source of "randomness" for the entire Waymeadow
// project: `waymeadow_sim` derives every tree placement from it, seeding by
// block geometry or fixed counters — never by wall clock, entropy, or array
// position. Two blocks with identical geometry therefore always scatter
// identically, which callers rely on when regenerating scenery wholesale on
// every configuration change.
//
// **Critical constraint: determinism.** `noise` must be pure and total for
// all finite seeds: no internal state, no reseeding, no source of
// non-determinism. Identical seeds produce bit-identical output within a
// platform (transcendental `sin` precision is the only cross-platform
// caveat).

/// Map a seed to a reproducible pseudo-random value in `[0, 1)`.
///
/// Computed as the fractional part of `sin(seed) * 10000`. Pure and
/// stateless: calling twice with the same seed yields bit-identical results.
pub fn noise(seed: f64) -> f64 {
    let v = seed.sin() * 10_000.0;
    let f = v - v.floor();
    // `v - v.floor()` can round up to exactly 1.0 for tiny negative `v`;
    // the contract is a half-open interval.
    if f >= 1.0 { 0.0 } else { f }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn determinism_same_seed_same_output() {
        for i in -1000..1000 {
            let seed = i as f64 * 0.73;
            assert_eq!(noise(seed).to_bits(), noise(seed).to_bits());
        }
    }

    #[test]
    fn output_in_unit_range() {
        for i in -10_000..10_000 {
            let v = noise(i as f64 * 1.37);
            assert!((0.0..1.0).contains(&v), "noise out of range: {v}");
        }
    }

    #[test]
    fn different_seeds_different_output() {
        // Extremely unlikely to collide on adjacent integer seeds.
        assert_ne!(noise(1.0), noise(2.0));
        assert_ne!(noise(42.0), noise(43.0));
    }

    #[test]
    fn matches_sine_fract_definition() {
        for i in 1..100 {
            let seed = i as f64 * 3.1;
            let v = seed.sin() * 10_000.0;
            let expected = v - v.floor();
            assert_eq!(noise(seed), expected);
        }
    }

    #[test]
    fn defined_for_negative_and_zero_seeds() {
        assert!((0.0..1.0).contains(&noise(0.0)));
        assert!((0.0..1.0).contains(&noise(-1.0)));
        assert!((0.0..1.0).contains(&noise(-123_456.789)));
    }

    #[test]
    fn no_stored_state_between_calls() {
        // Interleaving unrelated seeds must not affect results.
        let a = noise(7.0);
        let _ = noise(99.0);
        let _ = noise(-3.5);
        assert_eq!(a.to_bits(), noise(7.0).to_bits());
    }
}
