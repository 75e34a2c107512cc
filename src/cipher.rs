//! The 32-bit mixing cipher every draw is built from.
//!
//! This is Bob Jenkins' "small fast" generator: a 128 bit state split into
//! one state word and three seed words. It is not cryptographically secure.

/// Number of seed words carried next to the state word.
pub(crate) const SEED_WORDS: usize = 3;

/// Run one round of the cipher.
///
/// Returns `(output, next_state, next_seeds)`. The output word always equals
/// `next_seeds[2]`.
#[inline]
pub(crate) fn step(state: u32, seeds: [u32; SEED_WORDS]) -> (u32, u32, [u32; SEED_WORDS]) {
    let seed4 = state.wrapping_sub(seeds[0].rotate_left(27));
    let next_state = seeds[0] ^ seeds[1].rotate_left(17);
    let next_seeds = [
        seeds[1].wrapping_add(seeds[2]),
        seeds[2].wrapping_add(seed4),
        seed4.wrapping_add(next_state),
    ];
    (next_seeds[2], next_state, next_seeds)
}

#[cfg(test)]
mod tests {
    use super::step;

    #[test]
    fn all_zero_is_a_fixed_point() {
        assert_eq!(step(0, [0; 3]), (0, 0, [0; 3]));
    }

    #[test]
    fn known_round() {
        // seed4 = 1 - (2 <<< 27) wraps around.
        let (out, state, seeds) = step(1, [2, 3, 4]);
        assert_eq!(state, 0x0006_0002);
        assert_eq!(seeds, [7, 0xf000_0005, 0xf006_0003]);
        assert_eq!(out, seeds[2]);
    }

    #[test]
    fn output_is_last_seed_word() {
        let mut state = 0xf1ea_5eed;
        let mut seeds = [1, 2, 3];
        for _ in 0..64 {
            let (out, s, w) = step(state, seeds);
            assert_eq!(out, w[2]);
            state = s;
            seeds = w;
        }
    }
}
