//! Unbiased integer generation by progressive refinement.
//!
//! A stream of 32-bit words is read as the base-2^32 digits of a uniform
//! fraction `u` in `[0, 1)`. After each digit the candidate interval for
//! `floor(u * top)` is narrowed; once both ends agree the result is exact,
//! so no modulo bias is introduced and `top` has no upper limit.

use std::collections::VecDeque;

use num::{BigInt, One, Zero};

use super::digest::{block_to_words, Block};

/// Returns `floor(u * top)` where `u` is the fraction spelled out by the
/// words of successive blocks from `next_block`.
///
/// `top` must be positive; callers check this. A fresh block is only
/// requested once every word of the previous one has been consumed.
pub(crate) fn refine_integer<F>(top: &BigInt, mut next_block: F) -> BigInt
where
    F: FnMut() -> Block,
{
    debug_assert!(top > &BigInt::zero());

    let mut sum = BigInt::zero();
    let mut power = BigInt::one();
    let mut words: VecDeque<u32> = VecDeque::with_capacity(4);
    let mut drawn = 0usize;

    loop {
        let word = match words.pop_front() {
            Some(word) => word,
            None => {
                let [first, rest @ ..] = block_to_words(&next_block());
                words.extend(rest);
                first
            }
        };
        drawn += 1;

        sum = (sum << 32u32) + BigInt::from(word);
        power = power << 32u32;

        let lower = (&sum * top) / &power;
        let upper = ((&sum + BigInt::one()) * top) / &power;

        if lower == upper {
            tracing::trace!(words = drawn, "Integer refinement settled");
            return lower;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::digest::{fold_digest, sha512};
    use proptest::prelude::*;

    fn repeating(pattern: [u8; 2]) -> Block {
        let mut block = [0u8; 16];
        for pair in block.chunks_exact_mut(2) {
            pair.copy_from_slice(&pattern);
        }
        block
    }

    #[test]
    fn test_single_word_settles_small_top() {
        let block = repeating([0x1e, 0xfe]);
        let mut calls = 0;
        let n = refine_integer(&BigInt::from(20), || {
            calls += 1;
            block
        });
        assert_eq!(n, BigInt::from(2));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_range_offset_example() {
        let block = repeating([0x1e, 0xfe]);
        let n = refine_integer(&BigInt::from(22), || block);
        assert_eq!(n + BigInt::from(7), BigInt::from(9));
    }

    #[test]
    fn test_top_of_one_is_always_zero() {
        let n = refine_integer(&BigInt::one(), || [0x42; 16]);
        assert_eq!(n, BigInt::zero());
    }

    #[test]
    fn test_large_top_draws_multiple_blocks() {
        let top = BigInt::one() << 300u32;
        let mut calls = 0;
        let n = refine_integer(&top, || {
            calls += 1;
            [0xa5; 16]
        });
        assert!(n < top);
        // 300 bits need at least ten 32-bit words.
        assert!(calls >= 3);
    }

    #[test]
    fn test_zero_digits_give_zero() {
        for top in [2u64, 3, 7, 10, 1000, u64::MAX] {
            let n = refine_integer(&BigInt::from(top), || [0u8; 16]);
            assert_eq!(n, BigInt::zero());
        }
    }

    #[test]
    fn test_block_requested_only_when_words_run_out() {
        // Zero digits settle once 2^(32 * words) exceeds top.
        for (bits, blocks) in [(96u32, 1), (127, 1), (128, 2), (159, 2), (160, 2)] {
            let top = BigInt::one() << bits;
            let mut calls = 0;
            let n = refine_integer(&top, || {
                calls += 1;
                [0u8; 16]
            });
            assert_eq!(n, BigInt::zero());
            assert_eq!(calls, blocks, "top = 2^{}", bits);
        }
    }

    proptest! {
        #[test]
        fn prop_result_is_in_range(top in 1u64.., seed in any::<[u8; 16]>()) {
            let top = BigInt::from(top);
            let mut counter = 0u64;
            let n = refine_integer(&top, || {
                counter += 1;
                fold_digest(&sha512(&[&seed, &counter.to_be_bytes()]))
            });
            prop_assert!(n >= BigInt::zero());
            prop_assert!(n < top);
        }
    }
}
