//! Small combinatorial helpers shared by the table builder, the rank-map builder and the
//! evaluator itself: the rank-to-prime table used for multiset products (spec §4.1) and
//! the `C(n, k)` binomial table used by every category's kicker-normalization formula
//! (spec §4.2.1).

/// primes assigned to ranks deuce (2) through ace (41), used to fingerprint a rank
/// multiset as a single product — two 5-card hands share a rank multiset iff their
/// prime products are equal.
pub const RANK_PRIMES: [u64; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// product of primes for the rank multiset described by `counts` (index 0 = deuce).
pub fn prime_product(counts: &[u8; 13]) -> u64 {
    counts
        .iter()
        .zip(RANK_PRIMES.iter())
        .map(|(&c, &p)| p.pow(c as u32))
        .product()
}

/// `C(n, k)`, zero when `k > n` or either operand is out of the small range this
/// evaluator ever calls it with (`n <= 12`, `k <= 5`).
pub fn choose(n: i64, k: i64) -> u32 {
    if k < 0 || n < 0 || k > n {
        return 0;
    }
    let mut result: u64 = 1;
    for i in 0..k {
        result = result * (n - i) as u64 / (i + 1) as u64;
    }
    result as u32
}

/// the combinatorial rank-5 index used by high-card/flush scoring: a bijection from
/// strictly-descending 5-tuples of ranks (0..=12) onto `0..C(13,5)`.
pub fn rank5_index(ranks_desc: [u8; 5]) -> u32 {
    choose(ranks_desc[0] as i64, 5)
        + choose(ranks_desc[1] as i64, 4)
        + choose(ranks_desc[2] as i64, 3)
        + choose(ranks_desc[3] as i64, 2)
        + choose(ranks_desc[4] as i64, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choose_matches_pascal() {
        assert_eq!(choose(5, 0), 1);
        assert_eq!(choose(5, 5), 1);
        assert_eq!(choose(5, 2), 10);
        assert_eq!(choose(13, 5), 1287);
        assert_eq!(choose(12, 2), 66);
        assert_eq!(choose(12, 3), 220);
    }

    #[test]
    fn choose_out_of_range_is_zero() {
        assert_eq!(choose(3, 5), 0);
        assert_eq!(choose(-1, 2), 0);
    }

    #[test]
    fn prime_product_distinguishes_multisets() {
        let mut pair_of_aces = [0u8; 13];
        pair_of_aces[12] = 2;
        let mut pair_of_kings = [0u8; 13];
        pair_of_kings[11] = 2;
        assert_ne!(prime_product(&pair_of_aces), prime_product(&pair_of_kings));
    }
}
