//! Permutation building for questions and options

use rand::seq::SliceRandom;
use rand::Rng;
use smallvec::SmallVec;

/// Option orders stay inline for typical multiple-choice questions
pub type OptionOrder = SmallVec<[usize; 8]>;

/// Build the question display order: identity, shuffled in place iff `shuffle`
///
/// `SliceRandom::shuffle` is an unbiased Fisher–Yates shuffle.
#[inline]
pub fn display_order<R: Rng + ?Sized>(len: usize, shuffle: bool, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    if shuffle {
        order.shuffle(rng);
    }
    order
}

/// Build the order in which a question's options are presented
#[inline]
pub fn option_order<R: Rng + ?Sized>(len: usize, shuffle: bool, rng: &mut R) -> OptionOrder {
    let mut order: OptionOrder = (0..len).collect();
    if shuffle {
        order.shuffle(rng);
    }
    order
}

/// Whether `order` contains each index in `0..len` exactly once
pub fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &i in order {
        match seen.get_mut(i) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_identity_without_shuffle() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(display_order(4, false, &mut rng), vec![0, 1, 2, 3]);
        assert_eq!(option_order(3, false, &mut rng).as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn test_empty_order() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(display_order(0, true, &mut rng).is_empty());
        assert!(option_order(0, true, &mut rng).is_empty());
    }

    #[test]
    fn test_same_seed_same_order() {
        let a = display_order(20, true, &mut StdRng::seed_from_u64(7));
        let b = display_order(20, true, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[2, 0, 1], 3));
        assert!(!is_permutation(&[0, 0, 1], 3));
        assert!(!is_permutation(&[0, 1], 3));
        assert!(!is_permutation(&[0, 1, 3], 3));
    }

    #[test]
    fn test_shuffle_distribution() {
        // Position of element 0 after shuffling two items should be roughly uniform
        let mut rng = StdRng::seed_from_u64(99);
        let mut first = [0u32, 0u32];

        for _ in 0..1000 {
            let order = display_order(2, true, &mut rng);
            first[order[0]] += 1;
        }

        let ratio = first[0] as f64 / first[1] as f64;
        assert!(ratio > 0.6 && ratio < 1.4);
    }
}
