use rand::Rng;

/// Returns a shuffled copy of `items` using the thread-local RNG. The input is left untouched.
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::rng())
}

/// Fisher-Yates over a copy of `items`: walk the tail down, swapping each slot with a uniformly
/// chosen slot at or before it.
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    let mut current = shuffled.len();

    while current > 1 {
        let pick = rng.random_range(0..current);
        current -= 1;
        shuffled.swap(current, pick);
    }

    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn sorted<T: Ord + Clone>(items: &[T]) -> Vec<T> {
        let mut v = items.to_vec();
        v.sort();
        v
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        for len in [0usize, 1, 2, 3, 16, 100] {
            let input: Vec<usize> = (0..len).collect();
            let output = shuffle_with(&input, &mut rng);
            assert_eq!(output.len(), input.len());
            assert_eq!(sorted(&output), input);
        }
    }

    #[test]
    fn test_shuffle_keeps_duplicates() {
        let input = vec!["a", "a", "b", "c", "c", "c"];
        let output = shuffle(&input);
        assert_eq!(sorted(&output), sorted(&input));
    }

    #[test]
    fn test_shuffle_does_not_mutate_input() {
        let input = vec![1, 2, 3, 4, 5];
        let _ = shuffle(&input);
        assert_eq!(input, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_shuffle_is_deterministic_for_a_seed() {
        let input: Vec<u32> = (0..16).collect();
        let a = shuffle_with(&input, &mut StdRng::seed_from_u64(42));
        let b = shuffle_with(&input, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_reaches_every_ordering() {
        // 3 elements have 6 orderings; a few hundred draws should hit all of them.
        let mut rng = StdRng::seed_from_u64(1);
        let input = ['x', 'y', 'z'];
        let seen: HashSet<Vec<char>> = (0..600).map(|_| shuffle_with(&input, &mut rng)).collect();
        assert_eq!(seen.len(), 6);
    }
}
