//! Adjacent-pair traversal of filing histories, on rayon when enabled.

use crate::types::DiffConfig;

/// Applies `f(older, newer)` to every adjacent pair of a newest-first slice.
///
/// The result has `items.len() - 1` entries (none for fewer than two items)
/// in the same newest-first order. Pairs go to rayon only when the
/// `parallel` feature is compiled in and `config` allows it for the pair
/// count.
#[allow(unused_variables)]
pub fn map_adjacent_pairs<T, U, F>(items: &[T], config: &DiffConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T, &T) -> U + Sync + Send,
{
    let pairs = items.len().saturating_sub(1);

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(pairs) {
            return items.par_windows(2).map(|w| f(&w[1], &w[0])).collect();
        }
    }

    let mut out = Vec::with_capacity(pairs);
    for w in items.windows(2) {
        out.push(f(&w[1], &w[0]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_are_older_then_newer() {
        let config = DiffConfig::sequential();
        let quarters = [40, 30, 20, 10];
        let steps = map_adjacent_pairs(&quarters, &config, |older, newer| newer - older);
        assert_eq!(steps, vec![10, 10, 10]);
    }

    #[test]
    fn test_short_inputs() {
        let config = DiffConfig::sequential();
        let none: [u8; 0] = [];
        assert!(map_adjacent_pairs(&none, &config, |a, b| (*a, *b)).is_empty());
        assert!(map_adjacent_pairs(&[1], &config, |a, b| (*a, *b)).is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let items: Vec<u64> = (0..1_000).rev().collect();
        let sequential = map_adjacent_pairs(&items, &DiffConfig::sequential(), |a, b| a * 1_000 + b);
        let threaded = map_adjacent_pairs(
            &items,
            &DiffConfig::default().with_threshold(2),
            |a, b| a * 1_000 + b,
        );
        assert_eq!(sequential, threaded);
        assert_eq!(sequential.len(), 999);
    }
}
