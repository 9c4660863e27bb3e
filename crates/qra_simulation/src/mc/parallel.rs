//! Rayon-based execution of per-risk tasks.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::error::SimulationError;

/// Builds a dedicated pool of at most `max_parallelism` workers.
pub(crate) fn build_pool(max_parallelism: usize) -> Result<ThreadPool, SimulationError> {
    ThreadPoolBuilder::new()
        .num_threads(max_parallelism.max(1))
        .thread_name(|i| format!("qra-sim-{}", i))
        .build()
        .map_err(|e| SimulationError::ThreadPool(e.to_string()))
}

/// Maps `task` over `items` in parallel, passing each item's position.
///
/// Results come back in input order. The first error is returned and
/// the remaining results are discarded.
pub(crate) fn try_map_ordered<T, R, E, F>(
    pool: &ThreadPool,
    items: &[T],
    task: F,
) -> Result<Vec<R>, E>
where
    T: Sync,
    R: Send,
    E: Send,
    F: Fn(usize, &T) -> Result<R, E> + Sync + Send,
{
    pool.install(|| {
        items
            .par_iter()
            .enumerate()
            .map(|(i, item)| task(i, item))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_preserved() {
        let pool = build_pool(4).unwrap();
        let items: Vec<u64> = (0..1000).collect();
        let out: Result<Vec<u64>, ()> = try_map_ordered(&pool, &items, |i, &x| {
            assert_eq!(i as u64, x);
            Ok(x * 2)
        });
        let out = out.unwrap();
        assert_eq!(out.len(), 1000);
        assert!(out.iter().enumerate().all(|(i, &x)| x == 2 * i as u64));
    }

    #[test]
    fn test_error_aborts() {
        let pool = build_pool(2).unwrap();
        let items: Vec<u32> = (0..100).collect();
        let out: Result<Vec<u32>, String> = try_map_ordered(&pool, &items, |_, &x| {
            if x == 42 {
                Err(format!("failed at {}", x))
            } else {
                Ok(x)
            }
        });
        assert_eq!(out.unwrap_err(), "failed at 42");
    }

    #[test]
    fn test_single_thread_pool() {
        let pool = build_pool(1).unwrap();
        assert_eq!(pool.current_num_threads(), 1);
    }
}
