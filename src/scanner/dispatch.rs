// Fri Jan 16 2026 - Alex

use crate::pattern::{Pattern, PatternScanResult};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder, ThreadPoolBuildError};

/// Fans a batch of patterns out over worker threads. Result `i` always
/// belongs to pattern `i`, and each worker only writes the slots it owns.
pub struct Dispatcher {
    pool: Option<ThreadPool>,
    workers: usize,
}

impl Dispatcher {
    /// Runs on rayon's global pool.
    pub fn global() -> Self {
        Self {
            pool: None,
            workers: rayon::current_num_threads(),
        }
    }

    pub fn with_threads(threads: usize) -> Result<Self, ThreadPoolBuildError> {
        let threads = threads.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("sigscan-worker-{}", i))
            .build()?;
        log::debug!("Built dedicated scan pool with {} workers", threads);
        Ok(Self {
            pool: Some(pool),
            workers: threads,
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn is_dedicated(&self) -> bool {
        self.pool.is_some()
    }

    /// Applies `scan` to every pattern and blocks until all are done.
    ///
    /// Without `load_balance` the batch is cut into one contiguous chunk per
    /// worker. With it, patterns are handed out one at a time so a few
    /// expensive ones cannot hold a whole chunk back.
    pub fn run<F>(
        &self,
        patterns: &[Pattern],
        load_balance: bool,
        scan: F,
    ) -> Vec<PatternScanResult>
    where
        F: Fn(&Pattern) -> PatternScanResult + Sync,
    {
        let mut results = vec![PatternScanResult::NOT_FOUND; patterns.len()];
        if patterns.is_empty() {
            return results;
        }

        match &self.pool {
            Some(pool) => pool.install(|| self.fill(&mut results, patterns, load_balance, &scan)),
            None => self.fill(&mut results, patterns, load_balance, &scan),
        }

        results
    }

    fn fill<F>(
        &self,
        results: &mut [PatternScanResult],
        patterns: &[Pattern],
        load_balance: bool,
        scan: &F,
    )
    where
        F: Fn(&Pattern) -> PatternScanResult + Sync,
    {
        let record = |slot: &mut PatternScanResult, pattern: &Pattern| {
            *slot = scan(pattern);
            log::trace!("{} -> {}", pattern, slot);
        };

        if load_balance {
            results
                .par_iter_mut()
                .zip(patterns.par_iter())
                .with_max_len(1)
                .for_each(|(slot, pattern)| record(slot, pattern));
        } else {
            let chunk_size = patterns.len().div_ceil(self.workers.max(1));
            results
                .par_chunks_mut(chunk_size)
                .zip(patterns.par_chunks(chunk_size))
                .for_each(|(slots, chunk)| {
                    for (slot, pattern) in slots.iter_mut().zip(chunk) {
                        record(slot, pattern);
                    }
                });
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::global()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{parse_all, PatternCache};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn numbered_patterns(count: usize) -> Vec<Pattern> {
        let sources: Vec<String> = (0..count).map(|i| format!("{:02X}", i)).collect();
        parse_all(&sources).unwrap()
    }

    #[test]
    fn test_empty_batch() {
        let dispatcher = Dispatcher::global();
        let calls = AtomicUsize::new(0);
        let results = dispatcher.run(&[], true, |_| {
            calls.fetch_add(1, Ordering::Relaxed);
            PatternScanResult::NOT_FOUND
        });
        assert!(results.is_empty());
        assert_eq!(calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_order_preserved_in_both_modes() {
        let patterns = numbered_patterns(37);
        let dispatcher = Dispatcher::with_threads(4).unwrap();
        assert!(dispatcher.is_dedicated());
        assert_eq!(dispatcher.workers(), 4);

        for load_balance in [false, true] {
            let results = dispatcher.run(&patterns, load_balance, |p| {
                PatternScanResult::found(p.simple().bytes()[0] as usize)
            });
            let offsets: Vec<i32> = results.iter().map(|r| r.offset).collect();
            assert_eq!(offsets, (0..37).collect::<Vec<i32>>());
        }
    }

    #[test]
    fn test_every_pattern_scanned_once() {
        let patterns = numbered_patterns(100);
        let calls = AtomicUsize::new(0);
        let results = Dispatcher::with_threads(3).unwrap().run(&patterns, false, |_| {
            calls.fetch_add(1, Ordering::Relaxed);
            PatternScanResult::NOT_FOUND
        });
        assert_eq!(results.len(), 100);
        assert_eq!(calls.load(Ordering::Relaxed), 100);
    }

    #[test]
    fn test_cached_duplicates_scanned_about_once() {
        let keys = ["AA BB", "CC ?? DD", "0F 1E 2D", "E8 ?? ?? ?? ??", "FF"];
        let sources: Vec<String> = (0..600)
            .map(|i| {
                let key = keys[i % keys.len()];
                match i % 3 {
                    0 => key.to_string(),
                    1 => key.to_lowercase(),
                    _ => key
                        .chars()
                        .enumerate()
                        .map(|(j, c)| if j % 2 == 0 { c.to_ascii_lowercase() } else { c })
                        .collect(),
                }
            })
            .collect();
        let patterns = parse_all(&sources).unwrap();
        let workers = 4;
        let dispatcher = Dispatcher::with_threads(workers).unwrap();

        let cache = PatternCache::new();
        let scans = AtomicUsize::new(0);
        let results = dispatcher.run(&patterns, true, |p| {
            cache.get_or_insert_with(p.source(), || {
                scans.fetch_add(1, Ordering::Relaxed);
                PatternScanResult::found(p.len())
            })
        });

        let scans = scans.load(Ordering::Relaxed);
        assert_eq!(cache.size(), keys.len());
        assert!(scans >= keys.len());
        // A key can only be scanned again by a worker that missed before the
        // first insert landed.
        assert!(scans <= keys.len() * workers, "{} scans", scans);
        for (pattern, result) in patterns.iter().zip(results) {
            assert_eq!(result, PatternScanResult::found(pattern.len()));
        }
    }

    #[test]
    fn test_fewer_patterns_than_workers() {
        let patterns = numbered_patterns(2);
        let results = Dispatcher::with_threads(8)
            .unwrap()
            .run(&patterns, false, |_| PatternScanResult::found(1));
        assert_eq!(results, vec![PatternScanResult::found(1); 2]);
    }
}
