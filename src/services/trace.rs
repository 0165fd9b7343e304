//! System trace audit numbers stamped on every envelope.

use rand::Rng;
use std::sync::atomic::{AtomicU32, Ordering};

/// Upper bound (exclusive) of a trace number.
pub const TRACE_NUMBER_LIMIT: u32 = 9999;

/// Source of trace numbers, shared across concurrent requests.
pub trait TraceNumberSource: Send + Sync {
    fn next_trace_number(&self) -> u32;
}

/// Uniformly random numbers in `0..TRACE_NUMBER_LIMIT`.
#[derive(Debug, Default)]
pub struct RandomTraceNumbers;

impl TraceNumberSource for RandomTraceNumbers {
    fn next_trace_number(&self) -> u32 {
        rand::rng().random_range(0..TRACE_NUMBER_LIMIT)
    }
}

/// Counter wrapping at `TRACE_NUMBER_LIMIT`.
#[derive(Debug, Default)]
pub struct SequentialTraceNumbers {
    counter: AtomicU32,
}

impl SequentialTraceNumbers {
    pub fn starting_at(start: u32) -> Self {
        Self {
            counter: AtomicU32::new(start % TRACE_NUMBER_LIMIT),
        }
    }
}

impl TraceNumberSource for SequentialTraceNumbers {
    fn next_trace_number(&self) -> u32 {
        // the closure always returns Some, so Err is unreachable
        self.counter
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| {
                Some((n + 1) % TRACE_NUMBER_LIMIT)
            })
            .unwrap_or_else(|n| n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_numbers_stay_in_range() {
        let source = RandomTraceNumbers;
        for _ in 0..1000 {
            assert!(source.next_trace_number() < TRACE_NUMBER_LIMIT);
        }
    }

    #[test]
    fn sequential_numbers_increment_and_wrap() {
        let source = SequentialTraceNumbers::starting_at(9997);
        assert_eq!(source.next_trace_number(), 9997);
        assert_eq!(source.next_trace_number(), 9998);
        assert_eq!(source.next_trace_number(), 0);
        assert_eq!(source.next_trace_number(), 1);
    }

    #[test]
    fn sequential_numbers_are_unique_across_threads() {
        let source = std::sync::Arc::new(SequentialTraceNumbers::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let source = source.clone();
                std::thread::spawn(move || {
                    (0..100)
                        .map(|_| source.next_trace_number())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all: Vec<u32> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 400);
    }
}
