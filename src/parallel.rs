//! Row-band parallel execution for the per-pixel kernels.
//!
//! Every kernel in this crate processes rows independently: a row only reads
//! its own inputs and writes its own output slice. [`for_each_row`] splits the
//! rows into contiguous bands and runs one band per scoped thread. No state
//! is shared between bands.

use std::num::NonZeroUsize;
use std::thread;

/// How many workers a kernel may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parallelism {
    /// Run on the calling thread.
    Sequential,
    /// Use at most this many threads.
    Threads(NonZeroUsize),
    /// One thread per available core.
    Auto,
}

impl Default for Parallelism {
    /// `Auto` with the `parallel` feature, `Sequential` without it.
    fn default() -> Self {
        if cfg!(feature = "parallel") {
            Parallelism::Auto
        } else {
            Parallelism::Sequential
        }
    }
}

impl Parallelism {
    /// Number of workers to use for `rows` independent rows (at least 1).
    pub fn workers(self, rows: usize) -> usize {
        let n = match self {
            Parallelism::Sequential => 1,
            Parallelism::Threads(n) => n.get(),
            Parallelism::Auto => thread::available_parallelism().map_or(1, NonZeroUsize::get),
        };
        n.min(rows).max(1)
    }
}

/// Call `f(y, item)` for every row, spreading contiguous row bands over
/// scoped worker threads.
///
/// Runs inline when only one worker is warranted.
pub(crate) fn for_each_row<I, F>(par: Parallelism, rows: Vec<(usize, I)>, f: F)
where
    I: Send,
    F: Fn(usize, I) + Sync,
{
    let workers = par.workers(rows.len());
    if workers <= 1 {
        for (y, item) in rows {
            f(y, item);
        }
        return;
    }

    let band = (rows.len() + workers - 1) / workers;
    let f = &f;
    thread::scope(|s| {
        let mut rest = rows;
        while !rest.is_empty() {
            let tail = rest.split_off(band.min(rest.len()));
            let chunk = std::mem::replace(&mut rest, tail);
            s.spawn(move || {
                for (y, item) in chunk {
                    f(y, item);
                }
            });
        }
    });
}
