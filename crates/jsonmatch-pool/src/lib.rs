// SPDX-License-Identifier: MIT OR Apache-2.0
//! Buffer pooling for jsonmatch
//!
//! Comparisons of large documents need a transient lookup map per document.
//! [`SharedPool`] keeps those buffers around between comparisons so they are
//! allocated once and reused. The pool is safe to share between threads:
//! idle buffers live behind a mutex and are checked out one at a time.
//!
//! A checked-out buffer is a [`Pooled`] guard. It is cleared on checkout and
//! goes back to the pool when dropped, so early returns cannot leak it.

#![warn(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]

use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::hash::{BuildHasher, Hash};
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A buffer that can be emptied for reuse without releasing its capacity
pub trait Recycle: Default {
    /// Remove all contents, keeping allocated capacity
    fn recycle(&mut self);
}

impl<K, V, S: BuildHasher + Default> Recycle for HashMap<K, V, S> {
    fn recycle(&mut self) {
        self.clear();
    }
}

impl<T, S: BuildHasher + Default> Recycle for HashSet<T, S>
where
    T: Hash + Eq,
{
    fn recycle(&mut self) {
        self.clear();
    }
}

impl<T> Recycle for Vec<T> {
    fn recycle(&mut self) {
        self.clear();
    }
}

/// How many idle buffers a pool retains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolStrategy {
    /// Keep every returned buffer
    Unbounded,
    /// Keep at most `max_buffers` idle buffers; extras are dropped
    SizeLimited {
        /// Idle buffer cap
        max_buffers: usize,
    },
}

impl PoolStrategy {
    const fn admits(self, idle: usize) -> bool {
        match self {
            Self::Unbounded => true,
            Self::SizeLimited { max_buffers } => idle < max_buffers,
        }
    }
}

impl Default for PoolStrategy {
    fn default() -> Self {
        Self::SizeLimited { max_buffers: 32 }
    }
}

/// Thread-safe pool of reusable buffers
#[derive(Debug)]
pub struct SharedPool<T: Recycle> {
    idle: Mutex<Vec<T>>,
    strategy: PoolStrategy,
    outstanding: AtomicUsize,
    created: AtomicUsize,
}

impl<T: Recycle> SharedPool<T> {
    /// Create an empty pool
    #[must_use]
    pub fn new(strategy: PoolStrategy) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            strategy,
            outstanding: AtomicUsize::new(0),
            created: AtomicUsize::new(0),
        }
    }

    /// Check out a cleared buffer, allocating one if none is idle
    pub fn acquire(&self) -> Pooled<'_, T> {
        let reused = self.idle.lock().pop();
        let mut buffer = reused.unwrap_or_else(|| {
            self.created.fetch_add(1, Ordering::Relaxed);
            T::default()
        });
        buffer.recycle();
        self.outstanding.fetch_add(1, Ordering::Relaxed);
        Pooled { pool: self, buffer }
    }

    fn release(&self, mut buffer: T) {
        self.outstanding.fetch_sub(1, Ordering::Relaxed);
        buffer.recycle();
        let mut idle = self.idle.lock();
        if self.strategy.admits(idle.len()) {
            idle.push(buffer);
        }
    }

    /// Buffers currently idle in the pool
    #[must_use]
    pub fn idle_count(&self) -> usize {
        self.idle.lock().len()
    }

    /// Buffers currently checked out
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Relaxed)
    }

    /// Buffers allocated over the pool's lifetime
    #[must_use]
    pub fn created(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }

    /// The retention strategy
    #[must_use]
    pub const fn strategy(&self) -> PoolStrategy {
        self.strategy
    }
}

impl<T: Recycle> Default for SharedPool<T> {
    fn default() -> Self {
        Self::new(PoolStrategy::default())
    }
}

/// A buffer checked out of a [`SharedPool`]
///
/// Returned to the pool on drop.
#[derive(Debug)]
pub struct Pooled<'p, T: Recycle> {
    pool: &'p SharedPool<T>,
    buffer: T,
}

impl<T: Recycle> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.buffer
    }
}

impl<T: Recycle> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.buffer
    }
}

impl<T: Recycle> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buffer));
    }
}
