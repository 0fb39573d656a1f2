//! Shared cosine tables.
//!
//! A [`CosTable`] of resolution `r` samples one quarter-wave of a cosine
//! whose full period is `2^r` points. The DCT of order `bits` reads the
//! table of resolution `bits + 2`, where index `i` holds `cos(π·i/(2n))`
//! and the mirrored index `n - i` doubles as `sin(π·i/(2n))`.
//!
//! Tables are immutable once built and handed out behind [`Arc`], so any
//! number of transform contexts can read the same table concurrently.
//! [`CosTableRegistry`] caches them per resolution.

use alloc::boxed::Box;
use alloc::sync::Arc;

use crate::dct::DctError;
use crate::num::Float;
use crate::rdft::MAX_ORDER;

#[cfg(feature = "std")]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

/// Smallest table resolution (a single quarter-wave step).
pub const MIN_RESOLUTION: u32 = 2;

/// Largest table resolution, enough for a DCT of order [`MAX_ORDER`].
pub const MAX_RESOLUTION: u32 = MAX_ORDER + 2;

/// Read-only quarter-wave cosine table.
#[derive(Debug, Clone, PartialEq)]
pub struct CosTable<T: Float> {
    resolution: u32,
    /// `cos(2π·i / 2^resolution)` for `i = 0..=2^(resolution-2)`.
    values: Box<[T]>,
}

impl<T: Float> CosTable<T> {
    /// Build the table for a full period of `2^resolution` samples.
    pub fn new(resolution: u32) -> Result<Self, DctError> {
        if !(MIN_RESOLUTION..=MAX_RESOLUTION).contains(&resolution) {
            return Err(DctError::InvalidResolution(resolution));
        }
        Ok(Self::build(resolution))
    }

    /// `resolution` must already be validated.
    fn build(resolution: u32) -> Self {
        let quarter = 1usize << (resolution - 2);
        let step = 2.0 * core::f64::consts::PI / (quarter * 4) as f64;
        let values = (0..=quarter)
            .map(|i| T::from_f64(libm::cos(step * i as f64)))
            .collect();
        Self { resolution, values }
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Number of steps in the stored quarter-wave (`2^(resolution-2)`).
    pub fn quarter(&self) -> usize {
        self.values.len() - 1
    }

    /// `cos(2π·i / 2^resolution)` for `i` in `0..=quarter()`.
    #[inline(always)]
    pub fn cos(&self, i: usize) -> T {
        self.values[i]
    }

    /// `sin(2π·i / 2^resolution)` for `i` in `0..=quarter()`, read from the
    /// mirrored cosine entry.
    #[inline(always)]
    pub fn sin(&self, i: usize) -> T {
        self.values[self.quarter() - i]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }
}

/// Something that can hand out shared cosine tables.
pub trait CosTableSource<T: Float> {
    fn cos_table(&self, resolution: u32) -> Result<Arc<CosTable<T>>, DctError>;
}

/// One lazily built table per resolution.
#[cfg(feature = "std")]
type Slots<T> = HashMap<u32, Arc<OnceLock<Arc<CosTable<T>>>>>;

/// Thread-safe cache of [`CosTable`]s keyed by resolution.
///
/// The map lock is only held while looking up the slot for a resolution.
/// Each slot is a [`OnceLock`], so a table is built exactly once even when
/// several threads ask for the same resolution at the same time, and
/// tables of different resolutions can be built in parallel. Every request
/// for a resolution returns the same [`Arc`].
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct CosTableRegistry<T: Float> {
    tables: Mutex<Slots<T>>,
}

#[cfg(feature = "std")]
impl<T: Float> Default for CosTableRegistry<T> {
    fn default() -> Self {
        Self {
            tables: Mutex::new(HashMap::new()),
        }
    }
}

#[cfg(feature = "std")]
impl<T: Float> CosTableRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of resolutions with a built table.
    pub fn len(&self) -> usize {
        self.lock().values().filter(|slot| slot.get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the table for `resolution` has been built.
    pub fn contains(&self, resolution: u32) -> bool {
        self.lock()
            .get(&resolution)
            .is_some_and(|slot| slot.get().is_some())
    }

    // A panic while holding the lock cannot leave the map half-updated.
    fn lock(&self) -> MutexGuard<'_, Slots<T>> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(feature = "std")]
impl<T: Float> CosTableSource<T> for CosTableRegistry<T> {
    fn cos_table(&self, resolution: u32) -> Result<Arc<CosTable<T>>, DctError> {
        if !(MIN_RESOLUTION..=MAX_RESOLUTION).contains(&resolution) {
            return Err(DctError::InvalidResolution(resolution));
        }
        let slot = Arc::clone(self.lock().entry(resolution).or_default());
        let table = slot.get_or_init(|| {
            debug_log!("tables: building cosine table, resolution {}", resolution);
            Arc::new(CosTable::build(resolution))
        });
        Ok(Arc::clone(table))
    }
}
