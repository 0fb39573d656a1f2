//! Fast DCT-II / DCT-III for power-of-two lengths.
//!
//! Both transforms reduce to one real FFT of the same length plus an `O(n)`
//! recombination before and after it, all done in place:
//!
//! * forward (DCT-II): `X[k] = Σ_j x[j]·cos(π(2j+1)k / 2n)`
//! * inverse (DCT-III): `x[j] = (4/n)·(X[0]/2 + Σ_{k≥1} X[k]·cos(π(2j+1)k / 2n))`
//!
//! so that `inverse(forward(x)) = 2·x`. Neither side is orthonormal; callers
//! that need `√(2/n)` scaling apply it themselves.
//!
//! A context is specialized for one direction at the type level
//! ([`ForwardDct`], [`InverseDct`]); [`DctContext`] wraps either when the
//! direction is only known at runtime.

use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;
use core::marker::PhantomData;

use crate::fft::{try_vec, Direction, FftError};
use crate::num::Float;
use crate::rdft::{Rdft, RdftEngine};
use crate::tables::{CosTable, CosTableSource};

pub use crate::rdft::MAX_ORDER;

/// Smallest supported order (`n = 4`).
pub const MIN_ORDER: u32 = 2;

/// Errors produced while building or running a DCT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DctError {
    /// The order is outside [`MIN_ORDER`]`..=`[`MAX_ORDER`].
    InvalidOrder(u32),
    /// A cosine table resolution outside the supported range was requested.
    InvalidResolution(u32),
    /// The supplied cosine table was built for a different resolution.
    TableMismatch { expected: u32, actual: u32 },
    /// The RDFT engine could not be constructed.
    RdftInit(FftError),
    /// The cosecant table could not be reserved.
    AllocationFailed,
    /// The buffer length differs from the transform length.
    MismatchedLengths { expected: usize, actual: usize },
    /// The RDFT engine rejected a call.
    Rdft(FftError),
}

impl fmt::Display for DctError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DctError::InvalidOrder(bits) => write!(
                f,
                "order {} out of range ({}..={})",
                bits, MIN_ORDER, MAX_ORDER
            ),
            DctError::InvalidResolution(res) => {
                write!(f, "cosine table resolution {} out of range", res)
            }
            DctError::TableMismatch { expected, actual } => write!(
                f,
                "cosine table resolution {} does not match the required {}",
                actual, expected
            ),
            DctError::RdftInit(e) => write!(f, "failed to initialize rdft: {}", e),
            DctError::AllocationFailed => write!(f, "failed to allocate the cosecant table"),
            DctError::MismatchedLengths { expected, actual } => write!(
                f,
                "buffer holds {} samples but the transform length is {}",
                actual, expected
            ),
            DctError::Rdft(e) => write!(f, "rdft failed: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DctError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DctError::RdftInit(e) | DctError::Rdft(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FftError> for DctError {
    fn from(e: FftError) -> Self {
        DctError::Rdft(e)
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::TypeII {}
    impl Sealed for super::TypeIII {}
}

/// Direction marker for a [`Dct`]. Implemented by [`TypeII`] and [`TypeIII`].
pub trait DctKind: sealed::Sealed + Sized {
    const DIRECTION: Direction;

    #[doc(hidden)]
    fn recombine<T: Float, R: RdftEngine<T>>(
        dct: &mut Dct<T, Self, R>,
        data: &mut [T],
    ) -> Result<(), DctError>;
}

/// Forward transform (DCT-II).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeII;

/// Inverse transform (DCT-III).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeIII;

impl DctKind for TypeII {
    const DIRECTION: Direction = Direction::Forward;

    #[inline]
    fn recombine<T: Float, R: RdftEngine<T>>(
        dct: &mut Dct<T, Self, R>,
        data: &mut [T],
    ) -> Result<(), DctError> {
        forward(&dct.cos, &mut dct.rdft, data)
    }
}

impl DctKind for TypeIII {
    const DIRECTION: Direction = Direction::Inverse;

    #[inline]
    fn recombine<T: Float, R: RdftEngine<T>>(
        dct: &mut Dct<T, Self, R>,
        data: &mut [T],
    ) -> Result<(), DctError> {
        inverse(&dct.cos, &dct.csc, dct.inv_len, &mut dct.rdft, data)
    }
}

/// DCT context for one order and one direction.
///
/// Owns its cosecant table and RDFT engine; shares the cosine table. The
/// engine keeps scratch state, so `compute` takes `&mut self`. Independent
/// contexts can run on different threads.
#[derive(Debug)]
pub struct Dct<T: Float, K: DctKind, R: RdftEngine<T> = Rdft<T>> {
    bits: u32,
    cos: Arc<CosTable<T>>,
    /// `0.5 / sin(π(2i+1) / 2n)` for `i = 0..n/2`.
    csc: Box<[T]>,
    inv_len: T,
    rdft: R,
    kind: PhantomData<K>,
}

/// Forward (DCT-II) context using the default RDFT engine.
pub type ForwardDct<T> = Dct<T, TypeII>;

/// Inverse (DCT-III) context using the default RDFT engine.
pub type InverseDct<T> = Dct<T, TypeIII>;

fn check_order(bits: u32) -> Result<(), DctError> {
    if (MIN_ORDER..=MAX_ORDER).contains(&bits) {
        Ok(())
    } else {
        Err(DctError::InvalidOrder(bits))
    }
}

fn cosecant_table<T: Float>(n: usize) -> Result<Box<[T]>, DctError> {
    let half = n / 2;
    let mut table = try_vec(half).map_err(|_| DctError::AllocationFailed)?;
    let step = core::f64::consts::PI / (2.0 * n as f64);
    for i in 0..half {
        let angle = step * (2 * i + 1) as f64;
        table.push(T::from_f64(0.5 / libm::sin(angle)));
    }
    Ok(table.into_boxed_slice())
}

impl<T: Float, K: DctKind, R: RdftEngine<T>> Dct<T, K, R> {
    /// Build a context of length `2^bits`, taking the cosine table from
    /// `tables`.
    pub fn new<S>(bits: u32, tables: &S) -> Result<Self, DctError>
    where
        S: CosTableSource<T> + ?Sized,
    {
        check_order(bits)?;
        let table = tables.cos_table(bits + 2)?;
        Self::with_table(bits, table)
    }

    /// Build a context around an existing cosine table of resolution
    /// `bits + 2`.
    pub fn with_table(bits: u32, cos: Arc<CosTable<T>>) -> Result<Self, DctError> {
        check_order(bits)?;
        let expected = bits + 2;
        if cos.resolution() != expected {
            return Err(DctError::TableMismatch {
                expected,
                actual: cos.resolution(),
            });
        }

        let n = 1usize << bits;
        let csc = cosecant_table(n)?;
        let rdft = R::new(bits, K::DIRECTION).map_err(|e| {
            debug_log!("dct: rdft init failed for order {}: {}", bits, e);
            DctError::RdftInit(e)
        })?;
        debug_log!("dct: {} context ready, n = {}", K::DIRECTION, n);

        Ok(Self {
            bits,
            cos,
            csc,
            inv_len: T::from_f64(1.0 / n as f64),
            rdft,
            kind: PhantomData,
        })
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Transform length `n`.
    pub fn len(&self) -> usize {
        1 << self.bits
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn direction(&self) -> Direction {
        K::DIRECTION
    }

    /// The shared cosine table this context reads.
    pub fn cos_table(&self) -> &Arc<CosTable<T>> {
        &self.cos
    }

    pub fn cosecant_table(&self) -> &[T] {
        &self.csc
    }

    /// Transform `data` in place. `data` must hold exactly [`len`](Self::len)
    /// samples; otherwise it is left untouched and an error is returned.
    pub fn compute(&mut self, data: &mut [T]) -> Result<(), DctError> {
        let expected = self.len();
        if data.len() != expected {
            return Err(DctError::MismatchedLengths {
                expected,
                actual: data.len(),
            });
        }
        K::recombine(self, data)
    }

    /// Copy `input` into `output` and transform `output`.
    pub fn compute_into(&mut self, input: &[T], output: &mut [T]) -> Result<(), DctError> {
        if input.len() != output.len() {
            return Err(DctError::MismatchedLengths {
                expected: output.len(),
                actual: input.len(),
            });
        }
        output.copy_from_slice(input);
        self.compute(output)
    }
}

/// DCT-II: fold, forward RDFT, then a descending recombination sweep.
fn forward<T: Float, R: RdftEngine<T>>(
    cos: &CosTable<T>,
    rdft: &mut R,
    data: &mut [T],
) -> Result<(), DctError> {
    let n = data.len();
    let half = T::from_f32(0.5);

    for i in 0..n / 2 {
        let a = data[i];
        let b = data[n - 1 - i];
        let s = cos.sin(2 * i + 1);
        let m = (a + b) * half;
        let t = s * (a - b);
        data[i] = m + t;
        data[n - 1 - i] = m - t;
    }

    rdft.process(data)?;

    let mut next = data[1] * half;
    data[1] = -data[1];

    // Must run high to low: slot i+1 receives the running sum before the
    // next lower pair is read.
    for i in (0..n).step_by(2).rev() {
        let inr = data[i];
        let ini = data[i + 1];
        let c = cos.cos(i);
        let s = cos.sin(i);
        data[i] = c * inr + s * ini;
        data[i + 1] = next;
        next += s * inr - c * ini;
    }
    Ok(())
}

/// DCT-III: descending butterfly sweep, inverse RDFT, then unfold with the
/// cosecant correction.
fn inverse<T: Float, R: RdftEngine<T>>(
    cos: &CosTable<T>,
    csc: &[T],
    inv_len: T,
    rdft: &mut R,
    data: &mut [T],
) -> Result<(), DctError> {
    let n = data.len();
    let carry = data[n - 1];

    // High to low, so data[i - 1] and data[i + 1] are still the inputs.
    for i in (2..n).step_by(2).rev() {
        let val1 = data[i];
        let val2 = data[i - 1] - data[i + 1];
        let c = cos.cos(i);
        let s = cos.sin(i);
        data[i] = c * val1 + s * val2;
        data[i + 1] = s * val1 - c * val2;
    }
    data[1] = carry + carry;

    rdft.process(data)?;

    for i in 0..n / 2 {
        let mut tmp1 = data[i] * inv_len;
        let tmp2 = data[n - 1 - i] * inv_len;
        let corr = csc[i] * (tmp1 - tmp2);
        tmp1 += tmp2;
        data[i] = tmp1 + corr;
        data[n - 1 - i] = tmp1 - corr;
    }
    Ok(())
}

/// A DCT context whose direction is chosen at runtime.
#[derive(Debug)]
pub enum DctContext<T: Float, R: RdftEngine<T> = Rdft<T>> {
    Forward(Dct<T, TypeII, R>),
    Inverse(Dct<T, TypeIII, R>),
}

impl<T: Float, R: RdftEngine<T>> DctContext<T, R> {
    /// Build a context of length `2^bits` for `direction`.
    pub fn new<S>(bits: u32, direction: Direction, tables: &S) -> Result<Self, DctError>
    where
        S: CosTableSource<T> + ?Sized,
    {
        match direction {
            Direction::Forward => Dct::new(bits, tables).map(DctContext::Forward),
            Direction::Inverse => Dct::new(bits, tables).map(DctContext::Inverse),
        }
    }

    /// Like [`new`](Self::new) but with an explicit cosine table.
    pub fn with_table(
        bits: u32,
        direction: Direction,
        cos: Arc<CosTable<T>>,
    ) -> Result<Self, DctError> {
        match direction {
            Direction::Forward => Dct::with_table(bits, cos).map(DctContext::Forward),
            Direction::Inverse => Dct::with_table(bits, cos).map(DctContext::Inverse),
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            DctContext::Forward(_) => Direction::Forward,
            DctContext::Inverse(_) => Direction::Inverse,
        }
    }

    pub fn bits(&self) -> u32 {
        match self {
            DctContext::Forward(d) => d.bits(),
            DctContext::Inverse(d) => d.bits(),
        }
    }

    pub fn len(&self) -> usize {
        1 << self.bits()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Transform `data` in place in the context's direction.
    pub fn compute(&mut self, data: &mut [T]) -> Result<(), DctError> {
        match self {
            DctContext::Forward(d) => d.compute(data),
            DctContext::Inverse(d) => d.compute(data),
        }
    }
}

impl<T: Float, R: RdftEngine<T>> From<Dct<T, TypeII, R>> for DctContext<T, R> {
    fn from(dct: Dct<T, TypeII, R>) -> Self {
        DctContext::Forward(dct)
    }
}

impl<T: Float, R: RdftEngine<T>> From<Dct<T, TypeIII, R>> for DctContext<T, R> {
    fn from(dct: Dct<T, TypeIII, R>) -> Self {
        DctContext::Inverse(dct)
    }
}


#[cfg(all(feature = "internal-tests", test))]
mod coverage_tests {
    use super::*;
    use alloc::vec::Vec;
    use proptest::prop_assert;
    use proptest::proptest;

    proptest! {
        #[test]
        fn prop_forward_inverse_doubles(bits in 2u32..9, ref signal in proptest::collection::vec(-1000.0f64..1000.0, 256)) {
            let n = 1usize << bits;
            let table = Arc::new(CosTable::new(bits + 2).unwrap());
            let mut fwd = ForwardDct::with_table(bits, Arc::clone(&table)).unwrap();
            let mut inv = InverseDct::with_table(bits, table).unwrap();
            let x: Vec<f64> = signal.iter().take(n).cloned().collect();
            let mut data = x.clone();
            fwd.compute(&mut data).unwrap();
            inv.compute(&mut data).unwrap();
            for (a, b) in data.iter().zip(x.iter()) {
                prop_assert!((a - 2.0 * b).abs() < 1e-8);
            }
        }

        #[test]
        fn prop_forward_is_linear(alpha in -4.0f64..4.0, beta in -4.0f64..4.0, ref x in proptest::collection::vec(-100.0f64..100.0, 32), ref y in proptest::collection::vec(-100.0f64..100.0, 32)) {
            let mut dct = ForwardDct::<f64>::with_table(5, Arc::new(CosTable::new(7).unwrap())).unwrap();
            let mut mixed: Vec<f64> = x.iter().zip(y.iter()).map(|(a, b)| alpha * a + beta * b).collect();
            let mut dx = x.clone();
            let mut dy = y.clone();
            dct.compute(&mut mixed).unwrap();
            dct.compute(&mut dx).unwrap();
            dct.compute(&mut dy).unwrap();
            for k in 0..32 {
                prop_assert!((mixed[k] - (alpha * dx[k] + beta * dy[k])).abs() < 1e-7);
            }
        }
    }
}
