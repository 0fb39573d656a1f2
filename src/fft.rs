//! Complex Fast Fourier Transform used underneath the real transforms.
//!
//! [`Fft`] is a power-of-two, in-place, radix-2 Stockham auto-sort FFT. Each
//! instance owns its twiddle table and a scratch buffer, so it carries private
//! state between calls and is driven through `&mut self`. Neither direction is
//! normalized: running the forward and then the inverse transform scales the
//! input by its length.

use alloc::vec::Vec;
use core::fmt;

use crate::num::{Complex, Float};

/// Transform direction, fixed when an engine is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Kernel `e^{-2πi jk/n}`.
    Forward,
    /// Kernel `e^{+2πi jk/n}`, without a `1/n` factor.
    Inverse,
}

impl Direction {
    /// Sign of the exponent in the transform kernel.
    #[inline]
    pub(crate) fn sign<T: Float>(self) -> T {
        match self {
            Direction::Forward => -T::one(),
            Direction::Inverse => T::one(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Inverse => write!(f, "inverse"),
        }
    }
}

/// Errors reported by the FFT and RDFT engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    /// The buffer or requested length was zero.
    EmptyInput,
    /// The requested length is not a power of two.
    NonPowerOfTwo,
    /// The buffer length differs from the length the engine was built for.
    MismatchedLengths,
    /// A length or order cannot be represented or is out of range.
    InvalidValue,
    /// Twiddle or scratch storage could not be reserved.
    AllocationFailed,
}

impl fmt::Display for FftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FftError::EmptyInput => write!(f, "input is empty"),
            FftError::NonPowerOfTwo => write!(f, "length must be a power of two"),
            FftError::MismatchedLengths => {
                write!(f, "buffer length does not match the transform length")
            }
            FftError::InvalidValue => write!(f, "length or order out of range"),
            FftError::AllocationFailed => write!(f, "failed to allocate transform storage"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}

/// Reserve exactly `len` elements, reporting failure instead of aborting.
pub(crate) fn try_vec<T>(len: usize) -> Result<Vec<T>, FftError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| FftError::AllocationFailed)?;
    Ok(v)
}

/// Build `len/2` twiddles `exp(sign·2πi·k/len)` for `k = 0..len/2`.
///
/// Angles are evaluated in `f64` and narrowed, so `f32` tables do not
/// accumulate recurrence error.
pub(crate) fn build_twiddles<T: Float>(
    len: usize,
    direction: Direction,
) -> Result<Vec<Complex<T>>, FftError> {
    let half = len / 2;
    let mut table = try_vec(half)?;
    let step = direction.sign::<f64>() * 2.0 * core::f64::consts::PI / len as f64;
    for k in 0..half {
        let (sin, cos) = libm::sincos(step * k as f64);
        table.push(Complex::new(T::from_f64(cos), T::from_f64(sin)));
    }
    Ok(table)
}

/// In-place complex FFT of a fixed power-of-two length.
#[derive(Debug, Clone)]
pub struct Fft<T: Float> {
    len: usize,
    direction: Direction,
    /// `exp(sign·2πi·k/len)` for `k = 0..len/2`.
    twiddles: Vec<Complex<T>>,
    /// Ping-pong buffer for the Stockham passes.
    scratch: Vec<Complex<T>>,
}

impl<T: Float> Fft<T> {
    /// Plan a transform of `len` points.
    pub fn new(len: usize, direction: Direction) -> Result<Self, FftError> {
        if len == 0 {
            return Err(FftError::EmptyInput);
        }
        if !len.is_power_of_two() {
            return Err(FftError::NonPowerOfTwo);
        }
        let twiddles = build_twiddles(len, direction)?;
        let mut scratch = try_vec(len)?;
        scratch.resize(len, Complex::zero());
        Ok(Self {
            len,
            direction,
            twiddles,
            scratch,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Transform `data` in place.
    pub fn process(&mut self, data: &mut [Complex<T>]) -> Result<(), FftError> {
        if data.len() != self.len {
            return Err(FftError::MismatchedLengths);
        }
        let n = self.len;
        if n == 1 {
            return Ok(());
        }

        // n1 = number of groups, n2 = size of each group in this pass.
        let mut n1 = 1usize;
        let mut n2 = n;
        let mut in_scratch = false;
        while n1 < n {
            n2 >>= 1;
            if in_scratch {
                stockham_pass(&self.scratch, data, &self.twiddles, n1, n2);
            } else {
                stockham_pass(data, &mut self.scratch, &self.twiddles, n1, n2);
            }
            in_scratch = !in_scratch;
            n1 <<= 1;
        }

        if in_scratch {
            data.copy_from_slice(&self.scratch);
        }
        Ok(())
    }
}

/// One radix-2 Stockham pass from `src` into `dst`.
#[inline]
fn stockham_pass<T: Float>(
    src: &[Complex<T>],
    dst: &mut [Complex<T>],
    twiddles: &[Complex<T>],
    n1: usize,
    n2: usize,
) {
    for k in 0..n1 {
        // Twiddle for this group: exp(±2πi * k / (2*n1)) = table[k * n2]
        let w = twiddles[k * n2];
        let base0 = 2 * k * n2;
        let base1 = base0 + n2;
        for j in 0..n2 {
            let u = src[base0 + j];
            let v = src[base1 + j].mul(w);
            dst[k * n2 + j] = u.add(v);
            dst[(k + n1) * n2 + j] = u.sub(v);
        }
    }
}
