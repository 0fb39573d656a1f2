//! Real-input DFT (RDFT) in the packed in-place layout.
//!
//! A length-`n` real sequence is transformed through a half-length complex
//! FFT followed by a split post-processing step (or the mirror image of that
//! for the inverse). The spectrum of a real signal is stored back into the
//! same `n` slots:
//!
//! | index        | content                        |
//! |--------------|--------------------------------|
//! | `0`          | `Re X[0]` (DC)                 |
//! | `1`          | `Re X[n/2]` (Nyquist)          |
//! | `2k`, `2k+1` | `Re X[k]`, `Im X[k]`, `0<k<n/2`|
//!
//! with `X[k] = Σ x[j]·e^{-2πi jk/n}`. The inverse consumes that layout and
//! is unnormalized: `inverse(forward(x)) = n·x`.

use alloc::vec::Vec;

use crate::fft::{build_twiddles, try_vec, Direction, Fft, FftError};
use crate::num::{Complex, Float};

/// Number of real samples that make up a complex pair.
pub const STRIDE: usize = 2;

/// Scalar used for halving values during post-processing.
pub const HALF: f32 = 0.5;

/// Largest supported order; `2^MAX_ORDER` is still exact in `f32`.
pub const MAX_ORDER: u32 = 24;

/// In-place real transform seam used by the DCT contexts.
///
/// Implementations are built for one order and one direction and may keep
/// private scratch state between calls. The inverse must be unnormalized:
/// `inverse(forward(x)) = n·x`.
pub trait RdftEngine<T: Float>: Sized {
    /// Build an engine for `2^bits` samples.
    fn new(bits: u32, direction: Direction) -> Result<Self, FftError>;

    /// Number of real samples processed per call.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn direction(&self) -> Direction;

    /// Transform `data` in place using the packed layout.
    fn process(&mut self, data: &mut [T]) -> Result<(), FftError>;
}

/// Default [`RdftEngine`] built on [`Fft`].
#[derive(Debug, Clone)]
pub struct Rdft<T: Float> {
    bits: u32,
    len: usize,
    direction: Direction,
    fft: Fft<T>,
    /// `exp(sign·2πi·k/len)` for `k = 0..len/2`.
    twiddles: Vec<Complex<T>>,
    scratch: Vec<Complex<T>>,
}

impl<T: Float> Rdft<T> {
    pub fn bits(&self) -> u32 {
        self.bits
    }

    fn forward(&mut self, data: &mut [T]) -> Result<(), FftError> {
        let m = self.len / STRIDE;
        for (k, z) in self.scratch.iter_mut().enumerate() {
            *z = Complex::new(data[STRIDE * k], data[STRIDE * k + 1]);
        }
        self.fft.process(&mut self.scratch)?;

        // DC and Nyquist are both real; pack them into the first pair.
        let y0 = self.scratch[0];
        data[0] = y0.re + y0.im;
        data[1] = y0.re - y0.im;

        let half = T::from_f32(HALF);
        for k in 1..m {
            let a = self.scratch[k];
            let b = self.scratch[m - k].conj();
            let t = self.twiddles[k].mul(a.sub(b)).mul_i();
            let x = a.add(b).sub(t).scale(half);
            data[STRIDE * k] = x.re;
            data[STRIDE * k + 1] = x.im;
        }
        Ok(())
    }

    fn inverse(&mut self, data: &mut [T]) -> Result<(), FftError> {
        let m = self.len / STRIDE;
        self.scratch[0] = Complex::new(data[0] + data[1], data[0] - data[1]);
        for k in 1..m {
            let j = m - k;
            let a = Complex::new(data[STRIDE * k], data[STRIDE * k + 1]);
            let b = Complex::new(data[STRIDE * j], data[STRIDE * j + 1]).conj();
            let t = self.twiddles[k].mul(a.sub(b)).mul_i();
            self.scratch[k] = a.add(b).add(t);
        }
        self.fft.process(&mut self.scratch)?;

        for (k, z) in self.scratch.iter().enumerate() {
            data[STRIDE * k] = z.re;
            data[STRIDE * k + 1] = z.im;
        }
        Ok(())
    }
}

impl<T: Float> RdftEngine<T> for Rdft<T> {
    fn new(bits: u32, direction: Direction) -> Result<Self, FftError> {
        if bits == 0 || bits > MAX_ORDER {
            return Err(FftError::InvalidValue);
        }
        let len = 1usize << bits;
        let m = len / STRIDE;

        let fft = Fft::new(m, direction)?;

        let twiddles = build_twiddles(len, direction)?;
        let mut scratch = try_vec(m)?;
        scratch.resize(m, Complex::zero());

        Ok(Self {
            bits,
            len,
            direction,
            fft,
            twiddles,
            scratch,
        })
    }

    fn len(&self) -> usize {
        self.len
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn process(&mut self, data: &mut [T]) -> Result<(), FftError> {
        if data.len() != self.len {
            return Err(FftError::MismatchedLengths);
        }
        match self.direction {
            Direction::Forward => self.forward(data),
            Direction::Inverse => self.inverse(data),
        }
    }
}
