//! # kdct - Fast power-of-two DCT for Rust
//!
//! DCT-II and DCT-III of length `n = 2^bits` computed in place through a
//! single length-`n` real FFT plus `O(n)` pre- and post-processing.
//!
//! ## Features
//!
//! - **In-place transforms** on `&mut [f32]` / `&mut [f64]`
//! - **Shared cosine tables** cached per resolution and reused by every context
//! - **Direction at the type level** ([`ForwardDct`], [`InverseDct`]) or at runtime ([`DctContext`])
//! - **`no_std` + `alloc`** core, with `std` enabled by default
//! - **Batch and parallel batch processing** (optional)
//!
//! ## Cargo Features
//!
//! - `std` (default): Enable the table registry, runtime configuration and `std::error::Error`
//! - `parallel`: Enable parallel batch processing with Rayon
//! - `verbose-logging`: Emit `log` debug records on context and table construction
//! - `slow`: Direct `O(n²)` reference transforms in [`slow`]
//! - `internal-tests`: Property tests
//!
//! ## Scaling
//!
//! The forward transform is `X[k] = Σ x[j]·cos(π(2j+1)k/2n)` and the inverse
//! applies `1/n`, so `inverse(forward(x)) = 2·x`.
//!
//! ## Example
//!
//! ```
//! use kdct::{CosTableRegistry, ForwardDct, InverseDct};
//!
//! let tables = CosTableRegistry::<f32>::new();
//! let mut fwd = ForwardDct::new(3, &tables).unwrap();
//! let mut inv = InverseDct::new(3, &tables).unwrap();
//!
//! let input = [1.0f32, 2.0, 3.0, 4.0, 4.0, 3.0, 2.0, 1.0];
//! let mut data = input;
//! fwd.compute(&mut data).unwrap();
//! inv.compute(&mut data).unwrap();
//! for (y, x) in data.iter().zip(input.iter()) {
//!     assert!((y - 2.0 * x).abs() < 1e-4);
//! }
//! ```
//!
//! Run the demos with:
//! ```bash
//! cargo run --example dct_usage
//! cargo run --example parallel_batch --features parallel
//! cargo run --example verbose_logging --features verbose-logging
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or https://www.apache.org/licenses/LICENSE-2.0)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or https://opensource.org/licenses/MIT)
//!
//! at your option.

#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

// Debug records behind `verbose-logging`; expands to nothing otherwise.
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        #[cfg(feature = "verbose-logging")]
        log::debug!($($arg)*);
    }};
}

pub mod num;

/// Complex FFT underneath the real transforms.
pub mod fft;

/// Real-input FFT in the packed in-place layout.
pub mod rdft;

/// Shared cosine tables and their per-resolution cache.
pub mod tables;

/// DCT-II / DCT-III contexts.
pub mod dct;

/// Sequential and parallel batch helpers.
pub mod batch;

/// Runtime tunables read from the environment.
#[cfg(feature = "std")]
pub mod config;

/// Direct `O(n²)` reference transforms.
#[cfg(feature = "slow")]
pub mod slow;

pub use dct::{
    Dct, DctContext, DctError, DctKind, ForwardDct, InverseDct, TypeII, TypeIII, MAX_ORDER,
    MIN_ORDER,
};
pub use fft::{Direction, FftError};
pub use num::{Complex, Complex32, Complex64, Float};
pub use rdft::{Rdft, RdftEngine};
#[cfg(feature = "std")]
pub use tables::CosTableRegistry;
pub use tables::{CosTable, CosTableSource};
