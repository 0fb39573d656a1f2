//! Running DCT contexts over many buffers.
//!
//! A context carries scratch state, so it can only serve one call at a
//! time. The sequential helpers reuse a single context; the parallel one
//! builds a private context per chunk of buffers and shares only the
//! cosine table.

use crate::dct::{DctContext, DctError};
use crate::num::Float;
use crate::rdft::RdftEngine;

#[cfg(feature = "parallel")]
use crate::fft::Direction;
#[cfg(feature = "parallel")]
use crate::rdft::Rdft;
#[cfg(feature = "parallel")]
use crate::tables::CosTableSource;

/// Transform every buffer in place with `ctx`, stopping at the first error.
///
/// Buffers before the failing one have already been transformed.
pub fn process_batch<T, R, B>(
    ctx: &mut DctContext<T, R>,
    buffers: &mut [B],
) -> Result<(), DctError>
where
    T: Float,
    R: RdftEngine<T>,
    B: AsMut<[T]>,
{
    for buf in buffers.iter_mut() {
        ctx.compute(buf.as_mut())?;
    }
    Ok(())
}

/// Transform each channel of a multi-channel frame in place.
pub fn process_channels<T, R>(
    ctx: &mut DctContext<T, R>,
    channels: &mut [&mut [T]],
) -> Result<(), DctError>
where
    T: Float,
    R: RdftEngine<T>,
{
    for ch in channels.iter_mut() {
        ctx.compute(ch)?;
    }
    Ok(())
}

#[cfg(feature = "parallel")]
/// Transform every buffer in place on the rayon pool.
///
/// Requires the `parallel` feature, which enables the
/// [`rayon`](https://crates.io/crates/rayon) dependency. Buffers are split
/// into chunks of [`parallel_batch_chunk`](crate::config::parallel_batch_chunk)
/// and each chunk gets its own context of order `bits`, with the cosine
/// table taken from `tables`. Results equal running one context over the
/// buffers in order. On error, other chunks may or may not have run.
pub fn par_process_batch<T, S, B>(
    bits: u32,
    direction: Direction,
    tables: &S,
    buffers: &mut [B],
) -> Result<(), DctError>
where
    T: Float,
    S: CosTableSource<T> + Sync + ?Sized,
    B: AsMut<[T]> + Send,
{
    use rayon::prelude::*;

    let chunk = crate::config::parallel_batch_chunk();
    debug_log!(
        "batch: {} buffers, chunk {}, order {}, {}",
        buffers.len(),
        chunk,
        bits,
        direction
    );
    buffers.par_chunks_mut(chunk).try_for_each(|group| {
        let mut ctx = DctContext::<T, Rdft<T>>::new(bits, direction, tables)?;
        process_batch(&mut ctx, group)
    })
}
