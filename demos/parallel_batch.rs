//! Transform many frames on the rayon pool.
use kdct::batch::par_process_batch;
use kdct::config::{parallel_batch_chunk, set_parallel_batch_chunk};
use kdct::{CosTableRegistry, DctError, Direction};
use std::time::Instant;

fn main() -> Result<(), DctError> {
    let tables = CosTableRegistry::<f32>::new();
    let bits = 10;
    let n = 1usize << bits;
    let mut frames: Vec<Vec<f32>> = (0..512)
        .map(|f| (0..n).map(|i| ((f * 3 + i) % 19) as f32).collect())
        .collect();

    set_parallel_batch_chunk(16);
    let start = Instant::now();
    par_process_batch(bits, Direction::Forward, &tables, &mut frames)?;
    par_process_batch(bits, Direction::Inverse, &tables, &mut frames)?;
    println!(
        "{} frames of {} samples in {:?} (chunk {})",
        frames.len(),
        n,
        start.elapsed(),
        parallel_batch_chunk()
    );
    println!("first samples: {:?}", &frames[0][..4]);
    Ok(())
}
