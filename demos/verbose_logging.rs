//! Demonstrates enabling verbose logging for kdct.
use kdct::{CosTableRegistry, ForwardDct, InverseDct};

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .init();

    let tables = CosTableRegistry::<f32>::new();
    let mut data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];

    let mut fwd = ForwardDct::new(3, &tables).unwrap();
    let mut inv = InverseDct::new(3, &tables).unwrap();
    fwd.compute(&mut data).unwrap();
    inv.compute(&mut data).unwrap();

    if let Err(e) = ForwardDct::<f32>::new(1, &tables) {
        log::warn!("rejected: {}", e);
    }
}
