//! Forward and inverse DCT on a short ramp, plus a runtime-selected context.
use kdct::{CosTableRegistry, DctContext, DctError, Direction, ForwardDct, InverseDct};

fn main() -> Result<(), DctError> {
    let tables = CosTableRegistry::<f64>::new();

    let input: Vec<f64> = (0..16).map(|i| i as f64).collect();
    let mut data = input.clone();

    let mut fwd = ForwardDct::new(4, &tables)?;
    fwd.compute(&mut data)?;
    println!("DCT-II:  {:?}", data);

    let mut inv = InverseDct::new(4, &tables)?;
    inv.compute(&mut data)?;
    let restored: Vec<f64> = data.iter().map(|v| v / 2.0).collect();
    println!("restored: {:?}", restored);

    // Direction picked at runtime shares the same cached table.
    let direction = if std::env::args().any(|a| a == "--inverse") {
        Direction::Inverse
    } else {
        Direction::Forward
    };
    let mut ctx = DctContext::<f64>::new(4, direction, &tables)?;
    let mut data = input;
    ctx.compute(&mut data)?;
    println!("{} DCT: {:?}", ctx.direction(), data);
    println!("cached tables: {}", tables.len());

    Ok(())
}
