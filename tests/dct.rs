use kdct::{
    CosTable, CosTableRegistry, CosTableSource, DctContext, DctError, Direction, ForwardDct,
    InverseDct, MAX_ORDER, MIN_ORDER,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;
use std::sync::Arc;

fn naive_dct2(x: &[f64]) -> Vec<f64> {
    let n = x.len();
    (0..n)
        .map(|k| {
            x.iter()
                .enumerate()
                .map(|(j, &v)| v * (PI * ((2 * j + 1) * k) as f64 / (2 * n) as f64).cos())
                .sum()
        })
        .collect()
}

fn naive_dct3(x: &[f64]) -> Vec<f64> {
    let n = x.len();
    (0..n)
        .map(|j| {
            let tail: f64 = (1..n)
                .map(|k| x[k] * (PI * ((2 * j + 1) * k) as f64 / (2 * n) as f64).cos())
                .sum();
            4.0 / n as f64 * (x[0] / 2.0 + tail)
        })
        .collect()
}

fn random_signal(rng: &mut StdRng, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// Forward output matches the direct O(n²) sum for every small length.
#[test]
fn forward_matches_direct_sum() {
    let tables = CosTableRegistry::<f64>::new();
    let mut rng = StdRng::seed_from_u64(7);
    for bits in MIN_ORDER..=4 {
        let x = random_signal(&mut rng, 1 << bits);
        let mut data = x.clone();
        ForwardDct::new(bits, &tables)
            .unwrap()
            .compute(&mut data)
            .unwrap();
        for (k, (a, b)) in data.iter().zip(naive_dct2(&x).iter()).enumerate() {
            assert!((a - b).abs() < 1e-12, "bits {} k {}: {} vs {}", bits, k, a, b);
        }
    }
}

/// A unit impulse at j = 0 produces cos(πk/2n) in every bin.
#[test]
fn impulse_gives_cosine_ramp() {
    let tables = CosTableRegistry::<f64>::new();
    let mut dct = ForwardDct::new(2, &tables).unwrap();
    let mut data = [1.0, 0.0, 0.0, 0.0];
    dct.compute(&mut data).unwrap();
    let expected = [
        1.0,
        (PI / 8.0).cos(),
        (PI / 4.0).cos(),
        (3.0 * PI / 8.0).cos(),
    ];
    for (a, b) in data.iter().zip(expected.iter()) {
        assert!((a - b).abs() < 1e-12, "{} vs {}", a, b);
    }
}

/// A constant signal lands entirely in the DC bin.
#[test]
fn constant_is_dc_only() {
    let tables = CosTableRegistry::<f64>::new();
    for bits in [2, 5, 9] {
        let n = 1usize << bits;
        let mut data = vec![0.75; n];
        ForwardDct::new(bits, &tables)
            .unwrap()
            .compute(&mut data)
            .unwrap();
        assert!((data[0] - 0.75 * n as f64).abs() < 1e-9);
        assert!(data[1..].iter().all(|v| v.abs() < 1e-9), "bits {}", bits);
    }
}

/// Inverse matches (4/n)·(X0/2 + Σ X_k cos(π(2j+1)k/2n)).
#[test]
fn inverse_matches_closed_form() {
    let tables = CosTableRegistry::<f64>::new();
    let mut rng = StdRng::seed_from_u64(11);
    for bits in MIN_ORDER..=5 {
        let x = random_signal(&mut rng, 1 << bits);
        let mut data = x.clone();
        InverseDct::new(bits, &tables)
            .unwrap()
            .compute(&mut data)
            .unwrap();
        for (a, b) in data.iter().zip(naive_dct3(&x).iter()) {
            assert!((a - b).abs() < 1e-12, "bits {}: {} vs {}", bits, a, b);
        }
    }
}

/// Inverse after forward returns twice the input, up to n = 4096.
#[test]
fn roundtrip_is_twice_the_input_f64() {
    let tables = CosTableRegistry::<f64>::new();
    let mut rng = StdRng::seed_from_u64(3);
    for bits in MIN_ORDER..=12 {
        let x = random_signal(&mut rng, 1 << bits);
        let mut fwd = ForwardDct::new(bits, &tables).unwrap();
        let mut inv = InverseDct::new(bits, &tables).unwrap();
        let mut data = x.clone();
        fwd.compute(&mut data).unwrap();
        inv.compute(&mut data).unwrap();
        for (a, b) in data.iter().zip(x.iter()) {
            let rel = (a - 2.0 * b).abs() / (2.0 * b.abs()).max(1.0);
            assert!(rel < 1e-5, "bits {}: {} vs {}", bits, a, 2.0 * b);
        }
    }
}

#[test]
fn roundtrip_is_twice_the_input_f32() {
    let tables = CosTableRegistry::<f32>::new();
    for bits in [2, 6, 10] {
        let n = 1usize << bits;
        let x: Vec<f32> = (0..n).map(|i| ((i * 37) % 101) as f32 / 50.0 - 1.0).collect();
        let mut data = x.clone();
        ForwardDct::new(bits, &tables)
            .unwrap()
            .compute(&mut data)
            .unwrap();
        InverseDct::new(bits, &tables)
            .unwrap()
            .compute(&mut data)
            .unwrap();
        for (a, b) in data.iter().zip(x.iter()) {
            assert!((a - 2.0 * b).abs() < 1e-3, "bits {}: {} vs {}", bits, a, 2.0 * b);
        }
    }
}

/// DCT(αx + βy) = α·DCT(x) + β·DCT(y).
#[test]
fn forward_is_linear() {
    let tables = CosTableRegistry::<f64>::new();
    let mut rng = StdRng::seed_from_u64(99);
    let n = 64;
    let x = random_signal(&mut rng, n);
    let y = random_signal(&mut rng, n);
    let (alpha, beta) = (1.5, -0.25);
    let mut dct = ForwardDct::new(6, &tables).unwrap();

    let mut mixed: Vec<f64> = x.iter().zip(&y).map(|(a, b)| alpha * a + beta * b).collect();
    let mut dx = x.clone();
    let mut dy = y.clone();
    dct.compute(&mut mixed).unwrap();
    dct.compute(&mut dx).unwrap();
    dct.compute(&mut dy).unwrap();
    for k in 0..n {
        assert!((mixed[k] - (alpha * dx[k] + beta * dy[k])).abs() < 1e-12);
    }
}

/// A context keeps producing the same result across calls.
#[test]
fn context_is_reusable() {
    let tables = CosTableRegistry::<f64>::new();
    let mut dct = ForwardDct::new(7, &tables).unwrap();
    let x: Vec<f64> = (0..128).map(|i| (i as f64 * 0.1).sin()).collect();
    let mut first = x.clone();
    dct.compute(&mut first).unwrap();
    let mut second = x.clone();
    dct.compute(&mut second).unwrap();
    assert_eq!(first, second);
}

/// Wrong-length buffers are rejected and left untouched.
#[test]
fn wrong_length_is_rejected() {
    let tables = CosTableRegistry::<f64>::new();
    let mut ctx = DctContext::<f64>::new(4, Direction::Forward, &tables).unwrap();
    for len in [0usize, 8, 17, 32] {
        let mut data = vec![3.0; len];
        assert_eq!(
            ctx.compute(&mut data),
            Err(DctError::MismatchedLengths {
                expected: 16,
                actual: len
            })
        );
        assert!(data.iter().all(|&v| v == 3.0));
    }
}

#[test]
fn order_range_is_enforced() {
    let tables = CosTableRegistry::<f32>::new();
    for bits in [0, 1, MAX_ORDER + 1, 40] {
        assert_eq!(
            ForwardDct::new(bits, &tables).unwrap_err(),
            DctError::InvalidOrder(bits)
        );
        assert_eq!(
            InverseDct::new(bits, &tables).unwrap_err(),
            DctError::InvalidOrder(bits)
        );
    }
    assert!(tables.is_empty());
}

#[test]
fn table_resolution_must_match_order() {
    let table = Arc::new(CosTable::<f64>::new(6).unwrap());
    assert_eq!(
        ForwardDct::with_table(5, table).unwrap_err(),
        DctError::TableMismatch {
            expected: 7,
            actual: 6
        }
    );
}

/// Two contexts of the same order share one table and agree exactly.
#[test]
fn shared_table_gives_identical_results() {
    let tables = CosTableRegistry::<f64>::new();
    let mut a = ForwardDct::new(8, &tables).unwrap();
    let mut b = ForwardDct::new(8, &tables).unwrap();
    assert!(Arc::ptr_eq(a.cos_table(), b.cos_table()));
    assert_eq!(tables.len(), 1);

    let x: Vec<f64> = (0..256).map(|i| ((i * 13) % 29) as f64).collect();
    let mut ya = x.clone();
    let mut yb = x.clone();
    a.compute(&mut ya).unwrap();
    b.compute(&mut yb).unwrap();
    assert_eq!(ya, yb);
}

/// Dropping every context leaves the cached table alive and reusable.
#[test]
fn table_outlives_contexts() {
    let tables = CosTableRegistry::<f32>::new();
    let first = {
        let dct = InverseDct::new(5, &tables).unwrap();
        Arc::clone(dct.cos_table())
    };
    assert!(tables.contains(7));
    let again = tables.cos_table(7).unwrap();
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(Arc::strong_count(&first), 3);
}

#[test]
fn forward_and_inverse_share_the_table() {
    let tables = CosTableRegistry::<f64>::new();
    let fwd = DctContext::<f64>::new(3, Direction::Forward, &tables).unwrap();
    let inv = DctContext::<f64>::new(3, Direction::Inverse, &tables).unwrap();
    assert_eq!(fwd.direction(), Direction::Forward);
    assert_eq!(inv.direction(), Direction::Inverse);
    assert_eq!(tables.len(), 1);
}

#[test]
fn errors_display_and_chain() {
    use std::error::Error;
    let err = DctError::RdftInit(kdct::FftError::AllocationFailed);
    assert!(err.to_string().contains("rdft"));
    assert!(err.source().is_some());
    assert!(DctError::InvalidOrder(1).source().is_none());
    assert!(DctError::InvalidOrder(1).to_string().contains('1'));
}
