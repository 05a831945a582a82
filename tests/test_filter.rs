mod common;
use common::{load_vectors, max_abs_diff};
use ndarray::{Array2, Array3, Axis};
use tcseed::{apply_filter, apply_filter_axis, generate_weights, FilterError};

#[test]
fn lowpass_matches_reference() {
    let vecs = load_vectors("bandpass_daily_3_10_n25");
    let x: Vec<f64> = vecs["input"].iter().copied().collect();

    for (key, fc) in [("low_short", 1.0 / 3.0), ("low_long", 0.1)] {
        let y_ref = &vecs[key];
        let y = apply_filter(&x, &generate_weights(fc, 25).unwrap()).unwrap();
        assert_eq!(y.len(), y_ref.len(), "{key}: length");
        let err = max_abs_diff(&y, y_ref.iter());
        assert!(err < 1e-12, "{key}: max error {err:.2e}");
    }
}

#[test]
fn seven_samples_half_width_two() {
    let w = generate_weights(0.1, 2).unwrap();
    let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
    let y = apply_filter(&x, &w).unwrap();
    assert_eq!(y.len(), 3);
    // Output i is centred on input i + N.
    for i in 0..3 {
        let expected: f64 = (0..5).map(|k| w[k] * x[i + k]).sum();
        approx::assert_abs_diff_eq!(y[i], expected, epsilon = 1e-15);
    }
}

#[test]
fn output_length_is_input_minus_2n() {
    for n in [1_usize, 3, 10, 25] {
        let w = generate_weights(0.2, n).unwrap();
        for len in [2 * n + 1, 2 * n + 2, 100 + n] {
            let y = apply_filter(&vec![0.5; len], &w).unwrap();
            assert_eq!(y.len(), len - 2 * n, "N={n} len={len}");
        }
    }
}

#[test]
fn dc_is_preserved() {
    let w = generate_weights(0.05, 40).unwrap();
    for c in [0.0, 1.0, -3.25, 1.0e-5, 8.0e4] {
        let y = apply_filter(&vec![c; 300], &w).unwrap();
        for &v in &y {
            assert!((v - c).abs() <= 1e-12 * c.abs().max(1.0), "c={c} v={v}");
        }
    }
}

#[test]
fn no_edge_padding() {
    // A spike at the first sample only reaches output 0, through the
    // vanishing outermost tap.
    let n = 5;
    let w = generate_weights(0.2, n).unwrap();
    let mut x = vec![0.0; 30];
    x[0] = 1000.0;
    let y = apply_filter(&x, &w).unwrap();
    assert!(y[1..].iter().all(|&v| v == 0.0));
}

#[test]
fn rejects_short_or_dirty_input() {
    let w = generate_weights(0.1, 3).unwrap();
    assert!(matches!(apply_filter(&[1.0; 6], &w), Err(FilterError::InvalidInput(_))));
    assert!(matches!(apply_filter(&[], &w), Err(FilterError::InvalidInput(_))));
    let mut x = vec![1.0; 20];
    x[13] = f64::NAN;
    assert!(matches!(apply_filter(&x, &w), Err(FilterError::InvalidInput(_))));
}

#[test]
fn grid_points_filtered_independently() {
    // [time, lat, lon] field where every grid point has its own series.
    let w = generate_weights(0.1, 6).unwrap();
    let field = Array3::from_shape_fn((64, 4, 5), |(t, i, j)| {
        ((t as f64) * (0.1 + 0.05 * i as f64)).sin() * (j as f64 + 1.0)
    });
    let out = apply_filter_axis(&field, &w, Axis(0)).unwrap();
    assert_eq!(out.shape(), &[52, 4, 5]);

    let lane: Vec<f64> = field.slice(ndarray::s![.., 2, 3]).to_vec();
    let y = apply_filter(&lane, &w).unwrap();
    let got: Vec<f64> = out.slice(ndarray::s![.., 2, 3]).to_vec();
    assert!(max_abs_diff(&got, &y) < 1e-12);
}

#[test]
fn time_axis_can_be_last() {
    let w = generate_weights(0.25, 3).unwrap();
    let data = Array2::from_shape_fn((3, 20), |(p, _)| p as f64);
    let out = apply_filter_axis(&data.view(), &w, Axis(1)).unwrap();
    assert_eq!(out.dim(), (3, 14));
    for ((p, _), &v) in out.indexed_iter() {
        approx::assert_abs_diff_eq!(v, p as f64, epsilon = 1e-12);
    }
}
