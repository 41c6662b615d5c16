//! Tests for the standardizer and the seeded isolation forest

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use fraudsift::pipeline::{IsolationForest, StandardScaler};

/// Tight cluster around the origin plus a handful of far-away rows.
fn clustered_matrix(normal: usize, outliers: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut x = Array2::zeros((normal + outliers, 2));
    for i in 0..normal {
        x[[i, 0]] = rng.gen_range(-1.0..1.0);
        x[[i, 1]] = rng.gen_range(-1.0..1.0);
    }
    for i in normal..normal + outliers {
        x[[i, 0]] = rng.gen_range(40.0..60.0);
        x[[i, 1]] = rng.gen_range(40.0..60.0);
    }
    x
}

#[test]
fn test_scaler_standardizes_columns() {
    let x = Array2::from_shape_vec((4, 2), vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0, 4.0, 40.0])
        .unwrap();
    let scaled = StandardScaler::fit_transform(&x);

    for j in 0..2 {
        let col: Vec<f64> = (0..4).map(|i| scaled[[i, j]]).collect();
        let mean = col.iter().sum::<f64>() / 4.0;
        let var = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / 4.0;
        assert!(mean.abs() < 1e-12, "Column {} mean should be 0", j);
        assert!((var - 1.0).abs() < 1e-12, "Column {} variance should be 1", j);
    }
}

#[test]
fn test_scaler_leaves_constant_columns_finite() {
    let x = Array2::from_shape_vec((3, 1), vec![5.0, 5.0, 5.0]).unwrap();
    let scaled = StandardScaler::fit_transform(&x);
    for i in 0..3 {
        assert_eq!(scaled[[i, 0]], 0.0, "Constant column should center to 0");
    }
}

#[test]
fn test_forest_is_deterministic_for_a_seed() {
    let x = clustered_matrix(300, 6, 11);

    let first = IsolationForest::fit(&x, 100, 42).detect(&x, 0.02);
    let second = IsolationForest::fit(&x, 100, 42).detect(&x, 0.02);

    assert_eq!(first, second, "Same matrix and seed must flag the same rows");
}

#[test]
fn test_forest_scores_outliers_highest() {
    let x = clustered_matrix(300, 6, 7);
    let forest = IsolationForest::fit(&x, 100, 42);
    let scores = forest.score_samples(&x);

    let max_normal = scores[..300].iter().cloned().fold(f64::MIN, f64::max);
    let min_outlier = scores[300..].iter().cloned().fold(f64::MAX, f64::min);
    assert!(
        min_outlier > max_normal,
        "Planted outliers should outscore every normal row: {} vs {}",
        min_outlier,
        max_normal
    );
}

#[test]
fn test_forest_flags_planted_outliers() {
    let x = clustered_matrix(300, 6, 7);
    let forest = IsolationForest::fit(&x, 100, 42);
    let flags = forest.detect(&x, 0.02);

    let flagged: Vec<usize> = flags
        .iter()
        .enumerate()
        .filter_map(|(i, &f)| f.then_some(i))
        .collect();
    // 2% of 306 rows is ~6; all planted outliers sit in that tail
    for i in 300..306 {
        assert!(flagged.contains(&i), "Outlier row {} should be flagged", i);
    }
    assert!(
        flagged.len() <= 12,
        "Flagged count should stay near the contamination target, got {}",
        flagged.len()
    );
}

#[test]
fn test_single_row_flags_nothing() {
    let x = Array2::from_shape_vec((1, 5), vec![0.0; 5]).unwrap();
    let forest = IsolationForest::fit(&x, 100, 42);
    let flags = forest.detect(&x, 0.02);
    assert_eq!(flags, vec![false], "A lone row is never its own outlier");
}
