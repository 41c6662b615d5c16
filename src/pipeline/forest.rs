//! Seeded isolation forest over a dense feature matrix.
//!
//! An ensemble of isolation trees, each grown on a random subsample of at
//! most 256 rows: every node picks a feature and a uniform random split
//! between that feature's observed bounds, and the tree stops at single rows
//! or the depth cap of ceil(log2(subsample)). Rows that isolate in short
//! paths score close to 1; deep, hard-to-isolate rows score near 0.5 or
//! below. Randomness is fully determined by the caller's seed: per-tree
//! seeds are drawn up-front so fitting the trees in parallel stays
//! reproducible.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

const MAX_SUBSAMPLE: usize = 256;
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

enum Node {
    Internal {
        feature: usize,
        split: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
    Leaf {
        size: usize,
    },
}

struct Tree {
    root: Node,
}

impl Tree {
    /// Path length of row `i`, with the standard correction for leaves that
    /// still hold multiple rows.
    fn path_length(&self, x: &Array2<f64>, i: usize) -> f64 {
        let mut node = &self.root;
        let mut depth = 0.0;
        loop {
            match node {
                Node::Leaf { size } => return depth + average_path_length(*size),
                Node::Internal {
                    feature,
                    split,
                    left,
                    right,
                } => {
                    node = if x[[i, *feature]] < *split { left } else { right };
                    depth += 1.0;
                }
            }
        }
    }
}

/// Average path length of an unsuccessful binary search over `n` points;
/// normalizes raw depths into comparable scores.
fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

/// Draw `k` distinct row indices from `0..n` (partial Fisher-Yates).
fn sample_rows(n: usize, k: usize, rng: &mut StdRng) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    for i in 0..k {
        let j = rng.gen_range(i..n);
        indices.swap(i, j);
    }
    indices.truncate(k);
    indices
}

fn build_node(
    x: &Array2<f64>,
    rows: Vec<usize>,
    depth: usize,
    max_depth: usize,
    rng: &mut StdRng,
) -> Node {
    if rows.len() <= 1 || depth >= max_depth {
        return Node::Leaf { size: rows.len() };
    }

    // Pick a feature with spread, starting from a random one; if every
    // column is constant over these rows the node cannot split further.
    let n_features = x.ncols();
    let start = rng.gen_range(0..n_features);
    let mut chosen = None;
    for offset in 0..n_features {
        let feature = (start + offset) % n_features;
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &r in &rows {
            let v = x[[r, feature]];
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if hi > lo {
            chosen = Some((feature, lo, hi));
            break;
        }
    }
    let Some((feature, lo, hi)) = chosen else {
        return Node::Leaf { size: rows.len() };
    };

    let split = rng.gen_range(lo..hi);
    let (left_rows, right_rows): (Vec<usize>, Vec<usize>) =
        rows.into_iter().partition(|&r| x[[r, feature]] < split);

    Node::Internal {
        feature,
        split,
        left: Box::new(build_node(x, left_rows, depth + 1, max_depth, rng)),
        right: Box::new(build_node(x, right_rows, depth + 1, max_depth, rng)),
    }
}

/// The fitted ensemble.
pub struct IsolationForest {
    trees: Vec<Tree>,
    subsample: usize,
}

impl IsolationForest {
    /// Fit `n_trees` isolation trees over the rows of `x`.
    ///
    /// The same matrix and seed always produce the same forest.
    pub fn fit(x: &Array2<f64>, n_trees: usize, seed: u64) -> Self {
        let n = x.nrows();
        let subsample = n.min(MAX_SUBSAMPLE).max(1);
        let max_depth = ((subsample as f64).log2().ceil() as usize).max(1);

        let mut seeder = StdRng::seed_from_u64(seed);
        let tree_seeds: Vec<u64> = (0..n_trees).map(|_| seeder.gen()).collect();

        let trees = tree_seeds
            .par_iter()
            .map(|&tree_seed| {
                let mut rng = StdRng::seed_from_u64(tree_seed);
                let rows = sample_rows(n, subsample, &mut rng);
                Tree {
                    root: build_node(x, rows, 0, max_depth, &mut rng),
                }
            })
            .collect();

        Self { trees, subsample }
    }

    /// Anomaly score per row: `2^(-E[h]/c(subsample))`, higher is more
    /// anomalous. Scores sit near 0.5 for unremarkable rows.
    pub fn score_samples(&self, x: &Array2<f64>) -> Vec<f64> {
        let expected = average_path_length(self.subsample);
        let n_trees = self.trees.len().max(1) as f64;
        (0..x.nrows())
            .into_par_iter()
            .map(|i| {
                if expected <= 0.0 {
                    return 0.5;
                }
                let mean_path: f64 = self
                    .trees
                    .iter()
                    .map(|tree| tree.path_length(x, i))
                    .sum::<f64>()
                    / n_trees;
                2f64.powf(-mean_path / expected)
            })
            .collect()
    }

    /// Flag rows scoring strictly above the (1 - contamination) percentile
    /// of this batch's scores.
    ///
    /// Ties and interpolation mean the flagged fraction only approximates
    /// the contamination target. A single-row batch flags nothing: its one
    /// score is never strictly above itself.
    pub fn detect(&self, x: &Array2<f64>, contamination: f64) -> Vec<bool> {
        let scores = self.score_samples(x);
        let threshold = percentile(&scores, 1.0 - contamination.clamp(0.0, 0.5));
        scores.iter().map(|&s| s > threshold).collect()
    }
}

/// Linear-interpolated percentile of `values` at quantile `q` in [0, 1].
fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
