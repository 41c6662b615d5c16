//! Feature standardization: zero mean, unit variance per column.

use ndarray::{Array1, Array2, Axis};

/// Column-wise standardizer. Statistics are fit fresh per upload and never
/// reused across batches.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    means: Array1<f64>,
    scales: Array1<f64>,
}

impl StandardScaler {
    /// Fit means and scales over the rows of `x`.
    ///
    /// Variance is the population variance. A zero-variance column keeps a
    /// scale of 1.0 so it passes through centred rather than dividing by zero.
    pub fn fit(x: &Array2<f64>) -> Self {
        let n = x.nrows().max(1) as f64;
        let means = x
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(x.ncols()));
        let mut scales = Array1::ones(x.ncols());
        for (j, col) in x.axis_iter(Axis(1)).enumerate() {
            let var = col.iter().map(|v| (v - means[j]).powi(2)).sum::<f64>() / n;
            let std = var.sqrt();
            if std > 0.0 {
                scales[j] = std;
            }
        }
        Self { means, scales }
    }

    pub fn transform(&self, x: &Array2<f64>) -> Array2<f64> {
        let mut out = x.clone();
        for mut row in out.axis_iter_mut(Axis(0)) {
            for j in 0..row.len() {
                row[j] = (row[j] - self.means[j]) / self.scales[j];
            }
        }
        out
    }

    pub fn fit_transform(x: &Array2<f64>) -> Array2<f64> {
        Self::fit(x).transform(x)
    }
}
