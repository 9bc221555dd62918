use serde::{Deserialize, Serialize};
use std::fmt;

/// Hold-out regression metrics. Informational only; training never gates on them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    pub rmse: f64,
    pub mae: f64,
    pub r2: f64,
    pub n: usize,
}

impl RegressionMetrics {
    /// Returns `None` for empty or mismatched inputs.
    pub fn evaluate(predictions: &[f64], actuals: &[f64]) -> Option<Self> {
        let n = predictions.len();
        if n == 0 || n != actuals.len() {
            return None;
        }

        let sq_err: f64 = predictions
            .iter()
            .zip(actuals)
            .map(|(p, t)| (p - t).powi(2))
            .sum();
        let abs_err: f64 = predictions
            .iter()
            .zip(actuals)
            .map(|(p, t)| (p - t).abs())
            .sum();

        let mean_y = actuals.iter().sum::<f64>() / n as f64;
        let ss_tot: f64 = actuals.iter().map(|t| (t - mean_y).powi(2)).sum();
        // Constant targets: a perfect fit scores 1, anything else 0
        let r2 = if ss_tot > 0.0 {
            1.0 - sq_err / ss_tot
        } else if sq_err == 0.0 {
            1.0
        } else {
            0.0
        };

        Some(Self {
            rmse: (sq_err / n as f64).sqrt(),
            mae: abs_err / n as f64,
            r2,
            n,
        })
    }
}

impl fmt::Display for RegressionMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model Evaluation (n={}):", self.n)?;
        writeln!(f, "  RMSE: {:.2}", self.rmse)?;
        writeln!(f, "  MAE : {:.2}", self.mae)?;
        write!(f, "  R²  : {:.3}", self.r2)
    }
}
