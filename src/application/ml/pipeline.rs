use crate::application::ml::preprocessing::{ColumnSpec, Preprocessor};
use crate::domain::errors::{PipelineError, PredictionError};
use crate::domain::ml::feature_registry::FeatureRow;
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::fmt;
use tracing::debug;

pub type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Random forest hyperparameters recorded alongside the fitted model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: Option<u16>,
    pub min_samples_split: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 200,
            max_depth: None,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

impl ForestParams {
    fn to_smartcore(self) -> RandomForestRegressorParameters {
        let params = RandomForestRegressorParameters::default()
            .with_n_trees(self.n_trees)
            .with_min_samples_split(self.min_samples_split)
            .with_seed(self.seed);
        match self.max_depth {
            Some(depth) => params.with_max_depth(depth),
            None => params,
        }
    }
}

/// Preprocessing + random forest, fitted together and persisted as one artifact.
#[derive(Serialize, Deserialize)]
pub struct VehiclePricePipeline {
    columns: Vec<ColumnSpec>,
    preprocessor: Preprocessor,
    params: ForestParams,
    forest: Forest,
}

impl VehiclePricePipeline {
    pub fn fit(
        columns: Vec<ColumnSpec>,
        rows: &[FeatureRow],
        targets: &[f64],
        params: ForestParams,
    ) -> Result<Self, PipelineError> {
        if rows.is_empty() || rows.len() != targets.len() {
            return Err(PipelineError::EmptyData { stage: "regressor" });
        }

        let preprocessor = Preprocessor::fit(&columns, rows)?;
        let x = preprocessor.transform(rows)?;
        debug!(
            "Fitting forest on {} rows x {} encoded features",
            x.len(),
            preprocessor.n_features_out()
        );

        let x_matrix = DenseMatrix::from_2d_vec(&x)
            .map_err(|e| PipelineError::Regressor(format!("Matrix error: {}", e)))?;
        let y = targets.to_vec();
        let forest = RandomForestRegressor::fit(&x_matrix, &y, params.to_smartcore())
            .map_err(|e| PipelineError::Regressor(format!("Training error: {}", e)))?;

        Ok(Self {
            columns,
            preprocessor,
            params,
            forest,
        })
    }

    pub fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>, PredictionError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let expected = self.preprocessor.n_features_out();
        let x = self.preprocessor.transform(rows)?;
        if let Some(bad) = x.iter().find(|v| v.len() != expected) {
            return Err(PredictionError::FeatureMismatch {
                expected,
                got: bad.len(),
            });
        }

        let x_matrix = DenseMatrix::from_2d_vec(&x)
            .map_err(|e| PredictionError::Inference(format!("Matrix creation failed: {}", e)))?;
        self.forest
            .predict(&x_matrix)
            .map_err(|e| PredictionError::Inference(e.to_string()))
    }

    /// Single-row inference; the result is always exactly one finite scalar.
    pub fn predict_one(&self, row: &FeatureRow) -> Result<f64, PredictionError> {
        let predictions = self.predict(std::slice::from_ref(row))?;
        let price = *predictions.first().ok_or(PredictionError::EmptyOutput)?;
        if !price.is_finite() {
            return Err(PredictionError::NonFinite(price));
        }
        Ok(price)
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    pub fn params(&self) -> ForestParams {
        self.params
    }
}

impl fmt::Debug for VehiclePricePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VehiclePricePipeline")
            .field("columns", &self.columns)
            .field("encoded_features", &self.preprocessor.n_features_out())
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ml::feature_registry::{FeatureKind, FeatureValue};

    fn dataset() -> (Vec<ColumnSpec>, Vec<FeatureRow>, Vec<f64>) {
        let columns = vec![
            ColumnSpec::new("make", FeatureKind::Categorical),
            ColumnSpec::new("mileage", FeatureKind::Numeric),
        ];
        let mut rows = Vec::new();
        let mut targets = Vec::new();
        for i in 0..40 {
            let make = if i % 2 == 0 { "Toyota" } else { "Ford" };
            let mileage = (i * 5_000) as f64;
            rows.push(
                FeatureRow::new()
                    .with("make", FeatureValue::Text(make.to_string()))
                    .with("mileage", FeatureValue::Number(mileage)),
            );
            let base = if make == "Toyota" { 30_000.0 } else { 25_000.0 };
            targets.push(base - mileage * 0.05);
        }
        (columns, rows, targets)
    }

    fn small_params() -> ForestParams {
        ForestParams {
            n_trees: 15,
            ..ForestParams::default()
        }
    }

    #[test]
    fn test_single_row_yields_one_scalar() {
        let (columns, rows, targets) = dataset();
        let pipeline = VehiclePricePipeline::fit(columns, &rows, &targets, small_params()).unwrap();

        let predictions = pipeline.predict(&rows[..1]).unwrap();
        assert_eq!(predictions.len(), 1);
        let price = pipeline.predict_one(&rows[0]).unwrap();
        assert!(price.is_finite());
        assert!(price >= 0.0);
    }

    #[test]
    fn test_unknown_category_still_predicts() {
        let (columns, rows, targets) = dataset();
        let pipeline = VehiclePricePipeline::fit(columns, &rows, &targets, small_params()).unwrap();

        let row = FeatureRow::new()
            .with("make", FeatureValue::Text("Trabant".to_string()))
            .with("mileage", FeatureValue::Number(1_000.0))
            .with("colour", FeatureValue::Text("red".to_string()));
        assert!(pipeline.predict_one(&row).unwrap().is_finite());
    }

    #[test]
    fn test_serde_round_trip_predicts_identically() {
        let (columns, rows, targets) = dataset();
        let pipeline = VehiclePricePipeline::fit(columns, &rows, &targets, small_params()).unwrap();

        let json = serde_json::to_string(&pipeline).unwrap();
        let restored: VehiclePricePipeline = serde_json::from_str(&json).unwrap();

        let before = pipeline.predict(&rows[..10]).unwrap();
        let after = restored.predict(&rows[..10]).unwrap();
        let before_bits: Vec<u64> = before.iter().map(|p| p.to_bits()).collect();
        let after_bits: Vec<u64> = after.iter().map(|p| p.to_bits()).collect();
        assert_eq!(before_bits, after_bits);
        assert_eq!(restored.columns(), pipeline.columns());
    }

    #[test]
    fn test_fixed_seed_is_deterministic() {
        let (columns, rows, targets) = dataset();
        let a = VehiclePricePipeline::fit(columns.clone(), &rows, &targets, small_params()).unwrap();
        let b = VehiclePricePipeline::fit(columns, &rows, &targets, small_params()).unwrap();
        assert_eq!(a.predict(&rows).unwrap(), b.predict(&rows).unwrap());
    }

    #[test]
    fn test_fit_rejects_mismatched_targets() {
        let (columns, rows, _) = dataset();
        let err = VehiclePricePipeline::fit(columns, &rows, &[1.0], small_params()).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyData { .. }));
    }
}
