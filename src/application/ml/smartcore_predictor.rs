use super::pipeline::VehiclePricePipeline;
use super::predictor::PricePredictor;
use crate::domain::errors::PredictionError;
use crate::domain::ml::feature_registry::FeatureRow;
use crate::infrastructure::model_store::ModelStore;
use anyhow::Result;
use std::path::Path;
use tracing::info;

pub struct SmartCorePricePredictor {
    pipeline: VehiclePricePipeline,
}

impl SmartCorePricePredictor {
    pub fn new(pipeline: VehiclePricePipeline) -> Self {
        Self { pipeline }
    }

    /// Loads the artifact at `model_path`. A missing or corrupt file is an error.
    pub fn load(model_path: &Path) -> Result<Self> {
        let pipeline = ModelStore::new(model_path).load()?;
        info!(
            "Model ready: {} input columns, {} encoded features, {} trees",
            pipeline.columns().len(),
            pipeline.preprocessor().n_features_out(),
            pipeline.params().n_trees
        );
        Ok(Self::new(pipeline))
    }
}

impl PricePredictor for SmartCorePricePredictor {
    fn predict(&self, row: &FeatureRow) -> Result<f64, PredictionError> {
        self.pipeline.predict_one(row)
    }

    fn name(&self) -> &str {
        "SmartCore Random Forest"
    }

    fn describe(&self) -> String {
        format!(
            "{} ({} trees, {} features)",
            self.name(),
            self.pipeline.params().n_trees,
            self.pipeline.columns().len()
        )
    }
}
