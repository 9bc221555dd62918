use crate::domain::errors::PredictionError;
use crate::domain::ml::feature_registry::FeatureRow;

/// Interface for price models
pub trait PricePredictor {
    /// Predict a price for one feature row
    fn predict(&self, row: &FeatureRow) -> Result<f64, PredictionError>;

    /// Get model name/type
    fn name(&self) -> &str;

    /// Short human-readable description of the loaded model
    fn describe(&self) -> String {
        self.name().to_string()
    }
}
