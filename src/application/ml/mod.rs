pub mod metrics;
pub mod pipeline;
pub mod predictor;
pub mod preprocessing;
pub mod smartcore_predictor;
pub mod trainer;
