// Vehicle input model
pub mod vehicle;

// Feature schema shared by trainer and predictor
pub mod ml;

// Session prediction history
pub mod history;

// Domain-specific error types
pub mod errors;
