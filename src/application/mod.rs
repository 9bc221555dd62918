// Training, preprocessing and inference
pub mod ml;

// Interactive session handling
pub mod session;
