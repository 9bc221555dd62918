pub mod csv_export;
pub mod dataset_loader;
pub mod model_store;
