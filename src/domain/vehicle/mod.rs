pub mod record;
pub mod types;

pub use record::{VehicleRecord, VehicleSpec};
pub use types::{BodyType, Choice, Drivetrain, FuelType, Transmission};
