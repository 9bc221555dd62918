use crate::domain::errors::ValidationError;
use crate::domain::vehicle::types::{BodyType, Drivetrain, FuelType, Transmission};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const YEAR_RANGE: RangeInclusive<i32> = 1990..=2025;
pub const MILEAGE_RANGE: RangeInclusive<u32> = 0..=1_000_000;
pub const CYLINDERS_RANGE: RangeInclusive<u8> = 2..=16;
pub const DOOR_OPTIONS: &[u8] = &[2, 3, 4, 5];

/// Year the predictor measures vehicle age against.
///
/// Training derives age from the newest year in the dataset instead, so a
/// model trained on data whose newest year differs sees shifted ages here.
pub const DEFAULT_REFERENCE_YEAR: i32 = 2025;

/// Raw, unvalidated vehicle input as collected from a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSpec {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: u32,
    pub cylinders: u8,
    pub fuel: FuelType,
    pub transmission: Transmission,
    pub body: BodyType,
    pub doors: u8,
    pub drivetrain: Drivetrain,
}

impl Default for VehicleSpec {
    fn default() -> Self {
        Self {
            make: String::new(),
            model: String::new(),
            year: 2024,
            mileage: 10,
            cylinders: 4,
            fuel: FuelType::Gasoline,
            transmission: Transmission::Automatic,
            body: BodyType::Suv,
            doors: 2,
            drivetrain: Drivetrain::FrontWheel,
        }
    }
}

/// A validated vehicle description. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleRecord {
    spec: VehicleSpec,
}

impl VehicleRecord {
    /// Validates every bounded field of `spec`.
    ///
    /// Text fields are trimmed but may be empty; the model encodes an empty
    /// make or model as an unseen category.
    pub fn new(mut spec: VehicleSpec) -> Result<Self, ValidationError> {
        check_range("year", &YEAR_RANGE, spec.year)?;
        check_range("mileage", &MILEAGE_RANGE, spec.mileage)?;
        check_range("cylinders", &CYLINDERS_RANGE, spec.cylinders)?;

        if !DOOR_OPTIONS.contains(&spec.doors) {
            return Err(ValidationError::NotAllowed {
                field: "doors",
                allowed: DOOR_OPTIONS,
                value: spec.doors,
            });
        }

        spec.make = spec.make.trim().to_string();
        spec.model = spec.model.trim().to_string();

        Ok(Self { spec })
    }

    pub fn make(&self) -> &str {
        &self.spec.make
    }

    pub fn model(&self) -> &str {
        &self.spec.model
    }

    pub fn year(&self) -> i32 {
        self.spec.year
    }

    pub fn mileage(&self) -> u32 {
        self.spec.mileage
    }

    pub fn cylinders(&self) -> u8 {
        self.spec.cylinders
    }

    pub fn fuel(&self) -> FuelType {
        self.spec.fuel
    }

    pub fn transmission(&self) -> Transmission {
        self.spec.transmission
    }

    pub fn body(&self) -> BodyType {
        self.spec.body
    }

    pub fn doors(&self) -> u8 {
        self.spec.doors
    }

    pub fn drivetrain(&self) -> Drivetrain {
        self.spec.drivetrain
    }

    /// Age in years relative to `reference_year`.
    pub fn age(&self, reference_year: i32) -> i32 {
        reference_year - self.spec.year
    }
}

fn check_range<T>(field: &'static str, range: &RangeInclusive<T>, value: T) -> Result<(), ValidationError>
where
    T: PartialOrd + Copy + Into<i64>,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            min: (*range.start()).into(),
            max: (*range.end()).into(),
            value: value.into(),
        })
    }
}
