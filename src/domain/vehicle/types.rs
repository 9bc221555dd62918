use crate::domain::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A closed set of user-selectable values with a display label.
///
/// Labels are the exact strings the model sees as categorical values, so they
/// must stay identical to the spelling used in the training dataset.
pub trait Choice: Copy + PartialEq + 'static {
    const FIELD: &'static str;
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;

    fn parse_label(s: &str) -> Result<Self, ValidationError> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownVariant {
                field: Self::FIELD,
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    Gasoline,
    Diesel,
    Electric,
    Hybrid,
    Other,
}

impl Choice for FuelType {
    const FIELD: &'static str = "fuel";
    const ALL: &'static [Self] = &[
        FuelType::Gasoline,
        FuelType::Diesel,
        FuelType::Electric,
        FuelType::Hybrid,
        FuelType::Other,
    ];

    fn label(&self) -> &'static str {
        match self {
            FuelType::Gasoline => "Gasoline",
            FuelType::Diesel => "Diesel",
            FuelType::Electric => "Electric",
            FuelType::Hybrid => "Hybrid",
            FuelType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transmission {
    Automatic,
    Manual,
    Other,
}

impl Choice for Transmission {
    const FIELD: &'static str = "transmission";
    const ALL: &'static [Self] = &[
        Transmission::Automatic,
        Transmission::Manual,
        Transmission::Other,
    ];

    fn label(&self) -> &'static str {
        match self {
            Transmission::Automatic => "Automatic",
            Transmission::Manual => "Manual",
            Transmission::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyType {
    #[serde(rename = "SUV")]
    Suv,
    Sedan,
    #[serde(rename = "Pickup Truck")]
    PickupTruck,
    Hatchback,
    Other,
}

impl Choice for BodyType {
    const FIELD: &'static str = "body";
    const ALL: &'static [Self] = &[
        BodyType::Suv,
        BodyType::Sedan,
        BodyType::PickupTruck,
        BodyType::Hatchback,
        BodyType::Other,
    ];

    fn label(&self) -> &'static str {
        match self {
            BodyType::Suv => "SUV",
            BodyType::Sedan => "Sedan",
            BodyType::PickupTruck => "Pickup Truck",
            BodyType::Hatchback => "Hatchback",
            BodyType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Drivetrain {
    #[serde(rename = "Front-wheel Drive")]
    FrontWheel,
    #[serde(rename = "Rear-wheel Drive")]
    RearWheel,
    #[serde(rename = "All-wheel Drive")]
    AllWheel,
    #[serde(rename = "Four-wheel Drive")]
    FourWheel,
    Other,
}

impl Choice for Drivetrain {
    const FIELD: &'static str = "drivetrain";
    const ALL: &'static [Self] = &[
        Drivetrain::FrontWheel,
        Drivetrain::RearWheel,
        Drivetrain::AllWheel,
        Drivetrain::FourWheel,
        Drivetrain::Other,
    ];

    fn label(&self) -> &'static str {
        match self {
            Drivetrain::FrontWheel => "Front-wheel Drive",
            Drivetrain::RearWheel => "Rear-wheel Drive",
            Drivetrain::AllWheel => "All-wheel Drive",
            Drivetrain::FourWheel => "Four-wheel Drive",
            Drivetrain::Other => "Other",
        }
    }
}

macro_rules! impl_display_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }

            impl FromStr for $ty {
                type Err = ValidationError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <$ty as Choice>::parse_label(s)
                }
            }
        )*
    };
}

impl_display_from_str!(FuelType, Transmission, BodyType, Drivetrain);
