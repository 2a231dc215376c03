//! Prediction request building
//!
//! Turns the sixteen raw form values into the single-row [`Record`] the
//! classifier was trained against. Names and order follow the training
//! table exactly ([`FIELD_NAMES`]); the only coercion is the explicit cast of
//! slider values to floating point. No range or cross-field validation is
//! applied here: out-of-domain combinations pass through uninterpreted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::form::FormSubmission;
use crate::record::Record;

/// Input schema field names, in the order the classifier expects
pub const FIELD_NAMES: [&str; 16] = [
    "Gender",
    "Age",
    "Height",
    "Weight",
    "family_history_with_overweight",
    "FAVC",
    "FCVC",
    "NCP",
    "CAEC",
    "SMOKE",
    "CH2O",
    "SCC",
    "FAF",
    "TUE",
    "CALC",
    "MTRANS",
];

/// Error for a categorical value outside its domain
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind} value: '{value}'")]
pub struct ParseCategoryError {
    kind: &'static str,
    value: String,
}

/// Defines a categorical field type with its exact wire spellings.
macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every value, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Exact spelling used by the training data
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseCategoryError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(ParseCategoryError {
                        kind: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

categorical! {
    /// Gender
    Gender {
        /// Male
        Male => "Male",
        /// Female
        Female => "Female",
    }
}

categorical! {
    /// Binary survey answer
    YesNo {
        /// yes
        Yes => "yes",
        /// no
        No => "no",
    }
}

categorical! {
    /// Frequency answer used by CAEC and CALC
    Frequency {
        /// Never
        No => "no",
        /// Sometimes
        Sometimes => "Sometimes",
        /// Frequently
        Frequently => "Frequently",
        /// Always
        Always => "Always",
    }
}

categorical! {
    /// Primary transportation mode (MTRANS)
    Transport {
        /// Bus, train, metro
        PublicTransportation => "Public_Transportation",
        /// Walking
        Walking => "Walking",
        /// Car
        Automobile => "Automobile",
        /// Motorbike
        Motorbike => "Motorbike",
        /// Bicycle
        Bike => "Bike",
    }
}

/// Typed prediction request, one field per schema column
///
/// Serializes with the exact schema names so the JSON API accepts the same
/// keys the training table used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Gender
    #[serde(rename = "Gender")]
    pub gender: Gender,
    /// Age in years
    #[serde(rename = "Age")]
    pub age: i64,
    /// Height in meters
    #[serde(rename = "Height")]
    pub height: f64,
    /// Weight in kilograms
    #[serde(rename = "Weight")]
    pub weight: f64,
    /// Family history of overweight
    pub family_history_with_overweight: YesNo,
    /// Frequent high-calorie food consumption
    #[serde(rename = "FAVC")]
    pub favc: YesNo,
    /// Vegetable consumption frequency
    #[serde(rename = "FCVC")]
    pub fcvc: f64,
    /// Number of main meals per day
    #[serde(rename = "NCP")]
    pub ncp: f64,
    /// Food between meals
    #[serde(rename = "CAEC")]
    pub caec: Frequency,
    /// Smoker
    #[serde(rename = "SMOKE")]
    pub smoke: YesNo,
    /// Daily water intake in liters
    #[serde(rename = "CH2O")]
    pub ch2o: f64,
    /// Calorie monitoring
    #[serde(rename = "SCC")]
    pub scc: YesNo,
    /// Physical activity days per week
    #[serde(rename = "FAF")]
    pub faf: f64,
    /// Daily tech device usage in hours
    #[serde(rename = "TUE")]
    pub tue: f64,
    /// Alcohol consumption
    #[serde(rename = "CALC")]
    pub calc: Frequency,
    /// Transportation mode
    #[serde(rename = "MTRANS")]
    pub mtrans: Transport,
}

impl PredictionRequest {
    /// Build the single-row record in [`FIELD_NAMES`] order
    #[must_use]
    pub fn to_record(&self) -> Record {
        Record::new()
            .with("Gender", self.gender.as_str())
            .with("Age", self.age)
            .with("Height", self.height)
            .with("Weight", self.weight)
            .with(
                "family_history_with_overweight",
                self.family_history_with_overweight.as_str(),
            )
            .with("FAVC", self.favc.as_str())
            .with("FCVC", self.fcvc)
            .with("NCP", self.ncp)
            .with("CAEC", self.caec.as_str())
            .with("SMOKE", self.smoke.as_str())
            .with("CH2O", self.ch2o)
            .with("SCC", self.scc.as_str())
            .with("FAF", self.faf)
            .with("TUE", self.tue)
            .with("CALC", self.calc.as_str())
            .with("MTRANS", self.mtrans.as_str())
    }
}

/// Build a typed request from raw form values
///
/// Slider values (FCVC, NCP, CH2O, FAF, TUE) are cast to `f64`; nothing else
/// is converted or checked.
#[must_use]
pub fn build_request(form: &FormSubmission) -> PredictionRequest {
    PredictionRequest {
        gender: form.gender,
        age: form.age,
        height: form.height,
        weight: form.weight,
        family_history_with_overweight: form.family_history_with_overweight,
        favc: form.favc,
        fcvc: form.fcvc as f64,
        ncp: form.ncp as f64,
        caec: form.caec,
        smoke: form.smoke,
        ch2o: form.ch2o,
        scc: form.scc,
        faf: form.faf as f64,
        tue: form.tue as f64,
        calc: form.calc,
        mtrans: form.mtrans,
    }
}

/// Build the classifier input record straight from raw form values
#[must_use]
pub fn build_record(form: &FormSubmission) -> Record {
    build_request(form).to_record()
}
