//! Record preprocessing steps
//!
//! Preprocessing is expressed as [`Transformer`]s: pure functions from a
//! record to a new record. The only derived feature is BMI, available both
//! as the plain [`derive_bmi`] function and wrapped as a transformer so a
//! model artifact can list it as a pipeline step.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::record::{FeatureError, Record};

/// Name of the derived BMI field
pub const BMI_FIELD: &str = "BMI";

/// A pure record-to-record transformation
pub trait Transformer: Send + Sync {
    /// Transform `record` into a new record; the input is left untouched
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError`] when a required input field is missing or
    /// has the wrong type.
    fn transform(&self, record: &Record) -> Result<Record, FeatureError>;
}

/// Adapts a plain function into a [`Transformer`]
#[derive(Clone, Copy)]
pub struct FunctionTransformer<F> {
    name: &'static str,
    func: F,
}

impl<F> FunctionTransformer<F>
where
    F: Fn(&Record) -> Result<Record, FeatureError> + Send + Sync,
{
    /// Wrap `func` under a descriptive `name`
    pub const fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }

    /// Step name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<F> Transformer for FunctionTransformer<F>
where
    F: Fn(&Record) -> Result<Record, FeatureError> + Send + Sync,
{
    fn transform(&self, record: &Record) -> Result<Record, FeatureError> {
        (self.func)(record)
    }
}

impl<F> fmt::Debug for FunctionTransformer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionTransformer")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Add `BMI = Weight / Height²` to a copy of `record`
///
/// An existing BMI field is overwritten in place, so applying this twice
/// gives the same record as applying it once. No range checks are made:
/// a zero height yields an infinite BMI.
///
/// # Errors
///
/// Returns [`FeatureError`] if Height or Weight is missing or not numeric.
///
/// # Example
///
/// ```
/// use obesity_risk::preprocessing::derive_bmi;
/// use obesity_risk::record::Record;
///
/// let record = Record::new().with("Height", 1.75).with("Weight", 75.0);
/// let bmi = derive_bmi(&record).expect("derive").numeric("BMI").expect("bmi");
/// assert!((bmi - 24.49).abs() < 0.01);
/// ```
pub fn derive_bmi(record: &Record) -> Result<Record, FeatureError> {
    let height = record.numeric("Height")?;
    let weight = record.numeric("Weight")?;
    let mut out = record.clone();
    out.set(BMI_FIELD, weight / (height * height));
    Ok(out)
}

/// Plain record transformation function
pub type RecordFn = fn(&Record) -> Result<Record, FeatureError>;

/// BMI derivation as a pipeline step
#[must_use]
pub fn bmi_transformer() -> FunctionTransformer<RecordFn> {
    FunctionTransformer::new("bmi", derive_bmi as RecordFn)
}

/// Preprocessing steps a model artifact may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Append the BMI field
    Bmi,
}

impl Step {
    /// Apply this step to a record
    ///
    /// # Errors
    ///
    /// Propagates the step's [`FeatureError`].
    pub fn apply(self, record: &Record) -> Result<Record, FeatureError> {
        match self {
            Self::Bmi => bmi_transformer().transform(record),
        }
    }
}

/// Run `steps` in order, returning the final record
///
/// # Errors
///
/// Stops at the first failing step.
pub fn run_steps(steps: &[Step], record: &Record) -> Result<Record, FeatureError> {
    steps
        .iter()
        .try_fold(record.clone(), |acc, step| step.apply(&acc))
}
