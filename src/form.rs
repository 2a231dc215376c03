//! Input form model
//!
//! [`FormSubmission`] holds the raw widget values exactly as the browser
//! posts them: integers for integer inputs and sliders, floats for the
//! float inputs, categorical enums for the selectors. The widget table
//! ([`WIDGETS`]) carries the range clamps the UI enforces and drives the
//! three-section layout rendered by the page.

use serde::{Deserialize, Serialize};

use crate::request::{Frequency, Gender, Transport, YesNo};

/// Raw values of one form submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSubmission {
    /// Gender selector
    #[serde(rename = "Gender")]
    pub gender: Gender,
    /// Age number input
    #[serde(rename = "Age")]
    pub age: i64,
    /// Height number input (m)
    #[serde(rename = "Height")]
    pub height: f64,
    /// Weight number input (kg)
    #[serde(rename = "Weight")]
    pub weight: f64,
    /// Family history selector
    pub family_history_with_overweight: YesNo,
    /// FAVC selector
    #[serde(rename = "FAVC")]
    pub favc: YesNo,
    /// FCVC slider
    #[serde(rename = "FCVC")]
    pub fcvc: i64,
    /// NCP slider
    #[serde(rename = "NCP")]
    pub ncp: i64,
    /// CAEC selector
    #[serde(rename = "CAEC")]
    pub caec: Frequency,
    /// SMOKE selector
    #[serde(rename = "SMOKE")]
    pub smoke: YesNo,
    /// CH2O slider (float)
    #[serde(rename = "CH2O")]
    pub ch2o: f64,
    /// SCC selector
    #[serde(rename = "SCC")]
    pub scc: YesNo,
    /// FAF slider
    #[serde(rename = "FAF")]
    pub faf: i64,
    /// TUE slider
    #[serde(rename = "TUE")]
    pub tue: i64,
    /// CALC selector
    #[serde(rename = "CALC")]
    pub calc: Frequency,
    /// MTRANS selector
    #[serde(rename = "MTRANS")]
    pub mtrans: Transport,
}

impl Default for FormSubmission {
    fn default() -> Self {
        Self {
            gender: Gender::Male,
            age: 25,
            height: 1.75,
            weight: 75.0,
            family_history_with_overweight: YesNo::Yes,
            favc: YesNo::Yes,
            fcvc: 2,
            ncp: 3,
            caec: Frequency::Sometimes,
            smoke: YesNo::No,
            ch2o: 2.0,
            scc: YesNo::No,
            faf: 1,
            tue: 1,
            calc: Frequency::No,
            mtrans: Transport::PublicTransportation,
        }
    }
}

impl FormSubmission {
    /// Apply the widget range clamps
    ///
    /// Mirrors what the input widgets themselves enforce; this is the only
    /// range handling anywhere in the flow.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.age = self.age.clamp(AGE.min as i64, AGE.max as i64);
        self.height = clamp_f(self.height, &HEIGHT);
        self.weight = clamp_f(self.weight, &WEIGHT);
        self.fcvc = self.fcvc.clamp(FCVC.min as i64, FCVC.max as i64);
        self.ncp = self.ncp.clamp(NCP.min as i64, NCP.max as i64);
        self.ch2o = clamp_f(self.ch2o, &CH2O);
        self.faf = self.faf.clamp(FAF.min as i64, FAF.max as i64);
        self.tue = self.tue.clamp(TUE.min as i64, TUE.max as i64);
        self
    }

    /// Current value of a field, formatted for an HTML input
    #[must_use]
    pub fn value_of(&self, name: &str) -> String {
        match name {
            "Gender" => self.gender.to_string(),
            "Age" => self.age.to_string(),
            "Height" => format!("{:.2}", self.height),
            "Weight" => format!("{:.2}", self.weight),
            "family_history_with_overweight" => self.family_history_with_overweight.to_string(),
            "FAVC" => self.favc.to_string(),
            "FCVC" => self.fcvc.to_string(),
            "NCP" => self.ncp.to_string(),
            "CAEC" => self.caec.to_string(),
            "SMOKE" => self.smoke.to_string(),
            "CH2O" => format!("{:.2}", self.ch2o),
            "SCC" => self.scc.to_string(),
            "FAF" => self.faf.to_string(),
            "TUE" => self.tue.to_string(),
            "CALC" => self.calc.to_string(),
            "MTRANS" => self.mtrans.to_string(),
            _ => String::new(),
        }
    }
}

fn clamp_f(value: f64, range: &NumericRange) -> f64 {
    // NaN cannot come from a real widget; snap it to the default
    if value.is_nan() {
        return range.default;
    }
    value.clamp(range.min, range.max)
}

// ============================================================================
// Widget table
// ============================================================================

/// Numeric widget bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericRange {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
    /// Step between values
    pub step: f64,
    /// Initial value
    pub default: f64,
}

const AGE: NumericRange = NumericRange {
    min: 1.0,
    max: 100.0,
    step: 1.0,
    default: 25.0,
};
const HEIGHT: NumericRange = NumericRange {
    min: 1.20,
    max: 2.50,
    step: 0.01,
    default: 1.75,
};
const WEIGHT: NumericRange = NumericRange {
    min: 30.0,
    max: 250.0,
    step: 0.01,
    default: 75.0,
};
const FCVC: NumericRange = NumericRange {
    min: 1.0,
    max: 3.0,
    step: 1.0,
    default: 2.0,
};
const NCP: NumericRange = NumericRange {
    min: 1.0,
    max: 4.0,
    step: 1.0,
    default: 3.0,
};
const CH2O: NumericRange = NumericRange {
    min: 1.0,
    max: 3.0,
    step: 0.01,
    default: 2.0,
};
const FAF: NumericRange = NumericRange {
    min: 0.0,
    max: 3.0,
    step: 1.0,
    default: 1.0,
};
const TUE: NumericRange = NumericRange {
    min: 0.0,
    max: 2.0,
    step: 1.0,
    default: 1.0,
};

/// Widget kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WidgetKind {
    /// Drop-down selector with fixed options
    Select {
        /// Options in display order
        options: &'static [&'static str],
    },
    /// Numeric text input
    Number(NumericRange),
    /// Range slider
    Slider(NumericRange),
}

/// One input widget
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Widget {
    /// Schema field name (also the HTML form key)
    pub name: &'static str,
    /// Label shown to the user
    pub label: &'static str,
    /// Widget kind and constraints
    #[serde(flatten)]
    pub kind: WidgetKind,
    /// Section index (0..3)
    #[serde(skip)]
    pub section: usize,
    /// Column within the section (0 or 1)
    #[serde(skip)]
    pub column: usize,
}

/// Section titles, in display order
pub const SECTIONS: [&str; 3] = [
    "📍 Physical Metrics",
    "🥗 Dietary Habits",
    "🏃 Lifestyle & Personal History",
];

const fn select(
    name: &'static str,
    label: &'static str,
    options: &'static [&'static str],
    section: usize,
    column: usize,
) -> Widget {
    Widget {
        name,
        label,
        kind: WidgetKind::Select { options },
        section,
        column,
    }
}

/// All sixteen widgets, in layout order
pub const WIDGETS: [Widget; 16] = [
    select("Gender", "Gender", &["Male", "Female"], 0, 0),
    Widget {
        name: "Age",
        label: "Age",
        kind: WidgetKind::Number(AGE),
        section: 0,
        column: 0,
    },
    Widget {
        name: "Height",
        label: "Height (m)",
        kind: WidgetKind::Number(HEIGHT),
        section: 0,
        column: 1,
    },
    Widget {
        name: "Weight",
        label: "Weight (kg)",
        kind: WidgetKind::Number(WEIGHT),
        section: 0,
        column: 1,
    },
    select("FAVC", "Frequent High Calorie Food Consumption? (FAVC)", &["yes", "no"], 1, 0),
    Widget {
        name: "FCVC",
        label: "Daily Vegetable Consumption Frequency (FCVC)",
        kind: WidgetKind::Slider(FCVC),
        section: 1,
        column: 0,
    },
    Widget {
        name: "NCP",
        label: "Number of Main Meals per Day (NCP)",
        kind: WidgetKind::Slider(NCP),
        section: 1,
        column: 0,
    },
    select(
        "CAEC",
        "Food Consumption Between Meals (CAEC)",
        &["Sometimes", "Frequently", "Always", "no"],
        1,
        1,
    ),
    Widget {
        name: "CH2O",
        label: "Daily Water Intake (Liters) (CH2O)",
        kind: WidgetKind::Slider(CH2O),
        section: 1,
        column: 1,
    },
    select(
        "CALC",
        "Alcohol Consumption Frequency (CALC)",
        &["no", "Sometimes", "Frequently", "Always"],
        1,
        1,
    ),
    select(
        "family_history_with_overweight",
        "Family History of Overweight?",
        &["yes", "no"],
        2,
        0,
    ),
    Widget {
        name: "FAF",
        label: "Physical Activity Frequency (Days/Week) (FAF)",
        kind: WidgetKind::Slider(FAF),
        section: 2,
        column: 0,
    },
    select("SCC", "Do you monitor your calories daily? (SCC)", &["no", "yes"], 2, 0),
    select("SMOKE", "Do you smoke?", &["no", "yes"], 2, 1),
    Widget {
        name: "TUE",
        label: "Daily Tech Device Usage (Hours) (TUE)",
        kind: WidgetKind::Slider(TUE),
        section: 2,
        column: 1,
    },
    select(
        "MTRANS",
        "Primary Transportation Mode (MTRANS)",
        &["Public_Transportation", "Walking", "Automobile", "Motorbike", "Bike"],
        2,
        1,
    ),
];

/// A widget paired with its current value, ready for rendering
#[derive(Debug, Clone, Serialize)]
pub struct WidgetView {
    /// Widget definition
    #[serde(flatten)]
    pub widget: Widget,
    /// Current value as text
    pub value: String,
}

/// One rendered section: a title and two columns of widgets
#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    /// Section title
    pub title: &'static str,
    /// Left and right columns
    pub columns: [Vec<WidgetView>; 2],
}

/// Lay the widgets out into sections, filled with `values`
#[must_use]
pub fn layout(values: &FormSubmission) -> Vec<SectionView> {
    SECTIONS
        .iter()
        .enumerate()
        .map(|(idx, title)| {
            let mut columns: [Vec<WidgetView>; 2] = [Vec::new(), Vec::new()];
            for widget in WIDGETS.iter().filter(|w| w.section == idx) {
                columns[widget.column].push(WidgetView {
                    widget: *widget,
                    value: values.value_of(widget.name),
                });
            }
            SectionView { title, columns }
        })
        .collect()
}
