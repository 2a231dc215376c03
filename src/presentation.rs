//! Result presentation
//!
//! Pure mapping from a predicted label to what the user sees: a display
//! color, human-readable text and the explanation copy.

use serde::Serialize;

use crate::classifier::SeverityClass;

/// Color used for labels missing from [`SEVERITY_COLORS`]
pub const DEFAULT_COLOR: &str = "#007bff";

/// Display color per severity label
pub const SEVERITY_COLORS: [(&str, &str); 7] = [
    ("Insufficient_Weight", "#FFCC00"),
    ("Normal_Weight", "#2e7d32"),
    ("Overweight_Level_I", "#FFA500"),
    ("Overweight_Level_II", "#FF8C00"),
    ("Obesity_Type_I", "#D32F2F"),
    ("Obesity_Type_II", "#B71C1C"),
    ("Obesity_Type_III", "#7B1FA2"),
];

/// Display color for a label, falling back to [`DEFAULT_COLOR`]
#[must_use]
pub fn color_for(label: &str) -> &'static str {
    SEVERITY_COLORS
        .iter()
        .find(|(l, _)| *l == label)
        .map_or(DEFAULT_COLOR, |&(_, c)| c)
}

/// Human-readable label text
#[must_use]
pub fn display_text(label: &str) -> String {
    label.replace('_', " ")
}

/// Everything the result card shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultCard {
    /// Raw label
    pub label: String,
    /// Label with underscores replaced
    pub display_name: String,
    /// Card accent color
    pub color: &'static str,
    /// Model accuracy as a percentage string, when the artifact reports one
    pub accuracy: Option<String>,
    /// Text of the "What does this mean?" panel
    pub explanation: String,
}

impl ResultCard {
    /// Build the card for a predicted class
    #[must_use]
    pub fn new(class: SeverityClass, accuracy: Option<f64>) -> Self {
        Self::for_label(class.as_str(), accuracy)
    }

    /// Build the card for an arbitrary label
    #[must_use]
    pub fn for_label(label: &str, accuracy: Option<f64>) -> Self {
        let display_name = display_text(label);
        let explanation = format!(
            "The model classifies you as {display_name}. This prediction is based on the \
             multi-dimensional patterns of eating habits, physical metrics, and lifestyle \
             choices provided."
        );
        Self {
            label: label.to_string(),
            display_name,
            color: color_for(label),
            accuracy: accuracy.map(format_accuracy),
            explanation,
        }
    }
}

/// Format a 0..1 accuracy as a percentage with two decimals
#[must_use]
pub fn format_accuracy(accuracy: f64) -> String {
    format!("{:.2}%", accuracy * 100.0)
}
