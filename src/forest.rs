//! Tree-ensemble classifier artifact
//!
//! The training process exports its random forest as JSON: the class list,
//! the encoded feature schema, optional preprocessing steps and one flat
//! node array per tree. Prediction encodes the record into a feature
//! vector (categoricals by their index in the training category list),
//! walks every tree, averages the leaf class distributions and returns the
//! arg-max class.
//!
//! Structural problems are rejected at load time. Schema problems (a
//! feature the record lacks, a category never seen in training) only show
//! up when a record is predicted.

use serde::{Deserialize, Serialize};

use crate::classifier::{Classifier, ModelMetadata, PredictionError, SeverityClass};
use crate::model_loader::LoadError;
use crate::preprocessing::{run_steps, Step};
use crate::record::{FeatureError, FieldValue, Record};

/// Format tag every artifact must carry
pub const FORMAT_TAG: &str = "obesity-forest";

/// Highest artifact format version this build understands
pub const FORMAT_VERSION: u32 = 1;

/// Feature encoding declared by the artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FeatureKind {
    /// Used as-is
    Numeric,
    /// Ordinal-encoded by position in `categories`
    Categorical {
        /// Training categories
        categories: Vec<String>,
    },
}

/// One input feature of the artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSpec {
    /// Record field name
    pub name: String,
    /// Encoding
    #[serde(flatten)]
    pub kind: FeatureKind,
}

/// Tree node in flat pre-order layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Internal split: `x[feature] <= threshold` goes left
    Split {
        /// Feature index
        feature: usize,
        /// Split threshold
        threshold: f64,
        /// Left child index
        left: usize,
        /// Right child index
        right: usize,
    },
    /// Leaf holding a class distribution
    Leaf {
        /// One weight per class
        value: Vec<f64>,
    },
}

/// One decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    /// Nodes; index 0 is the root
    pub nodes: Vec<Node>,
}

impl Tree {
    fn leaf(&self, x: &[f64]) -> &[f64] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Split { feature, threshold, left, right } => {
                    // NaN compares false and goes right
                    idx = if x[*feature] <= *threshold { *left } else { *right };
                }
                Node::Leaf { value } => return value,
            }
        }
    }
}

/// Serialized artifact layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestArtifact {
    /// Must equal [`FORMAT_TAG`]
    pub format: String,
    /// Artifact format version
    pub format_version: u32,
    /// Name, version and reported accuracy
    #[serde(flatten)]
    pub metadata: ModelMetadata,
    /// Class labels, one per leaf slot
    pub classes: Vec<String>,
    /// Encoded inputs, in feature-vector order
    pub features: Vec<FeatureSpec>,
    /// Steps applied to the record before encoding
    #[serde(default)]
    pub preprocessing: Vec<Step>,
    /// Ensemble members
    pub trees: Vec<Tree>,
}

/// Random-forest classifier loaded from a [`ForestArtifact`]
#[derive(Debug, Clone)]
pub struct ForestClassifier {
    metadata: ModelMetadata,
    classes: Vec<SeverityClass>,
    features: Vec<FeatureSpec>,
    preprocessing: Vec<Step>,
    trees: Vec<Tree>,
}

impl ForestClassifier {
    /// Parse and validate an artifact from JSON text
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] for malformed JSON and
    /// [`LoadError::Format`] for a structurally invalid artifact.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let artifact: ForestArtifact =
            serde_json::from_str(json).map_err(|e| LoadError::Parse(e.to_string()))?;
        Self::from_artifact(artifact)
    }

    /// Validate an artifact and build the classifier
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Format`] describing the first problem found.
    pub fn from_artifact(artifact: ForestArtifact) -> Result<Self, LoadError> {
        if artifact.format != FORMAT_TAG {
            return Err(format_error(format!(
                "expected format '{FORMAT_TAG}', found '{}'",
                artifact.format
            )));
        }
        if artifact.format_version == 0 || artifact.format_version > FORMAT_VERSION {
            return Err(format_error(format!(
                "unsupported format version {}",
                artifact.format_version
            )));
        }
        if artifact.classes.is_empty() {
            return Err(format_error("no classes".to_string()));
        }
        let classes = artifact
            .classes
            .iter()
            .map(|label| {
                label
                    .parse::<SeverityClass>()
                    .map_err(|_| format_error(format!("unknown class label '{label}'")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if artifact.features.is_empty() {
            return Err(format_error("no features".to_string()));
        }
        if artifact.trees.is_empty() {
            return Err(format_error("no trees".to_string()));
        }
        for (t, tree) in artifact.trees.iter().enumerate() {
            validate_tree(tree, artifact.features.len(), classes.len())
                .map_err(|reason| format_error(format!("tree {t}: {reason}")))?;
        }

        Ok(Self {
            metadata: artifact.metadata,
            classes,
            features: artifact.features,
            preprocessing: artifact.preprocessing,
            trees: artifact.trees,
        })
    }

    /// Classes in leaf-slot order
    #[must_use]
    pub fn classes(&self) -> &[SeverityClass] {
        &self.classes
    }

    /// Declared preprocessing steps
    #[must_use]
    pub fn preprocessing(&self) -> &[Step] {
        &self.preprocessing
    }

    /// Number of trees
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Encode a record into the feature vector
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError`] if a feature is missing, has the wrong
    /// type or holds an unseen category.
    pub fn encode(&self, record: &Record) -> Result<Vec<f64>, PredictionError> {
        self.features
            .iter()
            .map(|spec| -> Result<f64, PredictionError> {
                let value = record.get(&spec.name).ok_or_else(|| FeatureError::MissingField {
                    name: spec.name.clone(),
                })?;
                match &spec.kind {
                    FeatureKind::Numeric => value.as_f64().ok_or_else(|| {
                        FeatureError::NotNumeric {
                            name: spec.name.clone(),
                            value: value.to_string(),
                        }
                        .into()
                    }),
                    FeatureKind::Categorical { categories } => {
                        encode_category(spec, categories, value)
                    },
                }
            })
            .collect()
    }

    /// Mean class distribution over all trees
    ///
    /// # Errors
    ///
    /// Same as [`ForestClassifier::encode`], plus preprocessing failures.
    pub fn predict_proba(&self, record: &Record) -> Result<Vec<f64>, PredictionError> {
        let record = run_steps(&self.preprocessing, record)?;
        let x = self.encode(&record)?;

        let mut sum = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let leaf = tree.leaf(&x);
            let total: f64 = leaf.iter().sum();
            for (acc, v) in sum.iter_mut().zip(leaf) {
                *acc += if total > 0.0 { v / total } else { 0.0 };
            }
        }
        let n = self.trees.len() as f64;
        Ok(sum.into_iter().map(|s| s / n).collect())
    }
}

impl Classifier for ForestClassifier {
    fn predict(&self, record: &Record) -> Result<SeverityClass, PredictionError> {
        let proba = self.predict_proba(record)?;
        // First maximum wins ties
        let best = proba
            .iter()
            .enumerate()
            .fold(0, |best, (i, p)| if *p > proba[best] { i } else { best });
        Ok(self.classes[best])
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}

fn encode_category(
    spec: &FeatureSpec,
    categories: &[String],
    value: &FieldValue,
) -> Result<f64, PredictionError> {
    let text = value.as_str().ok_or_else(|| PredictionError::NotCategorical {
        feature: spec.name.clone(),
        value: value.to_string(),
    })?;
    categories
        .iter()
        .position(|c| c == text)
        .map(|i| i as f64)
        .ok_or_else(|| PredictionError::UnknownCategory {
            feature: spec.name.clone(),
            value: text.to_string(),
        })
}

fn format_error(reason: String) -> LoadError {
    LoadError::Format { reason }
}

fn validate_tree(tree: &Tree, n_features: usize, n_classes: usize) -> Result<(), String> {
    if tree.nodes.is_empty() {
        return Err("empty tree".to_string());
    }
    let n = tree.nodes.len();
    for (i, node) in tree.nodes.iter().enumerate() {
        match node {
            Node::Split { feature, threshold, left, right } => {
                if *feature >= n_features {
                    return Err(format!("node {i}: feature index {feature} out of range"));
                }
                if threshold.is_nan() {
                    return Err(format!("node {i}: NaN threshold"));
                }
                // Children after parents keeps traversal acyclic
                for child in [left, right] {
                    if *child <= i || *child >= n {
                        return Err(format!("node {i}: invalid child index {child}"));
                    }
                }
            }
            Node::Leaf { value } => {
                if value.len() != n_classes {
                    return Err(format!(
                        "node {i}: leaf has {} values, expected {n_classes}",
                        value.len()
                    ));
                }
                if value.iter().any(|v| !v.is_finite() || *v < 0.0) {
                    return Err(format!(
                        "node {i}: leaf weights must be finite and non-negative"
                    ));
                }
                // Leaves are normalized by their sum at prediction time
                if !value.iter().sum::<f64>().is_finite() {
                    return Err(format!("node {i}: leaf weight sum overflows"));
                }
            }
        }
    }
    Ok(())
}
