//! Classifier capability and the model families that can be loaded from disk.

mod forest;
mod linear;
mod tree;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use forest::RandomForest;
pub use linear::LogisticRegression;
pub use tree::{DecisionTree, TreeNode};

/// Integer label produced by a classifier.
pub type ClassIndex = i64;

/// A trained decision function over binary symptom vectors.
///
/// Callers must pass exactly `n_features()` values.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &[f32]) -> ClassIndex;

    /// Width of the feature vectors this classifier accepts.
    fn n_features(&self) -> usize;

    /// Every class index `predict` can return.
    fn classes(&self) -> &[ClassIndex];

    fn family(&self) -> &'static str {
        "custom"
    }

    /// Structural checks. A classifier that passes must not panic or loop
    /// in `predict` on vectors of `n_features()` values.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Serialized model, tagged by family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelArtifact {
    DecisionTree(DecisionTree),
    RandomForest(RandomForest),
    LogisticRegression(LogisticRegression),
}

impl ModelArtifact {
    fn inner(&self) -> &dyn Classifier {
        match self {
            ModelArtifact::DecisionTree(model) => model,
            ModelArtifact::RandomForest(model) => model,
            ModelArtifact::LogisticRegression(model) => model,
        }
    }
}

impl Classifier for ModelArtifact {
    fn predict(&self, features: &[f32]) -> ClassIndex {
        self.inner().predict(features)
    }

    fn n_features(&self) -> usize {
        self.inner().n_features()
    }

    fn classes(&self) -> &[ClassIndex] {
        self.inner().classes()
    }

    fn family(&self) -> &'static str {
        self.inner().family()
    }

    fn validate(&self) -> Result<()> {
        self.inner().validate()
    }
}

/// Position of the largest value; ties resolve to the first one.
pub(crate) fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (idx, value) in values.iter().enumerate().skip(1) {
        if *value > values[best] {
            best = idx;
        }
    }
    best
}
