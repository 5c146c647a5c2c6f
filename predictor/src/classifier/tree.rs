use serde::{Deserialize, Serialize};

use super::{argmax, ClassIndex, Classifier};
use crate::error::{Error, Result};

/// Binary decision tree stored as a flat node list rooted at index 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub n_features: usize,
    pub classes: Vec<ClassIndex>,
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// Samples with `features[feature] <= threshold` go left.
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    /// Per-class weights (sample counts or fractions), aligned with `classes`.
    Leaf { weights: Vec<f32> },
}

impl DecisionTree {
    /// Weights of the leaf reached by `features`.
    pub fn leaf_weights(&self, features: &[f32]) -> &[f32] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                TreeNode::Leaf { weights } => return weights,
            }
        }
    }
}

impl Classifier for DecisionTree {
    fn predict(&self, features: &[f32]) -> ClassIndex {
        self.classes[argmax(self.leaf_weights(features))]
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[ClassIndex] {
        &self.classes
    }

    fn family(&self) -> &'static str {
        "decision_tree"
    }

    fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(Error::invalid_model("decision tree has no classes"));
        }
        if self.nodes.is_empty() {
            return Err(Error::invalid_model("decision tree has no nodes"));
        }

        let count = self.nodes.len();
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    left,
                    right,
                    ..
                } => {
                    if *feature >= self.n_features {
                        return Err(Error::invalid_model(format!(
                            "node {idx} splits on feature {feature} but the tree has {} features",
                            self.n_features
                        )));
                    }
                    // Children must come after their parent, which rules out cycles.
                    for child in [*left, *right] {
                        if child <= idx || child >= count {
                            return Err(Error::invalid_model(format!(
                                "node {idx} points to invalid child {child}"
                            )));
                        }
                    }
                }
                TreeNode::Leaf { weights } => {
                    if weights.len() != self.classes.len() {
                        return Err(Error::invalid_model(format!(
                            "leaf {idx} has {} weights for {} classes",
                            weights.len(),
                            self.classes.len()
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}
