use serde::{Deserialize, Serialize};

use super::{argmax, ClassIndex, Classifier, DecisionTree};
use crate::error::{Error, Result};

/// Averaged ensemble of decision trees sharing one class list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub classes: Vec<ClassIndex>,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Mean of each tree's normalized leaf weights.
    pub fn probabilities(&self, features: &[f32]) -> Vec<f32> {
        let mut totals = vec![0.0f32; self.classes.len()];
        for tree in &self.trees {
            let weights = tree.leaf_weights(features);
            let sum: f32 = weights.iter().sum();
            if sum <= 0.0 {
                continue;
            }
            for (total, weight) in totals.iter_mut().zip(weights) {
                *total += weight / sum;
            }
        }

        let count = self.trees.len() as f32;
        totals.iter_mut().for_each(|total| *total /= count);
        totals
    }
}

impl Classifier for RandomForest {
    fn predict(&self, features: &[f32]) -> ClassIndex {
        self.classes[argmax(&self.probabilities(features))]
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[ClassIndex] {
        &self.classes
    }

    fn family(&self) -> &'static str {
        "random_forest"
    }

    fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(Error::invalid_model("random forest has no classes"));
        }
        if self.trees.is_empty() {
            return Err(Error::invalid_model("random forest has no trees"));
        }

        for (idx, tree) in self.trees.iter().enumerate() {
            if tree.n_features != self.n_features || tree.classes != self.classes {
                return Err(Error::invalid_model(format!(
                    "tree {idx} does not share the forest's features and classes"
                )));
            }
            tree.validate()
                .map_err(|err| Error::invalid_model(format!("tree {idx}: {err}")))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::TreeNode;

    fn stump(feature: usize, absent: Vec<f32>, present: Vec<f32>) -> DecisionTree {
        DecisionTree {
            n_features: 2,
            classes: vec![10, 20],
            nodes: vec![
                TreeNode::Split {
                    feature,
                    threshold: 0.5,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { weights: absent },
                TreeNode::Leaf { weights: present },
            ],
        }
    }

    fn forest() -> RandomForest {
        RandomForest {
            n_features: 2,
            classes: vec![10, 20],
            trees: vec![
                stump(0, vec![9.0, 1.0], vec![1.0, 3.0]),
                stump(1, vec![2.0, 0.0], vec![0.0, 50.0]),
                stump(1, vec![5.0, 5.0], vec![1.0, 1.0]),
            ],
        }
    }

    #[test]
    fn test_forest_averages_probabilities() {
        let forest = forest();
        forest.validate().unwrap();

        let probs = forest.probabilities(&[0.0, 0.0]);
        assert!((probs[0] - (0.9 + 1.0 + 0.5) / 3.0).abs() < 1e-6);
        assert!((probs[1] - (0.1 + 0.0 + 0.5) / 3.0).abs() < 1e-6);
        assert_eq!(forest.predict(&[0.0, 0.0]), 10);
    }

    #[test]
    fn test_forest_predict() {
        let forest = forest();
        assert_eq!(forest.predict(&[0.0, 1.0]), 20);
        assert_eq!(forest.predict(&[1.0, 0.0]), 10);
    }

    #[test]
    fn test_forest_rejects_mismatched_tree() {
        let mut forest = forest();
        forest.trees[1].classes = vec![10, 30];
        assert!(matches!(forest.validate(), Err(Error::InvalidModel(_))));
    }

    #[test]
    fn test_forest_rejects_invalid_tree() {
        let mut forest = forest();
        forest.trees[2].nodes.truncate(2);
        assert!(forest.validate().is_err());
    }

    #[test]
    fn test_empty_forest_rejected() {
        let forest = RandomForest {
            n_features: 2,
            classes: vec![10, 20],
            trees: Vec::new(),
        };
        assert!(forest.validate().is_err());
    }
}
