use serde::{Deserialize, Serialize};

use super::{argmax, ClassIndex, Classifier};
use crate::error::{Error, Result};

/// Linear decision function `W·x + b` over the symptom vector.
///
/// With two classes a single coefficient row is allowed: a positive
/// decision value selects `classes[1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub classes: Vec<ClassIndex>,
    pub coefficients: Vec<Vec<f32>>,
    pub intercepts: Vec<f32>,
}

impl LogisticRegression {
    /// Raw decision value per coefficient row.
    pub fn decision_function(&self, features: &[f32]) -> Vec<f32> {
        self.coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, bias)| {
                row.iter()
                    .zip(features)
                    .fold(*bias, |acc, (weight, x)| acc + weight * x)
            })
            .collect()
    }
}

impl Classifier for LogisticRegression {
    fn predict(&self, features: &[f32]) -> ClassIndex {
        let scores = self.decision_function(features);
        if scores.len() == 1 && self.classes.len() == 2 {
            return if scores[0] > 0.0 {
                self.classes[1]
            } else {
                self.classes[0]
            };
        }
        self.classes[argmax(&scores)]
    }

    fn n_features(&self) -> usize {
        self.coefficients.first().map_or(0, Vec::len)
    }

    fn classes(&self) -> &[ClassIndex] {
        &self.classes
    }

    fn family(&self) -> &'static str {
        "logistic_regression"
    }

    fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(Error::invalid_model("logistic regression has no classes"));
        }

        let binary = self.classes.len() == 2 && self.coefficients.len() == 1;
        if !binary && self.coefficients.len() != self.classes.len() {
            return Err(Error::invalid_model(format!(
                "{} coefficient rows for {} classes",
                self.coefficients.len(),
                self.classes.len()
            )));
        }
        if self.intercepts.len() != self.coefficients.len() {
            return Err(Error::invalid_model(format!(
                "{} intercepts for {} coefficient rows",
                self.intercepts.len(),
                self.coefficients.len()
            )));
        }

        let width = self.coefficients[0].len();
        if width == 0 {
            return Err(Error::invalid_model("coefficient rows are empty"));
        }
        if self.coefficients.iter().any(|row| row.len() != width) {
            return Err(Error::invalid_model("coefficient rows differ in length"));
        }

        Ok(())
    }
}
