//! Ordered symptom vocabulary and the binary feature encoding built on it.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::error::{Error, Result};
use crate::normalize::{canonical_symptom, is_canonical};

/// Symptom names in the column order the model was trained on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomVocabulary {
    symptoms: Vec<String>,
    positions: HashMap<String, usize>,
}

/// Feature vector for one request plus what was (not) recognised on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoding {
    /// One entry per vocabulary symptom, `1.0` when requested.
    pub features: Vec<f32>,
    /// Recognised symptoms, in vocabulary order.
    pub matched: Vec<String>,
    /// Normalized inputs with no vocabulary entry, in request order.
    pub unrecognized: Vec<String>,
}

impl SymptomVocabulary {
    pub fn new(symptoms: Vec<String>) -> Result<Self> {
        if symptoms.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        let mut positions = HashMap::with_capacity(symptoms.len());
        for (idx, symptom) in symptoms.iter().enumerate() {
            if !is_canonical(symptom) {
                // No normalized input can ever equal this entry.
                warn!(position = idx, symptom = %symptom, "vocabulary entry is not canonical");
            }
            positions.entry(symptom.clone()).or_insert(idx);
        }

        Ok(Self { symptoms, positions })
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    pub fn contains(&self, token: &str) -> bool {
        self.positions.contains_key(token)
    }

    /// Encode free-text symptom names against the vocabulary.
    ///
    /// Position `i` is set when the `i`-th vocabulary entry equals any
    /// normalized input. Unknown names are collected but otherwise ignored.
    pub fn encode<S: AsRef<str>>(&self, requested: &[S]) -> Encoding {
        let mut wanted = HashSet::with_capacity(requested.len());
        let mut unrecognized = Vec::new();

        for raw in requested {
            let token = canonical_symptom(raw.as_ref());
            if wanted.contains(&token) {
                continue;
            }
            if !self.contains(&token) {
                unrecognized.push(token.clone());
            }
            wanted.insert(token);
        }

        let mut matched = Vec::new();
        let features = self
            .symptoms
            .iter()
            .map(|symptom| {
                if wanted.contains(symptom) {
                    matched.push(symptom.clone());
                    1.0
                } else {
                    0.0
                }
            })
            .collect();

        Encoding {
            features,
            matched,
            unrecognized,
        }
    }
}
