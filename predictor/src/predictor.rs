use std::fmt;

use tracing::{debug, info};

use crate::artifacts::{self, ArtifactPaths};
use crate::classifier::Classifier;
use crate::error::{Error, Result};
use crate::labels::DiseaseLabels;
use crate::vocabulary::{Encoding, SymptomVocabulary};

/// Immutable prediction context: vocabulary, classifier and label map.
///
/// Built once at startup; `predict` only borrows it, so a single instance
/// can be shared across threads.
pub struct Predictor {
    vocabulary: SymptomVocabulary,
    classifier: Box<dyn Classifier>,
    labels: DiseaseLabels,
}

impl Predictor {
    /// Tie the three parts together, refusing malformed classifiers and
    /// inconsistent combinations.
    pub fn new(
        vocabulary: SymptomVocabulary,
        classifier: Box<dyn Classifier>,
        labels: DiseaseLabels,
    ) -> Result<Self> {
        classifier.validate()?;
        if classifier.n_features() != vocabulary.len() {
            return Err(Error::DimensionMismatch {
                vocabulary: vocabulary.len(),
                model: classifier.n_features(),
            });
        }
        labels.ensure_covers(classifier.classes())?;

        Ok(Self {
            vocabulary,
            classifier,
            labels,
        })
    }

    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let vocabulary = artifacts::load_vocabulary(&paths.vocabulary)?;
        let model = artifacts::load_model(&paths.model)?;
        let labels = artifacts::load_labels(&paths.labels)?;
        info!(
            symptoms = vocabulary.len(),
            classes = model.classes().len(),
            labels = labels.len(),
            family = model.family(),
            "loaded artifacts"
        );

        Self::new(vocabulary, Box::new(model), labels)
    }

    pub fn vocabulary(&self) -> &SymptomVocabulary {
        &self.vocabulary
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn labels(&self) -> &DiseaseLabels {
        &self.labels
    }

    pub fn encode<S: AsRef<str>>(&self, requested: &[S]) -> Encoding {
        self.vocabulary.encode(requested)
    }

    /// Disease name for a list of free-text symptom names.
    ///
    /// Unknown symptoms are ignored and an empty list is valid.
    pub fn predict<S: AsRef<str>>(&self, requested: &[S]) -> Result<&str> {
        let encoding = self.encode(requested);
        if !encoding.unrecognized.is_empty() {
            debug!(unrecognized = ?encoding.unrecognized, "ignoring unknown symptoms");
        }

        let class = self.classifier.predict(&encoding.features);
        self.labels.get(class).ok_or(Error::UnknownClass(class))
    }
}

impl fmt::Debug for Predictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predictor")
            .field("symptoms", &self.vocabulary.len())
            .field("family", &self.classifier.family())
            .field("labels", &self.labels.len())
            .finish()
    }
}
