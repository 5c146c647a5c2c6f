//! Symptom list to disease name prediction.
//!
//! A [`Predictor`] owns the symptom vocabulary, a trained [`Classifier`] and
//! the class-to-disease label map. It is loaded once from an artifact bundle
//! and then answers `predict` calls without mutation.

pub mod artifacts;
pub mod classifier;
pub mod error;
pub mod labels;
pub mod normalize;
pub mod predictor;
pub mod vocabulary;

pub use artifacts::ArtifactPaths;
pub use classifier::{ClassIndex, Classifier, ModelArtifact};
pub use error::{Error, Result};
pub use labels::DiseaseLabels;
pub use normalize::canonical_symptom;
pub use predictor::Predictor;
pub use vocabulary::{Encoding, SymptomVocabulary};
