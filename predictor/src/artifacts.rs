//! Reading the vocabulary, model and label files from disk.
//!
//! Each artifact is either JSON (`.json`) or bincode (`.bin`), picked by
//! extension. Both encodings carry the same serde types.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::classifier::{Classifier, ModelArtifact};
use crate::error::{Error, Result};
use crate::labels::DiseaseLabels;
use crate::vocabulary::SymptomVocabulary;

pub const VOCABULARY_FILE: &str = "symptoms_list.json";
pub const MODEL_FILE: &str = "disease_model.json";
pub const LABELS_FILE: &str = "num_to_disease.json";

/// Locations of the three load-time artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub vocabulary: PathBuf,
    pub model: PathBuf,
    pub labels: PathBuf,
}

impl ArtifactPaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            vocabulary: dir.join(VOCABULARY_FILE),
            model: dir.join(MODEL_FILE),
            labels: dir.join(LABELS_FILE),
        }
    }

    /// `(name, path)` pairs, for logging and fingerprint reports.
    pub fn entries(&self) -> [(&'static str, &Path); 3] {
        [
            ("vocabulary", self.vocabulary.as_path()),
            ("model", self.model.as_path()),
            ("labels", self.labels.as_path()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Bincode,
}

fn format_of(path: &Path) -> Result<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("bin") => Ok(Format::Bincode),
        _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
    }
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Deserialize any artifact type, choosing the decoder by extension.
pub fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = format_of(path)?;
    let bytes = read_bytes(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), ?format, "read artifact");

    let value = match format {
        Format::Json => serde_json::from_slice(&bytes)?,
        Format::Bincode => bincode::deserialize(&bytes)?,
    };
    Ok(value)
}

/// Serialize an artifact, choosing the encoder by extension.
pub fn write_artifact<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let bytes = match format_of(path)? {
        Format::Json => serde_json::to_vec_pretty(value)?,
        Format::Bincode => bincode::serialize(value)?,
    };
    fs::write(path, bytes).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_vocabulary(path: &Path) -> Result<SymptomVocabulary> {
    SymptomVocabulary::new(read_artifact(path)?)
}

/// Load a model and check its structure before it can be used.
pub fn load_model(path: &Path) -> Result<ModelArtifact> {
    let model: ModelArtifact = read_artifact(path)?;
    model.validate()?;
    Ok(model)
}

pub fn load_labels(path: &Path) -> Result<DiseaseLabels> {
    read_artifact(path)
}

/// Lowercase hex SHA-256 of a file's bytes.
pub fn fingerprint(path: &Path) -> Result<String> {
    let bytes = read_bytes(path)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_dir_uses_default_names() {
        let paths = ArtifactPaths::in_dir("/srv/models");
        assert_eq!(paths.vocabulary, Path::new("/srv/models/symptoms_list.json"));
        assert_eq!(paths.model, Path::new("/srv/models/disease_model.json"));
        assert_eq!(paths.labels, Path::new("/srv/models/num_to_disease.json"));
        assert_eq!(paths.entries()[1].0, "model");
    }

    #[test]
    fn test_format_by_extension() {
        assert_eq!(format_of(Path::new("a/model.json")).unwrap(), Format::Json);
        assert_eq!(format_of(Path::new("model.bin")).unwrap(), Format::Bincode);
        assert!(matches!(
            format_of(Path::new("model.pkl")),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(format_of(Path::new("model")).is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_labels(Path::new("/definitely/not/here.json")).unwrap_err();
        match err {
            Error::Io { path, .. } => assert_eq!(path, Path::new("/definitely/not/here.json")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
