use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use predictor::ArtifactPaths;

#[derive(Parser, Debug, Clone)]
#[command(name = "symptom-server")]
#[command(about = "Serve disease predictions for symptom lists over HTTP")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "SYMPTOM_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// Directory holding symptoms_list.json, disease_model.json and num_to_disease.json
    #[arg(long, env = "SYMPTOM_ARTIFACTS_DIR", default_value = "./artifacts")]
    pub artifacts_dir: PathBuf,

    /// Vocabulary file (overrides the one in the artifacts directory)
    #[arg(long, env = "SYMPTOM_VOCABULARY")]
    pub vocabulary: Option<PathBuf>,

    /// Model file (overrides the one in the artifacts directory)
    #[arg(long, env = "SYMPTOM_MODEL")]
    pub model: Option<PathBuf>,

    /// Label map file (overrides the one in the artifacts directory)
    #[arg(long, env = "SYMPTOM_LABELS")]
    pub labels: Option<PathBuf>,
}

impl ServerConfig {
    pub fn artifact_paths(&self) -> ArtifactPaths {
        let defaults = ArtifactPaths::in_dir(&self.artifacts_dir);
        ArtifactPaths {
            vocabulary: self.vocabulary.clone().unwrap_or(defaults.vocabulary),
            model: self.model.clone().unwrap_or(defaults.model),
            labels: self.labels.clone().unwrap_or(defaults.labels),
        }
    }
}
