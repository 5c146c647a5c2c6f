use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use predictor::artifacts::{self, ArtifactPaths};
use predictor::normalize::is_canonical;
use predictor::{Classifier, DiseaseLabels, ModelArtifact, Predictor};

#[derive(Parser)]
#[command(name = "verify")]
#[command(about = "Check a symptom/disease artifact bundle before serving it")]
struct Args {
    /// Directory holding the default artifact files
    #[arg(short, long, default_value = "./artifacts")]
    artifacts_dir: PathBuf,

    /// Vocabulary file (.json or .bin)
    #[arg(long)]
    vocabulary: Option<PathBuf>,

    /// Model file (.json or .bin)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Label map file (.json or .bin)
    #[arg(long)]
    labels: Option<PathBuf>,

    /// Comma-separated symptoms to run through the loaded predictor
    #[arg(short, long, value_delimiter = ',')]
    symptoms: Option<Vec<String>>,

    /// Write bincode copies of the bundle into this directory
    #[arg(long)]
    export_bin: Option<PathBuf>,

    /// Show detailed information
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn paths(&self) -> ArtifactPaths {
        let defaults = ArtifactPaths::in_dir(&self.artifacts_dir);
        ArtifactPaths {
            vocabulary: self.vocabulary.clone().unwrap_or(defaults.vocabulary),
            model: self.model.clone().unwrap_or(defaults.model),
            labels: self.labels.clone().unwrap_or(defaults.labels),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    run(&Args::parse())
}

/// Check the bundle and, only once it is consistent, predict and export.
fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let paths = args.paths();

    println!("🔍 Artifact Bundle Verifier");
    println!("══════════════════════════");

    for (name, path) in paths.entries() {
        println!("📁 {:<10} {}", name, path.display());
        println!("   sha256     {}", artifacts::fingerprint(path)?);
    }

    println!("📖 Loading vocabulary...");
    let vocabulary = artifacts::load_vocabulary(&paths.vocabulary)?;
    let odd: Vec<&String> = vocabulary
        .symptoms()
        .iter()
        .filter(|symptom| !is_canonical(symptom))
        .collect();
    println!("✅ {} symptoms", vocabulary.len());
    if !odd.is_empty() {
        println!("⚠️  {} entries can never match a request: {:?}", odd.len(), odd);
    }

    println!("📖 Loading model...");
    let model = artifacts::load_model(&paths.model)?;
    println!(
        "✅ {} over {} features, {} classes",
        model.family(),
        model.n_features(),
        model.classes().len()
    );

    println!("📖 Loading labels...");
    let labels = artifacts::load_labels(&paths.labels)?;
    let unused = labels.unused(model.classes());
    println!("✅ {} labels ({} never predicted)", labels.len(), unused.len());
    if args.verbose {
        for class in model.classes() {
            println!("   {:>4} → {}", class, labels.get(*class).unwrap_or("<missing>"));
        }
        if !unused.is_empty() {
            println!("   unused: {:?}", unused);
        }
    }

    println!("🔗 Checking bundle consistency...");
    let predictor = Predictor::new(vocabulary, Box::new(model.clone()), labels)?;
    println!("✅ Bundle is consistent");

    if let Some(symptoms) = &args.symptoms {
        let encoding = predictor.encode(symptoms);
        if args.verbose {
            println!("   matched:      {:?}", encoding.matched);
            println!("   unrecognized: {:?}", encoding.unrecognized);
        }
        let disease = predictor.predict(symptoms)?;
        println!("➡️  Predicted disease: {}", disease);
    }

    if let Some(dir) = &args.export_bin {
        export_bin(
            dir,
            predictor.vocabulary().symptoms(),
            &model,
            predictor.labels(),
        )?;
        println!("💾 Binary bundle written to {}", dir.display());
    }

    Ok(())
}

fn export_bin(
    dir: &Path,
    symptoms: &[String],
    model: &ModelArtifact,
    labels: &DiseaseLabels,
) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(dir)?;
    artifacts::write_artifact(&dir.join("symptoms_list.bin"), symptoms)?;
    artifacts::write_artifact(&dir.join("disease_model.bin"), model)?;
    artifacts::write_artifact(&dir.join("num_to_disease.bin"), labels)?;
    Ok(())
}
