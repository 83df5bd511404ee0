//! Reference-dataset fixtures written to temporary directories.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use fairmatch::config::Config;

pub const REFERENCE_HEADER: &str = "resume_text,job_text,bert_similarity_score,match_score,simulated_gender";

/// Labeled rows where `match_score >= 4` roughly tracks `similarity >= 0.5`.
///
/// Two rows break the pattern so the classifier is not perfect and the per-group metrics
/// are non-trivial.
pub fn reference_csv() -> String {
    let mut csv = format!("{REFERENCE_HEADER}\n");
    for i in 0..40 {
        let similarity = 0.05 + i as f64 * 0.0225;
        let mut score = if similarity >= 0.5 { 5 } else { 2 };
        if i == 7 {
            score = 4;
        }
        if i == 31 {
            score = 3;
        }
        let group = if i % 2 == 0 { "Female" } else { "Male" };
        csv.push_str(&format!(
            "\"resume {i}\",\"job {i}\",{similarity:.4},{score},{group}\n"
        ));
    }
    csv
}

pub struct DatasetFixture {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl DatasetFixture {
    pub fn new() -> Self {
        Self::with_contents(&reference_csv())
    }

    pub fn with_contents(contents: &str) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("resume_job_match_with_gender.csv");
        fs::write(&path, contents).expect("write dataset fixture");
        Self { dir, path }
    }

    /// Config that serves this dataset with the stub encoder.
    pub fn stub_config(&self) -> Config {
        Config {
            port: 0,
            data_path: self.path.clone(),
            encoder_stub: true,
            ..Default::default()
        }
    }
}

/// Config pointing at a dataset path that does not exist.
pub fn missing_dataset_config() -> Config {
    Config {
        port: 0,
        data_path: PathBuf::from("/nonexistent/fairmatch/resume_job_match_with_gender.csv"),
        encoder_stub: true,
        ..Default::default()
    }
}

/// Model directory for the real-encoder tests, if configured.
pub fn test_model_path() -> Option<PathBuf> {
    std::env::var("FAIRMATCH_TEST_MODEL_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
}
