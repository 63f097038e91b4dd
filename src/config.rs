use std::path::{Path, PathBuf};

/// Where criterion wrote its samples, relative to the analysis directory.
pub const DEFAULT_CRITERION_DIR: &str = "../target/criterion";

#[derive(Clone, Debug)]
pub struct AnalysisConfig {
    /// Root of criterion's output (`target/criterion`).
    pub criterion_dir: PathBuf,
    /// Directory the PNG files are written to.
    pub out_dir: PathBuf,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            criterion_dir: PathBuf::from(DEFAULT_CRITERION_DIR),
            out_dir: PathBuf::from("."),
        }
    }
}

impl AnalysisConfig {
    /// Directory of one category inside a criterion group.
    pub fn category_dir(&self, group: &str, category: &str) -> PathBuf {
        self.criterion_dir.join(group).join(category)
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.out_dir.join(file_name)
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}
