#[cfg(feature = "cli")]
pub mod cli;
pub mod storage;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::ScanMode;
use crate::utils::error::Result;
use crate::utils::validation::{validate_distinct_paths, validate_path, validate_range, Validate};
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT: &str = "essai.html";
pub const DEFAULT_OUTPUT: &str = "donnees_comptables.json";
pub const DEFAULT_INDENT: usize = 4;
pub const MAX_INDENT: usize = 16;

/// Fully resolved settings for one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSettings {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub scan_mode: ScanMode,
    pub indent: usize,
}

impl ConversionSettings {
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self {
            input_path: input.as_ref().to_path_buf(),
            output_path: output.as_ref().to_path_buf(),
            scan_mode: ScanMode::default(),
            indent: DEFAULT_INDENT,
        }
    }

    pub fn with_scan_mode(mut self, scan_mode: ScanMode) -> Self {
        self.scan_mode = scan_mode;
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT, DEFAULT_OUTPUT)
    }
}

impl ConfigProvider for ConversionSettings {
    fn input_path(&self) -> &Path {
        &self.input_path
    }

    fn output_path(&self) -> &Path {
        &self.output_path
    }

    fn scan_mode(&self) -> ScanMode {
        self.scan_mode
    }

    fn indent(&self) -> usize {
        self.indent
    }
}

impl Validate for ConversionSettings {
    fn validate(&self) -> Result<()> {
        validate_path("input.path", &self.input_path)?;
        validate_path("output.path", &self.output_path)?;
        validate_distinct_paths(&self.input_path, &self.output_path)?;
        validate_range("output.indent", self.indent, 0, MAX_INDENT)
    }
}
