use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Names of the `let` bindings read from the script, in output order.
pub const ARRAY_NAMES: [&str; 3] = ["comptes", "tiers", "ecritures"];

/// One object from a source array, keys kept in source order.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// How the closing bracket of an array literal is located.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum ScanMode {
    /// Stop at the first `];` after the opening bracket.
    #[default]
    FirstClose,
    /// Track nesting depth and string literals; the literal must be followed by `;`.
    Balanced,
}

/// Raw JavaScript source of the three array literals, brackets included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLiterals {
    pub comptes: String,
    pub tiers: String,
    pub ecritures: String,
}

impl ScriptLiterals {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        ARRAY_NAMES
            .into_iter()
            .zip([self.comptes.as_str(), self.tiers.as_str(), self.ecritures.as_str()])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComptaData {
    pub comptes: Vec<Record>,
    pub tiers: Vec<Record>,
    pub ecritures: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub comptes: usize,
    pub tiers: usize,
    pub ecritures: usize,
    pub bytes_written: usize,
}
