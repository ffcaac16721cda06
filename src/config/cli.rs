use super::toml_config::TomlConfig;
use super::{ConversionSettings, DEFAULT_INDENT, DEFAULT_INPUT, DEFAULT_OUTPUT};
use crate::domain::model::ScanMode;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "compta-extract")]
#[command(about = "Extract comptes, tiers and ecritures arrays from an HTML page into JSON")]
pub struct CliConfig {
    /// HTML file whose first <script> holds the data [default: essai.html]
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// JSON file to create or overwrite [default: donnees_comptables.json]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// How the end of each array literal is found [default: first-close]
    #[arg(long, value_enum)]
    pub scan: Option<ScanMode>,

    /// Spaces per indentation level in the output [default: 4]
    #[arg(long)]
    pub indent: Option<usize>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    /// Merges flags over the optional config file over built-in defaults.
    pub fn resolve(&self) -> Result<ConversionSettings> {
        let file = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                file
            }
            None => TomlConfig::default(),
        };

        Ok(ConversionSettings {
            input_path: self
                .input
                .clone()
                .or(file.input.path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
            output_path: self
                .output
                .clone()
                .or(file.output.path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            scan_mode: self.scan.or(file.extraction.scan).unwrap_or_default(),
            indent: self.indent.or(file.output.indent).unwrap_or(DEFAULT_INDENT),
        })
    }
}
