use crate::config::storage::LocalStorage;
use crate::config::ConversionSettings;
use crate::core::pipeline::HtmlScriptPipeline;
use crate::core::{ConfigProvider, ConversionReport, Pipeline};
use crate::utils::error::Result;
use std::path::Path;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<ConversionReport> {
        tracing::info!("Starting conversion...");

        // Extract
        tracing::info!("Extracting array literals...");
        let literals = self.pipeline.extract()?;

        // Transform
        tracing::info!("Normalizing and parsing literals...");
        let data = self.pipeline.transform(literals)?;
        tracing::info!(
            "Parsed {} compte(s), {} tiers, {} ecriture(s)",
            data.comptes.len(),
            data.tiers.len(),
            data.ecritures.len()
        );

        // Load
        tracing::info!("Writing JSON...");
        let report = self.pipeline.load(data)?;
        tracing::info!(
            "Output saved to: {} ({} bytes)",
            report.output_path.display(),
            report.bytes_written
        );

        Ok(report)
    }
}

/// Converts `input` to `output` with default settings.
pub fn convert(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<ConversionReport> {
    convert_with(ConversionSettings::new(input, output))
}

pub fn convert_with<C: ConfigProvider>(config: C) -> Result<ConversionReport> {
    let pipeline = HtmlScriptPipeline::new(LocalStorage::new(), config);
    EtlEngine::new(pipeline).run()
}
