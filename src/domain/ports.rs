use crate::domain::model::{ComptaData, ConversionReport, ScanMode, ScriptLiterals};
use crate::utils::error::Result;
use std::path::Path;

pub trait Storage {
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &Path;
    fn output_path(&self) -> &Path;
    fn scan_mode(&self) -> ScanMode;
    fn indent(&self) -> usize;
}

pub trait Pipeline {
    fn extract(&self) -> Result<ScriptLiterals>;
    fn transform(&self, literals: ScriptLiterals) -> Result<ComptaData>;
    fn load(&self, data: ComptaData) -> Result<ConversionReport>;
}
