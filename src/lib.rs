pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::{storage::LocalStorage, ConversionSettings};
pub use crate::core::{
    etl::{convert, convert_with, EtlEngine},
    pipeline::HtmlScriptPipeline,
};
pub use domain::model::{ComptaData, ConversionReport, Record, ScanMode};
pub use utils::error::{ConvertError, Result};
