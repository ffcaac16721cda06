pub mod etl;
pub mod literal;
pub mod pipeline;
pub mod script;

pub use crate::domain::model::{ComptaData, ConversionReport, Record, ScriptLiterals};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
