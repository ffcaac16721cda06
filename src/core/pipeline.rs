use crate::core::literal::decode_records;
use crate::core::script::{first_script_text, LiteralScanner};
use crate::core::{
    ComptaData, ConfigProvider, ConversionReport, Pipeline, Record, ScriptLiterals, Storage,
};
use crate::utils::error::{ConvertError, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

pub struct HtmlScriptPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> HtmlScriptPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for HtmlScriptPipeline<S, C> {
    fn extract(&self) -> Result<ScriptLiterals> {
        let input = self.config.input_path();
        tracing::debug!("Reading HTML from: {}", input.display());
        let html = self.storage.read_to_string(input)?;

        let script = first_script_text(&html)?.ok_or_else(|| ConvertError::MissingScriptElement {
            path: input.to_path_buf(),
        })?;
        tracing::debug!("First <script> element holds {} bytes", script.len());

        let scanner = LiteralScanner::new(self.config.scan_mode())?;
        tracing::debug!("Scanning with {:?} mode", scanner.mode());
        scanner.scan(&script)
    }

    fn transform(&self, literals: ScriptLiterals) -> Result<ComptaData> {
        let decoded = literals
            .iter()
            .map(|(name, source)| {
                let records = decode_records(name, source)?;
                tracing::debug!("Decoded {} record(s) from '{}'", records.len(), name);
                Ok(records)
            })
            .collect::<Result<Vec<Vec<Record>>>>()?;

        // iter() yields the arrays in output order.
        let [comptes, tiers, ecritures]: [Vec<Record>; 3] = decoded
            .try_into()
            .map_err(|_| ConvertError::unexpected("expected exactly three decoded arrays"))?;

        Ok(ComptaData {
            comptes,
            tiers,
            ecritures,
        })
    }

    fn load(&self, data: ComptaData) -> Result<ConversionReport> {
        let output = self.config.output_path();
        let json = render_json(&data, self.config.indent())?;

        tracing::debug!("Writing {} bytes to {}", json.len(), output.display());
        self.storage.write_file(output, json.as_bytes())?;

        Ok(ConversionReport {
            input_path: self.config.input_path().to_path_buf(),
            output_path: output.to_path_buf(),
            comptes: data.comptes.len(),
            tiers: data.tiers.len(),
            ecritures: data.ecritures.len(),
            bytes_written: json.len(),
        })
    }
}

/// Pretty-prints with `indent` spaces; non-ASCII text is written as-is.
pub fn render_json<T: Serialize>(value: &T, indent: usize) -> Result<String> {
    let indent = vec![b' '; indent];
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(&indent));

    value
        .serialize(&mut serializer)
        .map_err(|e| ConvertError::unexpected(format!("JSON serialization failed: {}", e)))?;

    String::from_utf8(buffer)
        .map_err(|e| ConvertError::unexpected(format!("serialized JSON is not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ScanMode;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    #[derive(Default)]
    struct MockStorage {
        files: RefCell<HashMap<PathBuf, Vec<u8>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, content: &str) -> Self {
            let storage = Self::default();
            storage
                .files
                .borrow_mut()
                .insert(PathBuf::from(path), content.as_bytes().to_vec());
            storage
        }

        fn get_file(&self, path: &str) -> Option<String> {
            self.files
                .borrow()
                .get(Path::new(path))
                .map(|data| String::from_utf8_lossy(data).into_owned())
        }
    }

    impl Storage for MockStorage {
        fn read_to_string(&self, path: &Path) -> Result<String> {
            self.get_file(&path.to_string_lossy())
                .ok_or_else(|| ConvertError::FileNotFound {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
                })
        }

        fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        input: PathBuf,
        output: PathBuf,
        scan: ScanMode,
        indent: usize,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                input: PathBuf::from("essai.html"),
                output: PathBuf::from("donnees_comptables.json"),
                scan: ScanMode::FirstClose,
                indent: 4,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &Path {
            &self.input
        }

        fn output_path(&self) -> &Path {
            &self.output
        }

        fn scan_mode(&self) -> ScanMode {
            self.scan
        }

        fn indent(&self) -> usize {
            self.indent
        }
    }

    const HTML: &str = r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"></head><body>
<script>
    let comptes = [{numero: '411000', libelle: 'Clients'}];
    let tiers = [{code: 'T1', nom: 'ACME'}];
    let ecritures = [{date: '2024-01-01', montant: 100}];
</script>
</body></html>"#;

    #[test]
    fn test_extract_reads_configured_input() {
        let pipeline = HtmlScriptPipeline::new(MockStorage::with_file("essai.html", HTML), MockConfig::new());
        let literals = pipeline.extract().unwrap();
        assert_eq!(literals.tiers, "[{code: 'T1', nom: 'ACME'}]");
    }

    #[test]
    fn test_extract_missing_input() {
        let pipeline = HtmlScriptPipeline::new(MockStorage::default(), MockConfig::new());
        assert!(matches!(
            pipeline.extract(),
            Err(ConvertError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_extract_without_script() {
        let storage = MockStorage::with_file("essai.html", "<html><body><p>vide</p></body></html>");
        let pipeline = HtmlScriptPipeline::new(storage, MockConfig::new());
        assert!(matches!(
            pipeline.extract(),
            Err(ConvertError::MissingScriptElement { .. })
        ));
    }

    #[test]
    fn test_transform_keeps_array_order() {
        let pipeline = HtmlScriptPipeline::new(MockStorage::default(), MockConfig::new());
        let literals = ScriptLiterals {
            comptes: "[{a: 1}]".to_string(),
            tiers: "[{b: 2}, {b: 3}]".to_string(),
            ecritures: "[]".to_string(),
        };
        let data = pipeline.transform(literals).unwrap();
        assert_eq!(data.comptes.len(), 1);
        assert_eq!(data.tiers.len(), 2);
        assert!(data.ecritures.is_empty());
    }

    #[test]
    fn test_full_run_writes_expected_json() {
        let storage = MockStorage::with_file("essai.html", HTML);
        let pipeline = HtmlScriptPipeline::new(storage, MockConfig::new());

        let literals = pipeline.extract().unwrap();
        let data = pipeline.transform(literals).unwrap();
        let report = pipeline.load(data).unwrap();

        assert_eq!(report.comptes, 1);
        assert_eq!(report.tiers, 1);
        assert_eq!(report.ecritures, 1);

        let written = pipeline.storage.get_file("donnees_comptables.json").unwrap();
        let expected = r#"{
    "comptes": [
        {
            "numero": "411000",
            "libelle": "Clients"
        }
    ],
    "tiers": [
        {
            "code": "T1",
            "nom": "ACME"
        }
    ],
    "ecritures": [
        {
            "date": "2024-01-01",
            "montant": 100
        }
    ]
}"#;
        assert_eq!(written, expected);
        assert_eq!(report.bytes_written, expected.len());
    }

    #[test]
    fn test_render_json_keeps_non_ascii() {
        let value = serde_json::json!({"libelle": "Créances €"});
        let rendered = render_json(&value, 2).unwrap();
        assert_eq!(rendered, "{\n  \"libelle\": \"Créances €\"\n}");
    }
}
