use crate::domain::model::{ScanMode, ScriptLiterals, ARRAY_NAMES};
use crate::utils::error::{ConvertError, Result};
use regex::Regex;
use scraper::{Html, Selector};

/// Text content of the first `<script>` element in document order.
pub fn first_script_text(html: &str) -> Result<Option<String>> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("script")
        .map_err(|e| ConvertError::unexpected(format!("invalid script selector: {:?}", e)))?;

    Ok(document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>()))
}

/// Locates `let <name> = [...];` bindings inside script text.
pub struct LiteralScanner {
    mode: ScanMode,
    patterns: Vec<(&'static str, Regex)>,
}

impl LiteralScanner {
    pub fn new(mode: ScanMode) -> Result<Self> {
        let patterns = ARRAY_NAMES
            .into_iter()
            .map(|name| Ok((name, Self::pattern_for(name, mode)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { mode, patterns })
    }

    fn pattern_for(name: &str, mode: ScanMode) -> Result<Regex> {
        let name = regex::escape(name);
        // In balanced mode the regex only anchors the opening bracket.
        let pattern = match mode {
            ScanMode::FirstClose => format!(r"(?s)\blet\s+{}\s*=\s*(\[.*?\]);", name),
            ScanMode::Balanced => format!(r"\blet\s+{}\s*=\s*\[", name),
        };
        Regex::new(&pattern)
            .map_err(|e| ConvertError::unexpected(format!("invalid pattern for '{}': {}", name, e)))
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    /// Source of the named literal, brackets included.
    pub fn find<'s>(&self, script: &'s str, name: &str) -> Option<&'s str> {
        let (_, regex) = self.patterns.iter().find(|(n, _)| *n == name)?;

        match self.mode {
            ScanMode::FirstClose => regex
                .captures(script)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str()),
            ScanMode::Balanced => regex.find_iter(script).find_map(|head| {
                let open = head.end() - 1;
                let close = matching_bracket(script, open)?;
                let rest = &script[close + 1..];
                rest.trim_start()
                    .starts_with(';')
                    .then(|| &script[open..=close])
            }),
        }
    }

    /// Scans for all three arrays; reports every missing name at once.
    pub fn scan(&self, script: &str) -> Result<ScriptLiterals> {
        let found: Vec<Option<&str>> = ARRAY_NAMES
            .iter()
            .map(|name| {
                let literal = self.find(script, name);
                match literal {
                    Some(source) => {
                        tracing::debug!("Found '{}' literal ({} bytes)", name, source.len())
                    }
                    None => tracing::debug!("No '{}' literal in script", name),
                }
                literal
            })
            .collect();

        let missing: Vec<String> = ARRAY_NAMES
            .iter()
            .zip(&found)
            .filter(|(_, literal)| literal.is_none())
            .map(|(name, _)| name.to_string())
            .collect();

        match found.as_slice() {
            [Some(comptes), Some(tiers), Some(ecritures)] => Ok(ScriptLiterals {
                comptes: comptes.to_string(),
                tiers: tiers.to_string(),
                ecritures: ecritures.to_string(),
            }),
            _ => Err(ConvertError::MissingArrayLiteral { missing }),
        }
    }
}

/// Byte index of the bracket closing the one at `open`, skipping quoted strings.
fn matching_bracket(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (offset, c) in text[open..].char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' | '`' => quote = Some(c),
            '[' | '{' => depth += 1,
            ']' | '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return (c == ']').then_some(open + offset);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"
        let comptes = [{numero: '411000', libelle: 'Clients'}];
        let tiers = [
            {code: 'T1', nom: 'ACME'},
            {code: 'T2', nom: 'Globex'}
        ];
        let ecritures = [{date: '2024-01-01', montant: 100}];
    "#;

    #[test]
    fn test_first_script_text_picks_first_element() {
        let html = r#"<html><head><title>t</title></head>
            <body><p>x</p><script>let a = 1;</script><script>let b = 2;</script></body></html>"#;
        let text = first_script_text(html).unwrap();
        assert_eq!(text.as_deref(), Some("let a = 1;"));
    }

    #[test]
    fn test_first_script_text_none() {
        let html = "<html><body><p>no scripts here</p></body></html>";
        assert_eq!(first_script_text(html).unwrap(), None);
    }

    #[test]
    fn test_script_text_is_raw() {
        let html = "<script>let x = [{a: '<b>&amp;</b>'}];</script>";
        let text = first_script_text(html).unwrap().unwrap();
        assert_eq!(text, "let x = [{a: '<b>&amp;</b>'}];");
    }

    #[test]
    fn test_scan_multiline_literals() {
        let scanner = LiteralScanner::new(ScanMode::FirstClose).unwrap();
        let literals = scanner.scan(SCRIPT).unwrap();

        assert_eq!(literals.comptes, "[{numero: '411000', libelle: 'Clients'}]");
        assert!(literals.tiers.starts_with('['));
        assert!(literals.tiers.contains("Globex"));
        assert!(literals.tiers.ends_with(']'));
        assert_eq!(literals.ecritures, "[{date: '2024-01-01', montant: 100}]");
    }

    #[test]
    fn test_scan_order_independent() {
        let script = "let ecritures = [];\nlet tiers = [];\nlet comptes = [{a: 1}];";
        let scanner = LiteralScanner::new(ScanMode::FirstClose).unwrap();
        let literals = scanner.scan(script).unwrap();
        assert_eq!(literals.comptes, "[{a: 1}]");
        assert_eq!(literals.tiers, "[]");
    }

    #[test]
    fn test_scan_reports_missing_names() {
        let script = "let comptes = [];";
        let scanner = LiteralScanner::new(ScanMode::FirstClose).unwrap();
        match scanner.scan(script) {
            Err(ConvertError::MissingArrayLiteral { missing }) => {
                assert_eq!(missing, vec!["tiers".to_string(), "ecritures".to_string()]);
            }
            other => panic!("expected MissingArrayLiteral, got {:?}", other),
        }
    }

    #[test]
    fn test_name_must_match_whole_word() {
        let script = "let comptesN1 = [];\nlet tiers = [];\nlet ecritures = [];";
        let scanner = LiteralScanner::new(ScanMode::FirstClose).unwrap();
        assert!(scanner.find(script, "comptes").is_none());
    }

    #[test]
    fn test_first_close_truncates_on_embedded_terminator() {
        let script = "let comptes = [{libelle: 'a];b'}];";
        let scanner = LiteralScanner::new(ScanMode::FirstClose).unwrap();
        assert_eq!(scanner.find(script, "comptes"), Some("[{libelle: 'a]"));
    }

    #[test]
    fn test_balanced_handles_embedded_terminator() {
        let script = "let comptes = [{libelle: 'a];b', sous: [1, 2]}] ;";
        let scanner = LiteralScanner::new(ScanMode::Balanced).unwrap();
        assert_eq!(
            scanner.find(script, "comptes"),
            Some("[{libelle: 'a];b', sous: [1, 2]}]")
        );
    }

    #[test]
    fn test_balanced_skips_escaped_quotes() {
        let script = r"let tiers = [{nom: 'l\'atelier ]'}];";
        let scanner = LiteralScanner::new(ScanMode::Balanced).unwrap();
        assert_eq!(scanner.find(script, "tiers"), Some(r"[{nom: 'l\'atelier ]'}]"));
    }

    #[test]
    fn test_balanced_requires_semicolon() {
        let script = "let tiers = [1, 2]\nlet tiers = [3];";
        let scanner = LiteralScanner::new(ScanMode::Balanced).unwrap();
        assert_eq!(scanner.find(script, "tiers"), Some("[3]"));
    }

    #[test]
    fn test_matching_bracket_unbalanced() {
        assert_eq!(matching_bracket("[{a: 1}", 0), None);
        assert_eq!(matching_bracket("[}", 0), None);
    }
}
