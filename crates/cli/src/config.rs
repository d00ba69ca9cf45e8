use std::path::Path;

use cdss_rules::EngineConfig;

/// Load the engine configuration from a TOML file, or fall back to the
/// default (every operator, no reserved or required keys).
pub fn load(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read config {}: {e}", path.display()))?;
    let config: EngineConfig = toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        operators = config.operators.len(),
        reserved_keys = config.reserved_keys.len(),
        required_facts = config.required_facts.len(),
        "loaded engine config"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use cdss_rules::Operator;

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_path_uses_default() {
        assert_eq!(load(None).unwrap(), EngineConfig::default());
    }

    #[test]
    fn empty_file_uses_default() {
        let file = write_config("");
        assert_eq!(load(Some(file.path())).unwrap(), EngineConfig::default());
    }

    #[test]
    fn loads_restrictions() {
        let file = write_config(
            r#"
operators = ["==", ">="]
reserved_keys = ["patient_id"]
required_facts = ["age"]
"#,
        );
        let config = load(Some(file.path())).unwrap();
        assert!(config.supports(Operator::Eq));
        assert!(config.supports(Operator::Ge));
        assert!(!config.supports(Operator::In));
        assert!(config.is_reserved("patient_id"));
        assert_eq!(config.required_facts, ["age".to_owned()]);
    }

    #[test]
    fn unknown_operator_is_rejected() {
        let file = write_config(r#"operators = ["=~"]"#);
        assert!(load(Some(file.path())).is_err());
    }

    #[test]
    fn nonexistent_file_is_an_error() {
        assert!(load(Some(Path::new("/nonexistent/cdss.toml"))).is_err());
    }
}
