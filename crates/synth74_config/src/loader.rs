//! Configuration file loading.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use std::path::Path;

/// Loads a `synth74.toml` configuration from a project directory.
///
/// A missing config file is not an error at this level — callers that want
/// "absent file means defaults" should check [`Path::exists`] first and
/// fall back to [`ProjectConfig::default`] instead of calling this.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let config_path = project_dir.join("synth74.toml");
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses a `synth74.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OutputFormat;

    #[test]
    fn parse_empty_config() {
        let config = load_config_from_str("").unwrap();
        assert!(config.project.top_module.is_none());
        assert_eq!(config.output.format, OutputFormat::Sexpr);
    }

    #[test]
    fn parse_top_module_override() {
        let toml = r#"
[project]
top_module = "alu"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.project.top_module.as_deref(), Some("alu"));
    }

    #[test]
    fn parse_json_output_format() {
        let toml = r#"
[output]
format = "json"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn io_error_from_nonexistent_dir() {
        let err = load_config(Path::new("/nonexistent/dir")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
