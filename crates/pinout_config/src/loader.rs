//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::PinoutConfig;
use pinout_common::Frequency;
use std::path::Path;

/// The configuration file looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "pinout.toml";

/// Loads and validates `<project_dir>/pinout.toml`.
pub fn load_config(project_dir: &Path) -> Result<PinoutConfig, ConfigError> {
    let content = std::fs::read_to_string(project_dir.join(CONFIG_FILE_NAME))?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<PinoutConfig, ConfigError> {
    let config: PinoutConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &PinoutConfig) -> Result<(), ConfigError> {
    if config.board.name.is_empty() {
        return Err(ConfigError::MissingField("board.name".to_string()));
    }
    if config.build.name.is_empty() {
        return Err(ConfigError::MissingField("build.name".to_string()));
    }
    for period in &config.constraints.period {
        if period.resource.is_empty() {
            return Err(ConfigError::MissingField(
                "constraints.period.resource".to_string(),
            ));
        }
        period.frequency.parse::<Frequency>().map_err(|e| {
            ConfigError::ValidationError(format!("constraint on '{}': {e}", period.resource))
        })?;
    }
    if let Some(request) = config.requests.iter().find(|r| r.resource.is_empty()) {
        return Err(ConfigError::MissingField(format!(
            "request.resource (index {})",
            request.index
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const FULL: &str = r#"
[board]
name = "digilent_nexys_a7"
variant = "a7-50"
toolchain = "vivado"

[build]
name = "blinky"

[[request]]
resource = "clk100"

[[request]]
resource = "user_led"
index = 3

[[constraints.period]]
resource = "clk100"
frequency = "100MHz"
"#;

    #[test]
    fn parse_full_config() {
        let config = load_config_from_str(FULL).unwrap();
        assert_eq!(config.board.name, "digilent_nexys_a7");
        assert_eq!(config.board.variant.as_deref(), Some("a7-50"));
        assert_eq!(config.build.name, "blinky");
        assert_eq!(config.requests.len(), 2);
        assert_eq!(config.constraints.period.len(), 1);
    }

    #[test]
    fn unknown_variant_is_not_a_config_error() {
        let config = load_config_from_str(
            r#"
[board]
name = "digilent_nexys_a7"
variant = "a7-999"
"#,
        )
        .unwrap();
        assert_eq!(config.board.variant.as_deref(), Some("a7-999"));
    }

    #[test]
    fn missing_board_name_errors() {
        let err = load_config_from_str("[board]\nname = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn missing_board_section_errors() {
        let err = load_config_from_str("[build]\nname = \"top\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn bad_frequency_errors() {
        let err = load_config_from_str(
            r#"
[board]
name = "digilent_nexys_a7"

[[constraints.period]]
resource = "clk100"
frequency = "fast"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not toml {{{").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn load_from_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), FULL).unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.build.name, "blinky");
    }

    #[test]
    fn io_error_from_nonexistent_dir() {
        let err = load_config(Path::new("/nonexistent/dir")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
