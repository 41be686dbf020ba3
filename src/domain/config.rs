use std::{path::Path, str::FromStr};

use serde::Deserialize;

/// Characters kept from a title or author name when no limit is configured.
const DEFAULT_FIELD_LEN: usize = 99;

/// Configuration for the catalog menu.
///
/// All keys are optional in the TOML file. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Maximum number of characters kept from an entered title.
    ///
    /// Longer input is truncated at a character boundary.
    max_title_len: usize,

    /// Maximum number of characters kept from an entered author name.
    max_author_len: usize,

    /// Whether menu output is colored.
    pub color: ColorChoice,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_title_len: DEFAULT_FIELD_LEN,
            max_author_len: DEFAULT_FIELD_LEN,
            color: ColorChoice::default(),
        }
    }
}

/// Errors that can occur when loading a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    /// The file is not valid TOML or contains unknown keys.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The file parsed but holds an unusable value.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, if the TOML content is
    /// invalid, or if a length limit is zero.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Returns the maximum number of characters kept from a title.
    #[must_use]
    pub const fn max_title_len(&self) -> usize {
        self.max_title_len
    }

    /// Returns the maximum number of characters kept from an author name.
    #[must_use]
    pub const fn max_author_len(&self) -> usize {
        self.max_author_len
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.max_title_len == 0 {
            return Err(ConfigError::Invalid(
                "max_title_len must be at least 1".to_string(),
            ));
        }
        if self.max_author_len == 0 {
            return Err(ConfigError::Invalid(
                "max_author_len must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str::<Self>(s)?.validate()
    }
}

/// When to emit colored output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color when stdout supports it.
    #[default]
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

impl FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            _ => Err(format!(
                "unknown color choice '{s}' (expected auto, always or never)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;
    use test_case::test_case;

    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.max_title_len(), 99);
        assert_eq!(config.max_author_len(), 99);
        assert_eq!(config.color, ColorChoice::Auto);
    }

    #[test]
    fn parses_all_keys() {
        let config: Config = "max_title_len = 10\nmax_author_len = 20\ncolor = \"never\"\n"
            .parse()
            .unwrap();
        assert_eq!(config.max_title_len(), 10);
        assert_eq!(config.max_author_len(), 20);
        assert_eq!(config.color, ColorChoice::Never);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = "digits = 3\n".parse::<Config>().unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test_case("max_title_len = 0"; "zero title")]
    #[test_case("max_author_len = 0"; "zero author")]
    fn rejects_zero_limits(content: &str) {
        let err = content.parse::<Config>().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, "max_title_len = 40\ncolor = \"always\"\n").unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.max_title_len(), 40);
        assert_eq!(config.max_author_len(), 99);
        assert_eq!(config.color, ColorChoice::Always);
    }

    #[test]
    fn invalid_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, "max_title_len = \"long\"\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempdir().unwrap();
        let err = Config::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read(_)));
    }

    #[test_case("auto", ColorChoice::Auto)]
    #[test_case("ALWAYS", ColorChoice::Always)]
    #[test_case("never", ColorChoice::Never)]
    fn parses_color_choice(input: &str, expected: ColorChoice) {
        assert_eq!(input.parse::<ColorChoice>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_color_choice() {
        assert!("sometimes".parse::<ColorChoice>().is_err());
    }
}
