use config::{Config, ConfigError, Environment, File};
use serde_derive::Deserialize;
use std::path::PathBuf;

/// Reporter settings loaded by the harness. File values can be overridden
/// with `ZENQA_`-prefixed environment variables (e.g. `ZENQA_OUTPUT`).
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_title() -> String {
    "ZenQA API Test Report".to_owned()
}

fn default_output() -> PathBuf {
    PathBuf::from("reports/detailed-test-report.html")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: default_title(),
            output: default_output(),
        }
    }
}

impl Settings {
    /// Loads settings from a configuration file. Supported: YAML, JSON,
    /// TOML, HJSON.
    pub fn from_file(file: PathBuf) -> Result<Self, ConfigError> {
        let mut config = Config::new();
        config.merge(File::from(file))?;
        config.merge(Environment::with_prefix("ZENQA"))?;
        config.try_into()
    }
}

#[cfg(test)]
mod tests {

    use super::Settings;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.title, "ZenQA API Test Report");
        assert_eq!(settings.output, PathBuf::from("reports/detailed-test-report.html"));
    }

    #[test]
    fn test_settings_from_file() {
        let file = std::env::temp_dir().join(format!("zenqa-settings-{}.json", uuid::Uuid::new_v4()));
        fs::write(&file, r#"{ "title": "Nightly API Run", "output": "out/report.html" }"#).unwrap();

        let settings = Settings::from_file(file.clone()).unwrap();
        fs::remove_file(&file).unwrap();

        assert_eq!(settings.title, "Nightly API Run");
        assert_eq!(settings.output, PathBuf::from("out/report.html"));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let file = std::env::temp_dir().join(format!("zenqa-settings-{}.json", uuid::Uuid::new_v4()));
        fs::write(&file, r#"{ "title": "Partial" }"#).unwrap();

        let settings = Settings::from_file(file.clone()).unwrap();
        fs::remove_file(&file).unwrap();

        assert_eq!(settings.title, "Partial");
        assert_eq!(settings.output, PathBuf::from("reports/detailed-test-report.html"));
    }
}
