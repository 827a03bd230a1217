use anyhow::{Result, anyhow};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Output format for script outcomes
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per observation followed by the final list
    #[default]
    Text,
    Json,
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Path to the directory holding the scripts
    pub scripts_path: String,
    /// Format in which outcomes are rendered
    pub format: OutputFormat,
}

/// Config options as read from a config file. All keys are optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    scripts_path: Option<String>,
    format: Option<OutputFormat>,
}

const DEFAULT_SCRIPTS_PATH: &str = "scripts";

impl Default for Config {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl Config {
    pub fn new(scripts_path: Option<&str>, format: Option<OutputFormat>) -> Self {
        Self {
            scripts_path: scripts_path.unwrap_or(DEFAULT_SCRIPTS_PATH).to_string(),
            format: format.unwrap_or_default(),
        }
    }

    /// Loads config options from the YAML file `config_file`, overwriting the options which are
    /// present in the file.
    ///
    /// A relative `scripts_path` in the file is interpreted relative to the directory holding the
    /// config file.
    pub fn load_from_file(&mut self, config_file: &str) -> Result<()> {
        let cfg_path = PathBuf::from(config_file);
        let contents = std::fs::read_to_string(&cfg_path)
            .map_err(|e| anyhow!("Error reading config file {config_file}: {e}"))?;
        let cfg: ConfigFile = serde_yaml::from_str(&contents)
            .map_err(|e| anyhow!("Error parsing config file {config_file}: {e}"))?;

        if let Some(p) = cfg.scripts_path {
            let base = cfg_path.parent().unwrap_or(Path::new(""));
            let p = base.join(p);
            self.scripts_path = p
                .to_str()
                .ok_or(anyhow!("Failed to convert {} to string", p.display()))?
                .to_string();
        }
        if let Some(f) = cfg.format {
            self.format = f;
        }
        tracing::info!(
            config_file,
            scripts_path = %self.scripts_path,
            format = %self.format,
            "loaded config"
        );
        Ok(())
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = Config::default();
        assert_eq!(c.scripts_path, "scripts");
        assert_eq!(c.format, OutputFormat::Text);
    }

    #[test]
    fn test_new() {
        let c = Config::new(Some("./tests/scripts"), Some(OutputFormat::Json));
        assert_eq!(c.scripts_path, "./tests/scripts");
        assert_eq!(c.format, OutputFormat::Json);
    }

    #[test]
    fn test_load_from_file() {
        let mut c = Config::default();
        c.load_from_file("./tests/config/seqlist.yml").unwrap();
        assert_eq!(c.scripts_path, "./tests/config/../scripts");
        assert_eq!(c.format, OutputFormat::Yaml);
    }

    #[test]
    fn test_load_from_file_partial() {
        let mut c = Config::new(Some("elsewhere"), None);
        c.load_from_file("./tests/config/format-only.yml").unwrap();
        assert_eq!(c.scripts_path, "elsewhere");
        assert_eq!(c.format, OutputFormat::Json);
    }

    #[test]
    fn test_load_from_file_missing() {
        let mut c = Config::default();
        let e = c.load_from_file("./tests/config/nope.yml").unwrap_err();
        assert!(
            e.to_string()
                .starts_with("Error reading config file ./tests/config/nope.yml")
        );
    }

    #[test]
    fn test_load_from_file_unknown_key() {
        let mut c = Config::default();
        assert!(c.load_from_file("./tests/config/unknown-key.yml").is_err());
    }
}
