//! Configuration: optional JSON file in ~/.tugwar/ plus command-line flags.

use crate::tug::types::{Tuning, Variant, CAR_GAP};
use crate::utils::persistence::{data_path, read_json};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Keys reserved for quitting; the pull key may not be one of them.
pub const QUIT_KEYS: [char; 2] = ['q', 'Q'];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
    #[error("missing value for {0}")]
    MissingValue(String),
}

/// Player-facing settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub variant: Variant,
    /// The single designated pull key.
    pub pull_key: char,
    pub tuning: Tuning,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: Variant::Classic,
            pull_key: ' ',
            tuning: Tuning::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.tuning;
        let values = [
            ("player_speed", t.player_speed),
            ("bot_speed", t.bot_speed),
            ("tap_step", t.tap_step),
            ("start_offset", t.start_offset),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{} must be finite", name)));
            }
        }
        if t.bot_speed <= 0.0 {
            return Err(ConfigError::Invalid("bot_speed must be positive".into()));
        }
        if t.player_speed < 0.0 || t.tap_step < 0.0 {
            return Err(ConfigError::Invalid(
                "player_speed and tap_step must not be negative".into(),
            ));
        }
        if t.start_offset.abs() >= CAR_GAP / 2.0 {
            return Err(ConfigError::Invalid(format!(
                "start_offset must be within +/-{}",
                CAR_GAP / 2.0
            )));
        }
        if self.pull_key.is_control() || QUIT_KEYS.contains(&self.pull_key) {
            return Err(ConfigError::Invalid(format!(
                "pull_key {:?} is not usable",
                self.pull_key
            )));
        }
        Ok(())
    }

    /// Display name of the pull key for prompts.
    pub fn pull_key_label(&self) -> String {
        match self.pull_key {
            ' ' => "SPACE".to_string(),
            c => c.to_uppercase().collect(),
        }
    }

    pub fn apply_cli(&mut self, options: &CliOptions) {
        if let Some(variant) = options.variant {
            self.variant = variant;
        }
    }
}

/// Load the config file. Without an explicit path a missing
/// ~/.tugwar/config.json means defaults; an explicit path must exist.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => {
            let path = data_path(CONFIG_FILE_NAME).map_err(|source| ConfigError::Io {
                path: PathBuf::from(CONFIG_FILE_NAME),
                source,
            })?;
            (path, false)
        }
    };

    let loaded: Option<Config> = read_json(&path).map_err(|source| {
        if source.kind() == io::ErrorKind::InvalidData {
            ConfigError::Parse {
                path: path.clone(),
                source,
            }
        } else {
            ConfigError::Io {
                path: path.clone(),
                source,
            }
        }
    })?;

    let config = match loaded {
        Some(config) => config,
        None if required => {
            return Err(ConfigError::Io {
                path,
                source: io::Error::new(io::ErrorKind::NotFound, "file not found"),
            })
        }
        None => Config::default(),
    };

    config.validate()?;
    Ok(config)
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Play(CliOptions),
    Help,
    Version,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    pub variant: Option<Variant>,
    pub config_path: Option<PathBuf>,
}

/// Parse arguments, excluding the program name.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliCommand, ConfigError> {
    let mut options = CliOptions::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--version" | "-v" => return Ok(CliCommand::Version),
            "--classic" => options.variant = Some(Variant::Classic),
            "--festive" => options.variant = Some(Variant::Festive),
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                options.config_path = Some(PathBuf::from(path));
            }
            _ => return Err(ConfigError::UnknownArgument(arg)),
        }
    }

    Ok(CliCommand::Play(options))
}

pub fn help_text() -> String {
    [
        "Tug of War - terminal tug-of-war against a bot",
        "",
        "Usage: tugwar [options]",
        "",
        "Options:",
        "  --classic        Hold the pull key to pull (default)",
        "  --festive        Tap the pull key to pull; confetti on a win",
        "  --config <path>  Read settings from <path> instead of ~/.tugwar/config.json",
        "  --version        Show version information",
        "  --help           Show this help message",
        "",
        "Controls: pull key (Space) or left mouse button to pull, Esc/q to quit.",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.variant, Variant::Classic);
        assert_eq!(config.pull_key_label(), "SPACE");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"variant": "festive", "tuning": {"bot_speed": 0.75}}"#)
                .unwrap();
        assert_eq!(config.variant, Variant::Festive);
        assert_eq!(config.pull_key, ' ');
        assert!((config.tuning.bot_speed - 0.75).abs() < f64::EPSILON);
        assert!((config.tuning.player_speed - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validation_rejects_bad_tuning() {
        let mut config = Config::default();
        config.tuning.bot_speed = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.tuning.start_offset = 100.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.tuning.player_speed = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.pull_key = 'q';
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pull_key_label() {
        let config = Config {
            pull_key: 'p',
            ..Config::default()
        };
        assert_eq!(config.pull_key_label(), "P");
    }

    #[test]
    fn test_parse_args_play() {
        let cmd = parse_args(args(&["--festive", "--config", "/tmp/t.json"])).unwrap();
        assert_eq!(
            cmd,
            CliCommand::Play(CliOptions {
                variant: Some(Variant::Festive),
                config_path: Some(PathBuf::from("/tmp/t.json")),
            })
        );
        assert_eq!(
            parse_args(args(&[])).unwrap(),
            CliCommand::Play(CliOptions::default())
        );
    }

    #[test]
    fn test_parse_args_help_version() {
        assert_eq!(parse_args(args(&["-h"])).unwrap(), CliCommand::Help);
        assert_eq!(parse_args(args(&["--version"])).unwrap(), CliCommand::Version);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(matches!(
            parse_args(args(&["--bogus"])),
            Err(ConfigError::UnknownArgument(a)) if a == "--bogus"
        ));
        assert!(matches!(
            parse_args(args(&["--config"])),
            Err(ConfigError::MissingValue(_))
        ));
    }

    #[test]
    fn test_cli_overrides_variant() {
        let mut config = Config::default();
        config.apply_cli(&CliOptions {
            variant: Some(Variant::Festive),
            config_path: None,
        });
        assert_eq!(config.variant, Variant::Festive);
    }

    #[test]
    fn test_load_explicit_missing_path_fails() {
        let path = std::env::temp_dir().join("tugwar_missing_config_for_test.json");
        assert!(matches!(
            load_config(Some(&path)),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_load_explicit_file() {
        let path = std::env::temp_dir().join(format!("tugwar_cfg_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"variant": "festive", "pull_key": "p"}"#).unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.variant, Variant::Festive);
        assert_eq!(config.pull_key, 'p');
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_malformed_file() {
        let path = std::env::temp_dir().join(format!("tugwar_bad_{}.json", std::process::id()));
        std::fs::write(&path, "{").unwrap();
        assert!(matches!(
            load_config(Some(&path)),
            Err(ConfigError::Parse { .. })
        ));
        std::fs::remove_file(path).ok();
    }
}
