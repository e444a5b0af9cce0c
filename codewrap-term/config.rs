//! User configuration.
//!
//! Loaded from `codewrap.toml` in the working directory, or from an explicit
//! `--config FILE`. A missing default file falls back to [`Config::default`];
//! an explicitly named file must exist and parse.

use std::{fs, io, path::Path};

use codewrap_lib::{Tendril, host::CancelBehavior, snippet::PLACEHOLDER};
use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE: &str = "codewrap.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  /// Text the snippet prompt opens with.
  pub seed:      Tendril,
  /// What a cancelled prompt does to the selection.
  pub on_cancel: CancelBehavior,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      seed:      Tendril::from(PLACEHOLDER),
      on_cancel: CancelBehavior::default(),
    }
  }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct ConfigRaw {
  seed:      Option<String>,
  on_cancel: Option<CancelBehavior>,
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
  #[error("failed to parse config: {0}")]
  BadConfig(#[from] toml::de::Error),
  #[error(transparent)]
  Error(#[from] io::Error),
}

impl Config {
  fn parse(text: &str) -> Result<Self, ConfigLoadError> {
    let raw: ConfigRaw = toml::from_str(text)?;
    let defaults = Self::default();
    Ok(Self {
      seed:      raw.seed.map_or(defaults.seed, Tendril::from),
      on_cancel: raw.on_cancel.unwrap_or(defaults.on_cancel),
    })
  }
}

pub fn load(path: Option<&Path>) -> Result<Config, ConfigLoadError> {
  match path {
    Some(path) => Config::parse(&fs::read_to_string(path)?),
    None => match fs::read_to_string(CONFIG_FILE) {
      Ok(text) => Config::parse(&text),
      Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Config::default()),
      Err(err) => Err(err.into()),
    },
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn empty_config_uses_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.seed.as_str(), "$1");
    assert_eq!(config.on_cancel, CancelBehavior::Keep);
  }

  #[test]
  fn parses_all_keys() {
    let config = Config::parse(
      r#"
        seed = "($1)"
        on-cancel = "delete"
      "#,
    )
    .unwrap();

    assert_eq!(config.seed.as_str(), "($1)");
    assert_eq!(config.on_cancel, CancelBehavior::Delete);
  }

  #[test]
  fn rejects_unknown_keys() {
    let err = Config::parse("snippet-seed = \"$1\"").unwrap_err();
    assert!(matches!(err, ConfigLoadError::BadConfig(_)));
  }

  #[test]
  fn rejects_unknown_cancel_behavior() {
    let err = Config::parse("on-cancel = \"explode\"").unwrap_err();
    assert!(matches!(err, ConfigLoadError::BadConfig(_)));
  }
}
