use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Clone, Debug)]
pub struct CliOptions {
  pub readonly:    bool,
  pub verbosity:   u8,
  pub log_file:    Option<PathBuf>,
  pub config_file: Option<PathBuf>,
  pub file:        Option<PathBuf>,
}

impl CliOptions {
  pub fn parse() -> Self {
    RawCli::parse().into()
  }
}

#[derive(Parser, Debug)]
#[command(
  name = "codewrap",
  about = "Terminal client for the wrap-selection-in-snippet command",
  version
)]
struct RawCli {
  /// Open the file without allowing edits
  #[arg(long = "readonly")]
  readonly: bool,

  /// Increase logging verbosity (repeat for more detail)
  #[arg(short = 'v', action = ArgAction::Count)]
  verbosity: u8,

  /// Save logs to a specific file
  #[arg(long = "log", value_name = "FILE")]
  log_file: Option<PathBuf>,

  /// Load configuration from a specific file
  #[arg(short = 'c', long = "config", value_name = "FILE")]
  config_file: Option<PathBuf>,

  /// File to open
  file: Option<PathBuf>,
}

impl From<RawCli> for CliOptions {
  fn from(raw: RawCli) -> Self {
    Self {
      readonly:    raw.readonly,
      verbosity:   raw.verbosity,
      log_file:    raw.log_file,
      config_file: raw.config_file,
      file:        raw.file,
    }
  }
}
