use std::sync::Arc;

use anyhow::{Context as _, Result};
use crossterm::event::{self, Event};

mod cli;
mod commands;
mod config;
mod ctx;
mod input;
mod prompt;
mod render;
mod terminal;

use crate::{cli::CliOptions, ctx::Ctx};

fn main() -> Result<()> {
  let options = CliOptions::parse();
  init_logging(&options)?;

  let config =
    config::load(options.config_file.as_deref()).context("failed to load configuration")?;
  let mut ctx = Ctx::new(config, options.file.clone(), options.readonly)?;

  let mut terminal = terminal::Terminal::new();
  terminal.enter_raw_mode()?;
  let result = run(&mut ctx);
  terminal.leave_raw_mode()?;
  result
}

fn run(ctx: &mut Ctx) -> Result<()> {
  loop {
    if ctx.should_quit {
      break;
    }

    render::render(ctx)?;

    match event::read()? {
      Event::Key(key) => input::handle_key(ctx, key),
      Event::Resize(..) => {},
      _ => {},
    }
  }

  Ok(())
}

fn init_logging(options: &CliOptions) -> Result<()> {
  let Some(path) = &options.log_file else {
    return Ok(());
  };

  let file = std::fs::File::create(path)
    .with_context(|| format!("failed to create log file {}", path.display()))?;
  let default_level = match options.verbosity {
    0 => "info",
    1 => "debug",
    _ => "trace",
  };
  let filter = tracing_subscriber::EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(Arc::new(file))
    .with_ansi(false)
    .init();

  Ok(())
}
