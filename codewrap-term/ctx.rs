//! Application state and the host-side capability implementation.

use std::{
  fs::File,
  io::{BufReader, BufWriter, Write},
  path::PathBuf,
};

use anyhow::{Context as _, Result};
use codewrap_lib::{
  Tendril,
  document::{Document, DocumentError},
  host::HostContext,
};
use crossterm::event::{self, Event, KeyEventKind};
use ropey::Rope;
use tracing::{debug, warn};

use crate::{
  config::Config,
  prompt::{PromptEvent, SnippetPromptState},
  render,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
  Info,
  Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
  pub severity: Severity,
  pub text:     String,
}

pub struct Ctx {
  pub config:       Config,
  pub document:     Document,
  pub path:         Option<PathBuf>,
  pub prompt:       SnippetPromptState,
  pub status:       Option<StatusMessage>,
  pub scroll:       usize,
  pub should_quit:  bool,
  pub quit_pending: bool,
}

impl Ctx {
  pub fn new(config: Config, path: Option<PathBuf>, readonly: bool) -> Result<Self> {
    let text = match &path {
      Some(path) if path.exists() => {
        let file =
          File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        Rope::from_reader(BufReader::new(file))
          .with_context(|| format!("failed to read {}", path.display()))?
      },
      _ => Rope::new(),
    };

    let mut document = Document::new(text);
    if let Some(name) = path.as_ref().and_then(|p| p.file_name()) {
      document.set_display_name(name.to_string_lossy().as_ref());
    }
    document.set_readonly(readonly);

    Ok(Self {
      config,
      document,
      path,
      prompt: SnippetPromptState::default(),
      status: None,
      scroll: 0,
      should_quit: false,
      quit_pending: false,
    })
  }

  pub fn save(&mut self) -> Result<()> {
    let Some(path) = &self.path else {
      anyhow::bail!("no file to save to");
    };

    let mut writer = BufWriter::new(
      File::create(path).with_context(|| format!("failed to write {}", path.display()))?,
    );
    self.document.text().write_to(&mut writer)?;
    writer.flush()?;

    self.document.mark_saved();
    self.set_status(format!("wrote {}", path.display()));
    Ok(())
  }

  pub fn set_status(&mut self, text: impl Into<String>) {
    self.status = Some(StatusMessage {
      severity: Severity::Info,
      text:     text.into(),
    });
  }

  pub fn set_error(&mut self, text: impl Into<String>) {
    self.status = Some(StatusMessage {
      severity: Severity::Error,
      text:     text.into(),
    });
  }
}

impl HostContext for Ctx {
  fn selected_text(&self) -> Option<Tendril> {
    self.document.selected_text()
  }

  /// Runs the prompt as a nested event loop: the invoking command stays
  /// suspended until the user confirms or cancels.
  fn prompt_for_snippet(&mut self, seed: &str) -> Option<Tendril> {
    self.prompt.open(seed);
    debug!(seed, "snippet prompt opened");

    let result = loop {
      if let Err(err) = render::render(self) {
        warn!("render failed during prompt: {err}");
      }

      match event::read() {
        Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
          match self.prompt.handle_key(key) {
            PromptEvent::Validate => break Some(Tendril::from(self.prompt.buffer())),
            PromptEvent::Abort => break None,
            PromptEvent::Update => {},
          }
        },
        Ok(_) => {},
        Err(err) => {
          warn!("input error during prompt: {err}");
          break None;
        },
      }
    };

    self.prompt.close();
    result
  }

  fn replace_selection(&mut self, text: &str) -> Result<(), DocumentError> {
    self.document.replace_selection(text)
  }
}

#[cfg(test)]
mod test {
  use std::fs;

  use codewrap_lib::selection::Range;

  use super::*;

  #[test]
  fn opens_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.rs");
    fs::write(&path, "fn main() {}\n").unwrap();

    let ctx = Ctx::new(Config::default(), Some(path), false).unwrap();
    assert_eq!(ctx.document.text().to_string(), "fn main() {}\n");
    assert_eq!(ctx.document.display_name(), "sample.rs");
  }

  #[test]
  fn starts_with_scratch_buffer_without_file() {
    let ctx = Ctx::new(Config::default(), None, false).unwrap();
    assert_eq!(ctx.document.text().len_chars(), 0);
    assert_eq!(ctx.document.display_name(), "<scratch>");
  }

  #[test]
  fn save_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    fs::write(&path, "before").unwrap();

    let mut ctx = Ctx::new(Config::default(), Some(path.clone()), false).unwrap();
    ctx.document.set_selection(Range::new(0, 6)).unwrap();
    ctx.document.replace_selection("after").unwrap();
    ctx.save().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "after");
    assert!(!ctx.document.flags().modified);
  }

  #[test]
  fn save_without_path_fails() {
    let mut ctx = Ctx::new(Config::default(), None, false).unwrap();
    assert!(ctx.save().is_err());
  }

  #[test]
  fn selected_text_goes_through_document() {
    let mut ctx = Ctx::new(Config::default(), None, false).unwrap();
    ctx.document.replace_range(Range::point(0), "hello").unwrap();
    ctx.document.set_selection(Range::new(1, 4)).unwrap();

    assert_eq!(ctx.selected_text().unwrap().as_str(), "ell");
  }
}
