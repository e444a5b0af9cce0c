//! Host capability boundary for the wrap-with-snippet command.
//!
//! The command itself is host-agnostic: anything that can hand over the
//! selected text, pose a modal snippet prompt, and atomically replace the
//! selection can drive it. The terminal client implements [`HostContext`]
//! with a real prompt; tests script one.

use serde::Deserialize;
use tracing::debug;

use crate::{
  Tendril,
  document::DocumentError,
  snippet::Snippet,
};

pub trait HostContext {
  /// Text of the active selection, `None` when nothing is selected.
  fn selected_text(&self) -> Option<Tendril>;

  /// Modal prompt for a snippet body, pre-filled with `seed`. Blocks the
  /// invoking command until the user confirms (`Some`) or cancels (`None`).
  fn prompt_for_snippet(&mut self, seed: &str) -> Option<Tendril>;

  /// Atomically replace the active selection in one undoable edit.
  fn replace_selection(&mut self, text: &str) -> Result<(), DocumentError>;
}

/// What to do when the snippet prompt is cancelled.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelBehavior {
  /// Leave the document untouched.
  #[default]
  Keep,
  /// Apply the empty snippet, deleting the selection.
  Delete,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WrapOutcome {
  /// The selection was replaced with the expanded snippet.
  Applied,
  /// Nothing was selected; the command did not run.
  NoSelection,
  /// The prompt was cancelled and the document left untouched.
  Cancelled,
}

/// Wrap the active selection in a snippet obtained from the host's prompt.
///
/// Reads the selection, prompts for a snippet body, expands every `$1`
/// marker with the selected text and replaces the selection with the result.
/// A cancelled prompt is handled per `on_cancel`; a *confirmed* empty body
/// applies the empty snippet, which deletes the selection.
pub fn wrap_selection<H: HostContext + ?Sized>(
  host: &mut H,
  seed: &str,
  on_cancel: CancelBehavior,
) -> Result<WrapOutcome, DocumentError> {
  let Some(selection) = host.selected_text() else {
    debug!("wrap: no active selection, skipping");
    return Ok(WrapOutcome::NoSelection);
  };

  let snippet = match host.prompt_for_snippet(seed) {
    Some(body) => Snippet::new(body),
    None if on_cancel == CancelBehavior::Delete => Snippet::default(),
    None => {
      debug!("wrap: prompt cancelled, keeping selection");
      return Ok(WrapOutcome::Cancelled);
    },
  };

  debug!(
    markers = snippet.placeholder_count(),
    selection_chars = selection.chars().count(),
    "wrap: applying snippet"
  );
  let expanded = snippet.expand(&selection);
  host.replace_selection(&expanded)?;

  Ok(WrapOutcome::Applied)
}
