//! Document core state and transformation API.
//!
//! A [`Document`] owns the text buffer and the selection, and evolves them
//! through explicit [`Transaction`]s. No IO, no background tasks; hosts own
//! persistence and presentation.
//!
//! ```
//! use ropey::Rope;
//! use codewrap_lib::{document::Document, selection::Range};
//!
//! let mut doc = Document::new(Rope::from("let x = value;"));
//! doc.set_selection(Range::new(8, 13)).unwrap();
//! doc.replace_selection("compute()").unwrap();
//! assert_eq!(doc.text().to_string(), "let x = compute();");
//! ```

use std::borrow::Cow;

use ropey::Rope;
use thiserror::Error;

use crate::{
  Tendril,
  selection::Range,
  transaction::{Transaction, TransactionError},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DocumentFlags {
  pub readonly: bool,
  pub modified: bool,
}

#[derive(Debug, Error)]
pub enum DocumentError {
  #[error("document is readonly")]
  Readonly,
  #[error("selection {from}..{to} is out of bounds for document length {len}")]
  SelectionOutOfBounds {
    from: usize,
    to:   usize,
    len:  usize,
  },
  #[error(transparent)]
  Transaction(#[from] TransactionError),
}

pub type Result<T> = std::result::Result<T, DocumentError>;

#[derive(Debug)]
pub struct Document {
  display_name: Tendril,
  text:         Rope,
  selection:    Range,
  version:      u64,
  flags:        DocumentFlags,
}

impl Document {
  pub fn new(text: Rope) -> Self {
    Self {
      display_name: Tendril::new(),
      text,
      selection: Range::point(0),
      version: 0,
      flags: DocumentFlags::default(),
    }
  }

  pub fn display_name(&self) -> Cow<'_, str> {
    if self.display_name.is_empty() {
      Cow::Borrowed("<scratch>")
    } else {
      Cow::Borrowed(self.display_name.as_str())
    }
  }

  pub fn set_display_name(&mut self, name: impl Into<Tendril>) {
    self.display_name = name.into();
  }

  pub fn text(&self) -> &Rope {
    &self.text
  }

  pub fn selection(&self) -> Range {
    self.selection
  }

  pub fn set_selection(&mut self, selection: Range) -> Result<()> {
    let len = self.text.len_chars();
    if selection.to() > len {
      return Err(DocumentError::SelectionOutOfBounds {
        from: selection.from(),
        to: selection.to(),
        len,
      });
    }
    self.selection = selection;
    Ok(())
  }

  /// Text of the active selection, `None` when the selection is a point.
  pub fn selected_text(&self) -> Option<Tendril> {
    if self.selection.is_empty() {
      return None;
    }
    let slice = self.text.slice(self.selection.from()..self.selection.to());
    Some(Tendril::from(Cow::from(slice).as_ref()))
  }

  pub fn version(&self) -> u64 {
    self.version
  }

  pub fn flags(&self) -> DocumentFlags {
    self.flags
  }

  pub fn set_readonly(&mut self, readonly: bool) {
    self.flags.readonly = readonly;
  }

  pub fn mark_saved(&mut self) {
    self.flags.modified = false;
  }

  pub fn apply_transaction(&mut self, transaction: &Transaction) -> Result<()> {
    if self.flags.readonly {
      return Err(DocumentError::Readonly);
    }

    transaction.apply(&mut self.text)?;

    self.selection = match transaction.selection() {
      Some(selection) => *selection,
      None => self.selection.map(transaction.changes())?,
    };

    if !transaction.changes().is_empty() {
      self.flags.modified = true;
      self.version = self.version.saturating_add(1);
    }

    Ok(())
  }

  /// Atomically replace `range` with `text`. Afterwards the selection covers
  /// the inserted text.
  pub fn replace_range(&mut self, range: Range, text: &str) -> Result<()> {
    let from = range.from();
    let inserted = text.chars().count();

    let tx = Transaction::change(&self.text, vec![(from, range.to(), Some(Tendril::from(text)))])?
      .with_selection(Range::new(from, from + inserted));
    self.apply_transaction(&tx)
  }

  /// Atomically replace the active selection with `text`.
  pub fn replace_selection(&mut self, text: &str) -> Result<()> {
    self.replace_range(self.selection, text)
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn replace_selection_selects_inserted_text() {
    let mut doc = Document::new(Rope::from("hello world"));
    doc.set_selection(Range::new(6, 11)).unwrap();

    doc.replace_selection("rust").unwrap();

    assert_eq!(doc.text().to_string(), "hello rust");
    assert_eq!(doc.selection(), Range::new(6, 10));
    assert!(doc.flags().modified);
    assert_eq!(doc.version(), 1);
  }

  #[test]
  fn replace_selection_with_empty_text_deletes() {
    let mut doc = Document::new(Rope::from("keep REMOVE keep"));
    doc.set_selection(Range::new(4, 11)).unwrap();

    doc.replace_selection("").unwrap();

    assert_eq!(doc.text().to_string(), "keep keep");
    assert_eq!(doc.selection(), Range::point(4));
  }

  #[test]
  fn readonly_documents_refuse_edits() {
    let mut doc = Document::new(Rope::from("locked"));
    doc.set_selection(Range::new(0, 6)).unwrap();
    doc.set_readonly(true);

    let err = doc.replace_selection("nope").unwrap_err();
    assert!(matches!(err, DocumentError::Readonly));
    assert_eq!(doc.text().to_string(), "locked");
    assert_eq!(doc.version(), 0);
  }

  #[test]
  fn selection_maps_through_untargeted_transaction() {
    let mut doc = Document::new(Rope::from("abc"));
    doc.set_selection(Range::point(1)).unwrap();

    // Typed insertion at the cursor: no explicit selection, the point is
    // mapped past the inserted text.
    let tx = Transaction::change(doc.text(), vec![(1, 1, Some("x".into()))]).unwrap();
    doc.apply_transaction(&tx).unwrap();

    assert_eq!(doc.text().to_string(), "axbc");
    assert_eq!(doc.selection(), Range::point(2));
  }

  #[test]
  fn set_selection_validates_bounds() {
    let mut doc = Document::new(Rope::from("abc"));
    let err = doc.set_selection(Range::new(1, 9)).unwrap_err();
    assert!(matches!(err, DocumentError::SelectionOutOfBounds {
      from: 1,
      to: 9,
      len: 3,
    }));
  }

  #[test]
  fn selected_text_is_none_for_points() {
    let mut doc = Document::new(Rope::from("abc"));
    assert_eq!(doc.selected_text(), None);

    doc.set_selection(Range::new(0, 2)).unwrap();
    assert_eq!(doc.selected_text().unwrap().as_str(), "ab");
  }

  #[test]
  fn mark_saved_clears_modified_flag() {
    let mut doc = Document::new(Rope::from("abc"));
    doc.set_selection(Range::new(0, 1)).unwrap();
    doc.replace_selection("x").unwrap();
    assert!(doc.flags().modified);

    doc.mark_saved();
    assert!(!doc.flags().modified);
  }
}
