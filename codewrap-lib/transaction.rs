//! Atomic edits over document text.
//!
//! Changes are represented as a sequence of [`Operation`]s applied from the
//! start of the document:
//!
//! - **Retain(n)** - keep `n` characters unchanged
//! - **Delete(n)** - remove `n` characters
//! - **Insert(s)** - insert string `s`
//!
//! A [`ChangeSet`] is a list of operations that transforms a document of a
//! specific length; applying it to a document of any other length is refused.
//! A [`Transaction`] pairs a changeset with an optional selection to install
//! after the edit. This is the single-edit transaction every document
//! mutation in this workspace goes through.

use ropey::{Rope, RopeSlice};
use thiserror::Error;

use crate::{Tendril, selection::Range};

pub type Result<T> = std::result::Result<T, TransactionError>;

/// (from, to) replacement in char indices of the old document.
pub type Change = (usize, usize, Option<Tendril>);

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransactionError {
  #[error("changeset length mismatch: expected {expected}, got {actual}")]
  LengthMismatch { expected: usize, actual: usize },
  #[error("invalid change range: start {from} is after end {to}")]
  InvalidRange { from: usize, to: usize },
  #[error("change range {from}..{to} is out of bounds for document length {len}")]
  RangeOutOfBounds {
    from: usize,
    to:   usize,
    len:  usize,
  },
  #[error("change range {from}..{to} overlaps previous end {prev_end}")]
  OverlappingRange {
    prev_end: usize,
    from:     usize,
    to:       usize,
  },
  #[error("position {pos} is out of bounds for changeset length {len}")]
  PositionOutOfBounds { pos: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
  /// Move over n characters unchanged.
  Retain(usize),

  /// Delete n characters.
  Delete(usize),

  /// Insert text at the current position.
  Insert(Tendril),
}

impl Operation {
  pub fn len_chars(&self) -> usize {
    match self {
      Operation::Retain(n) | Operation::Delete(n) => *n,
      Operation::Insert(s) => s.chars().count(),
    }
  }
}

/// Which side of an insertion a mapped position sticks to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Assoc {
  Before,
  After,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeSet {
  changes:   Vec<Operation>,
  /// The required document length. Will refuse to apply changes unless it
  /// matches.
  len:       usize,
  len_after: usize,
}

impl ChangeSet {
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      changes:   Vec::with_capacity(capacity),
      len:       0,
      len_after: 0,
    }
  }

  #[must_use]
  pub fn new(doc: RopeSlice) -> Self {
    let len = doc.len_chars();
    Self {
      changes: Vec::new(),
      len,
      len_after: len,
    }
  }

  /// Returns the expected document length for this changeset.
  pub fn len(&self) -> usize {
    self.len
  }

  /// Document length after the changeset is applied.
  pub fn len_after(&self) -> usize {
    self.len_after
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.changes.is_empty() || self.changes == [Operation::Retain(self.len)]
  }

  // Changeset builder operations: delete/insert/retain.
  //

  pub fn delete(&mut self, n: usize) {
    use Operation::*;

    if n == 0 {
      return;
    }

    self.len += n;

    if let Some(Delete(count)) = self.changes.last_mut() {
      *count += n;
    } else {
      self.changes.push(Delete(n))
    }
  }

  pub fn insert(&mut self, fragment: Tendril) {
    use Operation::*;

    if fragment.is_empty() {
      return;
    }

    self.len_after += fragment.chars().count();

    let new_last = match self.changes.as_mut_slice() {
      [.., Insert(prev)] | [.., Insert(prev), Delete(_)] => {
        prev.push_str(&fragment);
        return;
      },
      [.., last @ Delete(_)] => std::mem::replace(last, Insert(fragment)),
      _ => Insert(fragment),
    };

    self.changes.push(new_last);
  }

  pub fn retain(&mut self, n: usize) {
    use Operation::*;

    if n == 0 {
      return;
    }

    self.len += n;
    self.len_after += n;

    if let Some(Retain(count)) = self.changes.last_mut() {
      *count += n;
    } else {
      self.changes.push(Retain(n))
    }
  }

  fn ensure_len(&self, text_len: usize) -> Result<()> {
    if text_len != self.len {
      return Err(TransactionError::LengthMismatch {
        expected: self.len,
        actual:   text_len,
      });
    }
    Ok(())
  }

  /// Apply this changeset in-place.
  pub fn apply(&self, text: &mut Rope) -> Result<()> {
    self.ensure_len(text.len_chars())?;
    let mut pos = 0;

    for change in &self.changes {
      use Operation::*;
      match change {
        Retain(n) => pos += n,
        Delete(n) => text.remove(pos..pos + *n),
        Insert(s) => {
          text.insert(pos, s);
          pos += s.chars().count();
        },
      }
    }

    Ok(())
  }

  /// Map a position through the changes.
  ///
  /// `assoc` indicates which side to associate the position with when it
  /// lands exactly on an insertion: `Before` stays in front of the inserted
  /// text, `After` moves behind it. Positions inside deleted or replaced
  /// regions collapse to the end of the replacement text.
  pub fn map_pos(&self, pos: usize, assoc: Assoc) -> Result<usize> {
    use Operation::*;

    if pos > self.len {
      return Err(TransactionError::PositionOutOfBounds { pos, len: self.len });
    }

    let mut old_pos = 0;
    let mut new_pos = 0;

    for change in &self.changes {
      match change {
        Retain(n) => {
          if pos < old_pos + n {
            return Ok(new_pos + (pos - old_pos));
          }
          old_pos += n;
          new_pos += n;
        },
        Delete(n) => {
          if pos < old_pos + n {
            return Ok(new_pos);
          }
          old_pos += n;
        },
        Insert(s) => {
          let inserted = s.chars().count();
          if pos == old_pos {
            return Ok(match assoc {
              Assoc::Before => new_pos,
              Assoc::After => new_pos + inserted,
            });
          }
          new_pos += inserted;
        },
      }
    }

    Ok(new_pos + (pos - old_pos))
  }
}

fn validate_change_bounds(from: usize, to: usize, len: usize) -> Result<()> {
  if from > to {
    return Err(TransactionError::InvalidRange { from, to });
  }
  if to > len {
    return Err(TransactionError::RangeOutOfBounds { from, to, len });
  }
  Ok(())
}

impl From<ChangeSet> for Transaction {
  fn from(changes: ChangeSet) -> Self {
    Self {
      changes,
      selection: None,
    }
  }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Transaction {
  changes:   ChangeSet,
  selection: Option<Range>,
}

impl Transaction {
  pub fn new(doc: &Rope) -> Self {
    Self {
      changes:   ChangeSet::new(doc.slice(..)),
      selection: None,
    }
  }

  /// Changes made to the buffer.
  pub fn changes(&self) -> &ChangeSet {
    &self.changes
  }

  /// When set, explicitly updates the selection.
  pub fn selection(&self) -> Option<&Range> {
    self.selection.as_ref()
  }

  /// Apply this transaction in-place.
  pub fn apply(&self, doc: &mut Rope) -> Result<()> {
    self.changes.apply(doc)
  }

  pub fn with_selection(mut self, selection: Range) -> Self {
    self.selection = Some(selection);
    self
  }

  /// Generate a transaction from a set of changes. Change ranges must be
  /// sorted and non-overlapping.
  pub fn change<I>(doc: &Rope, changes: I) -> Result<Self>
  where
    I: IntoIterator<Item = Change>,
  {
    let len = doc.len_chars();
    let changes = changes.into_iter();
    let (lower, upper) = changes.size_hint();
    let size = upper.unwrap_or(lower);
    let mut changeset = ChangeSet::with_capacity(2 * size + 1); // rough estimate

    let mut last = 0;
    for (from, to, tendril) in changes {
      validate_change_bounds(from, to, len)?;
      if from < last {
        return Err(TransactionError::OverlappingRange {
          prev_end: last,
          from,
          to,
        });
      }

      // Retain from last "to" to current "from"
      changeset.retain(from - last);
      let span = to - from;
      match tendril {
        Some(text) => {
          changeset.insert(text);
          changeset.delete(span);
        },
        None => changeset.delete(span),
      }
      last = to;
    }

    changeset.retain(len - last);

    Ok(Self::from(changeset))
  }
}
