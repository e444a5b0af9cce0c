//! Single-cursor selection ranges.
//!
//! A [`Range`] has two positions: `anchor` and `head`. The `head` is where
//! the cursor sits, the `anchor` is the other end of the selection. When
//! `anchor == head` the range is a point and nothing is selected.
//!
//! ```text
//! anchor=2, head=7: "he[llo w]orld"  (forward selection)
//! anchor=7, head=2: "he]llo w[orld"  (backward selection)
//! anchor=5, head=5: "hello|world"    (point/cursor)
//! ```
//!
//! `from()` and `to()` return the bounds regardless of direction. Positions
//! are char indices into the document rope.

use crate::{
  movement::Direction,
  transaction::{Assoc, ChangeSet, TransactionError},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Range {
  pub anchor: usize,
  pub head:   usize,
}

impl Range {
  pub fn new(anchor: usize, head: usize) -> Self {
    Self { anchor, head }
  }

  #[inline]
  pub fn point(head: usize) -> Self {
    Self::new(head, head)
  }

  /// Start of the range.
  #[inline]
  #[must_use]
  pub fn from(&self) -> usize {
    std::cmp::min(self.anchor, self.head)
  }

  /// End of the range.
  #[inline]
  #[must_use]
  pub fn to(&self) -> usize {
    std::cmp::max(self.anchor, self.head)
  }

  /// Length of the range.
  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.to() - self.from()
  }

  /// When the head and anchor are in the same position, we have no range.
  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.anchor == self.head
  }

  #[inline]
  pub fn contains(&self, pos: usize) -> bool {
    self.from() <= pos && pos < self.to()
  }

  #[inline]
  pub fn direction(&self) -> Direction {
    if self.head < self.anchor {
      Direction::Backward
    } else {
      Direction::Forward
    }
  }

  #[must_use]
  pub fn flip(self) -> Self {
    Self {
      anchor: self.head,
      head:   self.anchor,
    }
  }

  #[must_use]
  pub fn with_direction(self, direction: Direction) -> Self {
    if self.direction() == direction {
      self
    } else {
      self.flip()
    }
  }

  /// Move the head to `pos`, dragging the anchor along unless `extend` is
  /// set.
  #[must_use]
  pub fn put_cursor(self, pos: usize, extend: bool) -> Self {
    if extend {
      Self::new(self.anchor, pos)
    } else {
      Self::point(pos)
    }
  }

  /// Map the range through a set of changes. Insertions at either endpoint
  /// push that endpoint forward.
  pub fn map(self, changes: &ChangeSet) -> Result<Self, TransactionError> {
    let anchor = changes.map_pos(self.anchor, Assoc::After)?;
    let head = changes.map_pos(self.head, Assoc::After)?;
    Ok(Self::new(anchor, head))
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn bounds_ignore_direction() {
    let forward = Range::new(2, 7);
    let backward = Range::new(7, 2);

    assert_eq!(forward.from(), 2);
    assert_eq!(forward.to(), 7);
    assert_eq!(backward.from(), 2);
    assert_eq!(backward.to(), 7);
    assert_eq!(forward.len(), 5);
    assert_eq!(backward.direction(), Direction::Backward);
  }

  #[test]
  fn point_is_empty() {
    assert!(Range::point(3).is_empty());
    assert!(!Range::new(3, 4).is_empty());
  }

  #[test]
  fn contains_is_half_open() {
    let range = Range::new(2, 5);
    assert!(range.contains(2));
    assert!(range.contains(4));
    assert!(!range.contains(5));
  }

  #[test]
  fn with_direction_flips_when_needed() {
    let range = Range::new(2, 7);
    assert_eq!(range.with_direction(Direction::Forward), range);
    assert_eq!(range.with_direction(Direction::Backward), range.flip());
  }

  #[test]
  fn put_cursor_moves_or_extends() {
    let range = Range::new(2, 5);
    assert_eq!(range.put_cursor(8, false), Range::point(8));
    assert_eq!(range.put_cursor(8, true), Range::new(2, 8));
  }
}
