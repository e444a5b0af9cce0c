//! Cursor movement over document text.
//!
//! Movement is char-wise: horizontal steps walk char positions, vertical
//! steps keep the char column and clamp it to the target line's content.
//! Hosts use these to drive the selection before invoking commands.

use ropey::RopeSlice;

use crate::selection::Range;

/// The direction of cursor movement or selection extension.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
  /// Moving toward the end of the document (increasing positions).
  Forward,
  /// Moving toward the start of the document (decreasing positions).
  Backward,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Movement {
  /// Extend the selection.
  Extend,

  /// Move the selection (set anchor == head).
  Move,
}

pub fn move_horizontally(
  slice: RopeSlice,
  range: Range,
  dir: Direction,
  count: usize,
  behavior: Movement,
) -> Range {
  let pos = range.head;

  let new_pos = match dir {
    Direction::Forward => (pos + count).min(slice.len_chars()),
    Direction::Backward => pos.saturating_sub(count),
  };

  range.put_cursor(new_pos, behavior == Movement::Extend)
}

pub fn move_vertically(
  slice: RopeSlice,
  range: Range,
  dir: Direction,
  count: usize,
  behavior: Movement,
) -> Range {
  let pos = range.head;
  let line = slice.char_to_line(pos);
  let col = pos - slice.line_to_char(line);

  let new_line = match dir {
    Direction::Forward => (line + count).min(slice.len_lines().saturating_sub(1)),
    Direction::Backward => line.saturating_sub(count),
  };

  let new_pos = slice.line_to_char(new_line) + col.min(line_content_len(slice, new_line));
  range.put_cursor(new_pos, behavior == Movement::Extend)
}

/// Length of a line in chars, excluding its line ending.
pub fn line_content_len(slice: RopeSlice, line: usize) -> usize {
  let line = slice.line(line);
  let mut len = line.len_chars();

  while len > 0 {
    let ch = line.char(len - 1);
    if ch == '\n' || ch == '\r' {
      len -= 1;
    } else {
      break;
    }
  }

  len
}

#[cfg(test)]
mod test {
  use ropey::Rope;

  use super::*;

  #[test]
  fn horizontal_move_clamps_at_bounds() {
    let doc = Rope::from("ab");
    let slice = doc.slice(..);

    let range = Range::point(0);
    let range = move_horizontally(slice, range, Direction::Backward, 1, Movement::Move);
    assert_eq!(range, Range::point(0));

    let range = move_horizontally(slice, range, Direction::Forward, 5, Movement::Move);
    assert_eq!(range, Range::point(2));
  }

  #[test]
  fn horizontal_extend_keeps_anchor() {
    let doc = Rope::from("hello");
    let slice = doc.slice(..);

    let range = Range::point(1);
    let range = move_horizontally(slice, range, Direction::Forward, 3, Movement::Extend);
    assert_eq!(range, Range::new(1, 4));
  }

  #[test]
  fn vertical_move_keeps_column() {
    let doc = Rope::from("alpha\nbeta\ngamma\n");
    let slice = doc.slice(..);

    let range = Range::point(2); // column 2 of "alpha"
    let range = move_vertically(slice, range, Direction::Forward, 1, Movement::Move);
    assert_eq!(range.head, slice.line_to_char(1) + 2);
  }

  #[test]
  fn vertical_move_clamps_column_to_line_content() {
    let doc = Rope::from("a long line\nhi\n");
    let slice = doc.slice(..);

    let range = Range::point(9); // deep into the first line
    let range = move_vertically(slice, range, Direction::Forward, 1, Movement::Move);
    // "hi" has two content chars; the cursor lands at its end, not on the
    // line ending.
    assert_eq!(range.head, slice.line_to_char(1) + 2);
  }

  #[test]
  fn line_content_len_excludes_line_ending() {
    let doc = Rope::from("one\r\ntwo\nlast");
    let slice = doc.slice(..);

    assert_eq!(line_content_len(slice, 0), 3);
    assert_eq!(line_content_len(slice, 1), 3);
    assert_eq!(line_content_len(slice, 2), 4);
  }
}
