//! Editing commands operating on the application state.

use codewrap_lib::{
  host::{self, WrapOutcome},
  movement::{self, Direction, Movement},
  selection::Range,
};
use tracing::debug;

use crate::ctx::Ctx;

/// The one command this client exists for: wrap the selection in a snippet
/// obtained from the modal prompt.
pub fn wrap_with_snippet(ctx: &mut Ctx) {
  let seed = ctx.config.seed.clone();
  let on_cancel = ctx.config.on_cancel;

  match host::wrap_selection(ctx, &seed, on_cancel) {
    Ok(WrapOutcome::Applied) => ctx.set_status("selection wrapped"),
    Ok(WrapOutcome::NoSelection) => ctx.set_status("nothing selected"),
    Ok(WrapOutcome::Cancelled) => ctx.set_status("wrap cancelled"),
    Err(err) => ctx.set_error(format!("wrap failed: {err}")),
  }
}

pub fn move_char(ctx: &mut Ctx, dir: Direction, extend: bool) {
  let behavior = if extend { Movement::Extend } else { Movement::Move };
  let next = movement::move_horizontally(
    ctx.document.text().slice(..),
    ctx.document.selection(),
    dir,
    1,
    behavior,
  );
  let _ = ctx.document.set_selection(next);
}

pub fn move_line(ctx: &mut Ctx, dir: Direction, extend: bool) {
  let behavior = if extend { Movement::Extend } else { Movement::Move };
  let next = movement::move_vertically(
    ctx.document.text().slice(..),
    ctx.document.selection(),
    dir,
    1,
    behavior,
  );
  let _ = ctx.document.set_selection(next);
}

pub fn move_line_start(ctx: &mut Ctx, extend: bool) {
  let text = ctx.document.text().slice(..);
  let range = ctx.document.selection();
  let line = text.char_to_line(range.head);
  let next = range.put_cursor(text.line_to_char(line), extend);
  let _ = ctx.document.set_selection(next);
}

pub fn move_line_end(ctx: &mut Ctx, extend: bool) {
  let text = ctx.document.text().slice(..);
  let range = ctx.document.selection();
  let line = text.char_to_line(range.head);
  let pos = text.line_to_char(line) + movement::line_content_len(text, line);
  let next = range.put_cursor(pos, extend);
  let _ = ctx.document.set_selection(next);
}

pub fn collapse_selection(ctx: &mut Ctx) {
  let range = ctx.document.selection();
  let _ = ctx.document.set_selection(Range::point(range.head));
}

pub fn insert_char(ctx: &mut Ctx, ch: char) {
  insert_text(ctx, ch.encode_utf8(&mut [0; 4]));
}

pub fn insert_newline(ctx: &mut Ctx) {
  insert_text(ctx, "\n");
}

fn insert_text(ctx: &mut Ctx, text: &str) {
  let selection = ctx.document.selection();
  if let Err(err) = ctx.document.replace_range(selection, text) {
    ctx.set_error(format!("edit failed: {err}"));
    return;
  }
  // Typing leaves a cursor after the inserted text, not a selection over it.
  let end = ctx.document.selection().to();
  let _ = ctx.document.set_selection(Range::point(end));
}

pub fn delete_backward(ctx: &mut Ctx) {
  let selection = ctx.document.selection();
  let (from, to) = if selection.is_empty() {
    if selection.head == 0 {
      return;
    }
    (selection.head - 1, selection.head)
  } else {
    (selection.from(), selection.to())
  };

  if let Err(err) = ctx.document.replace_range(Range::new(from, to), "") {
    ctx.set_error(format!("edit failed: {err}"));
  }
}

pub fn delete_forward(ctx: &mut Ctx) {
  let selection = ctx.document.selection();
  let len = ctx.document.text().len_chars();
  let (from, to) = if selection.is_empty() {
    if selection.head >= len {
      return;
    }
    (selection.head, selection.head + 1)
  } else {
    (selection.from(), selection.to())
  };

  if let Err(err) = ctx.document.replace_range(Range::new(from, to), "") {
    ctx.set_error(format!("edit failed: {err}"));
  }
}

pub fn save(ctx: &mut Ctx) {
  if let Err(err) = ctx.save() {
    ctx.set_error(format!("save failed: {err}"));
  }
}

pub fn quit(ctx: &mut Ctx) {
  if ctx.document.flags().modified && !ctx.quit_pending {
    ctx.quit_pending = true;
    ctx.set_status("unsaved changes, press again to quit");
    return;
  }
  debug!("quitting");
  ctx.should_quit = true;
}

#[cfg(test)]
mod test {
  use codewrap_lib::document::Document;
  use ropey::Rope;

  use super::*;
  use crate::config::Config;

  fn ctx_with(text: &str) -> Ctx {
    let mut ctx = Ctx::new(Config::default(), None, false).unwrap();
    ctx.document = Document::new(Rope::from(text));
    ctx
  }

  #[test]
  fn typing_replaces_the_selection() {
    let mut ctx = ctx_with("hello world");
    ctx.document.set_selection(Range::new(6, 11)).unwrap();

    insert_char(&mut ctx, 'x');

    assert_eq!(ctx.document.text().to_string(), "hello x");
    assert_eq!(ctx.document.selection(), Range::point(7));
  }

  #[test]
  fn delete_backward_at_start_is_a_noop() {
    let mut ctx = ctx_with("abc");
    delete_backward(&mut ctx);
    assert_eq!(ctx.document.text().to_string(), "abc");
  }

  #[test]
  fn delete_backward_removes_selection() {
    let mut ctx = ctx_with("abcdef");
    ctx.document.set_selection(Range::new(1, 4)).unwrap();

    delete_backward(&mut ctx);

    assert_eq!(ctx.document.text().to_string(), "aef");
    assert_eq!(ctx.document.selection(), Range::point(1));
  }

  #[test]
  fn shift_movement_extends_selection() {
    let mut ctx = ctx_with("abcdef");

    move_char(&mut ctx, Direction::Forward, true);
    move_char(&mut ctx, Direction::Forward, true);

    assert_eq!(ctx.document.selection(), Range::new(0, 2));

    collapse_selection(&mut ctx);
    assert_eq!(ctx.document.selection(), Range::point(2));
  }

  #[test]
  fn line_end_movement_stops_before_line_ending() {
    let mut ctx = ctx_with("short\nlonger line\n");

    move_line_end(&mut ctx, false);
    assert_eq!(ctx.document.selection(), Range::point(5));

    move_line(&mut ctx, Direction::Forward, false);
    move_line_end(&mut ctx, false);
    assert_eq!(ctx.document.selection(), Range::point(17));
  }

  #[test]
  fn quit_with_unsaved_changes_needs_confirmation() {
    let mut ctx = ctx_with("abc");
    ctx.document.set_selection(Range::new(0, 1)).unwrap();
    ctx.document.replace_selection("x").unwrap();

    quit(&mut ctx);
    assert!(!ctx.should_quit);
    assert!(ctx.quit_pending);

    quit(&mut ctx);
    assert!(ctx.should_quit);
  }
}
