//! Render pass: document view, status line, and the snippet prompt overlay.
//!
//! Writes straight to stdout with queued crossterm commands; the event loop
//! calls [`render`] after every input.

use std::{
  borrow::Cow,
  io::{self, Write},
};

use codewrap_lib::{movement::line_content_len, selection::Range};
use crossterm::{
  cursor::{Hide, MoveTo, Show},
  queue,
  style::{Attribute, Print, SetAttribute},
  terminal::{self, Clear, ClearType},
};
use ropey::RopeSlice;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::ctx::{Ctx, Severity};

pub fn render(ctx: &mut Ctx) -> io::Result<()> {
  let (width, height) = terminal::size()?;
  if width == 0 || height < 2 {
    return Ok(());
  }
  let text_rows = (height - 1) as usize;
  ensure_cursor_visible(ctx, text_rows);

  let mut out = io::stdout();
  queue!(out, Hide)?;

  draw_document(ctx, &mut out, width, text_rows)?;
  draw_status_line(ctx, &mut out, width, height - 1)?;

  if ctx.prompt.active {
    draw_prompt(ctx, &mut out, width, height)?;
  } else {
    place_cursor(ctx, &mut out)?;
  }

  out.flush()
}

fn ensure_cursor_visible(ctx: &mut Ctx, text_rows: usize) {
  let text = ctx.document.text().slice(..);
  let line = text.char_to_line(ctx.document.selection().head);

  if line < ctx.scroll {
    ctx.scroll = line;
  } else if line >= ctx.scroll + text_rows {
    ctx.scroll = line + 1 - text_rows;
  }
}

fn draw_document(ctx: &Ctx, out: &mut impl Write, width: u16, text_rows: usize) -> io::Result<()> {
  let text = ctx.document.text().slice(..);
  let selection = ctx.document.selection();

  for row in 0..text_rows {
    queue!(out, MoveTo(0, row as u16), Clear(ClearType::CurrentLine))?;

    let line_idx = ctx.scroll + row;
    if line_idx >= text.len_lines() {
      continue;
    }
    draw_line(out, text, line_idx, selection, width as usize)?;
  }

  Ok(())
}

fn draw_line(
  out: &mut impl Write,
  text: RopeSlice,
  line_idx: usize,
  selection: Range,
  width: usize,
) -> io::Result<()> {
  let start = text.line_to_char(line_idx);
  let end = start + line_content_len(text, line_idx);
  let sel_from = selection.from().clamp(start, end);
  let sel_to = selection.to().clamp(start, end);

  let mut col = 0;
  for (span_from, span_to, selected) in [
    (start, sel_from, false),
    (sel_from, sel_to, true),
    (sel_to, end, false),
  ] {
    if span_from >= span_to {
      continue;
    }
    if selected {
      queue!(out, SetAttribute(Attribute::Reverse))?;
    }

    let mut chunk = String::new();
    for ch in text.slice(span_from..span_to).chars() {
      let w = char_width(ch);
      if col + w > width {
        break;
      }
      col += w;
      chunk.push(if ch == '\t' { ' ' } else { ch });
    }
    queue!(out, Print(chunk))?;

    if selected {
      queue!(out, SetAttribute(Attribute::Reset))?;
    }
  }

  Ok(())
}

fn draw_status_line(ctx: &Ctx, out: &mut impl Write, width: u16, row: u16) -> io::Result<()> {
  let doc = &ctx.document;
  let text = doc.text().slice(..);
  let head = doc.selection().head;
  let line = text.char_to_line(head);
  let col = head - text.line_to_char(line);

  let modified = if doc.flags().modified { " [+]" } else { "" };
  let readonly = if doc.flags().readonly { " [ro]" } else { "" };

  let message: Cow<'_, str> = if ctx.prompt.active {
    Cow::Borrowed("enter: apply | alt-enter: line break | esc: cancel")
  } else {
    match &ctx.status {
      Some(status) if status.severity == Severity::Error => {
        Cow::Owned(format!("error: {}", status.text))
      },
      Some(status) => Cow::Borrowed(status.text.as_str()),
      None => Cow::Borrowed("ctrl-w: wrap selection | ctrl-s: save | ctrl-q: quit"),
    }
  };

  let left = format!(
    " {}{}{}  {}",
    doc.display_name(),
    modified,
    readonly,
    message
  );
  let right = format!("{}:{} ", line + 1, col + 1);

  let width = width as usize;
  let mut bar = truncate_to_width(&left, width);
  let remaining = width - bar.width();
  if remaining >= right.width() {
    bar.push_str(&" ".repeat(remaining - right.width()));
    bar.push_str(&right);
  } else {
    bar.push_str(&" ".repeat(remaining));
  }

  queue!(
    out,
    MoveTo(0, row),
    SetAttribute(Attribute::Reverse),
    Print(bar),
    SetAttribute(Attribute::Reset)
  )
}

fn place_cursor(ctx: &Ctx, out: &mut impl Write) -> io::Result<()> {
  let text = ctx.document.text().slice(..);
  let head = ctx.document.selection().head;
  let line = text.char_to_line(head);
  if line < ctx.scroll {
    return Ok(());
  }

  let row = line - ctx.scroll;
  let col: usize = text
    .slice(text.line_to_char(line)..head)
    .chars()
    .map(char_width)
    .sum();

  queue!(out, MoveTo(col as u16, row as u16), Show)
}

fn draw_prompt(ctx: &Ctx, out: &mut impl Write, width: u16, height: u16) -> io::Result<()> {
  let width = width as usize;
  let height = height as usize;

  let lines: Vec<&str> = ctx.prompt.lines().collect();
  let content_width = lines.iter().map(|line| line.width()).max().unwrap_or(0);
  let inner_width = content_width.max(30).min(width.saturating_sub(4));
  let inner_height = lines.len().clamp(1, height.saturating_sub(3).max(1));

  let panel_width = inner_width + 4;
  let panel_height = inner_height + 2;
  let left = width.saturating_sub(panel_width) / 2;
  let top = height.saturating_sub(panel_height + 1) / 2;

  let mut top_border = String::from("┌ Code Block ");
  while top_border.width() < panel_width - 1 {
    top_border.push('─');
  }
  top_border.push('┐');
  queue!(out, MoveTo(left as u16, top as u16), Print(&top_border))?;

  for row in 0..inner_height {
    let line = lines.get(row).copied().unwrap_or("");
    let mut body = String::from("│ ");
    body.push_str(&truncate_to_width(line, inner_width));
    while body.width() < panel_width - 1 {
      body.push(' ');
    }
    body.push('│');
    queue!(out, MoveTo(left as u16, (top + 1 + row) as u16), Print(&body))?;
  }

  let mut bottom_border = String::from("└");
  while bottom_border.width() < panel_width - 1 {
    bottom_border.push('─');
  }
  bottom_border.push('┘');
  queue!(
    out,
    MoveTo(left as u16, (top + 1 + inner_height) as u16),
    Print(&bottom_border)
  )?;

  let (cursor_line, prefix) = ctx.prompt.cursor_line_prefix();
  if cursor_line < inner_height {
    let col = left + 2 + prefix.width().min(inner_width);
    queue!(
      out,
      MoveTo(col as u16, (top + 1 + cursor_line) as u16),
      Show
    )?;
  }

  Ok(())
}

fn char_width(ch: char) -> usize {
  if ch == '\t' {
    1
  } else {
    ch.width().unwrap_or(0)
  }
}

fn truncate_to_width(text: &str, width: usize) -> String {
  let mut out = String::new();
  let mut used = 0;

  for ch in text.chars() {
    let w = char_width(ch);
    if used + w > width {
      break;
    }
    used += w;
    out.push(if ch == '\t' { ' ' } else { ch });
  }

  out
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn truncation_respects_display_width() {
    assert_eq!(truncate_to_width("hello", 3), "hel");
    assert_eq!(truncate_to_width("hello", 10), "hello");
    // Wide chars count double and never get split.
    assert_eq!(truncate_to_width("日本語", 5), "日本");
  }

  #[test]
  fn tabs_render_as_single_cells() {
    assert_eq!(truncate_to_width("a\tb", 3), "a b");
    assert_eq!(char_width('\t'), 1);
  }
}
