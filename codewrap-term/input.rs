//! Input handling - maps key events to commands.

use codewrap_lib::movement::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{commands, ctx::Ctx};

pub fn handle_key(ctx: &mut Ctx, event: KeyEvent) {
  if event.kind == KeyEventKind::Release {
    return;
  }

  let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
  let alt = event.modifiers.contains(KeyModifiers::ALT);
  let shift = event.modifiers.contains(KeyModifiers::SHIFT);

  // Any key other than the quit chord clears a pending quit confirmation.
  if ctx.quit_pending && !(ctrl && event.code == KeyCode::Char('q')) {
    ctx.quit_pending = false;
  }

  match event.code {
    KeyCode::Char('q') if ctrl => commands::quit(ctx),
    KeyCode::Char('s') if ctrl => commands::save(ctx),
    KeyCode::Char('w') if ctrl => commands::wrap_with_snippet(ctx),

    KeyCode::Left => commands::move_char(ctx, Direction::Backward, shift),
    KeyCode::Right => commands::move_char(ctx, Direction::Forward, shift),
    KeyCode::Up => commands::move_line(ctx, Direction::Backward, shift),
    KeyCode::Down => commands::move_line(ctx, Direction::Forward, shift),
    KeyCode::Home => commands::move_line_start(ctx, shift),
    KeyCode::End => commands::move_line_end(ctx, shift),
    KeyCode::Esc => commands::collapse_selection(ctx),

    KeyCode::Enter => commands::insert_newline(ctx),
    KeyCode::Backspace => commands::delete_backward(ctx),
    KeyCode::Delete => commands::delete_forward(ctx),
    KeyCode::Tab => commands::insert_char(ctx, '\t'),
    KeyCode::Char(ch) if !ctrl && !alt => commands::insert_char(ctx, ch),

    _ => {},
  }
}
