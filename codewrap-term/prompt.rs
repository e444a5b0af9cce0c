//! Modal snippet prompt state.
//!
//! The prompt is a state machine driven by key events: the host opens it with
//! a seed text, feeds it keys, and reads the final buffer on
//! [`PromptEvent::Validate`]. `Enter` confirms; `Alt-Enter` and `Ctrl-J`
//! insert a line break; `Esc` aborts.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events that can occur in the prompt component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptEvent {
  /// Validate and apply the current input.
  Validate,
  /// Update the input (continue editing).
  Update,
  /// Abort/cancel the prompt.
  Abort,
}

#[derive(Debug, Default)]
pub struct SnippetPromptState {
  pub active: bool,
  /// Current input text.
  buffer:     String,
  /// Byte offset of the cursor within the buffer.
  cursor:     usize,
}

impl SnippetPromptState {
  pub fn open(&mut self, seed: &str) {
    self.active = true;
    self.buffer.clear();
    self.buffer.push_str(seed);
    self.cursor = self.buffer.len();
  }

  pub fn close(&mut self) {
    self.active = false;
    self.buffer.clear();
    self.cursor = 0;
  }

  pub fn buffer(&self) -> &str {
    &self.buffer
  }

  pub fn lines(&self) -> impl Iterator<Item = &str> {
    self.buffer.split('\n')
  }

  /// Line index of the cursor and the text preceding it on that line.
  pub fn cursor_line_prefix(&self) -> (usize, &str) {
    let before = &self.buffer[..self.cursor];
    let line = before.matches('\n').count();
    let line_start = before.rfind('\n').map_or(0, |at| at + 1);
    (line, &before[line_start..])
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> PromptEvent {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
      KeyCode::Esc => return PromptEvent::Abort,
      // Line break insertion is deliberately a different chord than confirm.
      KeyCode::Enter if ctrl || alt => self.insert_char('\n'),
      KeyCode::Enter => return PromptEvent::Validate,
      KeyCode::Char('j') if ctrl => self.insert_char('\n'),
      KeyCode::Backspace => self.delete_char_backward(),
      KeyCode::Delete => self.delete_char_forward(),
      KeyCode::Left => self.cursor = prev_char_boundary(&self.buffer, self.cursor),
      KeyCode::Right => self.cursor = next_char_boundary(&self.buffer, self.cursor),
      KeyCode::Up => self.move_vertically(-1),
      KeyCode::Down => self.move_vertically(1),
      KeyCode::Home => self.cursor = self.line_start(),
      KeyCode::End => self.cursor = self.line_end(),
      KeyCode::Char(ch) if !ctrl && !alt => self.insert_char(ch),
      _ => {},
    }

    PromptEvent::Update
  }

  fn insert_char(&mut self, ch: char) {
    self.buffer.insert(self.cursor, ch);
    self.cursor += ch.len_utf8();
  }

  fn delete_char_backward(&mut self) {
    if self.cursor == 0 {
      return;
    }
    let prev = prev_char_boundary(&self.buffer, self.cursor);
    self.buffer.replace_range(prev..self.cursor, "");
    self.cursor = prev;
  }

  fn delete_char_forward(&mut self) {
    if self.cursor >= self.buffer.len() {
      return;
    }
    let next = next_char_boundary(&self.buffer, self.cursor);
    self.buffer.replace_range(self.cursor..next, "");
  }

  fn line_start(&self) -> usize {
    self.buffer[..self.cursor].rfind('\n').map_or(0, |at| at + 1)
  }

  fn line_end(&self) -> usize {
    self.buffer[self.cursor..]
      .find('\n')
      .map_or(self.buffer.len(), |at| self.cursor + at)
  }

  fn move_vertically(&mut self, delta: isize) {
    let col = self.buffer[self.line_start()..self.cursor].chars().count();

    let target_start = if delta < 0 {
      let line_start = self.line_start();
      if line_start == 0 {
        return;
      }
      // Start of the previous line.
      self.buffer[..line_start - 1].rfind('\n').map_or(0, |at| at + 1)
    } else {
      let line_end = self.line_end();
      if line_end == self.buffer.len() {
        return;
      }
      line_end + 1
    };

    let target_line = &self.buffer[target_start..];
    let target_len = target_line.find('\n').unwrap_or(target_line.len());

    let mut offset = 0;
    for ch in target_line[..target_len].chars().take(col) {
      offset += ch.len_utf8();
    }
    self.cursor = target_start + offset;
  }
}

fn prev_char_boundary(text: &str, at: usize) -> usize {
  text[..at].chars().next_back().map_or(0, |ch| at - ch.len_utf8())
}

fn next_char_boundary(text: &str, at: usize) -> usize {
  text[at..].chars().next().map_or(at, |ch| at + ch.len_utf8())
}
