//! Raw-mode terminal session guard.

use std::io;

use anyhow::Result;
use crossterm::{
  cursor,
  execute,
  terminal::{
    EnterAlternateScreen,
    LeaveAlternateScreen,
    disable_raw_mode,
    enable_raw_mode,
  },
};

pub struct Terminal {
  active: bool,
}

impl Terminal {
  pub fn new() -> Self {
    Self { active: false }
  }

  pub fn enter_raw_mode(&mut self) -> Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
    self.active = true;
    Ok(())
  }

  pub fn leave_raw_mode(&mut self) -> Result<()> {
    if !self.active {
      return Ok(());
    }
    execute!(io::stdout(), cursor::Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    self.active = false;
    Ok(())
  }
}

impl Drop for Terminal {
  fn drop(&mut self) {
    let _ = self.leave_raw_mode();
  }
}
