//! Snippet expansion.
//!
//! A snippet is a plain string containing zero or more occurrences of the
//! literal marker `$1`. Expanding a snippet replaces every occurrence with
//! the selected text in a single left-to-right pass; text arriving from the
//! selection is never rescanned, so a selection that itself contains `$1`
//! comes through verbatim. There is no escape sequence for a literal `$1`
//! in the snippet body.
//!
//! ```
//! use codewrap_lib::snippet::Snippet;
//!
//! let snippet = Snippet::new("try {\n  $1\n} catch (e) { }");
//! assert_eq!(
//!   snippet.expand("foo()").as_str(),
//!   "try {\n  foo()\n} catch (e) { }"
//! );
//! ```

use crate::Tendril;

/// The literal marker replaced by the selected text.
pub const PLACEHOLDER: &str = "$1";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Snippet {
  body: Tendril,
}

impl Snippet {
  pub fn new(body: impl Into<Tendril>) -> Self {
    Self { body: body.into() }
  }

  pub fn body(&self) -> &str {
    &self.body
  }

  pub fn is_empty(&self) -> bool {
    self.body.is_empty()
  }

  /// Number of marker occurrences expansion will replace.
  pub fn placeholder_count(&self) -> usize {
    self.body.matches(PLACEHOLDER).count()
  }

  /// Replace every `$1` in the body with `selection`.
  ///
  /// Total over all inputs: an empty body expands to the empty string, a
  /// body without markers comes back unchanged, and an empty selection
  /// simply strips the markers.
  pub fn expand(&self, selection: &str) -> Tendril {
    let mut out = Tendril::new();
    let mut tail = 0;

    for (at, _) in self.body.match_indices(PLACEHOLDER) {
      out.push_str(&self.body[tail..at]);
      out.push_str(selection);
      tail = at + PLACEHOLDER.len();
    }
    out.push_str(&self.body[tail..]);

    out
  }
}

#[cfg(test)]
mod test {
  use quickcheck::quickcheck;

  use super::*;

  #[test]
  fn replaces_every_marker() {
    assert_eq!(Snippet::new("$1$1").expand("X").as_str(), "XX");
    assert_eq!(Snippet::new("($1, $1)").expand("a").as_str(), "(a, a)");
  }

  #[test]
  fn surrounds_selection() {
    let snippet = Snippet::new("before $1 after");
    assert_eq!(snippet.expand("SEL").as_str(), "before SEL after");
  }

  #[test]
  fn empty_body_expands_to_empty() {
    let snippet = Snippet::default();
    assert!(snippet.is_empty());
    assert_eq!(snippet.expand("anything").as_str(), "");
    assert_eq!(snippet.expand("").as_str(), "");
  }

  #[test]
  fn empty_selection_strips_markers() {
    let snippet = Snippet::new("try { $1 } finally { $1 }");
    assert_eq!(snippet.expand("").as_str(), "try {  } finally {  }");
  }

  #[test]
  fn body_without_marker_ignores_selection() {
    let snippet = Snippet::new("nothing to see");
    assert_eq!(snippet.expand("SEL").as_str(), "nothing to see");
  }

  #[test]
  fn selection_markers_are_not_rescanned() {
    let snippet = Snippet::new("[$1]");
    assert_eq!(snippet.expand("$1x").as_str(), "[$1x]");
  }

  #[test]
  fn multiline_wrap() {
    let snippet = Snippet::new("try {\n  $1\n} catch (e) { }");
    assert_eq!(
      snippet.expand("foo()").as_str(),
      "try {\n  foo()\n} catch (e) { }"
    );
  }

  quickcheck! {
    fn expansion_length(body: String, selection: String) -> bool {
      let markers = body.matches(PLACEHOLDER).count();
      let out = Snippet::new(body.as_str()).expand(&selection);
      out.len() == body.len() - 2 * markers + selection.len() * markers
    }

    fn bodies_without_marker_are_fixed_points(body: String, selection: String) -> bool {
      if body.contains(PLACEHOLDER) {
        return true;
      }
      Snippet::new(body.as_str()).expand(&selection).as_str() == body.as_str()
    }
  }
}
