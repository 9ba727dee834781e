//! Responsive breakpoints for stylesheets.

use crate::domain::models::extension_of;

const BREAKPOINTS: &str = r"
/* Responsive breakpoints */
@media (max-width: 1024px) {
  .container {
    padding: 0 1.5rem;
  }
}

@media (max-width: 640px) {
  .container {
    padding: 0 1rem;
  }

  button,
  input,
  select,
  textarea {
    width: 100%;
  }
}
";

/// Append tablet and phone breakpoints to stylesheets without any `@media`.
pub(super) fn add_breakpoints(path: &str, content: &str) -> Option<String> {
    if !matches!(extension_of(path).as_str(), "css" | "scss" | "less") {
        return None;
    }
    if content.contains("@media") {
        return None;
    }

    let mut out = content.trim_end().to_string();
    out.push('\n');
    out.push_str(BREAKPOINTS);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_once() {
        let out = add_breakpoints("src/styles/app.css", ".a { color: red; }").unwrap();
        assert_eq!(out.matches("@media").count(), 2);
        assert!(add_breakpoints("src/styles/app.css", &out).is_none());
    }

    #[test]
    fn test_skips_non_stylesheets() {
        assert!(add_breakpoints("src/App.tsx", ".a {}").is_none());
        assert!(add_breakpoints("src/theme.sass", ".a").is_none());
    }
}
