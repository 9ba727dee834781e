//! Accessibility attributes for form controls and images.
//!
//! Tags are located textually. The end of a tag is the first `>` that is
//! outside any quoted string and any `{...}` expression, so attribute values
//! such as `onClick={() => save(a > b)}` do not end the tag early.

use super::stem_words;
use crate::domain::models::{extension_of, stem_of};

const LABELLED_CONTROLS: [&str; 3] = ["input", "textarea", "select"];
const TAGS: [&str; 5] = ["input", "textarea", "select", "form", "img"];

/// Byte offset of the `>` closing the tag whose attributes start at `from`.
///
/// Returns `None` when the tag never closes.
pub fn find_tag_end(text: &str, from: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for (offset, c) in text.get(from..)?.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' | '`' => quote = Some(c),
                '{' => depth += 1,
                '}' => depth = depth.saturating_sub(1),
                '>' if depth == 0 => return Some(from + offset),
                _ => {}
            },
        }
    }
    None
}

/// Top-level attributes of a tag: names with their quoted literal value,
/// if any. Expression values and spreads are skipped.
fn attributes(attrs: &str) -> Vec<(String, Option<String>)> {
    let chars: Vec<char> = attrs.chars().collect();
    let mut out: Vec<(String, Option<String>)> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '{' {
            i = skip_braces(&chars, i);
            continue;
        }
        if c == '"' || c == '\'' || c == '`' {
            i = skip_quoted(&chars, i).0;
            continue;
        }
        if !is_name_char(c) {
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && is_name_char(chars[i]) {
            i += 1;
        }
        let name: String = chars[start..i].iter().collect();

        let mut j = i;
        while j < chars.len() && chars[j].is_whitespace() {
            j += 1;
        }
        let mut value = None;
        if j < chars.len() && chars[j] == '=' {
            j += 1;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            if j < chars.len() && (chars[j] == '"' || chars[j] == '\'') {
                let (next, literal) = skip_quoted(&chars, j);
                value = Some(literal);
                j = next;
            } else if j < chars.len() && chars[j] == '{' {
                j = skip_braces(&chars, j);
            }
            i = j;
        }
        out.push((name, value));
    }
    out
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':')
}

/// Index past the closing quote, and the quoted text.
fn skip_quoted(chars: &[char], open: usize) -> (usize, String) {
    let quote = chars[open];
    let mut i = open + 1;
    let mut literal = String::new();
    while i < chars.len() && chars[i] != quote {
        literal.push(chars[i]);
        i += 1;
    }
    (i + 1, literal)
}

/// Index past the brace matching the one at `open`.
fn skip_braces(chars: &[char], open: usize) -> usize {
    let mut depth = 0usize;
    let mut i = open;
    while i < chars.len() {
        match chars[i] {
            '"' | '\'' | '`' => {
                i = skip_quoted(chars, i).0;
                continue;
            }
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    chars.len()
}

/// Label for a form control: first usable literal among `name`,
/// `placeholder`, `id` and `type`, else the tag name.
fn control_label(tag: &str, attrs: &[(String, Option<String>)]) -> String {
    ["name", "placeholder", "id", "type"]
        .iter()
        .find_map(|wanted| {
            attrs.iter().find_map(|(name, value)| {
                value
                    .as_deref()
                    .map(str::trim)
                    .filter(|v| name == wanted && !v.is_empty() && !v.contains(['"', '\n']))
                    .map(str::to_string)
            })
        })
        .unwrap_or_else(|| tag.to_string())
}

/// Label for a form, from the file name: `LoginForm.tsx` gives "Login form".
fn form_label(path: &str) -> String {
    let mut words = stem_words(stem_of(path));
    if words.last().map(String::as_str) != Some("form") {
        words.push("form".to_string());
    }
    let joined = words.join(" ");
    let mut chars = joined.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_ascii_uppercase().to_string() + chars.as_str()
    })
}

/// Position just past a target tag name at `lt`, if the tag starts there.
fn target_tag_at(content: &str, lt: usize) -> Option<(&'static str, usize)> {
    let rest = &content[lt + 1..];
    TAGS.iter().find_map(|tag| {
        let after = rest.strip_prefix(tag)?;
        let boundary = after
            .chars()
            .next()
            .is_some_and(|c| c.is_whitespace() || c == '/' || c == '>');
        boundary.then_some((*tag, lt + 1 + tag.len()))
    })
}

/// Add `aria-label` to unlabelled controls and forms, and `alt=""` to images.
pub(super) fn add_accessibility_attributes(path: &str, content: &str) -> Option<String> {
    if !matches!(extension_of(path).as_str(), "tsx" | "jsx" | "html") {
        return None;
    }

    let mut out = String::with_capacity(content.len());
    let mut copied = 0;
    let mut cursor = 0;
    let mut changed = false;

    while let Some(found) = content[cursor..].find('<') {
        let lt = cursor + found;
        let Some((tag, name_end)) = target_tag_at(content, lt) else {
            cursor = lt + 1;
            continue;
        };
        let Some(end) = find_tag_end(content, name_end) else {
            break;
        };

        let attrs = attributes(&content[name_end..end]);
        let has = |wanted: &str| attrs.iter().any(|(name, _)| name == wanted);

        let insertion = if tag == "img" {
            (!has("alt")).then(|| " alt=\"\"".to_string())
        } else if has("aria-label") || has("aria-labelledby") {
            None
        } else if LABELLED_CONTROLS.contains(&tag) {
            Some(format!(" aria-label=\"{}\"", control_label(tag, &attrs)))
        } else {
            Some(format!(" aria-label=\"{}\"", form_label(path)))
        };

        if let Some(insertion) = insertion {
            out.push_str(&content[copied..name_end]);
            out.push_str(&insertion);
            copied = name_end;
            changed = true;
        }
        cursor = end + 1;
    }

    if !changed {
        return None;
    }
    out.push_str(&content[copied..]);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_end_skips_arrow_handlers_and_strings() {
        let text = r#"<button onClick={() => setOpen(a > b)} title="x > y">"#;
        let end = find_tag_end(text, 7).unwrap();
        assert_eq!(end, text.len() - 1);
        assert!(find_tag_end("<input value={x", 6).is_none());
    }

    #[test]
    fn test_labels_controls_from_attributes() {
        let content = r#"<input placeholder="Search tasks" onChange={(e) => set(e.target.value)} /><textarea id="notes"></textarea><select></select>"#;
        let out = add_accessibility_attributes("src/Search.tsx", content).unwrap();
        assert!(out.contains(r#"<input aria-label="Search tasks" placeholder="#));
        assert!(out.contains(r#"<textarea aria-label="notes" id="notes">"#));
        assert!(out.contains(r#"<select aria-label="select">"#));
    }

    #[test]
    fn test_expression_values_are_not_labels() {
        let out = add_accessibility_attributes("src/A.tsx", "<input name={field} type=\"email\" />").unwrap();
        assert!(out.contains("aria-label=\"email\""));
    }

    #[test]
    fn test_existing_labels_and_alts_are_kept() {
        let content = r#"<input aria-labelledby="lbl" /><img alt="Logo" src="a.png" /><form aria-label="Search"></form>"#;
        assert!(add_accessibility_attributes("src/A.tsx", content).is_none());
    }

    #[test]
    fn test_form_and_img() {
        let out = add_accessibility_attributes("src/components/TaskForm.tsx", "<form onSubmit={save}><img src={logo} /></form>").unwrap();
        assert!(out.contains("<form aria-label=\"Task form\" onSubmit"));
        assert!(out.contains("<img alt=\"\" src={logo} />"));
        assert_eq!(form_label("src/Settings.tsx"), "Settings form");
    }

    #[test]
    fn test_similar_tag_names_are_ignored() {
        let content = "<inputs /><Input /><formatted>";
        assert!(add_accessibility_attributes("src/A.tsx", content).is_none());
    }

    #[test]
    fn test_second_pass_is_noop() {
        let content = "<div><input name='q' /><img src=\"x\"></div>";
        let once = add_accessibility_attributes("index.html", content).unwrap();
        assert!(add_accessibility_attributes("index.html", &once).is_none());
    }
}
