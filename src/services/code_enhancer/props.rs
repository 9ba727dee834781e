//! Props interface inference for TSX components.

use regex::Regex;
use std::sync::LazyLock;

use super::pascal_case;
use crate::domain::models::{extension_of, stem_of};

static PROPS_USE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bprops\.([A-Za-z_$][\w$]*)").expect("valid props regex"));

static BARE_PROPS_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*props\s*\)").expect("valid props param regex"));

const BOOLEAN_PREFIXES: [&str; 5] = ["is", "has", "show", "can", "should"];

/// Insert a `<Component>Props` interface inferred from `props.x` usage and
/// annotate a bare `(props)` parameter with it.
pub(super) fn add_props_interface(path: &str, content: &str) -> Option<String> {
    if extension_of(path) != "tsx" {
        return None;
    }

    let fields = used_fields(content);
    if fields.is_empty() {
        return None;
    }

    let interface_name = format!("{}Props", pascal_case(stem_of(path)));
    let declared = Regex::new(&format!(r"\b(interface|type)\s+{interface_name}\b"))
        .is_ok_and(|re| re.is_match(content));

    let mut updated = if declared {
        content.to_string()
    } else {
        let body: String = fields
            .iter()
            .map(|name| format!("  {name}: {};\n", infer_type(content, name)))
            .collect();
        let block = format!("interface {interface_name} {{\n{body}}}\n");

        let at = end_of_imports(content);
        if at == 0 {
            format!("{block}\n{content}")
        } else {
            format!("{}\n{block}\n{}", &content[..at], &content[at..])
        }
    };

    if BARE_PROPS_PARAM.is_match(&updated) {
        updated = BARE_PROPS_PARAM
            .replace_all(&updated, format!("(props: {interface_name})").as_str())
            .into_owned();
    }

    (updated != content).then_some(updated)
}

/// Distinct `props.<name>` fields in order of first use.
fn used_fields(content: &str) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    for caps in PROPS_USE.captures_iter(content) {
        let name = &caps[1];
        if !fields.iter().any(|f| f == name) {
            fields.push(name.to_string());
        }
    }
    fields
}

/// Type for one field, from the way it is used.
fn infer_type(content: &str, name: &str) -> &'static str {
    let uses = occurrences(content, name);

    let callable = is_handler_name(name)
        || uses.iter().any(|(_, after)| after.trim_start().starts_with('('));
    if callable {
        return "(...args: unknown[]) => void";
    }

    let list = uses.iter().any(|(_, after)| {
        [".map(", ".filter(", ".forEach(", ".length"]
            .iter()
            .any(|m| after.starts_with(m))
    });
    if list {
        return "unknown[]";
    }

    let boolean = BOOLEAN_PREFIXES.iter().any(|p| has_prefix_word(name, p))
        || uses.iter().any(|(before, _)| before.ends_with('!'));
    if boolean {
        return "boolean";
    }

    let rendered = uses.iter().any(|(before, after)| {
        before.trim_end().ends_with('{') && after.trim_start().starts_with('}')
    });
    if rendered {
        return "string";
    }

    "unknown"
}

/// Text before and after every `props.<name>` occurrence that is not a
/// prefix of a longer name.
fn occurrences<'a>(content: &'a str, name: &str) -> Vec<(&'a str, &'a str)> {
    let needle = format!("props.{name}");
    content
        .match_indices(&needle)
        .filter_map(|(idx, _)| {
            let after = &content[idx + needle.len()..];
            let continues = after
                .chars()
                .next()
                .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$');
            (!continues).then(|| (&content[..idx], after))
        })
        .collect()
}

fn is_handler_name(name: &str) -> bool {
    has_prefix_word(name, "on")
}

/// `name` starts with `prefix` followed by an upper-case letter.
fn has_prefix_word(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}

/// Byte offset just past the leading import block, or 0 when there is none.
fn end_of_imports(content: &str) -> usize {
    let mut offset = 0;
    let mut end = 0;
    let mut in_import = false;

    for line in content.split_inclusive('\n') {
        let trimmed = line.trim();
        let next = offset + line.len();

        if in_import {
            if trimmed.contains("from ") || trimmed.ends_with(';') {
                in_import = false;
                end = next;
            }
        } else if trimmed.starts_with("import ") || trimmed.starts_with("import{") {
            let complete = trimmed.contains(" from ")
                || trimmed.ends_with(';')
                || trimmed.starts_with("import '")
                || trimmed.starts_with("import \"");
            if complete {
                end = next;
            } else {
                in_import = true;
            }
        } else if !(trimmed.is_empty()
            || trimmed.starts_with("//")
            || trimmed.starts_with("'use ")
            || trimmed.starts_with("\"use "))
        {
            break;
        }
        offset = next;
    }

    if in_import {
        content.len()
    } else {
        end
    }
}
