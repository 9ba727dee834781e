//! Missing framework import.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::models::extension_of;

const HOOKS: [&str; 7] = [
    "useState",
    "useEffect",
    "useCallback",
    "useMemo",
    "useRef",
    "useContext",
    "useReducer",
];

static REACT_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(from\s+['"]react['"])|(require\(\s*['"]react['"]\s*\))"#)
        .expect("valid react import regex")
});

static HOOK_USE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(useState|useEffect|useCallback|useMemo|useRef|useContext|useReducer)\b")
        .expect("valid hook regex")
});

/// Prepend `import React, { <hooks> } from 'react';` to JSX sources that use
/// hooks or the `React` namespace without importing it.
pub(super) fn add_framework_import(path: &str, content: &str) -> Option<String> {
    if !matches!(extension_of(path).as_str(), "tsx" | "jsx") {
        return None;
    }
    if REACT_IMPORT.is_match(content) {
        return None;
    }

    let used: Vec<&str> = HOOKS
        .iter()
        .copied()
        .filter(|hook| HOOK_USE.find_iter(content).any(|m| m.as_str() == *hook))
        .collect();

    if used.is_empty() && !content.contains("React.") {
        return None;
    }

    let import = if used.is_empty() {
        "import React from 'react';\n".to_string()
    } else {
        format!("import React, {{ {} }} from 'react';\n", used.join(", "))
    };
    Some(import + content)
}
