//! Identifier casing for generated code.

const STRICT_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "union", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

// Keywords that cannot be written as raw identifiers.
const NO_RAW: &[&str] = &["crate", "self", "Self", "super"];

// Locals used by generated constructors.
const RESERVED_LOCALS: &[&str] = &["engine", "node", "value"];

/// Return `true` for Rust keywords (strict and reserved).
pub fn is_keyword(s: &str) -> bool {
    STRICT_KEYWORDS.contains(&s)
}

fn words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut out = Vec::new();
    let mut cur = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !cur.is_empty() {
                out.push(std::mem::take(&mut cur));
            }
            continue;
        }
        if c.is_ascii_uppercase() && !cur.is_empty() {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase() || (prev.is_ascii_uppercase() && next_lower) {
                out.push(std::mem::take(&mut cur));
            }
        }
        cur.push(c);
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

/// `UpperCamelCase` identifier for a type or enum variant.
///
/// Each word keeps its inner casing (`Texture2D` stays `Texture2D`), a leading digit gets a
/// `V` prefix and `Self` becomes `Self_`.
pub fn type_ident(s: &str) -> String {
    let mut out = String::new();
    for w in words(s) {
        let mut cs = w.chars();
        if let Some(first) = cs.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(cs);
        }
    }
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, 'V');
    }
    if NO_RAW.contains(&out.as_str()) {
        out.push('_');
    }
    out
}

/// `snake_case` spelling, without any keyword escaping.
pub fn snake_case(s: &str) -> String {
    let mut out = words(s)
        .iter()
        .map(|w| w.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("_");
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, 'v');
    }
    out
}

/// Identifier for a function parameter derived from a wire field name.
pub fn field_ident(s: &str) -> String {
    let base = snake_case(s);
    if NO_RAW.contains(&base.as_str()) || RESERVED_LOCALS.contains(&base.as_str()) {
        format!("{base}_")
    } else if is_keyword(&base) {
        format!("r#{base}")
    } else {
        base
    }
}

/// Setter name for a wire field name.
pub fn setter_ident(s: &str) -> String {
    format!("set_{}", snake_case(s))
}

/// Module (and file stem) name for a generated type.
pub fn module_ident(type_name: &str) -> String {
    let base = snake_case(type_name);
    if is_keyword(&base) {
        format!("{base}_")
    } else {
        base
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codegen/naming.rs"]
mod tests;
