//! Docstrings, string literals and signatures.

use tree_sitter::Node;

use super::{named_children, text};

/// Value of a Python string literal, without prefix or quotes.
///
/// Raw literals are returned verbatim; others get the common escapes
/// decoded. Unterminated literals yield whatever sits between the quotes.
pub(crate) fn string_value(literal: &str) -> String {
    let prefix_len = literal.find(['"', '\'']).unwrap_or(literal.len());
    let raw = literal[..prefix_len].to_ascii_lowercase().contains('r');
    let body = &literal[prefix_len..];

    let quote_len = if body.starts_with("\"\"\"") || body.starts_with("'''") {
        3
    } else {
        1
    };
    if body.len() < quote_len * 2 {
        return String::new();
    }
    let quote = &body[..quote_len];
    let inner = body[quote_len..]
        .strip_suffix(quote)
        .unwrap_or(&body[quote_len..]);

    if raw {
        inner.to_string()
    } else {
        unescape(inner)
    }
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            // line continuation
            Some('\n') => {}
            Some('x') => push_code_point(&mut out, &mut chars, 2, 'x'),
            Some('u') => push_code_point(&mut out, &mut chars, 4, 'u'),
            Some('U') => push_code_point(&mut out, &mut chars, 8, 'U'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn push_code_point(
    out: &mut String,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    digits: usize,
    marker: char,
) {
    let hex: String = std::iter::from_fn(|| chars.next_if(char::is_ascii_hexdigit))
        .take(digits)
        .collect();
    match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
        Some(c) if hex.len() == digits => out.push(c),
        _ => {
            out.push('\\');
            out.push(marker);
            out.push_str(&hex);
        }
    }
}

/// Normalize docstring indentation the way `inspect.cleandoc` does.
pub(crate) fn cleandoc(doc: &str) -> String {
    let expanded = doc.replace('\t', "        ");
    let lines: Vec<&str> = expanded.lines().collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<&str> = Vec::with_capacity(lines.len());
    if let Some(first) = lines.first() {
        cleaned.push(first.trim_start());
    }
    for line in lines.iter().skip(1) {
        cleaned.push(line.get(margin..).unwrap_or_else(|| line.trim_start()));
    }

    while cleaned.last().is_some_and(|l| l.trim().is_empty()) {
        cleaned.pop();
    }
    let start = cleaned
        .iter()
        .position(|l| !l.trim().is_empty())
        .unwrap_or(cleaned.len());
    cleaned[start..].join("\n")
}

/// Docstring of a module, class or function body.
pub(crate) fn docstring_of(body: Node<'_>, source: &str) -> Option<String> {
    let first = named_children(body)
        .into_iter()
        .find(|n| n.kind() != "comment")?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let literal = named_children(first).into_iter().next()?;
    if literal.kind() != "string" {
        return None;
    }
    let raw = text(literal, source);
    let prefix_len = raw.find(['"', '\'']).unwrap_or(0);
    if raw[..prefix_len].to_ascii_lowercase().contains(['f', 'b']) {
        return None;
    }
    Some(cleandoc(&string_value(raw)))
}

/// Collapse the whitespace of a source fragment onto one line.
pub(crate) fn squash(fragment: &str) -> String {
    fragment
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("( ", "(")
        .replace(" )", ")")
        .replace(",)", ")")
        .replace("[ ", "[")
        .replace(" ]", "]")
}

/// `name(params) -> ret` for a function definition.
pub(crate) fn function_signature(def: Node<'_>, source: &str) -> String {
    let name = def
        .child_by_field_name("name")
        .map(|n| text(n, source))
        .unwrap_or_default();
    let params = def
        .child_by_field_name("parameters")
        .map(|p| squash(text(p, source)))
        .unwrap_or_else(|| "()".to_string());
    match def.child_by_field_name("return_type") {
        Some(ret) => format!("{name}{params} -> {}", squash(text(ret, source))),
        None => format!("{name}{params}"),
    }
}

/// `Name(params)` for a class, using `__init__` without its receiver.
pub(crate) fn class_signature(class: Node<'_>, source: &str) -> String {
    let name = class
        .child_by_field_name("name")
        .map(|n| text(n, source))
        .unwrap_or_default();
    let params = init_method(class, source)
        .and_then(|init| init.child_by_field_name("parameters"))
        .map(|p| {
            named_children(p)
                .into_iter()
                .filter(|n| n.kind() != "comment")
                .skip(1)
                .map(|n| squash(text(n, source)))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();
    format!("{name}({params})")
}

/// The `__init__` definition directly inside a class body.
pub(crate) fn init_method<'t>(class: Node<'t>, source: &str) -> Option<Node<'t>> {
    let body = class.child_by_field_name("body")?;
    named_children(body).into_iter().find_map(|stmt| {
        let def = match stmt.kind() {
            "function_definition" => stmt,
            "decorated_definition" => stmt.child_by_field_name("definition")?,
            _ => return None,
        };
        let name = def.child_by_field_name("name")?;
        (text(name, source) == "__init__").then_some(def)
    })
}

/// Join a signature and an optional docstring the way hover text shows them.
pub(crate) fn with_doc(signature: String, doc: Option<String>) -> String {
    match doc {
        Some(doc) if !doc.is_empty() => format!("{signature}\n\n{doc}"),
        _ => signature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_value_strips_quotes_and_prefix() {
        assert_eq!(string_value("\"hello\""), "hello");
        assert_eq!(string_value("'''a\nb'''"), "a\nb");
        assert_eq!(string_value("r'\\d+'"), "\\d+");
        assert_eq!(string_value("\"tab\\there\""), "tab\there");
        assert_eq!(string_value("'\\u00e9'"), "é");
        assert_eq!(string_value("\"\""), "");
    }

    #[test]
    fn unknown_escapes_are_kept() {
        assert_eq!(string_value("'\\q'"), "\\q");
        assert_eq!(string_value("'\\xZZ'"), "\\xZZ");
    }

    #[test]
    fn cleandoc_removes_common_indent() {
        let doc = "Summary line.\n\n        Details here.\n          indented more.\n    ";
        assert_eq!(
            cleandoc(doc),
            "Summary line.\n\nDetails here.\n  indented more."
        );
    }

    #[test]
    fn cleandoc_strips_leading_blank_lines() {
        assert_eq!(cleandoc("\n    Body.\n    "), "Body.");
        assert_eq!(cleandoc(""), "");
    }

    #[test]
    fn squash_collapses_parameter_lists() {
        assert_eq!(squash("(\n    a: int,\n    b=2,\n)"), "(a: int, b=2)");
    }

    #[test]
    fn with_doc_joins() {
        assert_eq!(with_doc("f()".into(), Some("Doc.".into())), "f()\n\nDoc.");
        assert_eq!(with_doc("f()".into(), None), "f()");
        assert_eq!(with_doc("f()".into(), Some(String::new())), "f()");
    }
}
