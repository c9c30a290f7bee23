//! Response line encoding.

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

use super::Response;

/// Compact JSON with spaced separators and ASCII-only strings.
struct LineFormatter;

impl Formatter for LineFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() && ch != '\x7f' {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Encode `response` as one newline-terminated line.
pub fn encode_line(response: &Response) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(128);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, LineFormatter);
    response.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::SymbolInfo;

    fn line(response: &Response) -> String {
        String::from_utf8(encode_line(response).unwrap()).unwrap()
    }

    #[test]
    fn symbol_layout() {
        let resp = Response::Symbol(SymbolInfo {
            name: "os".into(),
            full_name: Some("os".into()),
            kind: "module".into(),
            docstring: "OS routines.".into(),
            module_name: None,
        });
        assert_eq!(
            line(&resp),
            "{\"name\": \"os\", \"full_name\": \"os\", \"type\": \"module\", \"docstring\": \"OS routines.\", \"module_name\": null}\n"
        );
    }

    #[test]
    fn not_found_is_null() {
        assert_eq!(line(&Response::NotFound), "null\n");
    }

    #[test]
    fn failure_has_only_error() {
        assert_eq!(
            line(&Response::failure("expected value at line 1 column 1")),
            "{\"error\": \"expected value at line 1 column 1\"}\n"
        );
    }

    #[test]
    fn non_ascii_is_escaped() {
        let out = line(&Response::failure("café 😀"));
        assert_eq!(out, "{\"error\": \"caf\\u00e9 \\ud83d\\ude00\"}\n");
    }

    #[test]
    fn control_characters_and_quotes() {
        let out = line(&Response::failure("a\nb\t\"c\"\u{7f}"));
        assert_eq!(out, "{\"error\": \"a\\nb\\t\\\"c\\\"\\u007f\"}\n");
    }

    #[test]
    fn one_line_even_with_newlines_in_docstring() {
        let resp = Response::Symbol(SymbolInfo {
            name: "f".into(),
            full_name: None,
            kind: "function".into(),
            docstring: "f()\n\nDoes things.".into(),
            module_name: None,
        });
        let out = line(&resp);
        assert_eq!(out.matches('\n').count(), 1);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["docstring"], "f()\n\nDoes things.");
    }
}
