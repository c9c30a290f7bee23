//! Inference engines: resolve the symbol at a source position.
//!
//! The bridge only talks to the `InferenceEngine` trait. Request positions
//! are normalized through a `PositionConvention` into an LSP `Position`
//! (0-based line, 0-based character) before an engine ever sees them.

pub mod builtins;
pub mod python;
pub mod stdlib;

use std::fmt;

use lsp_types::Position;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind tag of a resolved symbol, reported as the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Module,
    Class,
    Instance,
    Function,
    Param,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Class => "class",
            Self::Instance => "instance",
            Self::Function => "function",
            Self::Param => "param",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One possible resolution of the symbol under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub full_name: Option<String>,
    pub kind: SymbolKind,
    pub docstring: String,
    pub module_name: Option<String>,
}

impl Candidate {
    /// Candidate describing a whole module.
    pub fn module(name: &str, docstring: &str) -> Self {
        let short = name.rsplit('.').next().unwrap_or(name);
        Self {
            name: short.to_string(),
            full_name: Some(name.to_string()),
            kind: SymbolKind::Module,
            docstring: docstring.to_string(),
            module_name: Some(name.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("`line` parameter is not in a valid range.")]
    LineOutOfRange { line: i64 },

    #[error("`column` parameter ({column}) is not in a valid range ({min}-{max}) for line {line} ({text:?}).")]
    ColumnOutOfRange {
        line: i64,
        column: i64,
        min: u8,
        max: usize,
        text: String,
    },

    #[error("failed to load Python grammar: {0}")]
    Language(String),

    #[error("parser produced no syntax tree for {0:?}")]
    Parse(String),
}

/// Resolves symbols at a position inside a source text.
///
/// Returns candidates in engine-defined order; an empty list means nothing
/// could be resolved. Callers that want a single answer take the first.
pub trait InferenceEngine {
    fn infer(
        &mut self,
        source: &str,
        path: &str,
        pos: Position,
    ) -> Result<Vec<Candidate>, EngineError>;
}

/// How request line/column integers map onto source positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionConvention {
    pub line_base: u8,
    pub column_base: u8,
}

impl Default for PositionConvention {
    fn default() -> Self {
        Self {
            line_base: 1,
            column_base: 0,
        }
    }
}

impl PositionConvention {
    /// Validate a request position against `source` and convert it to a
    /// 0-based LSP position. Columns count characters, not bytes; the
    /// position just past the last character of a line is valid.
    pub fn normalize(&self, source: &str, line: i64, column: i64) -> Result<Position, EngineError> {
        let row = line - i64::from(self.line_base);
        let text = usize::try_from(row)
            .ok()
            .and_then(|row| source_line(source, row))
            .ok_or(EngineError::LineOutOfRange { line })?;

        let len = text.chars().count();
        let character = column - i64::from(self.column_base);
        let in_range = usize::try_from(character).is_ok_and(|c| c <= len);
        if !in_range {
            return Err(EngineError::ColumnOutOfRange {
                line,
                column,
                min: self.column_base,
                max: len + usize::from(self.column_base),
                text: text.to_string(),
            });
        }

        let row = u32::try_from(row).map_err(|_| EngineError::LineOutOfRange { line })?;
        let character = u32::try_from(character).map_err(|_| EngineError::LineOutOfRange { line })?;
        Ok(Position::new(row, character))
    }
}

/// Text of the 0-based `row`, without its line terminator.
///
/// An empty source has one empty line; a trailing newline opens one more.
pub fn source_line(source: &str, row: usize) -> Option<&str> {
    source
        .split('\n')
        .nth(row)
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_convention_is_one_based_lines() {
        let conv = PositionConvention::default();
        let pos = conv.normalize("import os\nos.getcwd()", 2, 0).unwrap();
        assert_eq!(pos, Position::new(1, 0));
    }

    #[test]
    fn zero_based_lines() {
        let conv = PositionConvention {
            line_base: 0,
            column_base: 0,
        };
        let pos = conv.normalize("a\nb", 1, 1).unwrap();
        assert_eq!(pos, Position::new(1, 1));
    }

    #[test]
    fn line_out_of_range() {
        let conv = PositionConvention::default();
        let err = conv.normalize("x = 1", 2, 0).unwrap_err();
        assert!(matches!(err, EngineError::LineOutOfRange { line: 2 }));
        assert_eq!(err.to_string(), "`line` parameter is not in a valid range.");

        let err = conv.normalize("x = 1", 0, 0).unwrap_err();
        assert!(matches!(err, EngineError::LineOutOfRange { .. }));
    }

    #[test]
    fn column_out_of_range_reports_line() {
        let conv = PositionConvention::default();
        let err = conv.normalize("x = 1", 1, 6).unwrap_err();
        assert_eq!(
            err.to_string(),
            "`column` parameter (6) is not in a valid range (0-5) for line 1 (\"x = 1\")."
        );
        assert!(conv.normalize("x = 1", 1, -1).is_err());
    }

    #[test]
    fn column_counts_characters() {
        let conv = PositionConvention::default();
        // "é" is two bytes but one character
        assert!(conv.normalize("é = 1", 1, 5).is_ok());
        assert!(conv.normalize("é = 1", 1, 6).is_err());
    }

    #[test]
    fn trailing_newline_opens_a_line() {
        let conv = PositionConvention::default();
        assert!(conv.normalize("x = 1\n", 2, 0).is_ok());
        assert!(conv.normalize("", 1, 0).is_ok());
    }

    #[test]
    fn crlf_is_not_part_of_the_line() {
        assert_eq!(source_line("a = 1\r\nb", 0), Some("a = 1"));
    }

    #[test]
    fn kind_tags_are_lowercase() {
        assert_eq!(SymbolKind::Instance.as_str(), "instance");
        assert_eq!(SymbolKind::Module.to_string(), "module");
    }
}
