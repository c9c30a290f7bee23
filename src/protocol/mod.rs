//! Wire protocol: one JSON request per input line, one JSON response per
//! output line.
//!
//! Responses are encoded with `encode_line`, which reproduces the exact
//! text layout callers already parse (`", "` / `": "` separators, ASCII-only
//! output with `\uXXXX` escapes).

mod json;

use serde::{Deserialize, Serialize};

use crate::engine::Candidate;

pub use json::encode_line;

/// "What symbol is at `line`/`column` of `source`, which lives at `path`?"
///
/// Positions are raw request integers; their base is decided by the
/// bridge's `PositionConvention`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InferenceRequest {
    pub source: String,
    pub path: String,
    pub line: i64,
    pub column: i64,
}

/// The five fields describing a resolved symbol, in wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolInfo {
    pub name: String,
    pub full_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub docstring: String,
    pub module_name: Option<String>,
}

impl From<Candidate> for SymbolInfo {
    fn from(c: Candidate) -> Self {
        Self {
            name: c.name,
            full_name: c.full_name,
            kind: c.kind.as_str().to_string(),
            docstring: c.docstring,
            module_name: c.module_name,
        }
    }
}

/// One response line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    /// The first candidate the engine returned.
    Symbol(SymbolInfo),
    /// Nothing resolved; encoded as the literal `null`.
    NotFound,
    /// Request handling failed; carries only the message.
    Failure { error: String },
}

impl Response {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            error: message.into(),
        }
    }
}

impl From<Option<Candidate>> for Response {
    fn from(candidate: Option<Candidate>) -> Self {
        match candidate {
            Some(c) => Self::Symbol(c.into()),
            None => Self::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SymbolKind;

    #[test]
    fn request_parses() {
        let req: InferenceRequest = serde_json::from_str(
            r#"{"source": "import os\nos.getcwd()", "path": "a.py", "line": 2, "column": 0}"#,
        )
        .unwrap();
        assert_eq!(req.source, "import os\nos.getcwd()");
        assert_eq!(req.path, "a.py");
        assert_eq!((req.line, req.column), (2, 0));
    }

    #[test]
    fn request_ignores_extra_fields() {
        let req: Result<InferenceRequest, _> = serde_json::from_str(
            r#"{"source": "", "path": "", "line": 1, "column": 0, "extra": true}"#,
        );
        assert!(req.is_ok());
    }

    #[test]
    fn missing_field_is_named() {
        let err = serde_json::from_str::<InferenceRequest>(r#"{"path": "a.py", "line": 1, "column": 0}"#)
            .unwrap_err();
        assert!(err.to_string().contains("missing field `source`"), "{err}");
    }

    #[test]
    fn wrongly_typed_field_fails() {
        let err = serde_json::from_str::<InferenceRequest>(
            r#"{"source": "", "path": "a.py", "line": "one", "column": 0}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn symbol_info_from_candidate() {
        let info = SymbolInfo::from(Candidate {
            name: "os".into(),
            full_name: Some("os".into()),
            kind: SymbolKind::Module,
            docstring: "doc".into(),
            module_name: Some("os".into()),
        });
        assert_eq!(info.kind, "module");
        assert_eq!(Response::from(None), Response::NotFound);
    }
}
