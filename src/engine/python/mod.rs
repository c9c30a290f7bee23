//! Python inference engine built on tree-sitter.
//!
//! Parses the request source, finds the name under the cursor and resolves
//! it through lexical scopes, imports and a small amount of expression
//! inference. Standard-library modules and builtins come from static tables;
//! other modules are looked up next to the request path.

mod docstring;
mod resolve;
mod scope;

use std::path::Path;

use lsp_types::Position;
use tracing::debug;
use tree_sitter::{Node, Parser, Point};

use super::{source_line, Candidate, EngineError, InferenceEngine};
use resolve::Resolver;

/// Tree-sitter backed `InferenceEngine` for Python sources.
pub struct PythonEngine {
    parser: Parser,
    local_modules: bool,
}

impl PythonEngine {
    pub fn new() -> Result<Self, EngineError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| EngineError::Language(e.to_string()))?;
        Ok(Self {
            parser,
            local_modules: true,
        })
    }

    /// Whether imports may be resolved by reading files next to the
    /// request path. Enabled by default.
    pub fn with_local_modules(mut self, enabled: bool) -> Self {
        self.local_modules = enabled;
        self
    }
}

impl InferenceEngine for PythonEngine {
    fn infer(
        &mut self,
        source: &str,
        path: &str,
        pos: Position,
    ) -> Result<Vec<Candidate>, EngineError> {
        let point = to_point(source, pos)?;
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| EngineError::Parse(path.to_string()))?;

        let mut resolver = Resolver::new(
            source,
            tree.root_node(),
            Path::new(path),
            &mut self.parser,
            self.local_modules,
        );
        let candidates = resolver.infer_at(point);
        debug!(path, line = pos.line, character = pos.character, count = candidates.len(), "inferred");
        Ok(candidates)
    }
}

/// LSP position (characters) → tree-sitter point (bytes).
fn to_point(source: &str, pos: Position) -> Result<Point, EngineError> {
    let line = i64::from(pos.line);
    let text = source_line(source, pos.line as usize).ok_or(EngineError::LineOutOfRange { line })?;
    let character = pos.character as usize;
    let column = match text.char_indices().nth(character) {
        Some((byte, _)) => byte,
        None if character == text.chars().count() => text.len(),
        None => {
            return Err(EngineError::ColumnOutOfRange {
                line,
                column: i64::from(pos.character),
                min: 0,
                max: text.chars().count(),
                text: text.to_string(),
            })
        }
    };
    Ok(Point::new(pos.line as usize, column))
}

/// The name at `point`, or the leaf there when no name touches it.
///
/// A cursor just past the end of an identifier still selects it.
pub(crate) fn name_at(root: Node<'_>, point: Point) -> Option<Node<'_>> {
    let leaf = root.descendant_for_point_range(point, point)?;
    if leaf.kind() == "identifier" {
        return Some(leaf);
    }
    if point.column > 0 {
        let before = Point::new(point.row, point.column - 1);
        if let Some(prev) = root.descendant_for_point_range(before, before) {
            if prev.kind() == "identifier" && prev.end_position() == point {
                return Some(prev);
            }
        }
    }
    Some(leaf)
}

/// Module name implied by a file path: the stem, or the package directory
/// for `__init__.py`. Without a path the module is `__main__`.
pub(crate) fn module_name_for(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    if stem == "__init__" {
        if let Some(package) = path.parent().and_then(Path::file_name) {
            return package.to_string_lossy().into_owned();
        }
    }
    if stem.is_empty() {
        "__main__".to_string()
    } else {
        stem
    }
}

pub(crate) fn text<'t>(node: Node<'_>, source: &'t str) -> &'t str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

pub(crate) fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
    children
}

#[cfg(test)]
pub(crate) fn parse(source: &str) -> tree_sitter::Tree {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .unwrap();
    parser.parse(source, None).unwrap()
}
