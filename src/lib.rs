//! hover-bridge: symbol lookup for Python sources over line-delimited JSON.
//!
//! A long-running process reads one request per line (source text, path,
//! position), resolves the symbol at that position with a tree-sitter based
//! inference engine, and writes one response per line.

pub mod bridge;
pub mod config;
pub mod engine;
pub mod protocol;
