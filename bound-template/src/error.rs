use bound_dom::{DomError, NodeKind};
use thiserror::Error;

use crate::path::Path;

/// Failures surfaced by parsing and binding.
///
/// Malformed placeholders and unknown names on `set` are not errors; they are
/// treated as literal text and as no-ops respectively.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("path {path} does not resolve: no child at depth {depth}")]
    UnresolvedPath { path: Path, depth: usize },

    #[error("node at {path} is {found:?}, expected {expected}")]
    KindMismatch {
        path: Path,
        expected: &'static str,
        found: NodeKind,
    },

    #[error("element at {path} has no attribute `{attr}`")]
    MissingAttribute { path: Path, attr: String },

    #[error("data record must be a JSON object, got {found}")]
    NotARecord { found: &'static str },

    #[error("invalid placeholder syntax: {0}")]
    InvalidSyntax(String),

    #[error(transparent)]
    Dom(#[from] DomError),
}
