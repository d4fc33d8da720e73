use std::fmt;

use bound_dom::Node;
use serde::{Deserialize, Serialize};

use crate::error::BindError;

/// Child indices leading from a root to a node, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<usize>);

impl Path {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// A new path one level deeper; `self` is left untouched.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Walks the path from `root`. Fails on the first level with no such child.
    pub fn resolve(&self, root: &Node) -> Result<Node, BindError> {
        let mut current = root.clone();
        for (depth, &index) in self.0.iter().enumerate() {
            current = current.child(index).ok_or_else(|| BindError::UnresolvedPath {
                path: self.clone(),
                depth,
            })?;
        }
        Ok(current)
    }
}

impl From<Vec<usize>> for Path {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}
