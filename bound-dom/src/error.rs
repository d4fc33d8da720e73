use thiserror::Error;

use crate::NodeKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("expected a text node, found {0:?}")]
    NotText(NodeKind),

    #[error("expected an element, found {0:?}")]
    NotElement(NodeKind),

    #[error("offset {offset} is not a char boundary in text of {len} bytes")]
    InvalidOffset { offset: usize, len: usize },

    #[error("child index {index} out of bounds for {len} children")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("markup error at byte {offset}: {message}")]
    Markup { offset: usize, message: String },
}
