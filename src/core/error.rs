//! Errors raised while building the scroll geometry.

use thiserror::Error;

/// Preconditions the content strip must meet before the engine can run.
///
/// Once `setup` succeeds the engine has no failure modes: every input and
/// tick is infallible.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScrollError {
    /// No canonical blocks and nothing to fall back on.
    #[error("content strip has no blocks to scroll")]
    EmptyContent,

    /// A block reported a negative, NaN or infinite width.
    #[error("block {index} has invalid width {width}")]
    InvalidBlockWidth { index: usize, width: f64 },

    /// The canonical blocks sum to zero width, so progress is undefined.
    #[error("sequence width must be positive")]
    ZeroSequenceWidth,

    /// The canonical widths are each valid but their sum overflows.
    #[error("sequence width overflows")]
    SequenceWidthOverflow,
}
