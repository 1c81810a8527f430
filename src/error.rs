//! Error type shared by every collection in the crate.

use std::fmt;

/// Contract violations reported by collections, views and cursors.
///
/// Every operation that returns one of these leaves the collection exactly as
/// it was before the call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompactError {
    /// A view was requested whose lower bound lies above its upper bound.
    InvalidRange,
    /// A key lies outside the bounds of the view it was given to.
    OutOfRange,
    /// `first`/`last` style navigation on an empty collection or view.
    Empty,
    /// `CursorMut::remove` without a preceding `next`.
    NoCurrent,
    /// A store span that does not fit the used region.
    IndexOutOfBounds { index: usize, count: usize, len: usize },
    /// Alignment outside `0.0..=1.0`.
    InvalidAlignment(f32),
}

impl fmt::Display for CompactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompactError::InvalidRange => write!(f, "range start is greater than range end"),
            CompactError::OutOfRange => write!(f, "key out of view range"),
            CompactError::Empty => write!(f, "collection is empty"),
            CompactError::NoCurrent => write!(f, "cursor has no current element"),
            CompactError::IndexOutOfBounds { index, count, len } => write!(
                f,
                "span {index}..{} out of bounds for length {len}",
                index.saturating_add(*count)
            ),
            CompactError::InvalidAlignment(alignment) => {
                write!(f, "alignment {alignment} not within 0.0..=1.0")
            }
        }
    }
}

impl std::error::Error for CompactError {}
