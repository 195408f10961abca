use std::collections::TryReserveError;
use thiserror::Error;

/// Failure modes of list and cell operations.
///
/// Most of these are caller defects. The panicking entry points (`List::get`,
/// `List::erase`, `Cursor::advance`) report them through their `Display` text;
/// the `try_*` variants hand them back instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    #[error("cursor is positioned at the end of the list")]
    EndOfList,

    #[error("cursor refers to cell slot {index}, which was already erased")]
    StaleCursor { index: usize },

    #[error("cursor belongs to a different list")]
    ForeignCursor,

    #[error("payload mismatch: expected {expected}, found {found}")]
    PayloadMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("could not allocate a list cell: {0}")]
    AllocationFailed(#[from] TryReserveError),
}
