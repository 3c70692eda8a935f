//! Error types for clockdb.

use thiserror::Error;

use crate::common::{FrameId, PageNo};

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in clockdb.
///
/// A single error type keeps error handling consistent across the buffer
/// and storage layers. Lookup misses in the page table are not represented
/// here: a miss is the normal cold-fetch branch and is handled with
/// `Option` inside the buffer manager.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested page is not allocated in the file.
    #[error("page {page_no} not found in file '{file}'")]
    PageNotFound { file: String, page_no: PageNo },

    /// Every frame was observed pinned during an eviction scan; nothing
    /// can be freed until a caller releases a pin.
    #[error("buffer exceeded: all {0} frames are pinned")]
    BufferExceeded(usize),

    /// Unpin of a page whose pin count is already zero.
    ///
    /// Indicates an unbalanced pin/unpin in the caller.
    #[error("page {page_no} of file '{file}' is not pinned")]
    PageNotPinned { file: String, page_no: PageNo },

    /// A file flush found one of the file's pages still pinned.
    #[error("page {page_no} of file '{file}' is still pinned in frame {frame}")]
    PagePinned {
        file: String,
        page_no: PageNo,
        frame: FrameId,
    },

    /// A frame carries a file binding but its valid flag is down.
    ///
    /// Unreachable unless descriptor bookkeeping was corrupted earlier.
    #[error("bad buffer: frame {frame} is bound to a file but invalid (dirty={dirty}, referenced={referenced})")]
    BadBuffer {
        frame: FrameId,
        dirty: bool,
        referenced: bool,
    },

    /// Stored page checksum does not match the page contents.
    #[error("checksum mismatch on page {page_no} of file '{file}'")]
    ChecksumMismatch { file: String, page_no: PageNo },
}
