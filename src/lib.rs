//! clockdb - an embedded page cache with clock (second-chance) eviction.
//!
//! The crate mediates all access to on-disk pages through a fixed-size
//! pool of in-memory frames, deciding which pages stay resident, which
//! get evicted, and when dirty data must be persisted.
//!
//! # Architecture
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                      callers                         │
//! │      fetch / unpin / allocate / dispose / flush      │
//! └──────────────────────────┬───────────────────────────┘
//!                            ▼
//! ┌──────────────────────────────────────────────────────┐
//! │              Buffer layer (buffer/)                  │
//! │   BufferManager + page table + clock replacer        │
//! │   frames pinned via RAII page guards                 │
//! └──────────────────────────┬───────────────────────────┘
//!                            ▼
//! ┌──────────────────────────────────────────────────────┐
//! │             Storage layer (storage/)                 │
//! │   DbFile (per-file page I/O) + Page + PageHeader     │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageNo, FrameId, Error, config)
//! - [`buffer`] - Buffer pool management and eviction
//! - [`storage`] - File I/O and page formats
//!
//! # Quick Start
//! ```no_run
//! use clockdb::{BufferManager, DbFile};
//!
//! let file = DbFile::create("my_database.db").unwrap();
//! let mgr = BufferManager::new(64);
//!
//! let (page_no, mut guard) = mgr.allocate_page(&file).unwrap();
//! guard.payload_mut()[0] = 0xAB;
//! drop(guard); // unpinned, marked dirty
//!
//! let guard = mgr.fetch_page_read(&file, page_no).unwrap();
//! assert_eq!(guard.payload()[0], 0xAB);
//! ```

pub mod buffer;
pub mod common;
pub mod storage;

// Re-export commonly used items at crate root for convenience
pub use common::config::PAGE_SIZE;
pub use common::{Error, FrameId, PageNo, Result};

pub use buffer::{BufferManager, BufferStats, PageReadGuard, PageWriteGuard, StatsSnapshot};
pub use storage::page::{Page, PageHeader};
pub use storage::{DbFile, FileId};
