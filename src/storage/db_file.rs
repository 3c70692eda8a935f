//! DbFile - page-granular I/O on a single database file.
//!
//! A [`DbFile`] is a cheaply cloneable handle to one on-disk file. The
//! buffer manager serves pages from many files at once and keys its page
//! table on [`FileId`], so all clones of a handle share one identity.

use std::collections::BTreeSet;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::common::config::PAGE_SIZE;
use crate::common::{Error, PageNo, Result};
use crate::storage::page::Page;

/// Process-unique identity of an open database file.
///
/// Assigned once when the file is opened; every clone of the handle
/// carries the same id. Opening the same path twice yields two distinct
/// identities, so callers that share a file must share the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(u64);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static NEXT_FILE_ID: AtomicU64 = AtomicU64::new(0);

fn next_file_id() -> FileId {
    FileId(NEXT_FILE_ID.fetch_add(1, Ordering::Relaxed))
}

/// A handle to one database file, readable and writable in whole pages.
///
/// # File Layout
/// Pages are laid out sequentially; page N lives at offset `N × PAGE_SIZE`.
/// Deleted page slots are remembered and handed back out by
/// [`DbFile::allocate_page`] before the file is grown.
///
/// # Thread Safety
/// The underlying `std::fs::File` and allocation state sit behind a
/// `Mutex`, so a handle can be shared across threads; operations on one
/// file are serialized.
///
/// # Durability
/// Every page write is followed by `fsync()`.
#[derive(Debug, Clone)]
pub struct DbFile {
    inner: Arc<FileInner>,
}

#[derive(Debug)]
struct FileInner {
    id: FileId,
    path: PathBuf,
    state: Mutex<FileState>,
}

#[derive(Debug)]
struct FileState {
    file: File,
    /// Number of page slots in the file, freed ones included.
    page_count: u32,
    /// Deleted slots available for reuse, lowest first.
    freed: BTreeSet<u32>,
}

impl DbFile {
    /// Create a new database file.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(&path)?;

        Ok(Self::from_parts(path.as_ref().to_path_buf(), file, 0))
    }

    /// Open an existing database file.
    ///
    /// # Errors
    /// Returns an error if the file doesn't exist or cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(&path)?;

        let file_size = file.metadata()?.len();
        let page_count = (file_size / PAGE_SIZE as u64) as u32;

        Ok(Self::from_parts(path.as_ref().to_path_buf(), file, page_count))
    }

    /// Open an existing database file, or create it if it doesn't exist.
    pub fn open_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::open(path)
        } else {
            Self::create(path)
        }
    }

    fn from_parts(path: PathBuf, file: File, page_count: u32) -> Self {
        Self {
            inner: Arc::new(FileInner {
                id: next_file_id(),
                path,
                state: Mutex::new(FileState {
                    file,
                    page_count,
                    freed: BTreeSet::new(),
                }),
            }),
        }
    }

    /// This file's identity, shared by all clones of the handle.
    #[inline]
    pub fn id(&self) -> FileId {
        self.inner.id
    }

    /// The file's name, for diagnostics and error messages.
    pub fn filename(&self) -> String {
        self.inner.path.display().to_string()
    }

    /// Read an allocated page from disk.
    ///
    /// # Errors
    /// - `Error::PageNotFound` if the slot was never allocated or has
    ///   been deleted
    /// - `Error::ChecksumMismatch` if the stored page fails verification
    pub fn read_page(&self, page_no: PageNo) -> Result<Page> {
        let mut state = self.inner.state.lock();
        self.check_allocated(&state, page_no)?;

        let offset = (page_no.0 as u64) * (PAGE_SIZE as u64);
        state.file.seek(SeekFrom::Start(offset))?;

        let mut page = Page::new();
        state.file.read_exact(page.as_mut_slice())?;
        drop(state);

        if !page.verify_checksum() {
            return Err(Error::ChecksumMismatch {
                file: self.filename(),
                page_no,
            });
        }

        Ok(page)
    }

    /// Write a page back to its slot, stamping its checksum first.
    ///
    /// The slot is taken from the page's own header.
    ///
    /// # Errors
    /// Returns `Error::PageNotFound` if the page's slot is not allocated.
    pub fn write_page(&self, page: &mut Page) -> Result<()> {
        let page_no = page.page_no();
        let mut state = self.inner.state.lock();
        self.check_allocated(&state, page_no)?;

        page.update_checksum();

        let offset = (page_no.0 as u64) * (PAGE_SIZE as u64);
        state.file.seek(SeekFrom::Start(offset))?;
        state.file.write_all(page.as_slice())?;
        state.file.sync_all()?;

        Ok(())
    }

    /// Allocate a page slot and return the zeroed page stamped with its
    /// number, already written out.
    ///
    /// Deleted slots are reused lowest-first; otherwise the file grows by
    /// one page.
    pub fn allocate_page(&self) -> Result<Page> {
        let mut state = self.inner.state.lock();

        let reused = state.freed.iter().next().copied();
        let slot = reused.unwrap_or(state.page_count);

        let mut page = Page::new();
        page.set_page_no(PageNo::new(slot));
        page.update_checksum();

        let offset = (slot as u64) * (PAGE_SIZE as u64);
        state.file.seek(SeekFrom::Start(offset))?;
        state.file.write_all(page.as_slice())?;
        state.file.sync_all()?;

        // Commit the slot only once the page is durable.
        match reused {
            Some(n) => {
                state.freed.remove(&n);
            }
            None => state.page_count += 1,
        }

        Ok(page)
    }

    /// Delete a page, making its slot invisible and reusable.
    ///
    /// # Errors
    /// Returns `Error::PageNotFound` if the slot is not allocated.
    pub fn delete_page(&self, page_no: PageNo) -> Result<()> {
        let mut state = self.inner.state.lock();
        self.check_allocated(&state, page_no)?;
        state.freed.insert(page_no.0);
        Ok(())
    }

    /// Number of page slots in the file, deleted slots included.
    pub fn page_count(&self) -> u32 {
        self.inner.state.lock().page_count
    }

    /// Number of live (non-deleted) pages.
    pub fn allocated_page_count(&self) -> u32 {
        let state = self.inner.state.lock();
        state.page_count - state.freed.len() as u32
    }

    fn check_allocated(&self, state: &FileState, page_no: PageNo) -> Result<()> {
        if page_no.is_valid() && page_no.0 < state.page_count && !state.freed.contains(&page_no.0) {
            Ok(())
        } else {
            Err(Error::PageNotFound {
                file: self.filename(),
                page_no,
            })
        }
    }
}

impl PartialEq for DbFile {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for DbFile {}
