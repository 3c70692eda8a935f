//! RAII guards for page access.
//!
//! - [`PageReadGuard`] - shared access, several may coexist per page
//! - [`PageWriteGuard`] - exclusive access, marks the page dirty
//!
//! Both release one pin when dropped, by calling the manager's
//! `unpin_page`. A caller who also unpins manually would double-release;
//! pins owned by a live guard belong to the guard.
//!
//! Lock ordering: the manager acquires page latches while holding its
//! bookkeeping latch, so a guard must do the reverse teardown - release
//! the page latch first, then unpin.

use std::ops::{Deref, DerefMut};

use parking_lot::{RwLockReadGuard, RwLockWriteGuard};

use crate::common::{FrameId, PageNo};
use crate::storage::page::Page;
use crate::storage::DbFile;

use super::manager::BufferManager;

/// Guard for read-only page access.
///
/// # Example
/// ```ignore
/// let guard = mgr.fetch_page_read(&file, page_no)?;
/// let data = guard.payload();
/// // guard drops here, pin released
/// ```
#[derive(Debug)]
pub struct PageReadGuard<'a> {
    mgr: &'a BufferManager,
    file: DbFile,
    page_no: PageNo,
    frame_id: FrameId,
    /// `None` only during drop, after the latch has been released.
    lock: Option<RwLockReadGuard<'a, Page>>,
}

impl<'a> PageReadGuard<'a> {
    pub(crate) fn new(
        mgr: &'a BufferManager,
        file: DbFile,
        page_no: PageNo,
        frame_id: FrameId,
        lock: RwLockReadGuard<'a, Page>,
    ) -> Self {
        Self {
            mgr,
            file,
            page_no,
            frame_id,
            lock: Some(lock),
        }
    }

    /// The page number this guard refers to.
    #[inline]
    pub fn page_no(&self) -> PageNo {
        self.page_no
    }

    /// The frame the page currently occupies.
    #[inline]
    pub fn frame_id(&self) -> FrameId {
        self.frame_id
    }
}

impl Deref for PageReadGuard<'_> {
    type Target = Page;

    #[inline]
    fn deref(&self) -> &Page {
        self.lock.as_ref().expect("page latch already released")
    }
}

impl Drop for PageReadGuard<'_> {
    fn drop(&mut self) {
        // Page latch first, then the pin; see module docs.
        self.lock.take();
        // Read access leaves the page clean.
        if let Err(e) = self.mgr.unpin_page(&self.file, self.page_no, false) {
            log::error!(
                "unpin of page {} in file '{}' failed on guard drop: {}",
                self.page_no,
                self.file.filename(),
                e
            );
        }
    }
}

/// Guard for exclusive write access to a page.
///
/// The page is marked dirty when the guard drops, so its bytes reach disk
/// on the next write-back.
pub struct PageWriteGuard<'a> {
    mgr: &'a BufferManager,
    file: DbFile,
    page_no: PageNo,
    frame_id: FrameId,
    /// `None` only during drop, after the latch has been released.
    lock: Option<RwLockWriteGuard<'a, Page>>,
}

impl<'a> PageWriteGuard<'a> {
    pub(crate) fn new(
        mgr: &'a BufferManager,
        file: DbFile,
        page_no: PageNo,
        frame_id: FrameId,
        lock: RwLockWriteGuard<'a, Page>,
    ) -> Self {
        Self {
            mgr,
            file,
            page_no,
            frame_id,
            lock: Some(lock),
        }
    }

    /// The page number this guard refers to.
    #[inline]
    pub fn page_no(&self) -> PageNo {
        self.page_no
    }

    /// The frame the page currently occupies.
    #[inline]
    pub fn frame_id(&self) -> FrameId {
        self.frame_id
    }
}

impl Deref for PageWriteGuard<'_> {
    type Target = Page;

    #[inline]
    fn deref(&self) -> &Page {
        self.lock.as_ref().expect("page latch already released")
    }
}

impl DerefMut for PageWriteGuard<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Page {
        self.lock.as_mut().expect("page latch already released")
    }
}

impl Drop for PageWriteGuard<'_> {
    fn drop(&mut self) {
        // Page latch first, then the pin; see module docs.
        self.lock.take();
        // Write access always dirties the page.
        if let Err(e) = self.mgr.unpin_page(&self.file, self.page_no, true) {
            log::error!(
                "unpin of page {} in file '{}' failed on guard drop: {}",
                self.page_no,
                self.file.filename(),
                e
            );
        }
    }
}
