//! Frame descriptors - per-frame bookkeeping for the buffer pool.

use std::fmt;

use crate::common::{FrameId, PageNo};
use crate::storage::{DbFile, FileId};

/// Bookkeeping record for one frame of the pool.
///
/// Descriptors are owned by the buffer manager and only touched under its
/// latch. [`FrameDesc::set`] and [`FrameDesc::clear`] are the lifecycle
/// transitions; the manager updates individual fields in between.
///
/// A frame is eligible for eviction iff it is valid, unreferenced and
/// unpinned.
#[derive(Debug)]
pub(crate) struct FrameDesc {
    /// Position of this frame in the pool. Immutable.
    pub frame_id: FrameId,
    /// Handle to the owning file while the frame is valid.
    pub file: Option<DbFile>,
    /// Page number within the owning file. Meaningful only while valid.
    pub page_no: PageNo,
    /// Number of outstanding claims on the page.
    pub pin_count: u32,
    /// Page bytes were modified and not yet written back.
    pub dirty: bool,
    /// Recently-used hint; set on access, cleared by the eviction scan.
    pub referenced: bool,
    /// Whether the frame currently holds a real page.
    pub valid: bool,
}

impl FrameDesc {
    /// A fresh, unbound descriptor.
    pub fn new(frame_id: FrameId) -> Self {
        Self {
            frame_id,
            file: None,
            page_no: PageNo::INVALID,
            pin_count: 0,
            dirty: false,
            referenced: false,
            valid: false,
        }
    }

    /// Bind the frame to a freshly loaded page.
    ///
    /// The loading caller holds the first pin.
    pub fn set(&mut self, file: DbFile, page_no: PageNo) {
        self.file = Some(file);
        self.page_no = page_no;
        self.pin_count = 1;
        self.dirty = false;
        self.referenced = true;
        self.valid = true;
    }

    /// Return the frame to the unbound state, detaching its file.
    pub fn clear(&mut self) {
        self.file = None;
        self.page_no = PageNo::INVALID;
        self.pin_count = 0;
        self.dirty = false;
        self.referenced = false;
        self.valid = false;
    }

    /// Whether this frame carries a binding to the given file.
    pub fn is_bound_to(&self, file_id: FileId) -> bool {
        self.file.as_ref().map(DbFile::id) == Some(file_id)
    }

    /// The owning file and page number, while bound.
    pub fn binding(&self) -> Option<(DbFile, PageNo)> {
        self.file.clone().map(|file| (file, self.page_no))
    }
}

impl fmt::Display for FrameDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(
                f,
                "frame {}: file={} page={} pin={} dirty={} ref={} valid={}",
                self.frame_id,
                file.filename(),
                self.page_no,
                self.pin_count,
                self.dirty,
                self.referenced,
                self.valid
            ),
            None => write!(f, "frame {}: empty", self.frame_id),
        }
    }
}
