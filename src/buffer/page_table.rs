//! Page table - the residency index mapping (file, page) to a frame.

use std::collections::HashMap;

use crate::common::{FrameId, PageNo};
use crate::storage::FileId;

/// Maps `(FileId, PageNo)` to the frame currently holding that page.
///
/// At most one entry exists per key, and an entry exists exactly when the
/// corresponding frame is valid and holds that page. Lookup misses are the
/// normal cold-fetch branch, not a fault.
#[derive(Debug)]
pub(crate) struct PageTable {
    map: HashMap<(FileId, PageNo), FrameId>,
}

impl PageTable {
    /// Create a table sized for a pool of `num_frames` frames.
    pub fn with_capacity(num_frames: usize) -> Self {
        Self {
            map: HashMap::with_capacity(num_frames),
        }
    }

    /// The frame holding the page, if resident.
    pub fn lookup(&self, file: FileId, page_no: PageNo) -> Option<FrameId> {
        self.map.get(&(file, page_no)).copied()
    }

    /// Record residency of a page.
    ///
    /// # Panics
    /// Panics if the key is already mapped: two frames claiming one page
    /// means descriptor bookkeeping is corrupted upstream.
    pub fn insert(&mut self, file: FileId, page_no: PageNo, frame_id: FrameId) {
        let prev = self.map.insert((file, page_no), frame_id);
        assert!(prev.is_none(), "page already resident in another frame");
    }

    /// Drop the entry for a page, returning the frame it occupied.
    ///
    /// Removing an absent key is fine; callers that require presence look
    /// up first.
    pub fn remove(&mut self, file: FileId, page_no: PageNo) -> Option<FrameId> {
        self.map.remove(&(file, page_no))
    }

    /// Number of resident pages.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether no pages are resident.
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
