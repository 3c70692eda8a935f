//! Page - the fundamental 4KB unit of storage.
//!
//! A [`Page`] is a raw 4KB byte buffer, the unit of I/O between disk and
//! memory. The first [`PageHeader::SIZE`] bytes hold the page's own number
//! and checksum; the rest is the caller-usable payload.

use crate::common::config::PAGE_SIZE;
use crate::common::PageNo;

use super::page_header::PageHeader;

/// A page of data (4KB, 4KB-aligned).
///
/// Pages are held in the buffer pool's frames and written to disk whole.
/// The alignment keeps the pool compatible with Direct I/O.
///
/// `Page` does NOT implement `Clone` outside of tests: copying 4KB should
/// be explicit (the buffer manager copies via slices when loading a frame).
#[repr(align(4096))]
#[derive(Debug)]
pub struct Page {
    data: [u8; PAGE_SIZE],
}

impl Page {
    /// Create a zeroed page with no assigned number.
    #[inline]
    pub fn new() -> Self {
        let mut page = Self {
            data: [0u8; PAGE_SIZE],
        };
        PageHeader::default().write_to(&mut page.data);
        page
    }

    /// Get immutable slice of the full page, header included.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Get mutable slice of the full page, header included.
    ///
    /// Intended for whole-page I/O; callers storing data should go through
    /// [`Page::payload_mut`] so the header stays intact.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// The caller-usable region after the header.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.data[PageHeader::SIZE..]
    }

    /// Mutable access to the caller-usable region.
    #[inline]
    pub fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.data[PageHeader::SIZE..]
    }

    /// Zero the page and drop its assigned number.
    pub fn reset(&mut self) {
        self.data.fill(0);
        PageHeader::default().write_to(&mut self.data);
    }

    /// Total size of a page.
    #[inline]
    pub const fn size() -> usize {
        PAGE_SIZE
    }

    /// Bytes available to callers after the header.
    #[inline]
    pub const fn payload_size() -> usize {
        PAGE_SIZE - PageHeader::SIZE
    }

    /// Read the page header.
    pub fn header(&self) -> PageHeader {
        PageHeader::from_bytes(&self.data)
    }

    /// The page number assigned by this page's file.
    #[inline]
    pub fn page_no(&self) -> PageNo {
        self.header().page_no
    }

    /// Stamp the page number. Only the file layer assigns numbers.
    pub(crate) fn set_page_no(&mut self, page_no: PageNo) {
        self.data[PageHeader::OFFSET_PAGE_NO..PageHeader::OFFSET_PAGE_NO + 4]
            .copy_from_slice(&page_no.0.to_le_bytes());
    }

    /// Compute and store the checksum in the header.
    ///
    /// Call after all modifications to the page are complete.
    pub fn update_checksum(&mut self) {
        let checksum = PageHeader::compute_checksum(&self.data);
        self.data[PageHeader::OFFSET_CHECKSUM..PageHeader::OFFSET_CHECKSUM + 4]
            .copy_from_slice(&checksum.to_le_bytes());
    }

    /// Verify the stored checksum against the page contents.
    pub fn verify_checksum(&self) -> bool {
        self.header().verify_checksum(&self.data)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

// Clone only available in tests - forces explicit copying in production
#[cfg(test)]
impl Clone for Page {
    fn clone(&self) -> Self {
        let mut new_page = Page::new();
        new_page.data.copy_from_slice(&self.data);
        new_page
    }
}
