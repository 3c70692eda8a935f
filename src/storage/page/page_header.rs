//! On-page header: the page's own number plus an integrity checksum.

use crate::common::PageNo;

/// Metadata stored at the beginning of every page.
///
/// # Layout (8 bytes)
/// ```text
/// Offset  Size  Field
/// ------  ----  -----
/// 0       4     page_no (u32, little-endian)
/// 4       4     checksum (CRC32, little-endian)
/// ```
///
/// The page carries its own number so a write-back needs nothing but the
/// page itself. The checksum is computed over the entire page with the
/// checksum field zeroed, so it can be verified without special handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageHeader {
    /// Number of this page within its file.
    pub page_no: PageNo,
    /// CRC32 checksum of the page contents.
    pub checksum: u32,
}

impl PageHeader {
    /// Size of the header in bytes.
    pub const SIZE: usize = 8;

    pub const OFFSET_PAGE_NO: usize = 0;
    pub const OFFSET_CHECKSUM: usize = 4;

    /// Create a header for the given page number, checksum zeroed.
    pub fn new(page_no: PageNo) -> Self {
        Self {
            page_no,
            checksum: 0,
        }
    }

    /// Read a header from the beginning of a byte slice.
    ///
    /// # Panics
    /// Panics if `data.len() < PageHeader::SIZE`.
    pub fn from_bytes(data: &[u8]) -> Self {
        assert!(data.len() >= Self::SIZE, "buffer too small for PageHeader");

        let page_no = u32::from_le_bytes([
            data[Self::OFFSET_PAGE_NO],
            data[Self::OFFSET_PAGE_NO + 1],
            data[Self::OFFSET_PAGE_NO + 2],
            data[Self::OFFSET_PAGE_NO + 3],
        ]);

        let checksum = u32::from_le_bytes([
            data[Self::OFFSET_CHECKSUM],
            data[Self::OFFSET_CHECKSUM + 1],
            data[Self::OFFSET_CHECKSUM + 2],
            data[Self::OFFSET_CHECKSUM + 3],
        ]);

        Self {
            page_no: PageNo::new(page_no),
            checksum,
        }
    }

    /// Write this header to the beginning of a byte slice.
    ///
    /// # Panics
    /// Panics if `data.len() < PageHeader::SIZE`.
    pub fn write_to(&self, data: &mut [u8]) {
        assert!(data.len() >= Self::SIZE, "buffer too small for PageHeader");

        data[Self::OFFSET_PAGE_NO..Self::OFFSET_PAGE_NO + 4]
            .copy_from_slice(&self.page_no.0.to_le_bytes());
        data[Self::OFFSET_CHECKSUM..Self::OFFSET_CHECKSUM + 4]
            .copy_from_slice(&self.checksum.to_le_bytes());
    }

    /// Compute the CRC32 checksum of a page.
    ///
    /// The checksum field itself (bytes 4..8) is fed as zeros, so the
    /// checksum does not include itself.
    pub fn compute_checksum(page_data: &[u8]) -> u32 {
        let mut hasher = crc32fast::Hasher::new();

        hasher.update(&page_data[..Self::OFFSET_CHECKSUM]);
        hasher.update(&[0u8; 4]);
        hasher.update(&page_data[Self::OFFSET_CHECKSUM + 4..]);

        hasher.finalize()
    }

    /// Verify that the stored checksum matches the computed checksum.
    pub fn verify_checksum(&self, page_data: &[u8]) -> bool {
        self.checksum == Self::compute_checksum(page_data)
    }
}

impl Default for PageHeader {
    fn default() -> Self {
        Self::new(PageNo::INVALID)
    }
}
