//! Clock (second-chance) replacement policy.

use crate::buffer::descriptor::FrameDesc;
use crate::common::{Error, FrameId, Result};

/// Outcome of a clock scan.
#[derive(Debug)]
pub(crate) enum Victim {
    /// The selected frame holds nothing and can be used as-is.
    Fresh(FrameId),
    /// The selected frame holds a page that must be unmapped, and written
    /// back first if dirty, before reuse.
    Evict(FrameId),
}

/// The clock hand plus the scan that advances it.
///
/// The policy only picks frames; write-back and index maintenance stay
/// with the buffer manager. Hand state persists across calls, so
/// successive selections continue around the ring instead of restarting,
/// which is what approximates LRU.
#[derive(Debug)]
pub(crate) struct ClockReplacer {
    hand: usize,
    num_frames: usize,
}

impl ClockReplacer {
    /// Create a replacer over a pool of `num_frames` frames.
    ///
    /// The hand rests just before frame 0, so the first advance inspects
    /// frame 0.
    pub fn new(num_frames: usize) -> Self {
        Self {
            hand: num_frames - 1,
            num_frames,
        }
    }

    fn advance(&mut self) {
        self.hand = (self.hand + 1) % self.num_frames;
    }

    /// Select a frame for reuse, granting second chances along the way.
    ///
    /// The hand advances before inspecting anything, so it never re-picks
    /// its resting frame first. Each inspection is one of:
    /// - invalid frame: selected immediately
    /// - referenced frame: reference bit cleared, hand moves on
    /// - pinned frame: counted; once every frame has been observed pinned
    ///   in this scan, the pool cannot make progress
    /// - valid, unreferenced, unpinned frame: the victim
    ///
    /// # Errors
    /// `Error::BufferExceeded` when pinned observations reach the pool
    /// size.
    pub fn select(&mut self, descs: &mut [FrameDesc]) -> Result<Victim> {
        let mut pinned = 0;
        self.advance();

        loop {
            let desc = &mut descs[self.hand];

            if !desc.valid {
                return Ok(Victim::Fresh(FrameId::new(self.hand)));
            }

            if desc.referenced {
                // Second chance: spare the frame once, remember nothing.
                desc.referenced = false;
                self.advance();
                continue;
            }

            if desc.pin_count > 0 {
                pinned += 1;
                if pinned == self.num_frames {
                    return Err(Error::BufferExceeded(self.num_frames));
                }
                self.advance();
                continue;
            }

            return Ok(Victim::Evict(FrameId::new(self.hand)));
        }
    }

    #[cfg(test)]
    pub fn hand(&self) -> usize {
        self.hand
    }
}
