//! # Seek Boundaries
//!
//! Maps the local ledger height to the seek request body.

use crate::domain::{SeekBehavior, SeekContentType, SeekInfo, SeekPosition, MAX_SEEK_NUMBER};

/// Decide where delivery resumes.
///
/// An empty ledger starts from the oldest block. Otherwise the height is the
/// number of committed blocks, which is also the index of the next one.
pub fn decide_start(height: u64) -> SeekPosition {
    if height == 0 {
        SeekPosition::Oldest
    } else {
        SeekPosition::Specified(height)
    }
}

/// Build an open-ended, blocking seek starting at `start`.
pub fn build_seek_info(start: SeekPosition, content_type: SeekContentType) -> SeekInfo {
    SeekInfo {
        start,
        stop: SeekPosition::Specified(MAX_SEEK_NUMBER),
        behavior: SeekBehavior::BlockUntilReady,
        content_type,
    }
}
