//! # Domain Invariants
//!
//! Rules every seek request leaving this subsystem must satisfy.

use super::value_objects::{SeekBehavior, SeekInfo, SeekPosition};

/// Block number used as the stop position: the seek never ends.
pub const MAX_SEEK_NUMBER: u64 = u64::MAX;

/// Default message format version.
pub const DEFAULT_MSG_VERSION: i32 = 0;

/// Default epoch.
pub const DEFAULT_EPOCH: u64 = 0;

/// Invariant: the seek is open-ended, so catch-up turns into live tailing.
pub fn invariant_open_ended(seek_info: &SeekInfo) -> bool {
    seek_info.stop == SeekPosition::Specified(MAX_SEEK_NUMBER)
}

/// Invariant: the source holds requests for future blocks open.
pub fn invariant_block_until_ready(seek_info: &SeekInfo) -> bool {
    seek_info.behavior == SeekBehavior::BlockUntilReady
}

/// Invariant: the start matches the local height.
///
/// Height 0 seeks from the oldest block; otherwise the height is the
/// zero-based index of the next missing block and is used as is.
pub fn invariant_start_matches_height(seek_info: &SeekInfo, height: u64) -> bool {
    match seek_info.start {
        SeekPosition::Oldest => height == 0,
        SeekPosition::Specified(n) => height > 0 && n == height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SeekContentType;

    fn seek(start: SeekPosition) -> SeekInfo {
        SeekInfo {
            start,
            stop: SeekPosition::Specified(MAX_SEEK_NUMBER),
            behavior: SeekBehavior::BlockUntilReady,
            content_type: SeekContentType::Block,
        }
    }

    #[test]
    fn test_bounded_seek_violates_open_ended() {
        let mut info = seek(SeekPosition::Oldest);
        assert!(invariant_open_ended(&info));
        info.stop = SeekPosition::Specified(100);
        assert!(!invariant_open_ended(&info));
    }

    #[test]
    fn test_fail_if_not_ready_violates_behavior() {
        let mut info = seek(SeekPosition::Oldest);
        info.behavior = SeekBehavior::FailIfNotReady;
        assert!(!invariant_block_until_ready(&info));
    }

    #[test]
    fn test_start_matches_height() {
        assert!(invariant_start_matches_height(&seek(SeekPosition::Oldest), 0));
        assert!(!invariant_start_matches_height(&seek(SeekPosition::Oldest), 3));
        assert!(invariant_start_matches_height(&seek(SeekPosition::Specified(3)), 3));
        assert!(!invariant_start_matches_height(&seek(SeekPosition::Specified(2)), 3));
        assert!(!invariant_start_matches_height(&seek(SeekPosition::Specified(0)), 0));
    }
}
