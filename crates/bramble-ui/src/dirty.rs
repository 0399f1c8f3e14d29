//! Per-control invalidation flags.

use bitflags::bitflags;

bitflags! {
    /// What a control needs before its next frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DirtyFlags: u8 {
        const NONE = 0;

        /// The control's own layout hook must run again.
        const LAYOUT = 1 << 0;

        /// Anything previously rendered for this control is stale.
        const CACHE = 1 << 1;
    }
}

impl DirtyFlags {
    /// Everything a structural change invalidates.
    pub const ALL: Self = Self::LAYOUT.union(Self::CACHE);

    pub fn needs_layout(self) -> bool {
        self.contains(Self::LAYOUT)
    }

    pub fn cache_dirty(self) -> bool {
        self.contains(Self::CACHE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_covers_both() {
        assert!(DirtyFlags::ALL.needs_layout());
        assert!(DirtyFlags::ALL.cache_dirty());
        assert!(!DirtyFlags::CACHE.needs_layout());
    }
}
