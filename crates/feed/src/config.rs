// ABOUTME: Immutable size limits applied by the extractor and the record normalizer.
// ABOUTME: A zero value means the corresponding limit is disabled.

use serde::{Deserialize, Serialize};

/// Text-length and item-count limits, set once at startup and passed explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum number of characters kept from a title or description (0 = unlimited).
    pub max_text_length: usize,
    /// Maximum number of items kept from a listing page (0 = unlimited).
    pub max_item_count: usize,
}

impl Limits {
    pub fn new(max_text_length: usize, max_item_count: usize) -> Self {
        Self {
            max_text_length,
            max_item_count,
        }
    }

    /// Limits that never truncate anything.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// The item cap, if one is configured.
    pub fn item_cap(&self) -> Option<usize> {
        (self.max_item_count > 0).then_some(self.max_item_count)
    }

    /// The text cap, if one is configured.
    pub fn text_cap(&self) -> Option<usize> {
        (self.max_text_length > 0).then_some(self.max_text_length)
    }
}
