//! Construction options for the backing store.

use crate::error::CompactError;

/// Initial capacity and placement policy of a collection's backing store.
///
/// `alignment` picks where the used region is re-seated whenever the store
/// reallocates or runs out of margin on one side: `0.0` packs elements at the
/// front (cheap appends), `1.0` at the back (cheap prepends), `0.5` centres
/// them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub capacity: usize,
    pub alignment: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 0,
            alignment: 0.5,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn alignment(mut self, alignment: f32) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn validate(&self) -> Result<(), CompactError> {
        check_alignment(self.alignment)
    }
}

pub(crate) fn check_alignment(alignment: f32) -> Result<(), CompactError> {
    // NaN fails both comparisons
    if (0.0..=1.0).contains(&alignment) {
        Ok(())
    } else {
        Err(CompactError::InvalidAlignment(alignment))
    }
}
