// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning knobs for a drag.

use crate::error::ReorderError;

/// Configuration shared by the pointer bands, the committer, and [`DragSession`](crate::DragSession).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReorderConfig {
    /// Horizontal distance, in container units, between two adjacent depth bands.
    pub band_width: f64,
    /// Deepest depth any node may reach after a drop, counting the dragged subtree.
    pub max_depth: usize,
}

impl ReorderConfig {
    /// Default band width.
    pub const DEFAULT_BAND_WIDTH: f64 = 15.0;
    /// Default nesting limit.
    pub const DEFAULT_MAX_DEPTH: usize = 16;

    /// Set [`band_width`](Self::band_width).
    #[must_use]
    pub fn with_band_width(mut self, band_width: f64) -> Self {
        self.band_width = band_width;
        self
    }

    /// Set [`max_depth`](Self::max_depth).
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Check that the values are usable.
    pub fn validate(&self) -> Result<(), ReorderError> {
        if !(self.band_width.is_finite() && self.band_width > 0.0) {
            return Err(ReorderError::InvalidConfig(
                "band width must be finite and positive",
            ));
        }
        if self.max_depth == 0 {
            return Err(ReorderError::InvalidConfig("max depth must be at least 1"));
        }
        Ok(())
    }
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            band_width: Self::DEFAULT_BAND_WIDTH,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
