// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal pointer bands, one per reachable depth.
//!
//! When a drag arrives at a new position the current pointer x becomes the anchor: the band
//! around it maps to the default depth, bands further left map to shallower depths, and (when
//! allowed) everything right of the anchor band maps to one level deeper.
//!
//! ```text
//!  container.x0                anchor                     container.x1
//!  |  depth 0  | depth 1 | depth 2 |  depth 3 (deeper)            |
//!              <-- w --> <-- w -->
//! ```

use alloc::vec::Vec;

use kurbo::Rect;

use crate::solver::DepthRange;

/// A closed horizontal interval mapped to one depth.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Band {
    /// Left edge.
    pub x0: f64,
    /// Right edge.
    pub x1: f64,
    /// Depth chosen while the pointer is inside.
    pub depth: usize,
}

impl Band {
    /// Returns true if `x` lies within the band, edges included.
    pub fn contains(&self, x: f64) -> bool {
        self.x0 <= x && x <= self.x1
    }
}

/// Ordered set of [`Band`]s, left to right, for one drop position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DepthBands {
    bands: Vec<Band>,
}

impl DepthBands {
    /// Lay out the bands for `range` around `anchor_x`.
    ///
    /// `deepest` caps the optional deeper band; the default band is always present. Shallower
    /// bands are `band_width` wide and the depth-0 band runs to `container.x0`. When they would
    /// not fit between the container's left edge and the anchor band they are narrowed to share
    /// that space evenly. If the anchor band already reaches the left edge they keep their full
    /// width outside the container.
    pub fn new(
        range: DepthRange,
        anchor_x: f64,
        band_width: f64,
        container: Rect,
        deepest: usize,
    ) -> Self {
        let half = band_width / 2.0;
        let (start, end) = (anchor_x - half, anchor_x + half);
        let mut bands = Vec::new();

        let shallower = range.default_depth.saturating_sub(range.min_depth) as f64;
        let room = start - container.x0;
        let step = if room > 0.0 && shallower * band_width > room {
            room / shallower
        } else {
            band_width
        };

        let mut right = start;
        for depth in (range.min_depth..range.default_depth).rev() {
            let mut left = right - step;
            if depth == 0 {
                // Shallowest band runs to the container edge.
                left = left.min(container.x0);
            }
            bands.push(Band {
                x0: left,
                x1: right,
                depth,
            });
            right = left;
        }
        bands.reverse();

        bands.push(Band {
            x0: start,
            x1: end,
            depth: range.default_depth,
        });

        let deeper = range.default_depth + 1;
        if range.allows_deeper && deeper <= deepest && container.x1 > end {
            bands.push(Band {
                x0: end,
                x1: container.x1,
                depth: deeper,
            });
        }
        Self { bands }
    }

    /// All bands, left to right.
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Number of bands.
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// Returns true if no bands were laid out.
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Depth for pointer position `x`.
    ///
    /// On a shared edge the shallower band wins. `None` when `x` is outside every band; callers
    /// keep the depth they had.
    pub fn resolve(&self, x: f64) -> Option<usize> {
        self.bands.iter().find(|b| b.contains(x)).map(|b| b.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: Rect = Rect::new(0.0, 0.0, 300.0, 600.0);

    fn range(min_depth: usize, default_depth: usize, allows_deeper: bool) -> DepthRange {
        DepthRange {
            min_depth,
            default_depth,
            allows_deeper,
        }
    }

    #[test]
    fn layout_left_to_right() {
        let bands = DepthBands::new(range(0, 2, true), 100.0, 10.0, CONTAINER, 16);
        let got: Vec<_> = bands.bands().iter().map(|b| (b.x0, b.x1, b.depth)).collect();
        assert_eq!(
            got,
            [
                (0.0, 85.0, 0),
                (85.0, 95.0, 1),
                (95.0, 105.0, 2),
                (105.0, 300.0, 3),
            ]
        );
    }

    #[test]
    fn resolve_maps_pointer_to_depth() {
        let bands = DepthBands::new(range(0, 2, true), 100.0, 10.0, CONTAINER, 16);
        assert_eq!(bands.resolve(100.0), Some(2), "anchor is the default depth");
        assert_eq!(bands.resolve(3.0), Some(0));
        assert_eq!(bands.resolve(90.0), Some(1));
        assert_eq!(bands.resolve(250.0), Some(3));
        assert_eq!(bands.resolve(95.0), Some(1), "shared edge goes to the shallower band");
        assert_eq!(bands.resolve(-5.0), None);
        assert_eq!(bands.resolve(301.0), None);
    }

    #[test]
    fn min_depth_limits_left_bands() {
        let bands = DepthBands::new(range(2, 3, false), 100.0, 10.0, CONTAINER, 16);
        assert_eq!(bands.len(), 2);
        assert_eq!(bands.resolve(0.0), None, "no band reaches the edge above depth 0");
        assert_eq!(bands.resolve(86.0), Some(2));
        assert_eq!(bands.resolve(200.0), None, "no deeper band");
    }

    #[test]
    fn deeper_band_respects_limit_and_container() {
        let capped = DepthBands::new(range(1, 2, true), 100.0, 10.0, CONTAINER, 2);
        assert_eq!(capped.resolve(200.0), None);

        let at_edge = DepthBands::new(range(1, 2, true), 296.0, 10.0, CONTAINER, 16);
        assert!(at_edge.bands().iter().all(|b| b.depth <= 2));
    }

    #[test]
    fn crowded_left_bands_share_the_room() {
        // Three shallower bands, only 7 units between the edge and the anchor band.
        let bands = DepthBands::new(range(0, 3, false), 12.0, 10.0, CONTAINER, 16);
        assert_eq!(bands.len(), 4);
        for band in bands.bands() {
            assert!(band.x0 >= CONTAINER.x0 - 1e-9, "{band:?}");
            assert!(band.x1 > band.x0, "{band:?}");
        }
        assert_eq!(bands.resolve(0.0), Some(0));
        assert_eq!(bands.resolve(3.5), Some(1));
        assert_eq!(bands.resolve(6.0), Some(2));
        assert_eq!(bands.resolve(12.0), Some(3));
    }

    #[test]
    fn anchor_band_at_left_edge_keeps_shallower_bands_outside() {
        let bands = DepthBands::new(range(0, 1, false), 2.0, 10.0, CONTAINER, 16);
        let got: Vec<_> = bands.bands().iter().map(|b| (b.x0, b.x1, b.depth)).collect();
        assert_eq!(got, [(-13.0, -3.0, 0), (-3.0, 7.0, 1)]);
        assert_eq!(bands.resolve(-8.0), Some(0));
    }

    #[test]
    fn anchor_near_left_edge_stays_ordered() {
        let bands = DepthBands::new(range(0, 3, false), 12.0, 10.0, CONTAINER, 16);
        for pair in bands.bands().windows(2) {
            assert!(pair[0].x1 <= pair[1].x0 + f64::EPSILON, "{pair:?}");
            assert!(pair[0].depth < pair[1].depth, "{pair:?}");
        }
        assert!(bands.bands().iter().all(|b| b.x0 <= b.x1));
    }
}
