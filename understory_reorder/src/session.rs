// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The begin / update / end protocol for one drag.
//!
//! ## Usage
//!
//! 1) [`DragSession::begin`] when the pointer picks up a row. The node is collapsed for the
//!    duration so its descendants travel with it.
//! 2) [`DragSession::update`] on every pointer sample with the row index under the pointer and
//!    the pointer's x. It returns the depth to preview and never fails.
//! 3) [`DragSession::end`] on drop (`commit = true`) or cancel. The collapse state from before
//!    the drag is restored either way.
//!
//! Updates only read the tree. Depth bands are laid out again when the destination row or the
//! solved range changes; plain sideways movement just picks a band.

use kurbo::Rect;
use tracing::{debug, trace, warn};
use understory_outline::{NodeFlags, NodeId, Snapshot, Tree, TreeShape};

use crate::bands::DepthBands;
use crate::commit::{Invalidation, commit_move};
use crate::config::ReorderConfig;
use crate::error::ReorderError;
use crate::solver::{DepthRange, solve};

/// State of one drag in progress.
#[derive(Clone, Debug)]
pub struct DragSession {
    node: NodeId,
    was_collapsed: bool,
    container: Rect,
    config: ReorderConfig,
    destination: Option<usize>,
    range: Option<DepthRange>,
    bands: DepthBands,
    depth: usize,
}

impl DragSession {
    /// Pick up `node`.
    ///
    /// `container` is the bounds of the list in pointer coordinates; its horizontal edges bound
    /// the shallowest and deepest bands.
    pub fn begin(
        tree: &mut Tree,
        node: NodeId,
        container: Rect,
        config: ReorderConfig,
    ) -> Result<Self, ReorderError> {
        config.validate()?;
        let flags = tree.flags(node).ok_or(ReorderError::UnknownNode(node))?;
        if flags.contains(NodeFlags::DISABLED) {
            return Err(ReorderError::NotDraggable(node));
        }
        let was_collapsed = tree.set_collapsed(node, true)?;
        let depth = tree.depth(node);
        debug!(?node, depth, was_collapsed, "drag began");
        Ok(Self {
            node,
            was_collapsed,
            container,
            config,
            destination: None,
            range: None,
            bands: DepthBands::default(),
            depth,
        })
    }

    /// The node being dragged.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The configuration this drag runs with.
    pub fn config(&self) -> &ReorderConfig {
        &self.config
    }

    /// Destination row of the last update.
    pub fn destination(&self) -> Option<usize> {
        self.destination
    }

    /// Depth range at the current destination.
    pub fn range(&self) -> Option<DepthRange> {
        self.range
    }

    /// Depth bands at the current destination.
    pub fn bands(&self) -> &DepthBands {
        &self.bands
    }

    /// Depth currently proposed for the drop.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Feed a pointer sample and get the depth to preview.
    ///
    /// `destination` is the row the dragged row would occupy in the list with the dragged row
    /// removed and reinserted. A pointer outside every band keeps the previous depth at the same
    /// destination and the default depth at a new one. If the position cannot be solved (for
    /// example, the node was removed mid-drag), the previous depth is kept.
    pub fn update(&mut self, tree: &Tree, destination: usize, pointer_x: f64) -> usize {
        let Some(range) = Snapshot::capture(tree)
            .relocated(self.node, destination)
            .and_then(|order| solve(&order, tree, self.node))
        else {
            warn!(
                node = ?self.node,
                destination,
                "dragged node is not in the outline; holding depth"
            );
            return self.depth;
        };

        if self.destination != Some(destination) || self.range != Some(range) {
            // The whole dragged subtree has to fit under the nesting limit.
            let deepest = self
                .config
                .max_depth
                .saturating_sub(tree.subtree_height(self.node));
            self.bands = DepthBands::new(
                range,
                pointer_x,
                self.config.band_width,
                self.container,
                deepest,
            );
            self.destination = Some(destination);
            self.range = Some(range);
            self.depth = range.default_depth;
            trace!(
                destination,
                ?range,
                deepest,
                bands = self.bands.len(),
                "laid out depth bands"
            );
        }

        if let Some(depth) = self.bands.resolve(pointer_x) {
            self.depth = depth;
        }
        self.depth = range.clamp(self.depth);
        self.depth
    }

    /// Finish the drag, applying the move if `commit` is set.
    ///
    /// Returns `Ok(None)` on cancel or when no update was ever made. A rejected drop returns the
    /// error and leaves the tree as it was, apart from the collapse state being restored.
    pub fn end(
        self,
        tree: &mut Tree,
        commit: bool,
    ) -> Result<Option<Invalidation>, ReorderError> {
        let target = self.destination.filter(|_| commit);
        // Capture while the node is still collapsed, so its descendants are not in the order.
        let order = target
            .map(|destination| Snapshot::capture(tree).relocated(self.node, destination));
        self.restore(tree);

        let Some(order) = order else {
            debug!(node = ?self.node, "drag cancelled");
            return Ok(None);
        };
        let order = order.ok_or(ReorderError::UnknownNode(self.node))?;
        match commit_move(tree, &order, self.node, self.depth, &self.config) {
            Ok(invalidation) => {
                debug!(node = ?self.node, depth = self.depth, "drag committed");
                Ok(Some(invalidation))
            }
            Err(err) => {
                warn!(node = ?self.node, %err, "drop rejected");
                Err(err)
            }
        }
    }

    fn restore(&self, tree: &mut Tree) {
        if let Err(err) = tree.set_collapsed(self.node, self.was_collapsed) {
            warn!(node = ?self.node, %err, "could not restore collapse state");
        }
    }
}
