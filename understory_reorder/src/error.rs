// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised when starting or dropping a drag.

use thiserror::Error;
use understory_outline::{NodeId, TreeError};

/// Errors from drag sessions and move commits.
///
/// Every rejection leaves the tree unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReorderError {
    /// The node is not in the outline or the supplied order.
    #[error("unknown node: {0:?}")]
    UnknownNode(NodeId),

    /// The drop would put `node` beneath itself.
    #[error("cannot drop {node:?} beneath its own descendant {parent:?}")]
    DegenerateDrag {
        /// The dragged node.
        node: NodeId,
        /// The parent the drop resolved to.
        parent: NodeId,
    },

    /// No parent at the drop position can hold a child at `depth`.
    #[error("depth {depth} is not reachable here (deepest is {max})")]
    DepthOutOfRange {
        /// The requested depth.
        depth: usize,
        /// Deepest depth reachable at the drop position.
        max: usize,
    },

    /// The dragged subtree would end up deeper than the configured limit.
    #[error("nesting depth {depth} exceeds the limit of {max}")]
    NestingTooDeep {
        /// Depth of the deepest node of the dragged subtree after the drop.
        depth: usize,
        /// The configured limit.
        max: usize,
    },

    /// The node is disabled and cannot be picked up.
    #[error("node {0:?} cannot be dragged")]
    NotDraggable(NodeId),

    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// A structural operation on the tree failed.
    #[error(transparent)]
    Tree(#[from] TreeError),
}
