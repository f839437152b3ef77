// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural errors raised by the arena and the tree.

use thiserror::Error;

use crate::types::NodeId;

/// Why a node was refused as a top-level node during [`Tree::new`](crate::Tree::new).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConstructionFault {
    /// The id does not refer to a live node in the supplied arena.
    Stale,
    /// The node already has a parent.
    HasParent,
    /// The node appears more than once in the top-level list.
    Duplicate,
}

impl core::fmt::Display for ConstructionFault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Self::Stale => "stale id",
            Self::HasParent => "node already has a parent",
            Self::Duplicate => "node listed twice",
        };
        f.write_str(s)
    }
}

/// Errors from structural operations on an outline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A tree was built from a node that is not a genuine detached top-level node.
    /// No tree is produced.
    #[error("invalid tree construction at {node:?}: {fault}")]
    InvalidTreeConstruction {
        /// The offending node.
        node: NodeId,
        /// What was wrong with it.
        fault: ConstructionFault,
    },

    /// The id is stale or belongs to another arena.
    #[error("unknown node: {0:?}")]
    UnknownNode(NodeId),

    /// Attaching `node` under `parent` would make `node` its own ancestor.
    #[error("attaching {node:?} under {parent:?} would create a cycle")]
    WouldCycle {
        /// The node being attached.
        node: NodeId,
        /// The requested parent.
        parent: NodeId,
    },
}

/// Result alias for structural operations.
pub type TreeResult<T> = Result<T, TreeError>;
