// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node storage and the tree that owns it.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::error::{ConstructionFault, TreeError, TreeResult};
use crate::shape::{TreeShape, flatten};
use crate::types::{NodeFlags, NodeId, Owner};

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    owner: Owner,
    children: Vec<NodeId>,
    flags: NodeFlags,
}

impl Node {
    fn new(generation: u32, flags: NodeFlags) -> Self {
        Self {
            generation,
            owner: Owner::Detached,
            children: Vec::new(),
            flags,
        }
    }
}

/// Generational slot storage for outline nodes.
///
/// Nodes are created detached, wired together with [`NodeArena::add_child`], and then
/// handed to [`Tree::new`] together with the list of top-level nodes.
#[derive(Clone, Default)]
pub struct NodeArena {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
}

impl core::fmt::Debug for NodeArena {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeArena")
            .field("nodes_total", &self.nodes.len())
            .field("nodes_alive", &self.len())
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl NodeArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new detached node with default flags.
    pub fn insert(&mut self) -> NodeId {
        self.insert_with_flags(NodeFlags::default())
    }

    /// Insert a new detached node with the given flags.
    pub fn insert_with_flags(&mut self, flags: NodeFlags) -> NodeId {
        if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, flags));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            NodeId::new(idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, flags)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            NodeId::new((self.nodes.len() - 1) as u32, generation)
        }
    }

    /// Returns true if `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Returns true if no node is alive.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current owner of `id`, if live.
    pub fn owner(&self, id: NodeId) -> Option<Owner> {
        self.get(id).map(|n| n.owner)
    }

    /// Children of `id`; empty for unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Flags of `id`, if live.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.get(id).map(|n| n.flags)
    }

    /// Replace the flags of `id`.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) -> TreeResult<()> {
        self.get_mut(id).ok_or(TreeError::UnknownNode(id))?.flags = flags;
        Ok(())
    }

    /// Attach `child` under `parent` at `index` (appends when `None` or past the end).
    ///
    /// The child is first detached from its previous parent, if any.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: Option<usize>,
    ) -> TreeResult<()> {
        self.check_attach(parent, child)?;
        self.unlink(child);
        self.link(parent, child, index);
        Ok(())
    }

    /// Attach each of `children` under `parent`, in order.
    pub fn add_children(
        &mut self,
        parent: NodeId,
        children: impl IntoIterator<Item = NodeId>,
    ) -> TreeResult<()> {
        for child in children {
            self.add_child(parent, child, None)?;
        }
        Ok(())
    }

    fn get(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.generation()).then_some(n)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        (n.generation == id.generation()).then_some(n)
    }

    fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.owner.parent())
    }

    fn check_attach(&self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        if !self.contains(parent) {
            return Err(TreeError::UnknownNode(parent));
        }
        if !self.contains(child) {
            return Err(TreeError::UnknownNode(child));
        }
        let mut cur = Some(parent);
        while let Some(n) = cur {
            if n == child {
                return Err(TreeError::WouldCycle {
                    node: child,
                    parent,
                });
            }
            cur = self.parent_of(n);
        }
        Ok(())
    }

    /// Remove `id` from its parent's children and mark it detached.
    ///
    /// A top-level node is only marked detached; the tree owns the top-level list.
    fn unlink(&mut self, id: NodeId) -> Owner {
        let Some(node) = self.get_mut(id) else {
            return Owner::Detached;
        };
        let old = core::mem::take(&mut node.owner);
        if let Owner::Parent(p) = old
            && let Some(parent) = self.get_mut(p)
        {
            parent.children.retain(|c| *c != id);
        }
        old
    }

    fn link(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) {
        if let Some(p) = self.get_mut(parent) {
            let at = index.map_or(p.children.len(), |i| i.min(p.children.len()));
            p.children.insert(at, child);
        }
        if let Some(c) = self.get_mut(child) {
            c.owner = Owner::Parent(parent);
        }
    }

    /// Free `id` and its whole subtree. The caller has already unlinked `id`.
    fn free_subtree(&mut self, id: NodeId) {
        let mut stack = Vec::new();
        stack.push(id);
        while let Some(n) = stack.pop() {
            let Some(node) = self.get_mut(n) else {
                continue;
            };
            stack.append(&mut node.children);
            self.nodes[n.idx()] = None;
            self.free_list.push(n.idx());
        }
    }
}

/// An ordered forest of outline nodes.
///
/// The tree is the sole owner of node storage. Every reachable node is either listed
/// once in the top-level sequence or once in its parent's children, and parent links
/// are plain ids resolved through the tree.
#[derive(Clone, Default)]
pub struct Tree {
    arena: NodeArena,
    top_level: Vec<NodeId>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tree")
            .field("top_level", &self.top_level.len())
            .field("arena", &self.arena)
            .finish_non_exhaustive()
    }
}

impl Tree {
    /// Build a tree from an arena and its top-level nodes.
    ///
    /// Every listed node must be live, detached, and listed once. Otherwise this fails
    /// with [`TreeError::InvalidTreeConstruction`] and nothing is built.
    pub fn new(
        mut arena: NodeArena,
        top_level: impl IntoIterator<Item = NodeId>,
    ) -> TreeResult<Self> {
        let top_level: Vec<NodeId> = top_level.into_iter().collect();
        let mut seen = BTreeSet::new();
        for &id in &top_level {
            let fault = match arena.owner(id) {
                None => Some(ConstructionFault::Stale),
                Some(Owner::Detached) if !seen.insert(id) => Some(ConstructionFault::Duplicate),
                Some(Owner::Detached) => None,
                Some(Owner::Parent(_) | Owner::TopLevel) => Some(ConstructionFault::HasParent),
            };
            if let Some(fault) = fault {
                return Err(TreeError::InvalidTreeConstruction { node: id, fault });
            }
        }
        for &id in &top_level {
            if let Some(n) = arena.get_mut(id) {
                n.owner = Owner::TopLevel;
            }
        }
        Ok(Self { arena, top_level })
    }

    /// Create an empty tree.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a node and attach it under `parent`, or append it to the top level when `None`.
    pub fn insert(&mut self, parent: Option<NodeId>) -> TreeResult<NodeId> {
        self.insert_with_flags(parent, NodeFlags::default())
    }

    /// Like [`Tree::insert`] with explicit flags.
    pub fn insert_with_flags(
        &mut self,
        parent: Option<NodeId>,
        flags: NodeFlags,
    ) -> TreeResult<NodeId> {
        if let Some(p) = parent
            && !self.contains(p)
        {
            return Err(TreeError::UnknownNode(p));
        }
        let id = self.arena.insert_with_flags(flags);
        match parent {
            Some(p) => self.arena.link(p, id, None),
            None => self.link_top_level(id, None),
        }
        Ok(id)
    }

    /// Attach `child` under `parent` at `index` (appends when `None` or past the end).
    ///
    /// `child` may currently be detached, top-level, or under another parent; it is
    /// moved together with its subtree.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: Option<usize>,
    ) -> TreeResult<()> {
        self.arena.check_attach(parent, child)?;
        self.detach_inner(child);
        self.arena.link(parent, child, index);
        Ok(())
    }

    /// Attach each of `children` under `parent`, in order.
    pub fn add_children(
        &mut self,
        parent: NodeId,
        children: impl IntoIterator<Item = NodeId>,
    ) -> TreeResult<()> {
        for child in children {
            self.add_child(parent, child, None)?;
        }
        Ok(())
    }

    /// Place `child` in the top-level sequence at `index` (appends when `None` or past the end).
    pub fn add_top_level(&mut self, child: NodeId, index: Option<usize>) -> TreeResult<()> {
        if !self.contains(child) {
            return Err(TreeError::UnknownNode(child));
        }
        self.detach_inner(child);
        self.link_top_level(child, index);
        Ok(())
    }

    /// Move `id` under `new_parent` (or to the top level) at child position `index`.
    ///
    /// This is a single detach followed by a single attach; identity and subtree are
    /// preserved. Returns the previous parent.
    pub fn move_node(
        &mut self,
        id: NodeId,
        new_parent: Option<NodeId>,
        index: usize,
    ) -> TreeResult<Option<NodeId>> {
        let old_parent = self.parent(id);
        match new_parent {
            Some(p) => self.add_child(p, id, Some(index))?,
            None => self.add_top_level(id, Some(index))?,
        }
        tracing::trace!(?id, ?old_parent, ?new_parent, index, "moved node");
        Ok(old_parent)
    }

    /// Detach `id` (and its subtree) from the tree without destroying it.
    ///
    /// The node can be attached again later; until then it is not flattened.
    pub fn detach(&mut self, id: NodeId) -> TreeResult<()> {
        if !self.contains(id) {
            return Err(TreeError::UnknownNode(id));
        }
        self.detach_inner(id);
        Ok(())
    }

    /// Remove `id` and its whole subtree. Their ids become stale.
    pub fn remove(&mut self, id: NodeId) -> TreeResult<()> {
        if !self.contains(id) {
            return Err(TreeError::UnknownNode(id));
        }
        self.detach_inner(id);
        self.arena.free_subtree(id);
        tracing::trace!(?id, "removed subtree");
        Ok(())
    }

    /// Current owner of `id`, if live.
    pub fn owner(&self, id: NodeId) -> Option<Owner> {
        self.arena.owner(id)
    }

    /// Returns true if `id` is listed in the top-level sequence.
    pub fn is_top_level(&self, id: NodeId) -> bool {
        self.owner(id) == Some(Owner::TopLevel)
    }

    /// Flags of `id`, if live.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.arena.flags(id)
    }

    /// Replace the flags of `id`.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) -> TreeResult<()> {
        self.arena.set_flags(id, flags)
    }

    /// Set the collapsed state of `id`, returning the previous state.
    pub fn set_collapsed(&mut self, id: NodeId, collapsed: bool) -> TreeResult<bool> {
        let mut flags = self.flags(id).ok_or(TreeError::UnknownNode(id))?;
        let was = flags.contains(NodeFlags::COLLAPSED);
        flags.set(NodeFlags::COLLAPSED, collapsed);
        self.arena.set_flags(id, flags)?;
        Ok(was)
    }

    /// Flip the collapsed state of `id`, returning the new state.
    pub fn toggle_collapsed(&mut self, id: NodeId) -> TreeResult<bool> {
        let collapsed = !self.is_collapsed(id);
        self.set_collapsed(id, collapsed)?;
        Ok(collapsed)
    }

    /// Number of live nodes, including detached ones.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns true if the tree holds no live node.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Flatten the tree into display order.
    pub fn flatten_ids(&self) -> Vec<NodeId> {
        flatten(self).map(|row| row.id).collect()
    }

    fn detach_inner(&mut self, id: NodeId) {
        if self.arena.unlink(id) == Owner::TopLevel {
            self.top_level.retain(|c| *c != id);
        }
    }

    fn link_top_level(&mut self, id: NodeId, index: Option<usize>) {
        let at = index.map_or(self.top_level.len(), |i| i.min(self.top_level.len()));
        self.top_level.insert(at, id);
        if let Some(n) = self.arena.get_mut(id) {
            n.owner = Owner::TopLevel;
        }
    }
}

impl TreeShape for Tree {
    fn top_level(&self) -> &[NodeId] {
        &self.top_level
    }

    fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id)
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.parent_of(id)
    }

    fn children(&self, id: NodeId) -> &[NodeId] {
        self.arena.children(id)
    }

    fn is_collapsed(&self, id: NodeId) -> bool {
        self.flags(id)
            .is_some_and(|f| f.contains(NodeFlags::COLLAPSED))
    }
}
