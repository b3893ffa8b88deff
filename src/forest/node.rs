//! Arena-backed forest nodes
//!
//! Every account lives in a [`ForestNode`] stored in a [`ChartArena`] and is
//! addressed by a stable [`NodeId`]. A node links to its first child and to
//! its next sibling, so the children of a node form an ordered singly-linked
//! chain:
//!
//! ```text
//!     1000                1000
//!    /  |  \       =>      |
//! 1100 1200 1300          1100 -> 1200 -> 1300
//! ```
//!
//! Traversals use explicit stacks, so very wide or deep charts never recurse.
//! Nodes are only ever appended; teardown drops the whole arena.

use tracing::debug;

use super::hierarchy;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountNumber, AccountRecord, Money, Posting};

/// Stable index of a node inside its arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One account plus its first-child / next-sibling links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForestNode {
    record: AccountRecord,
    first_child: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

impl ForestNode {
    fn new(record: AccountRecord) -> Self {
        Self {
            record,
            first_child: None,
            next_sibling: None,
        }
    }

    pub fn record(&self) -> &AccountRecord {
        &self.record
    }

    pub fn number(&self) -> AccountNumber {
        self.record.number
    }

    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }

    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }

    pub fn has_sibling(&self) -> bool {
        self.next_sibling.is_some()
    }
}

/// Owner of every node in a forest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartArena {
    nodes: Vec<ForestNode>,
}

impl ChartArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every node; all previously issued ids become invalid
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Allocate a detached node
    pub fn alloc(&mut self, record: AccountRecord) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ForestNode::new(record));
        id
    }

    /// Access a node. A dangling id is an internal invariant violation.
    pub fn node(&self, id: NodeId) -> &ForestNode {
        &self.nodes[id.0]
    }

    pub fn record(&self, id: NodeId) -> &AccountRecord {
        &self.node(id).record
    }

    pub(crate) fn record_mut(&mut self, id: NodeId) -> &mut AccountRecord {
        &mut self.nodes[id.0].record
    }

    /// Iterate the child chain of `parent` in ascending id order
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        Children {
            arena: self,
            next: self.node(parent).first_child,
        }
    }

    /// Depth-first search: the node, then its child subtree, then its sibling
    /// chain. First match wins.
    pub fn find_by_id(&self, start: Option<NodeId>, number: AccountNumber) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = start.into_iter().collect();

        while let Some(current) = stack.pop() {
            let node = self.node(current);
            if node.number() == number {
                return Some(current);
            }
            if let Some(sibling) = node.next_sibling {
                stack.push(sibling);
            }
            if let Some(child) = node.first_child {
                stack.push(child);
            }
        }

        None
    }

    /// Insert a new node into `parent`'s child chain, keeping ids ascending
    pub fn insert_child_sorted(&mut self, parent: NodeId, record: AccountRecord) -> NodeId {
        let number = record.number;
        let first = self.node(parent).first_child;

        match first {
            Some(head) if self.node(head).number() < number => {
                let mut current = head;
                while let Some(next) = self.node(current).next_sibling {
                    if self.node(next).number() >= number {
                        break;
                    }
                    current = next;
                }
                self.insert_sibling_sorted(current, record)
            }
            head => {
                let id = self.alloc(record);
                self.nodes[id.0].next_sibling = head;
                self.nodes[parent.0].first_child = Some(id);
                id
            }
        }
    }

    /// Insert a new node into the sibling chain that follows `node`, keeping
    /// ids ascending
    pub fn insert_sibling_sorted(&mut self, node: NodeId, record: AccountRecord) -> NodeId {
        let number = record.number;
        let following = self.node(node).next_sibling;

        match following {
            Some(head) if self.node(head).number() < number => {
                let mut current = head;
                while let Some(next) = self.node(current).next_sibling {
                    if self.node(next).number() >= number {
                        break;
                    }
                    current = next;
                }
                let id = self.alloc(record);
                self.nodes[id.0].next_sibling = self.nodes[current.0].next_sibling;
                self.nodes[current.0].next_sibling = Some(id);
                id
            }
            head => {
                let id = self.alloc(record);
                self.nodes[id.0].next_sibling = head;
                self.nodes[node.0].next_sibling = Some(id);
                id
            }
        }
    }

    /// Attach `record` below its implied parent inside the tree rooted at `root`
    pub fn attach_account(&mut self, root: NodeId, record: AccountRecord) -> LedgerResult<NodeId> {
        let number = record.number;

        if self.find_by_id(Some(root), number).is_some() {
            return Err(LedgerError::Duplicate {
                number: number.get(),
            });
        }

        let candidates = hierarchy::parent_candidates(number);
        if candidates.is_empty() {
            return Err(LedgerError::invalid_parent(
                number.get(),
                "a single-digit account heads its own hierarchy",
            ));
        }

        let parent = candidates
            .iter()
            .find_map(|candidate| self.find_by_id(Some(root), *candidate))
            .ok_or_else(|| {
                LedgerError::invalid_parent(
                    number.get(),
                    format!("parent {} does not exist", candidates[0]),
                )
            })?;

        debug!(account = %number, parent = %self.node(parent).number(), "attaching account");
        Ok(self.insert_child_sorted(parent, record))
    }

    /// Nodes from `root` down to, but excluding, `target`. `None` when
    /// `target` is not `root` or one of its descendants.
    pub fn ancestors(&self, root: NodeId, target: NodeId) -> Option<Vec<NodeId>> {
        if root == target {
            return Some(Vec::new());
        }

        let mut path = vec![root];
        let mut stack: Vec<(NodeId, usize)> = Vec::new();
        if let Some(child) = self.node(root).first_child {
            stack.push((child, 1));
        }

        while let Some((current, depth)) = stack.pop() {
            path.truncate(depth);
            if current == target {
                return Some(path);
            }
            path.push(current);

            let node = self.node(current);
            if let Some(sibling) = node.next_sibling {
                stack.push((sibling, depth));
            }
            if let Some(child) = node.first_child {
                stack.push((child, depth + 1));
            }
        }

        None
    }

    /// Ancestor distance of `node` from `root`: 0 when they are the same node
    pub fn level(&self, root: NodeId, node: NodeId) -> Option<usize> {
        self.ancestors(root, node).map(|path| path.len())
    }

    /// Apply `delta` to `node` and to every ancestor reachable from `root`.
    /// Returns the number of ancestors updated. Every new balance is checked
    /// before any is written, so an overflow leaves the tree untouched.
    pub fn propagate(&mut self, root: NodeId, node: NodeId, delta: Money) -> LedgerResult<usize> {
        let ancestors = self.ancestors(root, node).unwrap_or_default();

        let mut updates = Vec::with_capacity(ancestors.len() + 1);
        for id in std::iter::once(node).chain(ancestors.iter().copied()) {
            let record = self.record(id);
            let balance = record
                .balance
                .checked_add(delta)
                .ok_or(LedgerError::BalanceOverflow {
                    number: record.number.get(),
                })?;
            updates.push((id, balance));
        }

        for (id, balance) in updates {
            self.record_mut(id).balance = balance;
        }
        Ok(ancestors.len())
    }

    /// Append `posting` to `node` and cascade its effect up the hierarchy
    pub fn post_and_propagate(
        &mut self,
        root: NodeId,
        node: NodeId,
        posting: Posting,
    ) -> LedgerResult<usize> {
        let delta = posting.signed_amount();
        let updated = self.propagate(root, node, delta)?;
        self.record_mut(node).replay_posting(posting);
        debug!(
            account = %self.node(node).number(),
            %delta,
            ancestors = updated,
            "posted"
        );
        Ok(updated)
    }

    /// Deep copy of `node` and its descendants into a fresh arena. The copy's
    /// root has no siblings.
    pub fn copy_subtree(&self, node: NodeId) -> (ChartArena, NodeId) {
        let mut copy = ChartArena::new();
        let new_root = copy.alloc(self.record(node).clone());
        let mut stack = vec![(node, new_root)];

        while let Some((source, target)) = stack.pop() {
            let mut previous: Option<NodeId> = None;
            for child in self.children(source) {
                let copied = copy.alloc(self.record(child).clone());
                match previous {
                    Some(prev) => copy.nodes[prev.0].next_sibling = Some(copied),
                    None => copy.nodes[target.0].first_child = Some(copied),
                }
                previous = Some(copied);
                stack.push((child, copied));
            }
        }

        (copy, new_root)
    }

    /// Pre-order walk of the tree under `root` as `(level, node)` pairs.
    /// Children come out in chain (ascending) order.
    pub fn preorder(&self, root: NodeId) -> Vec<(usize, NodeId)> {
        let mut out = Vec::new();
        let mut stack = vec![(root, 0usize)];

        while let Some((current, level)) = stack.pop() {
            out.push((level, current));
            let children: Vec<NodeId> = self.children(current).collect();
            for child in children.into_iter().rev() {
                stack.push((child, level + 1));
            }
        }

        out
    }
}

/// Iterator over a child chain
pub struct Children<'a> {
    arena: &'a ChartArena,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.arena.node(current).next_sibling;
        Some(current)
    }
}
