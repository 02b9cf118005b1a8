use super::TreeFloat;
use super::node::{Node, NodeId};
use slotmap::SlotMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Default, Clone)]
pub struct Tree {
    nodes: SlotMap<NodeId, Node>,
    first_node_id: Option<NodeId>,
}

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Parent node {0:?} does not exist.")]
    ParentNodeDoesNotExist(NodeId),
    #[error("Tree validation failed: {0}.")]
    InvalidTree(String),
}

impl Tree {
    // =========================================================================
    // Construction & Validation
    // =========================================================================

    /// Inserts `node` under `parent_node_id`, or as a parentless node when
    /// `parent_node_id` is `None`. The node is appended after any children
    /// the parent already has.
    pub fn add_node(
        &mut self,
        mut node: Node,
        parent_node_id: Option<NodeId>,
    ) -> Result<NodeId, TreeError> {
        if let Some(parent_node_id_value) = parent_node_id
            && !self.node_exists(parent_node_id)
        {
            return Err(TreeError::ParentNodeDoesNotExist(
                parent_node_id_value,
            ));
        }

        node.set_parent_id(parent_node_id);
        let node_id = self.nodes.insert(node);

        if let Some(parent_node) = self.node_mut(parent_node_id) {
            parent_node.push_child_id(node_id);
        }

        Ok(node_id)
    }

    /// Finds the first node.
    ///
    /// A valid tree has exactly one node without a parent; that node becomes
    /// [Tree::first_node_id] and loses any branch length.
    pub fn validate(&mut self) -> Result<NodeId, TreeError> {
        let parentless: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.parent_id().is_none())
            .map(|(node_id, _)| node_id)
            .collect();

        let first_node_id = match parentless.as_slice() {
            [node_id] => *node_id,
            ids => {
                return Err(TreeError::InvalidTree(format!(
                    "expected exactly one parentless node, found {}",
                    ids.len()
                )));
            }
        };

        self.first_node_id = Some(first_node_id);

        if let Some(node) = self.node_mut(self.first_node_id) {
            node.set_branch_length(None);
        }

        Ok(first_node_id)
    }

    // =========================================================================
    // Tree Properties
    // =========================================================================

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // =========================================================================
    // Node Access
    // =========================================================================

    pub fn node(&self, node_id: Option<NodeId>) -> Option<&Node> {
        node_id.and_then(|node_id| self.nodes.get(node_id))
    }

    pub fn node_mut(&mut self, node_id: Option<NodeId>) -> Option<&mut Node> {
        node_id.and_then(|node_id| self.nodes.get_mut(node_id))
    }

    pub fn node_exists(&self, node_id: Option<NodeId>) -> bool {
        self.node(node_id).is_some()
    }

    pub fn first_node_id(&self) -> Option<NodeId> {
        self.first_node_id
    }

    pub fn name(&self, node_id: &NodeId) -> Option<Arc<str>> {
        self.nodes.get(*node_id).and_then(|node| node.name().cloned())
    }

    pub fn branch_length(&self, node_id: &NodeId) -> Option<TreeFloat> {
        self.nodes.get(*node_id).and_then(|node| node.branch_length())
    }

    // =========================================================================
    // Tree Traversal
    // =========================================================================

    pub fn child_ids(&self, node_id: &NodeId) -> &[NodeId] {
        match self.nodes.get(*node_id) {
            Some(node) => node.child_ids(),
            None => &[],
        }
    }

    /// All node ids in preorder: parents before children, siblings in the
    /// order they were added. Empty for a tree that has not been validated.
    pub fn node_ids_all(&self) -> Vec<NodeId> {
        let mut rv: Vec<NodeId> = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.first_node_id.into_iter().collect();
        while let Some(node_id) = stack.pop() {
            rv.push(node_id);
            stack.extend(self.child_ids(&node_id).iter().rev());
        }
        rv
    }

    // =========================================================================
    // Renaming
    // =========================================================================

    /// Visits every named node and replaces its name with whatever `rename`
    /// returns for it. Returns the number of nodes renamed.
    pub fn rename_nodes<F>(&mut self, mut rename: F) -> usize
    where
        F: FnMut(&str) -> Option<Arc<str>>,
    {
        let mut renamed: usize = 0;
        for node in self.nodes.values_mut() {
            let new_name = node.name().and_then(|name| rename(name.as_ref()));
            let Some(new_name) = new_name else { continue };
            node.set_name(Some(new_name));
            renamed += 1;
        }
        renamed
    }
}
