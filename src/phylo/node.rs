use super::TreeFloat;
use slotmap::new_key_type;
use std::sync::Arc;

new_key_type! { pub struct NodeId; }

/// One vertex of a [Tree](super::Tree).
///
/// Holds an optional label and branch length plus the links to its parent
/// and children. Links are only set through the owning tree.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Node {
    parent_id: Option<NodeId>,
    child_ids: Vec<NodeId>,
    name: Option<Arc<str>>,
    branch_length: Option<TreeFloat>,
}

impl Node {
    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent_id
    }

    pub(super) fn set_parent_id(&mut self, parent_id: Option<NodeId>) {
        self.parent_id = parent_id;
    }

    /// Children in the order they were attached.
    pub fn child_ids(&self) -> &[NodeId] {
        &self.child_ids
    }

    pub(super) fn push_child_id(&mut self, child_id: NodeId) {
        self.child_ids.push(child_id);
    }

    pub fn name(&self) -> Option<&Arc<str>> {
        self.name.as_ref()
    }

    /// An empty label is stored as no label.
    pub fn set_name(&mut self, name: Option<Arc<str>>) {
        self.name = name.filter(|name| !name.is_empty());
    }

    pub fn branch_length(&self) -> Option<TreeFloat> {
        self.branch_length
    }

    pub fn set_branch_length(&mut self, branch_length: Option<TreeFloat>) {
        self.branch_length = branch_length;
    }
}
