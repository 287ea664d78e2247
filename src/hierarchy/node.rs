//! Management tree node.

use serde::{Deserialize, Serialize};

use crate::models::Employee;

/// An employee and the employees reporting to them.
///
/// Nodes are rebuilt on every call to [`build_hierarchy`]; the employee id
/// is the only identity they carry.
///
/// [`build_hierarchy`]: super::build_hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyNode {
    /// The employee at this position in the tree.
    pub employee: Employee,
    /// Direct reports, in input order.
    #[serde(default)]
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    /// Wraps an employee in a node with no reports.
    pub fn new(employee: Employee) -> Self {
        Self {
            employee,
            children: Vec::new(),
        }
    }

    /// The id of the employee at this node.
    pub fn id(&self) -> &str {
        &self.employee.id
    }

    /// Number of nodes in this subtree, including this one.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(HierarchyNode::size).sum::<usize>()
    }

    /// Number of levels in this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(HierarchyNode::depth)
            .max()
            .unwrap_or(0)
    }

    /// Finds the node for `id` in this subtree.
    pub fn find(&self, id: &str) -> Option<&HierarchyNode> {
        if self.id() == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Employee ids in this subtree, in pre-order.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids = Vec::with_capacity(self.size());
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids<'a>(&'a self, ids: &mut Vec<&'a str>) {
        ids.push(self.id());
        for child in &self.children {
            child.collect_ids(ids);
        }
    }
}

/// Employee ids across a whole forest, in pre-order.
pub fn forest_ids(forest: &[HierarchyNode]) -> Vec<&str> {
    forest.iter().flat_map(HierarchyNode::ids).collect()
}
