//! Organisational hierarchy.
//!
//! This module rebuilds a management forest from a flat employee list using
//! rank and department, with fallback placement so every employee appears
//! exactly once.

mod builder;
mod node;

pub use builder::{build_from_store, build_hierarchy, can_manage};
pub use node::{HierarchyNode, forest_ids};
