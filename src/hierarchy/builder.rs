//! Reconstructs the management tree from a flat employee list.
//!
//! Every employee is placed under their nearest eligible superior:
//!
//! - a CEO can manage anyone ranked below CEO, regardless of department;
//! - a Manager can manage a Dept. Head of the same department;
//! - a Dept. Head can manage Employees and Interns of the same department.
//!
//! Among all eligible superiors the one with the lowest rank wins, so an
//! employee lands under their department head rather than directly under the
//! CEO. Equal ranks never manage each other; when several candidates share
//! the winning rank, the first in input order wins.
//!
//! The parent search compares every pair of employees, O(n²) per build. That
//! is fine for an HR roster and keeps the nearest-rank rule easy to verify.

use tracing::{debug, warn};

use crate::error::EngineResult;
use crate::models::{Employee, Position};
use crate::store::EmployeeRecordStore;

use super::HierarchyNode;

/// Returns true if `parent` may directly manage `child`.
///
/// # Example
///
/// ```
/// use hr_engine::hierarchy::can_manage;
/// use hr_engine::models::{Employee, Position};
///
/// let head = Employee::new("dh", "Dana", Position::DeptHead, "Sales");
/// let rep = Employee::new("e1", "Eli", Position::Employee, "Sales");
/// let other = Employee::new("e2", "Fay", Position::Employee, "Support");
///
/// assert!(can_manage(&head, &rep));
/// assert!(!can_manage(&head, &other));
/// ```
pub fn can_manage(parent: &Employee, child: &Employee) -> bool {
    if !parent.position.outranks(child.position) {
        return false;
    }

    let same_department = parent.department == child.department;
    match parent.position {
        Position::Ceo => true,
        Position::Manager => child.position == Position::DeptHead && same_department,
        Position::DeptHead => {
            matches!(child.position, Position::Employee | Position::Intern) && same_department
        }
        Position::Employee | Position::Intern => false,
    }
}

/// Finds the nearest eligible superior for `employees[child]`.
fn find_parent(employees: &[Employee], child: usize) -> Option<usize> {
    let child_employee = &employees[child];
    let mut best: Option<usize> = None;

    for (candidate, employee) in employees.iter().enumerate() {
        if candidate == child || !can_manage(employee, child_employee) {
            continue;
        }
        let closer = match best {
            Some(current) => employee.position < employees[current].position,
            None => true,
        };
        if closer {
            best = Some(candidate);
        }
    }

    best
}

/// Builds the management forest for a flat list of employees.
///
/// Every input employee appears exactly once in the result. Employees with
/// no eligible superior are attached under the first CEO; CEOs without a
/// superior, and everyone when there is no CEO at all, become roots.
///
/// # Example
///
/// ```
/// use hr_engine::hierarchy::build_hierarchy;
/// use hr_engine::models::{Employee, Position};
///
/// let employees = vec![
///     Employee::new("ceo", "Cara", Position::Ceo, "Board"),
///     Employee::new("dh", "Dana", Position::DeptHead, "Sales"),
///     Employee::new("e1", "Eli", Position::Employee, "Sales"),
/// ];
///
/// let forest = build_hierarchy(&employees);
/// assert_eq!(forest.len(), 1);
/// assert_eq!(forest[0].ids(), vec!["ceo", "dh", "e1"]);
/// ```
pub fn build_hierarchy(employees: &[Employee]) -> Vec<HierarchyNode> {
    let count = employees.len();
    let first_ceo = employees.iter().position(Employee::is_ceo);

    let mut parents: Vec<Option<usize>> = vec![None; count];
    for (child, employee) in employees.iter().enumerate() {
        parents[child] = match find_parent(employees, child) {
            Some(parent) => Some(parent),
            None if employee.is_ceo() => None,
            None => first_ceo.filter(|&ceo| ceo != child),
        };
        debug!(
            employee_id = %employee.id,
            parent_id = parents[child].map(|p| employees[p].id.as_str()).unwrap_or("-"),
            "Placed employee"
        );
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); count];
    let mut roots = Vec::new();
    for (child, parent) in parents.iter().enumerate() {
        match parent {
            Some(parent) => children[*parent].push(child),
            None => roots.push(child),
        }
    }

    // Integrity pass: anything not reachable from a root is re-homed.
    let mut reached = vec![false; count];
    for &root in &roots {
        mark_reachable(root, &children, &mut reached);
    }
    let ceo_root = roots.iter().copied().find(|&root| employees[root].is_ceo());
    for index in 0..count {
        if reached[index] {
            continue;
        }
        warn!(
            employee_id = %employees[index].id,
            "Employee unreachable from any root; re-attaching"
        );
        match ceo_root {
            Some(root) => children[root].push(index),
            None => roots.push(index),
        }
        mark_reachable(index, &children, &mut reached);
    }

    let mut placed = vec![false; count];
    let mut forest = Vec::with_capacity(roots.len());
    for root in roots {
        if !placed[root] {
            forest.push(materialize(root, employees, &children, &mut placed));
        }
    }
    forest
}

fn mark_reachable(start: usize, children: &[Vec<usize>], reached: &mut [bool]) {
    let mut stack = vec![start];
    while let Some(index) = stack.pop() {
        if reached[index] {
            continue;
        }
        reached[index] = true;
        stack.extend(children[index].iter().copied().filter(|&c| !reached[c]));
    }
}

fn materialize(
    index: usize,
    employees: &[Employee],
    children: &[Vec<usize>],
    placed: &mut [bool],
) -> HierarchyNode {
    placed[index] = true;
    let mut node = HierarchyNode::new(employees[index].clone());
    for &child in &children[index] {
        if !placed[child] {
            node.children
                .push(materialize(child, employees, children, placed));
        }
    }
    node
}

/// Builds the forest from a fresh snapshot of the store's employees.
pub fn build_from_store(store: &dyn EmployeeRecordStore) -> EngineResult<Vec<HierarchyNode>> {
    let employees = store.list_employees()?;
    Ok(build_hierarchy(&employees))
}
