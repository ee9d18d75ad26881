//! Employee → group assignments gathered during the group pass.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A group an employee belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    pub id: String,
    pub name: String,
}

/// Maps employee id to the groups whose roster listed them, in the order the
/// group pass visited those groups.
///
/// Built append-only by the group pass and handed to the employee pass as a
/// finished value.
#[derive(Debug, Clone, Default)]
pub struct GroupMembershipIndex {
    by_employee: HashMap<String, Vec<GroupRef>>,
}

impl GroupMembershipIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, employee_id: &str, group: GroupRef) {
        self.by_employee
            .entry(employee_id.to_string())
            .or_default()
            .push(group);
    }

    /// Groups for `employee_id`; empty when the employee is in no roster.
    pub fn groups_for(&self, employee_id: &str) -> &[GroupRef] {
        self.by_employee
            .get(employee_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of employees with at least one group.
    pub fn employee_count(&self) -> usize {
        self.by_employee.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_employee.is_empty()
    }
}
