//! Access-rights pass: one record per (employee, assigned role).

use serde::Serialize;
use serde_json::Value;
use verint_api::types::{Employee, ResourceRef, Role};
use verint_api::Client;

use crate::attempt::Diagnostics;
use crate::employees::{parse_employees, NamedRef};
use crate::error::MigrateError;

pub const EMPLOYEE_ROLES: &str = "employee roles";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRightRecord {
    pub employee_id: String,
    pub username: String,
    pub role_name: String,
    pub description: String,
    pub is_admin_role: bool,
    pub is_default: bool,
    pub owning_organization: String,
    pub accessible_organizations: Vec<NamedRef>,
    pub accessible_groups: Vec<NamedRef>,
}

fn named_refs(refs: &[ResourceRef]) -> Vec<NamedRef> {
    refs.iter()
        .map(|r| NamedRef {
            id: r.id.clone(),
            name: r.meta.name.clone().unwrap_or_default(),
        })
        .collect()
}

fn access_right(employee: &Employee, role: Role) -> AccessRightRecord {
    let rel = &role.relationships;
    AccessRightRecord {
        employee_id: employee.id.clone(),
        username: employee.attributes.user.username.clone().unwrap_or_default(),
        owning_organization: rel
            .one("organization")
            .and_then(|org| org.meta.name.clone())
            .unwrap_or_default(),
        accessible_organizations: named_refs(rel.many("organizations")),
        accessible_groups: named_refs(rel.many("groups")),
        role_name: role.attributes.name,
        description: role.attributes.description,
        is_admin_role: role.attributes.is_admin_role,
        is_default: role.attributes.is_default,
    }
}

/// Output of the access-rights pass.
pub struct AccessRightsExtraction {
    pub records: Vec<AccessRightRecord>,
    pub diagnostics: Diagnostics,
}

/// Runs the access-rights pass over an already-fetched `GET /employees`
/// response, calling `on_employee` after each employee's roles are processed.
///
/// An employee whose roles cannot be fetched contributes no records.
pub async fn extract_access_rights<F>(
    client: &Client,
    listing: Value,
    mut on_employee: F,
) -> Result<AccessRightsExtraction, MigrateError>
where
    F: FnMut(&Employee),
{
    let employees = parse_employees(listing)?;
    tracing::info!("Collecting role assignments for {} employees", employees.len());

    let mut diagnostics = Diagnostics::new();
    let mut records = Vec::new();
    for employee in &employees {
        let roles = diagnostics
            .attempt(EMPLOYEE_ROLES, &employee.id, client.employee_roles(&employee.id))
            .await;
        records.extend(roles.data.into_iter().map(|role| access_right(employee, role)));
        on_employee(employee);
    }

    tracing::info!(
        "Access-rights pass complete: {} records, {} employees skipped",
        records.len(),
        diagnostics.count(EMPLOYEE_ROLES)
    );
    Ok(AccessRightsExtraction {
        records,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn access_right_keeps_reference_order() {
        let employee: Employee = serde_json::from_value(json!({
            "id": 5001, "attributes": {"user": {"username": "ghopper"}}
        }))
        .unwrap();
        let role: Role = serde_json::from_value(json!({
            "id": "r1",
            "attributes": {"name": "Supervisor", "isAdminRole": false, "isDefault": true},
            "relationships": {
                "organization": {"data": {"id": "1", "meta": {"name": "Head Office"}}},
                "organizations": {"data": [
                    {"id": "2", "meta": {"name": "Support"}},
                    {"id": 1, "meta": {"name": "Head Office"}}
                ]},
                "groups": {"data": [{"id": "g9"}]}
            }
        }))
        .unwrap();

        let record = access_right(&employee, role);
        assert_eq!(record.employee_id, "5001");
        assert_eq!(record.username, "ghopper");
        assert_eq!(record.owning_organization, "Head Office");
        assert_eq!(
            record.accessible_organizations,
            vec![
                NamedRef { id: "2".into(), name: "Support".into() },
                NamedRef { id: "1".into(), name: "Head Office".into() },
            ]
        );
        assert_eq!(
            record.accessible_groups,
            vec![NamedRef { id: "g9".into(), name: String::new() }]
        );
        assert!(record.is_default);
    }
}
